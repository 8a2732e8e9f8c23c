use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Command;
use std::str::FromStr;
use tracing::debug;

/// Resolution of the display a wallpaper is rated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Width over height, rounded to two decimal places.
    pub fn aspect_ratio(&self) -> f64 {
        crate::geometry::aspect_ratio(self.width, self.height)
    }
}

impl fmt::Display for ScreenGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenGeometry {
    type Err = String;

    /// Parse "1920x1080" (also accepts "1920 x 1080" and "1920X1080").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let (w, h) = lower
            .split_once('x')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid screen width in '{}'", s))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid screen height in '{}'", s))?;
        if width == 0 || height == 0 {
            return Err(format!("screen dimensions must be positive, got '{}'", s));
        }
        Ok(Self::new(width, height))
    }
}

/// A named output reported by the display server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Screen {
    pub fn new(name: String, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
        }
    }

    pub fn geometry(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.width, self.height)
    }
}

/// One way of asking the host which screens are connected.
pub trait ScreenProbe {
    fn name(&self) -> &'static str;

    fn screens(&self) -> anyhow::Result<Vec<Screen>>;
}

/// A fixed resolution, from configuration or a test fixture
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub ScreenGeometry);

impl ScreenProbe for FixedProbe {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn screens(&self) -> anyhow::Result<Vec<Screen>> {
        Ok(vec![Screen::new("fixed".into(), self.0.width, self.0.height)])
    }
}

/// `niri msg outputs`
#[derive(Debug, Clone, Copy, Default)]
pub struct NiriProbe;

impl ScreenProbe for NiriProbe {
    fn name(&self) -> &'static str {
        "niri"
    }

    fn screens(&self) -> anyhow::Result<Vec<Screen>> {
        parse_niri_output(&run("niri", &["msg", "outputs"])?)
    }
}

/// `wlr-randr` for wlroots compositors
#[derive(Debug, Clone, Copy, Default)]
pub struct WlrRandrProbe;

impl ScreenProbe for WlrRandrProbe {
    fn name(&self) -> &'static str {
        "wlr-randr"
    }

    fn screens(&self) -> anyhow::Result<Vec<Screen>> {
        parse_wlr_randr_output(&run("wlr-randr", &[])?)
    }
}

/// `xrandr -q` on X11; reports the combined virtual screen
#[derive(Debug, Clone, Copy, Default)]
pub struct XrandrProbe;

impl ScreenProbe for XrandrProbe {
    fn name(&self) -> &'static str {
        "xrandr"
    }

    fn screens(&self) -> anyhow::Result<Vec<Screen>> {
        parse_xrandr_output(&run("xrandr", &["-q"])?)
    }
}

/// Probes tried by [`detect_screen`] when no resolution is configured.
pub fn default_probes() -> Vec<Box<dyn ScreenProbe>> {
    vec![
        Box::new(NiriProbe),
        Box::new(WlrRandrProbe),
        Box::new(XrandrProbe),
    ]
}

/// Resolution of the first screen reported by the first probe that works.
pub fn detect_screen(probes: &[Box<dyn ScreenProbe>]) -> Result<ScreenGeometry> {
    let mut tried = Vec::new();

    for probe in probes {
        match probe.screens() {
            Ok(screens) => {
                if let Some(screen) = screens.first() {
                    debug!(
                        probe = probe.name(),
                        screen = %screen.name,
                        width = screen.width,
                        height = screen.height,
                        "detected screen"
                    );
                    return Ok(screen.geometry());
                }
            }
            Err(e) => debug!(probe = probe.name(), error = %e, "screen probe failed"),
        }
        tried.push(probe.name());
    }

    Err(Error::NoScreen(format!(
        "tried {}; pass --screen WIDTHxHEIGHT instead",
        tried.join(", ")
    )))
}

fn run(program: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {}", program))?;

    if !output.status.success() {
        anyhow::bail!("{} exited with {}", program, output.status);
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn parse_size(size: &str) -> Option<(u32, u32)> {
    let (w, h) = size.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn parse_niri_output(output: &str) -> anyhow::Result<Vec<Screen>> {
    let mut screens = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_size: Option<(u32, u32)> = None;

    for line in output.lines() {
        // Output "Description" (DP-2)
        if line.starts_with("Output ") {
            if let (Some(name), Some((w, h))) = (current_name.take(), current_size.take()) {
                screens.push(Screen::new(name, w, h));
            }
            current_name = line
                .rsplit('(')
                .next()
                .and_then(|s| s.strip_suffix(')'))
                .map(String::from);
        }

        // Logical size already accounts for rotation and scale
        let trimmed = line.trim();
        if trimmed.starts_with("Logical size:") {
            current_size = trimmed.split_whitespace().nth(2).and_then(parse_size);
        }
    }

    if let (Some(name), Some((w, h))) = (current_name, current_size) {
        screens.push(Screen::new(name, w, h));
    }

    if screens.is_empty() {
        anyhow::bail!("No screens found in niri output");
    }

    Ok(screens)
}

fn parse_wlr_randr_output(output: &str) -> anyhow::Result<Vec<Screen>> {
    let mut screens = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_size: Option<(u32, u32)> = None;
    let mut current_transform: Option<String> = None;

    let mut flush = |name: Option<String>, size: Option<(u32, u32)>, transform: Option<&str>| {
        if let (Some(name), Some((w, h))) = (name, size) {
            let (w, h) = apply_transform(w, h, transform);
            screens.push(Screen::new(name, w, h));
        }
    };

    for line in output.lines() {
        // DP-1 "Samsung Electric Company" (connected)
        if !line.starts_with(' ') && !line.is_empty() {
            flush(
                current_name.take(),
                current_size.take(),
                current_transform.take().as_deref(),
            );
            current_name = line.split_whitespace().next().map(String::from);
        }

        //   1920x1080 px, 144.000000 Hz (current)
        if line.contains("current") && line.contains("px") {
            current_size = line.split_whitespace().next().and_then(parse_size);
        }

        if line.trim().starts_with("Transform:") {
            current_transform = line.split(':').nth(1).map(|s| s.trim().to_string());
        }
    }
    flush(current_name, current_size, current_transform.as_deref());

    if screens.is_empty() {
        anyhow::bail!("No screens found in wlr-randr output");
    }

    Ok(screens)
}

/// Swap dimensions for 90/270 degree rotations.
fn apply_transform(width: u32, height: u32, transform: Option<&str>) -> (u32, u32) {
    match transform {
        Some("90") | Some("270") | Some("flipped-90") | Some("flipped-270") => (height, width),
        _ => (width, height),
    }
}

fn parse_xrandr_output(output: &str) -> anyhow::Result<Vec<Screen>> {
    // Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767
    let header = output
        .lines()
        .find(|line| line.starts_with("Screen "))
        .context("No Screen line in xrandr output")?;

    let name = header
        .split(':')
        .next()
        .unwrap_or("Screen")
        .trim()
        .to_string();

    let current = header
        .split(',')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("current "))
        .context("No current resolution in xrandr output")?;

    let mut dims = current.split('x').map(|s| s.trim().parse::<u32>());
    match (dims.next(), dims.next()) {
        (Some(Ok(w)), Some(Ok(h))) => Ok(vec![Screen::new(name, w, h)]),
        _ => anyhow::bail!("Unparseable xrandr resolution '{}'", current),
    }
}
