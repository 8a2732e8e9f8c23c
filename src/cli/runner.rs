use anyhow::{Context, Result};
use clap::Parser;
use entropy::screen::{self, FixedProbe, ScreenProbe};
use entropy::{report, Scorer, ScoringConfig};
use tracing_subscriber::EnvFilter;

use super::Cli;

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ScoringConfig {
        verbose: cli.verbose,
        parallel: !cli.sequential,
        fetch_timeout_secs: cli.timeout,
        ..ScoringConfig::default()
    };

    let probes: Vec<Box<dyn ScreenProbe>> = match cli.screen {
        Some(geometry) => vec![Box::new(FixedProbe(geometry))],
        None => screen::default_probes(),
    };
    let screen = screen::detect_screen(&probes)?;

    let scorer = Scorer::new(config);
    let rating = scorer
        .rate(&cli.image, screen)
        .with_context(|| format!("Failed to rate {}", cli.image))?;

    if cli.json {
        println!("{}", report::render_json(&rating)?);
    } else {
        print!("{}", report::render_text(&rating, cli.verbose));
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
