use clap::Parser;
use entropy::ScreenGeometry;

#[derive(Parser)]
#[command(name = "entropy")]
#[command(version)]
#[command(about = "Rate potential wallpapers by color temperature and screen fit")]
#[command(after_help = "Examples:
  entropy -i ~/Pictures/wall.png
  entropy -i https://example.com/wall.jpg -v")]
pub(crate) struct Cli {
    /// Image to rate: a local path or an http(s) URL
    #[arg(short, long, value_name = "PATH_OR_URL")]
    pub(crate) image: String,

    /// Print the full technical breakdown
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Rate against this resolution instead of querying the display
    #[arg(long, value_name = "WIDTHxHEIGHT", env = "ENTROPY_SCREEN")]
    pub(crate) screen: Option<ScreenGeometry>,

    /// Timeout in seconds for fetching remote images
    #[arg(long, value_name = "SECS", env = "ENTROPY_FETCH_TIMEOUT", default_value_t = entropy::config::DEFAULT_FETCH_TIMEOUT_SECS)]
    pub(crate) timeout: u64,

    /// Scan pixels on a single thread
    #[arg(long)]
    pub(crate) sequential: bool,

    /// Print the rating as JSON
    #[arg(long)]
    pub(crate) json: bool,
}
