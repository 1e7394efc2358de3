use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cuvee")]
#[command(about = "Wine tank blend planning service")]
pub struct CliConfig {
    /// Address the HTTP API listens on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// Fractional tolerance for volume comparisons.
    #[arg(long, default_value = "0.0001")]
    pub tolerance: f64,

    /// Optional TOML settings file; its values override the flags above.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV inventory loaded into the store at startup.
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(long)]
    pub verbose: bool,
}
