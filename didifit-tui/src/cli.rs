// didifit-tui/src/cli.rs
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly workout planner and body measurement tracker", long_about = None)]
pub struct Cli {
    /// Path of the SQLite database holding the saved records
    #[arg(long, env = "DIDIFIT_DB_PATH")]
    pub db: Option<PathBuf>,
    /// Directory containing config.toml
    #[arg(long, env = "DIDIFIT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}
