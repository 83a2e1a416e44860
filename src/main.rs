use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use lumi::core::config;
use lumi::tui;

#[derive(Parser)]
#[command(name = "lumi", about = "Beauty catalog picker and routine advisor")]
struct Args {
    /// Initial category filter (e.g. "skincare")
    #[arg(short, long)]
    category: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to lumi.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("lumi.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("lumi: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.category.as_deref());

    log::info!("Lumi starting up with model: {}", resolved.model_name);

    tui::run(resolved)
}
