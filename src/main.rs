use clap::Parser;
use dancefloor::core::config;
use dancefloor::tui::{self, Screen};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "dancefloor", about = "Find dance events near you")]
struct Args {
    /// Screen to open on startup
    #[arg(short, long, default_value_t, value_enum)]
    screen: Screen,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to dancefloor.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("dancefloor.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Dancefloor starting up on screen: {:?}", args.screen);

    let resolved = match config::load_config() {
        Ok(loaded) => config::resolve(&loaded),
        Err(e) => {
            eprintln!("{e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    tui::run(resolved, args.screen)
}
