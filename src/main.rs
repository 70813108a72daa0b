use clap::Parser;
use log::{info, warn};
use parley::core::config::{self, CliOverrides, ParleyConfig};
use parley::core::theme::Theme;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat surface with simulated replies")]
struct Args {
    /// Colour theme to start in (overrides config and PARLEY_THEME)
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Delay before the simulated reply, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Falling back to default config: {}", e);
            ParleyConfig::default()
        }
    };

    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            theme: args.theme,
            reply_delay_ms: args.reply_delay_ms,
        },
    );

    info!(
        "Parley starting up (theme={}, reply_delay={}ms)",
        resolved.theme.label(),
        resolved.reply_delay.as_millis()
    );

    parley::tui::run(resolved)
}
