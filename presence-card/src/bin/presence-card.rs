use chrono::Utc;
use presence_card::card;
use presence_card::controller::PollingController;
use presence_card::fetcher::HttpFetcher;
use presence_card::preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use presence_card::{Command, Config, Result};

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
pub async fn main() -> Result<()> {
    let config = Config::load();

    configure_logging(&config);

    info!(url = %config.presence_url, "Loaded config");

    let fetcher = HttpFetcher::new(&config)?;
    let controller = PollingController::start(fetcher, preferences(&config));

    let mut state = controller.subscribe();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            res = state.changed() => {
                if res.is_err() {
                    break;
                }
            }
            _ = redraw.tick() => {}
            line = stdin.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                if line.trim().is_empty() {
                    continue;
                }

                match Command::parse(&line) {
                    Ok(Command::Refresh) => controller.trigger_refresh(),
                    Ok(Command::ToggleAuto) => {
                        let enabled = state.borrow().auto_refresh_enabled;
                        controller.set_auto_refresh(!enabled);
                    }
                    Ok(Command::SetInterval(millis)) => {
                        if let Err(e) = controller.set_interval_millis(millis) {
                            warn!(error = %e, "Failed to change refresh interval");
                        }
                    }
                    Ok(Command::Quit) => break,
                    Err(e) => warn!(error = %e, "Ignoring input"),
                }
            }
        }

        let frame = card::render(&state.borrow_and_update(), Utc::now());
        print!("{}{}", CLEAR_SCREEN, frame);
    }

    info!("Shutting down");
    Ok(())
}

fn preferences(config: &Config) -> Box<dyn PreferenceStore> {
    let path = config
        .preferences_path
        .clone()
        .or_else(FilePreferenceStore::default_path);

    match path {
        Some(path) => {
            info!(path = %path.display(), "Using preferences file");
            Box::new(FilePreferenceStore::new(path))
        }
        None => {
            warn!("No config directory found, preferences will not be persisted");
            Box::new(MemoryPreferenceStore::default())
        }
    }
}

// Logs go to stderr so they don't interleave with the card on stdout.
fn configure_logging(config: &Config) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if config.json_log {
        builder.json().init();
    } else {
        builder.init();
    }
}
