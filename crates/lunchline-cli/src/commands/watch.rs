use std::time::Duration;

use clap::Args;
use lunchline_core::{run_ticker, Config, Event, UiHook, UiUpdate};

use super::{build_session, OrderArgs};

#[derive(Args, Debug, Clone, Default)]
pub struct WatchOptions {
    /// Seconds between evaluations (defaults to ticker.interval_secs)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    pub duration: Option<u64>,
}

/// Prints every session event as one JSON line.
struct JsonLinesHook;

impl UiHook for JsonLinesHook {
    fn on_update(&mut self, _update: UiUpdate<'_>) {}

    fn on_event(&mut self, event: &Event) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
        }
    }
}

pub fn run(args: OrderArgs, options: WatchOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let period = Duration::from_secs(options.interval.unwrap_or(config.ticker.interval_secs));
    let mut session = build_session(&config, &args, JsonLinesHook)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let ticks = runtime.block_on(async {
        let shutdown = async {
            match options.duration {
                Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
                None => {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %e, "failed to listen for Ctrl-C");
                    }
                }
            }
        };
        run_ticker(&mut session, period, shutdown).await
    });

    tracing::info!(ticks, "watch finished");
    Ok(())
}
