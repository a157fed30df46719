// 📜 Telemetry - tracing subscriber setup for the binary
//
// `RUST_LOG` wins when set; otherwise the supplied level applies.
// Logs go to stderr so `list --json` output stays clean on stdout.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log lines end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    /// The terminal UI owns the screen; log lines would corrupt it
    Discard,
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(json: bool, level: Level, output: LogOutput) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let writer = move || -> Box<dyn std::io::Write> {
        match output {
            LogOutput::Stderr => Box::new(std::io::stderr()),
            LogOutput::Discard => Box::new(std::io::sink()),
        }
    };

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(writer).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(writer))
            .try_init()
            .ok();
    }
}
