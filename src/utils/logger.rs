use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directive used when `RUST_LOG` is unset: the crate at `level`, everything else at info.
fn default_directive(level: &str) -> String {
    format!("athletics_records={},info", level)
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

fn plain_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(filter(level))
        .with(plain_layer().compact())
        .init();
}

/// JSON lines for the batch report job, so scheduled runs can be grepped.
pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(plain_layer().json())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        assert_eq!(default_directive("debug"), "athletics_records=debug,info");
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(default_directive(level)).is_ok());
        }
    }
}
