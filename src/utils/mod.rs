pub mod format;
pub(crate) mod fs;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, adding the comma-separated `directives`
/// on top of whatever `RUST_LOG` supplies.
pub fn init_tracing_with_filter(directives: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
            match directive.trim().parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(err) => eprintln!("ignoring invalid log directive `{directive}`: {err}"),
            }
        }

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
