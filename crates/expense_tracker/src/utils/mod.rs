pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: [&str; 3] = [
    "expense_tracker=info",
    "expense_core=warn",
    "expense_storage_json=warn",
];

/// Initializes the global tracing subscriber. Logs go to stderr so script output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(default_filter())
            .with_writer(std::io::stderr)
            .init();
    });
}

/// `RUST_LOG` plus the defaults for the app and its library crates.
fn default_filter() -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for directive in DEFAULT_DIRECTIVES {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}
