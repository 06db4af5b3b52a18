use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than once is harmless.
pub fn init(default_level: LevelFilter) {
    let filter = EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}
