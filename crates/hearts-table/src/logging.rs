use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Stderr logging for the CLI; `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // Tests may have installed a subscriber already; that is fine.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
