use tracing_subscriber::EnvFilter;

/// Initializes `tracing` logging with options from the environment variable
/// given in the `env` parameter.
///
/// We force users to provide a variable name so it can be different per
/// binary. We encourage it to be the binary name plus `_LOG`, e.g.
/// `CATS_DEMO_LOG=debug` to see every request the client sends.
///
/// Initializing twice is a no-op, so tests can call this unconditionally.
pub fn initialize_logging(env: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(env))
        .try_init();
}
