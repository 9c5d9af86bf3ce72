use tracing_subscriber::EnvFilter;

/// Default filter: verbose for folio crates, quiet for everything else.
pub const DEFAULT_FILTER: &str = "info,folio_core=debug,folio_ui=debug";

/// Install a global fmt subscriber using `RUST_LOG` when set, otherwise
/// [`DEFAULT_FILTER`].
///
/// Meant for the host glue or a test binary. A second call is ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install a global fmt subscriber with an explicit filter directive.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("tracing subscriber already installed");
    }
}
