use crate::advice::AdviceService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// `config` is read-only for the process lifetime; the advice service holds no
/// mutable state of its own, so concurrent requests never contend.
#[derive(Clone)]
pub struct AppState {
    pub advice: AdviceService,
    /// Kept for handlers that need runtime settings (none read it today).
    #[allow(dead_code)]
    pub config: Config,
}
