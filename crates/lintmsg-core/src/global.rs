//! Process-wide render configuration.
//!
//! Every rule module shares one [`RenderConfig`], initialised from the
//! environment on first access and changed only through the setters here.
//! A setter's effect is visible to every render call issued after it.
//! The lock makes this safe for rules that report from worker threads.

use std::sync::{OnceLock, PoisonError, RwLock};

use crate::config::RenderConfig;
use crate::environment::{self, EnvSnapshot};
use crate::types::RenderMode;

static GLOBAL_CONFIG: OnceLock<RwLock<RenderConfig>> = OnceLock::new();

fn global() -> &'static RwLock<RenderConfig> {
    GLOBAL_CONFIG.get_or_init(|| RwLock::new(RenderConfig::detect(&EnvSnapshot::from_process())))
}

fn update(f: impl FnOnce(&mut RenderConfig)) {
    let mut guard = global().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard);
}

/// Returns a copy of the current process-wide configuration.
#[must_use]
pub fn render_config() -> RenderConfig {
    *global().read().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the active render mode.
#[must_use]
pub fn resolve_mode() -> RenderMode {
    render_config().mode
}

/// Returns whether compression is enabled.
#[must_use]
pub fn compression_enabled() -> bool {
    render_config().compression
}

/// Forces the render mode for the rest of the process.
pub fn set_mode(mode: RenderMode) {
    tracing::debug!("Render mode set to {}", mode);
    update(|config| config.mode = mode);
}

/// Enables or disables structured-output compression.
pub fn set_compression(enabled: bool) {
    tracing::debug!("Compression set to {}", enabled);
    update(|config| config.compression = enabled);
}

/// Replaces the whole configuration, e.g. with one resolved from settings.
pub fn install(config: RenderConfig) {
    tracing::debug!(
        "Installing render config: mode={}, compression={}",
        config.mode,
        config.compression
    );
    update(|current| *current = config);
}

/// Re-runs auto-detection against the process environment and clears
/// compression. Returns the resolved mode.
pub fn reset_to_auto_detected() -> RenderMode {
    reset_with(&EnvSnapshot::from_process())
}

/// Like [`reset_to_auto_detected`], but against an explicit snapshot.
pub fn reset_with(env: &EnvSnapshot) -> RenderMode {
    let mode = environment::detect(env).mode;
    install(RenderConfig::new(mode));
    mode
}
