//! Process-wide registry installed once at startup.

use super::RuleRegistry;
use crate::validation::error::{RegistryError, RegistryResult};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<RuleRegistry>> = OnceLock::new();

/// Installs a sealed registry as the process-wide registry.
///
/// # Errors
///
/// Returns [`RegistryError::RegistryNotSealed`] for an open registry and
/// [`RegistryError::GlobalAlreadyInstalled`] on a second install.
pub fn install_global(registry: RuleRegistry) -> RegistryResult<Arc<RuleRegistry>> {
    if !registry.is_sealed() {
        return Err(RegistryError::RegistryNotSealed);
    }
    let fields = registry.len();
    let shared = Arc::new(registry);
    GLOBAL
        .set(Arc::clone(&shared))
        .map_err(|_| RegistryError::GlobalAlreadyInstalled)?;
    tracing::info!(fields, "installed global rule registry");
    Ok(shared)
}

/// Returns the process-wide registry, if one has been installed.
#[must_use]
pub fn global() -> Option<Arc<RuleRegistry>> {
    GLOBAL.get().cloned()
}
