//! Environment-driven kernel configuration.

use std::env;
use std::sync::OnceLock;

/// Global configuration, read once per process.
static KERNEL_CONFIG: OnceLock<KernelConfig> = OnceLock::new();

/// Runtime knobs honored by kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelConfig {
    /// Pin selection to the scalar fallback, ignoring packed kernels even
    /// when the host supports them. Set via `QMUL_FORCE_SCALAR=1`.
    pub force_scalar: bool,
}

impl KernelConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let force_scalar = env::var("QMUL_FORCE_SCALAR")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self { force_scalar }
    }

    /// The process-wide configuration, cached on first access.
    pub fn get() -> Self {
        *KERNEL_CONFIG.get_or_init(Self::from_env)
    }
}
