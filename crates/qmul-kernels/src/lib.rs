//! Quantized elementwise multiplication kernels
//!
//! Integer-only elementwise multiplication of two affine-quantized `i8`
//! vectors: zero-point correction, widened multiply, fixed-point
//! requantization, activation clamp, narrowing. Packed SIMD paths (AVX2 on
//! x86_64, NEON on aarch64) and the scalar fallback share one element
//! transform, so every path produces bit-identical output.
//!
//! ```no_run
//! use qmul_common::MulParams;
//! use qmul_kernels::{KernelManager, KernelProvider};
//!
//! # fn main() -> qmul_common::Result<()> {
//! let manager = KernelManager::new();
//! let kernel = manager.select_best()?;
//!
//! let input_1 = [10i8, -5];
//! let input_2 = [3i8, 3];
//! let mut output = [0i8; 2];
//! kernel.elementwise_mul_s8(&input_1, &input_2, &mut output, &MulParams::unit_scale())?;
//! # Ok(())
//! # }
//! ```

use qmul_common::{capability_summary, KernelConfig, KernelError, MulParams, Result};
use std::sync::OnceLock;

pub mod cpu;
pub mod fixed_point;


/// Kernel provider trait
///
/// One provider per execution strategy. `elementwise_mul_s8` validates the
/// shared preconditions, then processes `output.len()` elements; all
/// providers are pure with respect to everything but the output slice.
pub trait KernelProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn is_available(&self) -> bool;
    fn elementwise_mul_s8(
        &self,
        input_1: &[i8],
        input_2: &[i8],
        output: &mut [i8],
        params: &MulParams,
    ) -> Result<()>;
}

/// Kernel manager selecting the best available provider, with cached selection
pub struct KernelManager {
    providers: Vec<Box<dyn KernelProvider>>,
    selected: OnceLock<usize>,
}

impl KernelManager {
    /// Build the provider list for this host, honoring `QMUL_FORCE_SCALAR`.
    pub fn new() -> Self {
        Self::with_config(&KernelConfig::get())
    }

    /// Build the provider list for an explicit configuration.
    ///
    /// Providers are ordered best-first; the scalar fallback is always last
    /// and always present.
    pub fn with_config(config: &KernelConfig) -> Self {
        let mut providers: Vec<Box<dyn KernelProvider>> = vec![Box::new(cpu::FallbackKernel)];

        if config.force_scalar {
            log::info!("QMUL_FORCE_SCALAR set, packed kernels disabled");
        } else {
            #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
            {
                if is_x86_feature_detected!("avx2") {
                    providers.insert(0, Box::new(cpu::Avx2Kernel));
                } else {
                    log::debug!("AVX2 not detected, packed kernel unavailable");
                }
            }

            #[cfg(all(target_arch = "aarch64", feature = "neon"))]
            {
                if std::arch::is_aarch64_feature_detected!("neon") {
                    providers.insert(0, Box::new(cpu::NeonKernel));
                } else {
                    log::debug!("NEON not detected, packed kernel unavailable");
                }
            }
        }

        Self { providers, selected: OnceLock::new() }
    }

    /// Select the best available kernel provider with caching
    pub fn select_best(&self) -> Result<&dyn KernelProvider> {
        let selected_idx = self.selected.get_or_init(|| {
            for (i, provider) in self.providers.iter().enumerate() {
                if provider.is_available() {
                    log::info!(
                        "Selected kernel provider: {} ({})",
                        provider.name(),
                        capability_summary()
                    );
                    return i;
                }
            }
            log::error!("No available kernel provider found");
            // Fallback index; the scalar provider is always last and available.
            self.providers.len() - 1
        });

        self.providers
            .get(*selected_idx)
            .map(|p| p.as_ref())
            .ok_or(KernelError::NoProvider)
    }

    /// Get the name of the currently selected kernel provider
    pub fn selected_provider_name(&self) -> Option<&'static str> {
        self.selected.get().and_then(|&idx| self.providers.get(idx)).map(|p| p.name())
    }

    /// List all available kernel providers
    pub fn list_available_providers(&self) -> Vec<&'static str> {
        self.providers.iter().filter(|p| p.is_available()).map(|p| p.name()).collect()
    }
}

impl Default for KernelManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Select the best CPU kernel provider as an owned handle.
pub fn select_cpu_kernel() -> Result<Box<dyn KernelProvider>> {
    let mut providers: Vec<Box<dyn KernelProvider>> = vec![Box::new(cpu::FallbackKernel)];

    #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
    {
        if is_x86_feature_detected!("avx2") {
            providers.insert(0, Box::new(cpu::Avx2Kernel));
        }
    }

    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            providers.insert(0, Box::new(cpu::NeonKernel));
        }
    }

    providers
        .into_iter()
        .find(|p| p.is_available())
        .ok_or(KernelError::NoProvider)
}

// Re-export commonly used types
pub use cpu::FallbackKernel;
#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub use cpu::Avx2Kernel;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
pub use cpu::NeonKernel;
