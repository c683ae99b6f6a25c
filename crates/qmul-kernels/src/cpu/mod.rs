//! CPU kernel implementations

use qmul_common::{KernelError, MulParams, Result};

pub mod fallback;

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub mod x86;

#[cfg(all(target_arch = "aarch64", feature = "neon"))]
pub mod arm;

pub use fallback::FallbackKernel;

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub use x86::Avx2Kernel;

#[cfg(all(target_arch = "aarch64", feature = "neon"))]
pub use arm::NeonKernel;

/// Validate the shared elementwise-multiplication preconditions.
///
/// Every provider runs this before touching an element; the loops themselves
/// assume validated inputs.
pub(crate) fn validate_mul_args(
    input_1: &[i8],
    input_2: &[i8],
    output: &[i8],
    params: &MulParams,
) -> Result<()> {
    if input_1.len() != output.len() || input_2.len() != output.len() {
        return Err(KernelError::LengthMismatch {
            input_1: input_1.len(),
            input_2: input_2.len(),
            output: output.len(),
        });
    }
    params.validate()
}
