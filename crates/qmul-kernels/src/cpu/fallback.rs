//! Fallback CPU kernel implementation
//!
//! Naive but correct elementwise multiplication that works on any
//! architecture. This is the reference the packed kernels are validated
//! against, the tail handler for counts not divisible by the packing width,
//! and the sole path on targets without suitable packed-integer support.

use crate::cpu::validate_mul_args;
use crate::fixed_point::mul_elem;
use crate::KernelProvider;
use qmul_common::{MulParams, Result};

/// Scalar CPU kernel that works on any architecture.
///
/// Always available. Processes one element at a time through the shared
/// transform; no SIMD, no allocation, no state.
pub struct FallbackKernel;

impl KernelProvider for FallbackKernel {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn elementwise_mul_s8(
        &self,
        input_1: &[i8],
        input_2: &[i8],
        output: &mut [i8],
        params: &MulParams,
    ) -> Result<()> {
        validate_mul_args(input_1, input_2, output, params)?;
        mul_block_scalar(input_1, input_2, output, params);
        Ok(())
    }
}

/// Scalar loop over pre-validated, equal-length slices.
///
/// Shared with the packed kernels, which use it for their 0–3 element
/// remainders.
pub(crate) fn mul_block_scalar(
    input_1: &[i8],
    input_2: &[i8],
    output: &mut [i8],
    params: &MulParams,
) {
    for ((out, &s1), &s2) in output.iter_mut().zip(input_1).zip(input_2) {
        *out = mul_elem(s1, s2, params);
    }
}
