//! ARM NEON packed kernel
#![allow(unsafe_op_in_unsafe_fn)]

use crate::cpu::fallback::mul_block_scalar;
use crate::cpu::validate_mul_args;
use crate::fixed_point::{mul_corrected, pack_s8x4};
use crate::KernelProvider;
use qmul_common::{KernelError, MulParams, Result};
use std::arch::aarch64::*;

/// Packed kernel for aarch64.
///
/// Mirrors the x86 path with NEON primitives: `vmovl_s8` widens four samples
/// per input to 16-bit lanes, `vadd_s16` applies the zero-point to all lanes
/// at once, the shared transform handles each lane's multiply/rescale/clamp,
/// and the four narrowed results store as one 32-bit word. Remainders go
/// through the scalar loop.
pub struct NeonKernel;

impl KernelProvider for NeonKernel {
    fn name(&self) -> &'static str {
        "neon"
    }

    fn is_available(&self) -> bool {
        std::arch::is_aarch64_feature_detected!("neon")
    }

    fn elementwise_mul_s8(
        &self,
        input_1: &[i8],
        input_2: &[i8],
        output: &mut [i8],
        params: &MulParams,
    ) -> Result<()> {
        if !self.is_available() {
            return Err(KernelError::UnsupportedHardware { required: "NEON" });
        }
        validate_mul_args(input_1, input_2, output, params)?;

        // Safety: NEON availability checked above; lengths validated.
        unsafe { self.mul_s8_packed(input_1, input_2, output, params) };
        Ok(())
    }
}

impl NeonKernel {
    #[target_feature(enable = "neon")]
    unsafe fn mul_s8_packed(
        &self,
        input_1: &[i8],
        input_2: &[i8],
        output: &mut [i8],
        params: &MulParams,
    ) {
        let len = output.len();

        let offset_1 = vdup_n_s16(params.input_1_offset as i16);
        let offset_2 = vdup_n_s16(params.input_2_offset as i16);

        let mut i = 0usize;
        while i + 4 <= len {
            // Four samples land in the low half of an 8-lane vector; widen
            // and offset-correct them with one packed add per input.
            let word_1 = (input_1.as_ptr().add(i) as *const u32).read_unaligned();
            let word_2 = (input_2.as_ptr().add(i) as *const u32).read_unaligned();
            let corrected_1 =
                vadd_s16(vget_low_s16(vmovl_s8(vcreate_s8(u64::from(word_1)))), offset_1);
            let corrected_2 =
                vadd_s16(vget_low_s16(vmovl_s8(vcreate_s8(u64::from(word_2)))), offset_2);

            let mut lanes_1 = [0i16; 4];
            let mut lanes_2 = [0i16; 4];
            vst1_s16(lanes_1.as_mut_ptr(), corrected_1);
            vst1_s16(lanes_2.as_mut_ptr(), corrected_2);

            let word = pack_s8x4([
                mul_corrected(i32::from(lanes_1[0]), i32::from(lanes_2[0]), params),
                mul_corrected(i32::from(lanes_1[1]), i32::from(lanes_2[1]), params),
                mul_corrected(i32::from(lanes_1[2]), i32::from(lanes_2[2]), params),
                mul_corrected(i32::from(lanes_1[3]), i32::from(lanes_2[3]), params),
            ]);
            (output.as_mut_ptr().add(i) as *mut u32).write_unaligned(word);

            i += 4;
        }

        mul_block_scalar(&input_1[i..], &input_2[i..], &mut output[i..], params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::FallbackKernel;

    #[test]
    fn packed_matches_scalar_across_remainders() {
        let kernel = NeonKernel;
        if !kernel.is_available() {
            return;
        }

        let params = MulParams {
            input_1_offset: -11,
            input_2_offset: 4,
            out_offset: -2,
            out_shift: 5,
            out_activation_min: -90,
            out_activation_max: 110,
            ..MulParams::unit_scale()
        };

        for len in 0..=19usize {
            let input_1: Vec<i8> = (0..len).map(|v| (v as i8).wrapping_mul(17)).collect();
            let input_2: Vec<i8> = (0..len).map(|v| (v as i8).wrapping_mul(23).wrapping_sub(64)).collect();

            let mut packed = vec![0i8; len];
            let mut scalar = vec![0i8; len];
            kernel.elementwise_mul_s8(&input_1, &input_2, &mut packed, &params).unwrap();
            FallbackKernel.elementwise_mul_s8(&input_1, &input_2, &mut scalar, &params).unwrap();

            assert_eq!(packed, scalar, "len {len}");
        }
    }

    #[test]
    fn neon_kernel_name() {
        assert_eq!(NeonKernel.name(), "neon");
    }
}
