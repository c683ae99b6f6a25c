//! x86_64 packed kernel using AVX2
#![allow(unsafe_op_in_unsafe_fn)]

use crate::cpu::fallback::mul_block_scalar;
use crate::cpu::validate_mul_args;
use crate::fixed_point::{mul_corrected, pack_s8x4};
use crate::KernelProvider;
use qmul_common::{KernelError, MulParams, Result};
use std::arch::x86_64::*;

/// Packed kernel for x86_64.
///
/// Processes four elements per iteration: one widening load per input
/// (`_mm_cvtepi8_epi16`), one packed 16-bit add for the zero-point
/// correction, the shared per-lane transform for the multiply/rescale/clamp
/// stage, and a single 32-bit store for the four narrowed results. The tail
/// that is not a multiple of four goes through the scalar loop.
pub struct Avx2Kernel;

impl KernelProvider for Avx2Kernel {
    fn name(&self) -> &'static str {
        "avx2"
    }

    fn is_available(&self) -> bool {
        is_x86_feature_detected!("avx2")
    }

    fn elementwise_mul_s8(
        &self,
        input_1: &[i8],
        input_2: &[i8],
        output: &mut [i8],
        params: &MulParams,
    ) -> Result<()> {
        if !self.is_available() {
            return Err(KernelError::UnsupportedHardware { required: "AVX2" });
        }
        validate_mul_args(input_1, input_2, output, params)?;

        // Safety: AVX2 availability checked above; lengths validated.
        unsafe { self.mul_s8_packed(input_1, input_2, output, params) };
        Ok(())
    }
}

impl Avx2Kernel {
    #[target_feature(enable = "avx2")]
    unsafe fn mul_s8_packed(
        &self,
        input_1: &[i8],
        input_2: &[i8],
        output: &mut [i8],
        params: &MulParams,
    ) {
        let len = output.len();

        // Offsets fit i16 (validated), so one packed add corrects four
        // widened samples at once.
        let offset_1 = _mm_set1_epi16(params.input_1_offset as i16);
        let offset_2 = _mm_set1_epi16(params.input_2_offset as i16);

        let mut i = 0usize;
        while i + 4 <= len {
            let raw_1 =
                _mm_cvtsi32_si128((input_1.as_ptr().add(i) as *const i32).read_unaligned());
            let raw_2 =
                _mm_cvtsi32_si128((input_2.as_ptr().add(i) as *const i32).read_unaligned());
            let corrected_1 = _mm_add_epi16(_mm_cvtepi8_epi16(raw_1), offset_1);
            let corrected_2 = _mm_add_epi16(_mm_cvtepi8_epi16(raw_2), offset_2);

            let mut lanes_1 = [0i16; 8];
            let mut lanes_2 = [0i16; 8];
            _mm_storeu_si128(lanes_1.as_mut_ptr() as *mut __m128i, corrected_1);
            _mm_storeu_si128(lanes_2.as_mut_ptr() as *mut __m128i, corrected_2);

            // The doubling high multiply does not pack; each lane runs the
            // shared transform, and the four results narrow into one store.
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
