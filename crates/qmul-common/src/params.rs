//! Per-invocation quantization parameters for elementwise multiplication.

use crate::error::{KernelError, Result};

/// Largest zero-point magnitude accepted for an `i8` sample stream.
///
/// Covers both the `[-128, 127]` zero-point range of the sample type and the
/// negated-offset convention some frontends use, and keeps the corrected
/// sample representable in 16 bits for the packed execution path.
const MAX_OFFSET_MAGNITUDE: i32 = 128;

/// Quantization parameters for one elementwise multiplication call.
///
/// The parameters are immutable for the duration of the call. `scale` values
/// never appear here: the combined real-valued rescale factor
/// `scale_1 * scale_2 / out_scale` is encoded by the caller into the
/// fixed-point `out_multiplier` / `out_shift` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulParams {
    /// Zero-point correction added to each `input_1` sample before multiplying.
    pub input_1_offset: i32,
    /// Zero-point correction added to each `input_2` sample before multiplying.
    pub input_2_offset: i32,
    /// Output zero-point, added after requantization.
    pub out_offset: i32,
    /// Fixed-point multiplier encoding the fractional part of the rescale.
    pub out_multiplier: i32,
    /// Signed power-of-two exponent: non-negative divides (rounding), negative
    /// multiplies (exact).
    pub out_shift: i32,
    /// Inclusive lower activation bound for the output.
    pub out_activation_min: i32,
    /// Inclusive upper activation bound for the output.
    pub out_activation_max: i32,
}

impl MulParams {
    /// Parameters for an identity rescale over the full `i8` output range.
    ///
    /// `i32::MAX` is the closest representable fixed-point multiplier to 1.0;
    /// with `out_shift = 0` the requantization passes accumulators through
    /// unchanged for every product two corrected `i8` samples can form.
    pub const fn unit_scale() -> Self {
        MulParams {
            input_1_offset: 0,
            input_2_offset: 0,
            out_offset: 0,
            out_multiplier: i32::MAX,
            out_shift: 0,
            out_activation_min: i8::MIN as i32,
            out_activation_max: i8::MAX as i32,
        }
    }

    /// Check the caller-side preconditions the kernels rely on.
    ///
    /// Kernel providers call this once per invocation, before touching any
    /// element.
    pub fn validate(&self) -> Result<()> {
        if self.out_activation_min > self.out_activation_max {
            return Err(KernelError::InvertedActivationRange {
                min: self.out_activation_min,
                max: self.out_activation_max,
            });
        }
        for bound in [self.out_activation_min, self.out_activation_max] {
            if bound < i8::MIN as i32 || bound > i8::MAX as i32 {
                return Err(KernelError::ActivationOutOfRange { bound });
            }
        }
        for offset in [self.input_1_offset, self.input_2_offset] {
            if offset.abs() > MAX_OFFSET_MAGNITUDE {
                return Err(KernelError::OffsetOutOfRange { offset });
            }
        }
        Ok(())
    }
}
