//! Error types shared across the qmul workspace.

use thiserror::Error;

/// Errors reported by kernel providers and the kernel manager.
///
/// The arithmetic core itself has no failure path; every variant here is a
/// contract violation surfaced at the public API boundary before any element
/// is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error(
        "input/output length mismatch: input_1 has {input_1} elements, \
         input_2 has {input_2}, output has {output}"
    )]
    LengthMismatch { input_1: usize, input_2: usize, output: usize },

    #[error("activation range inverted: min {min} > max {max}")]
    InvertedActivationRange { min: i32, max: i32 },

    #[error("activation bound {bound} does not fit the i8 output range")]
    ActivationOutOfRange { bound: i32 },

    #[error("zero-point offset {offset} outside the correctable range for i8 samples")]
    OffsetOutOfRange { offset: i32 },

    #[error("unsupported hardware: requires {required}")]
    UnsupportedHardware { required: &'static str },

    #[error("no kernel provider available")]
    NoProvider,
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message_names_all_three_buffers() {
        let err = KernelError::LengthMismatch { input_1: 4, input_2: 4, output: 3 };
        let msg = err.to_string();
        assert!(msg.contains('4'), "message: {msg}");
        assert!(msg.contains('3'), "message: {msg}");
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            KernelError::InvertedActivationRange { min: 1, max: 0 },
            KernelError::InvertedActivationRange { min: 1, max: 0 },
        );
        assert_ne!(KernelError::NoProvider, KernelError::OffsetOutOfRange { offset: 300 });
    }
}
