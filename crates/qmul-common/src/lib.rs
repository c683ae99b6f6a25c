//! Common types for the qmul quantized kernel workspace
//!
//! This crate provides the foundational pieces shared between kernel
//! implementations and their consumers: the per-invocation quantization
//! parameter block, error handling, the SIMD capability registry, and the
//! environment-driven kernel configuration.

pub mod config;
pub mod error;
pub mod params;
pub mod registry;

pub use config::KernelConfig;
pub use error::{KernelError, Result};
pub use params::MulParams;
pub use registry::{capability_summary, compile_time_simd_level, runtime_simd_level, SimdLevel};
