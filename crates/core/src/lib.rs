//! Packed 3D Vector Library
//!
//! A three-component geometric vector stored as one 16-byte-aligned,
//! four-lane `f32` register, for hot loops in ray tracing, physics and
//! rendering code.
//!
//! ## Overview
//!
//! - [`Vec3Packed`]: `x, y, z` plus a scratch `w` lane, addressable by name,
//!   by index, or as a whole backend register.
//! - Operators: `+ - * /` with scalars and vectors, `*` between two vectors
//!   is the dot product, `^` is the cross product, [`Vec3Packed::cmul`] and
//!   [`Vec3Packed::cdiv`] are the lane-wise forms.
//! - Free functions: [`min`], [`max`], [`length`], [`normalize`].
//! - [`normalize`] seeds `1/sqrt` from a hardware estimate (`rsqrtps` on
//!   x86) and refines it with exactly one Newton-Raphson step; it trades a
//!   few ulps for throughput and does not guard zero-length input.
//!
//! ## Backends
//!
//! The SSE backend is used on x86/x86-64 when SSE is enabled. Everything
//! else, or any build with the `portable` feature, uses `[f32; 4]` lane
//! loops and a software rsqrt estimate. [`simd::log_backend`] reports the
//! choice through `tracing`.

// Core types and operators
pub mod core_types;

// Lane backends and rsqrt estimators
pub mod simd;

// Slice helpers and timing
pub mod batch;
pub mod timing;

// Re-export core types
pub use core_types::{
    distance, length, length_squared, max, min, normalize, normalize_exact, normalize_with,
    Vec3Packed,
};

// Re-export backend selection and estimators
pub use simd::rsqrt::{refined_error_bound, NativeRsqrt, RsqrtEstimate, SoftwareRsqrt};
pub use simd::{log_backend, Backend};
pub use timing::{ProfilerScope, Stopwatch};

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
))]
pub use simd::rsqrt::HardwareRsqrt;
