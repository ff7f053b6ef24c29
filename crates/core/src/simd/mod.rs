//! Packed-register backends for [`Vec3Packed`](crate::Vec3Packed).
//!
//! Every operator on a vector is a thin wrapper over one of the lane
//! functions below. Two backends exist:
//!
//! - [`sse`]: one `__m128` per vector, compiled when the target is x86 or
//!   x86-64 with SSE enabled and the `portable` feature is off.
//! - [`portable`]: plain `[f32; 4]` lane loops. Always compiled, so it can
//!   serve as the reference the hardware path is checked against.
//!
//! [`native`] names whichever backend the crate was built with. Both
//! backends expose the same functions with the same lane ordering, so
//! results are bit-identical for everything except the reciprocal square
//! root estimate (see [`rsqrt`]).

use std::fmt;
use std::sync::Once;

use tracing::{info, warn};

pub mod portable;
pub mod rsqrt;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
))]
pub mod sse;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
))]
pub use self::sse as native;

#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse",
    not(feature = "portable")
)))]
pub use self::portable as native;

/// The backend's packed 4-lane register type.
///
/// `__m128` on the SSE backend, `[f32; 4]` on the portable one.
pub type Register = native::Register;

/// Which lane backend this build uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// SSE with an emulated horizontal add.
    Sse,
    /// SSE with `haddps` available.
    Sse3,
    /// `[f32; 4]` lane loops with a software rsqrt estimate.
    Portable,
}

impl Backend {
    /// The backend selected at compile time.
    pub const fn active() -> Self {
        if cfg!(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse",
            not(feature = "portable")
        )) {
            if cfg!(target_feature = "sse3") {
                Backend::Sse3
            } else {
                Backend::Sse
            }
        } else {
            Backend::Portable
        }
    }

    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Sse => "sse",
            Backend::Sse3 => "sse3",
            Backend::Portable => "portable",
        }
    }

    /// Whether `normalize` is seeded by a hardware estimate instruction.
    pub const fn has_hardware_rsqrt(self) -> bool {
        !matches!(self, Backend::Portable)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static BACKEND_LOGGED: Once = Once::new();

/// Report the active backend through `tracing` (once per process) and return it.
pub fn log_backend() -> Backend {
    let backend = Backend::active();
    BACKEND_LOGGED.call_once(|| {
        info!(
            backend = backend.name(),
            hardware_rsqrt = backend.has_hardware_rsqrt(),
            "Packed vector backend selected"
        );
        if !backend.has_hardware_rsqrt()
            && cfg!(any(target_arch = "x86", target_arch = "x86_64"))
        {
            warn!("Running the portable backend on x86; normalize uses a software rsqrt estimate");
        }
    });
    backend
}
