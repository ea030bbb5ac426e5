//! Conditional logging macros.
//!
//! With the `tracing` feature these are the `tracing` macros, so traces go to
//! whatever subscriber the application installed. Without it they expand to
//! nothing and the geometry code carries no logging cost at all.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __prgraphic_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __prgraphic_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__prgraphic_debug as debug, __prgraphic_warn as warn};
