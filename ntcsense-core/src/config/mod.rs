//! Configuration types
//!
//! The constant set that parameterizes a conversion: circuit values,
//! model coefficients and clamp bounds. All of it is fixed at build time.

pub mod divider;
pub mod generated;
pub mod presets;
pub mod types;

pub use divider::*;
pub use types::*;
