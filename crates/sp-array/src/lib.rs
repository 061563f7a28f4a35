//! `sp-array` - Labeled multi-dimensional array messages for streaming signal processing.
//!
//! This crate provides:
//! - An `AxisArray` message type: shared f32 storage viewed through an
//!   offset/stride window, with named dimensions and per-axis metadata
//! - `AxisInfo` metadata for regularly-sampled and labeled axes
//! - Shape utilities
//! - Zero-copy axis slicing, single-index selection, and index gathering

pub mod array;
pub mod axis;
pub mod error;
pub mod shape;

// Re-export primary types at the crate root for convenience.
pub use array::AxisArray;
pub use axis::AxisInfo;
pub use error::{ArrayError, Result};
pub use shape::Shape;
