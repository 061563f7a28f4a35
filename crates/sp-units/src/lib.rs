//! `sp-units` - Streaming signal-processing units over labeled array messages.
//!
//! Each unit is a one-step transform: it receives one `AxisArray` message and
//! returns one. Transport, pub/sub wiring, scheduling, back-pressure, and
//! unit lifecycle belong to the external dataflow runtime that drives the
//! `Processor` trait.

pub mod activation;
pub mod clip;
pub mod const_difference;
pub mod error;
pub mod processor;
pub mod slicer;

pub use activation::{Activation, ActivationFunction};
pub use clip::Clip;
pub use const_difference::ConstDifference;
pub use error::{Result, UnitError};
pub use processor::{Processor, ProcessorChain};
pub use slicer::{parse_slice, Selector, Slicer};
