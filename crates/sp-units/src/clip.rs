use sp_array::AxisArray;

use crate::error::Result;
use crate::processor::Processor;

/// Clips every element to the range [a_min, a_max].
///
/// The lower bound is applied first, so `a_min > a_max` maps everything to
/// `a_max` instead of panicking. NaN values pass through unchanged.
pub struct Clip {
    a_min: f32,
    a_max: f32,
}

impl Clip {
    /// Create a new clip processor with the given bounds.
    pub fn new(a_min: f32, a_max: f32) -> Self {
        Self { a_min, a_max }
    }
}

impl Processor for Clip {
    fn name(&self) -> &str {
        "clip"
    }

    fn process(&mut self, msg: &AxisArray) -> Result<AxisArray> {
        let (lo, hi) = (self.a_min, self.a_max);
        // f32::max/min would return the bound for a NaN input; numpy's
        // maximum/minimum propagate NaN instead.
        Ok(msg.map(|x| if x.is_nan() { x } else { x.max(lo).min(hi) }))
    }
}
