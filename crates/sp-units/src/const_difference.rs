use sp_array::AxisArray;

use crate::error::Result;
use crate::processor::Processor;

/// Subtracts a constant from the data, or the data from a constant.
///
/// result = (x - value) if `subtrahend`, else (value - x).
pub struct ConstDifference {
    value: f32,
    subtrahend: bool,
}

impl ConstDifference {
    /// Create a new constant-difference processor.
    pub fn new(value: f32, subtrahend: bool) -> Self {
        Self { value, subtrahend }
    }
}

impl Default for ConstDifference {
    fn default() -> Self {
        Self::new(0.0, true)
    }
}

impl Processor for ConstDifference {
    fn name(&self) -> &str {
        "const_difference"
    }

    fn process(&mut self, msg: &AxisArray) -> Result<AxisArray> {
        let value = self.value;
        Ok(if self.subtrahend {
            msg.map(|x| x - value)
        } else {
            msg.map(|x| value - x)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtrahend() {
        let msg = AxisArray::new(vec![1.0, 2.0, 3.0], vec![3], ["ch"]).unwrap();
        let mut unit = ConstDifference::new(1.5, true);
        let out = unit.process(&msg).unwrap();
        assert_eq!(out.to_vec(), vec![-0.5, 0.5, 1.5]);
    }

    #[test]
    fn test_minuend() {
        let msg = AxisArray::new(vec![1.0, 2.0, 3.0], vec![3], ["ch"]).unwrap();
        let mut unit = ConstDifference::new(1.5, false);
        let out = unit.process(&msg).unwrap();
        assert_eq!(out.to_vec(), vec![0.5, -0.5, -1.5]);
    }

    #[test]
    fn test_default_is_identity() {
        let msg = AxisArray::new(vec![4.0, 5.0], vec![2], ["ch"]).unwrap();
        let mut unit = ConstDifference::default();
        let out = unit.process(&msg).unwrap();
        assert_eq!(out.to_vec(), msg.to_vec());
    }
}
