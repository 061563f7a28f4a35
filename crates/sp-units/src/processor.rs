use sp_array::AxisArray;

use crate::error::Result;

/// Trait for one-step streaming transforms over `AxisArray` messages.
///
/// A processor receives one message and produces one message. The external
/// pub/sub runtime owns the pipeline: it delivers inputs, publishes outputs,
/// and decides when a processor instance is created or torn down.
pub trait Processor: Send {
    /// Returns the name of this processor.
    fn name(&self) -> &str;

    /// Transform one message into one output message.
    fn process(&mut self, msg: &AxisArray) -> Result<AxisArray>;

    /// Reset any internal state. Default implementation does nothing.
    fn reset(&mut self) {}
}

/// Composes multiple processors into a pipeline, applied in order.
pub struct ProcessorChain {
    procs: Vec<Box<dyn Processor>>,
}

impl ProcessorChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self { procs: Vec::new() }
    }

    /// Add a processor to the end of the chain. Returns self for
    /// builder-style usage.
    pub fn with(mut self, proc: Box<dyn Processor>) -> Self {
        self.procs.push(proc);
        self
    }

    /// Run all processors in order on one message. An empty chain is
    /// the identity transform.
    pub fn process(&mut self, msg: &AxisArray) -> Result<AxisArray> {
        let mut out = msg.clone();
        for proc in &mut self.procs {
            out = proc.process(&out)?;
        }
        Ok(out)
    }

    /// Reset every processor in the chain.
    pub fn reset(&mut self) {
        for proc in &mut self.procs {
            proc.reset();
        }
    }
}

impl Default for ProcessorChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Clip;
    use crate::const_difference::ConstDifference;

    #[test]
    fn test_empty_chain_is_identity() {
        let msg = AxisArray::new(vec![1.0, 2.0], vec![2], ["ch"]).unwrap();
        let mut chain = ProcessorChain::new();
        let out = chain.process(&msg).unwrap();
        assert_eq!(out, msg);
    }

    #[test]
    fn test_chain_applies_in_order() {
        let msg = AxisArray::new(vec![0.0, 5.0, 10.0], vec![3], ["ch"]).unwrap();
        // Subtract 1, then clip to [0, 8]: order matters.
        let mut chain = ProcessorChain::new()
            .with(Box::new(ConstDifference::new(1.0, true)))
            .with(Box::new(Clip::new(0.0, 8.0)));
        let out = chain.process(&msg).unwrap();
        assert_eq!(out.to_vec(), vec![0.0, 4.0, 8.0]);
    }
}
