use std::fmt;
use std::str::FromStr;

use sp_array::AxisArray;

use crate::error::{Result, UnitError};
use crate::processor::Processor;

/// Elementwise activation (transformation) function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFunction {
    /// Identity.
    None,
    /// Logistic sigmoid, 1 / (1 + e^-x).
    Sigmoid,
    /// Alias of `Sigmoid` under its inverse-logit name.
    Expit,
    /// Inverse of the sigmoid, ln(p / (1 - p)).
    Logit,
    /// Log of the sigmoid, ln(1 / (1 + e^-x)).
    LogExpit,
}

impl ActivationFunction {
    /// All supported functions, in declaration order.
    pub const ALL: [ActivationFunction; 5] = [
        ActivationFunction::None,
        ActivationFunction::Sigmoid,
        ActivationFunction::Expit,
        ActivationFunction::Logit,
        ActivationFunction::LogExpit,
    ];

    /// Apply the function to a single value.
    pub fn apply(&self, x: f32) -> f32 {
        match self {
            ActivationFunction::None => x,
            ActivationFunction::Sigmoid | ActivationFunction::Expit => expit(x),
            ActivationFunction::Logit => (x / (1.0 - x)).ln(),
            ActivationFunction::LogExpit => log_expit(x),
        }
    }
}

/// Numerically stable logistic sigmoid.
///
/// Branches on the sign so the exponential argument is never positive,
/// avoiding overflow for large |x|.
fn expit(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable ln(expit(x)).
fn log_expit(x: f32) -> f32 {
    if x >= 0.0 {
        -(-x).exp().ln_1p()
    } else {
        x - x.exp().ln_1p()
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationFunction::None => write!(f, "none"),
            ActivationFunction::Sigmoid => write!(f, "sigmoid"),
            ActivationFunction::Expit => write!(f, "expit"),
            ActivationFunction::Logit => write!(f, "logit"),
            ActivationFunction::LogExpit => write!(f, "log_expit"),
        }
    }
}

impl FromStr for ActivationFunction {
    type Err = UnitError;

    /// Case-insensitive lookup by the function's string name.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(ActivationFunction::None),
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "expit" => Ok(ActivationFunction::Expit),
            "logit" => Ok(ActivationFunction::Logit),
            "log_expit" => Ok(ActivationFunction::LogExpit),
            _ => Err(UnitError::UnknownActivation(s.to_string())),
        }
    }
}

/// Applies an activation function elementwise; metadata passes through.
pub struct Activation {
    function: ActivationFunction,
}

impl Activation {
    /// Create an activation processor for the given function.
    pub fn new(function: ActivationFunction) -> Self {
        Self { function }
    }

    /// Create an activation processor from a function name.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }
}

impl Processor for Activation {
    fn name(&self) -> &str {
        "activation"
    }

    fn process(&mut self, msg: &AxisArray) -> Result<AxisArray> {
        let function = self.function;
        Ok(msg.map(|x| function.apply(x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "SIGMOID".parse::<ActivationFunction>().unwrap(),
            ActivationFunction::Sigmoid
        );
        assert_eq!(
            "log_expit".parse::<ActivationFunction>().unwrap(),
            ActivationFunction::LogExpit
        );
        assert!(matches!(
            "relu".parse::<ActivationFunction>(),
            Err(UnitError::UnknownActivation(_))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for f in ActivationFunction::ALL {
            let back: ActivationFunction = f.to_string().parse().unwrap();
            assert_eq!(f, back);
        }
    }

    #[test]
    fn test_expit() {
        assert_relative_eq!(expit(0.0), 0.5);
        // expit(1) ~= 0.7310586
        assert!((expit(1.0) - 0.7310586).abs() < 1e-6);
        // No overflow at extreme inputs.
        assert_relative_eq!(expit(100.0), 1.0);
        assert_relative_eq!(expit(-100.0), 0.0);
    }

    #[test]
    fn test_expit_logit_inverse() {
        for &x in &[-3.0f32, -0.5, 0.0, 0.5, 3.0] {
            let p = expit(x);
            let back = ActivationFunction::Logit.apply(p);
            assert!((back - x).abs() < 1e-4, "logit(expit({})) = {}", x, back);
        }
    }

    #[test]
    fn test_logit_edge_values() {
        assert_eq!(ActivationFunction::Logit.apply(0.0), f32::NEG_INFINITY);
        assert_eq!(ActivationFunction::Logit.apply(1.0), f32::INFINITY);
        assert!(ActivationFunction::Logit.apply(0.5).abs() < 1e-7);
        assert!(ActivationFunction::Logit.apply(-0.5).is_nan());
    }

    #[test]
    fn test_log_expit() {
        // log_expit(0) = ln(0.5)
        assert!((log_expit(0.0) - 0.5f32.ln()).abs() < 1e-6);
        // Stable for large negative x: log_expit(x) -> x
        assert!((log_expit(-50.0) - (-50.0)).abs() < 1e-4);
        // Approaches 0 from below for large x.
        assert!(log_expit(50.0) <= 0.0);
        assert!(log_expit(50.0) > -1e-6);
    }

    #[test]
    fn test_activation_processor() {
        let msg = AxisArray::new(vec![-1.0, 0.0, 1.0], vec![3], ["ch"]).unwrap();
        let mut unit = Activation::from_name("expit").unwrap();
        let out = unit.process(&msg).unwrap();
        assert_eq!(out.dims(), msg.dims());
        let vals = out.to_vec();
        assert!((vals[1] - 0.5).abs() < 1e-7);
        assert!((vals[0] + vals[2] - 1.0).abs() < 1e-6); // expit(-x) = 1 - expit(x)

        let mut identity = Activation::new(ActivationFunction::None);
        assert_eq!(identity.process(&msg).unwrap().to_vec(), msg.to_vec());
    }
}
