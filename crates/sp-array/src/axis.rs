/// Per-axis metadata attached to an `AxisArray` dimension by name.
///
/// A `Linear` axis describes a regularly sampled dimension (e.g. time) by a
/// gain/offset pair: the coordinate of index `i` is `offset + gain * i`.
/// A `Coordinate` axis carries one label per index (e.g. channel names).
#[derive(Debug, Clone, PartialEq)]
pub enum AxisInfo {
    Linear {
        gain: f64,
        offset: f64,
        unit: String,
    },
    Coordinate {
        labels: Vec<String>,
        unit: String,
    },
}

impl AxisInfo {
    /// A time axis sampled at `fs` Hz starting at `offset` seconds.
    pub fn time(fs: f64, offset: f64) -> Self {
        AxisInfo::Linear {
            gain: 1.0 / fs,
            offset,
            unit: "s".to_string(),
        }
    }

    /// A labeled axis with no particular unit (e.g. channel names).
    pub fn channels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AxisInfo::Coordinate {
            labels: labels.into_iter().map(Into::into).collect(),
            unit: String::new(),
        }
    }

    /// Returns the per-index labels, if this axis carries any.
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            AxisInfo::Coordinate { labels, .. } => Some(labels.as_slice()),
            AxisInfo::Linear { .. } => None,
        }
    }

    /// Returns a human-readable name for the variant (used in error messages).
    pub fn kind(&self) -> &'static str {
        match self {
            AxisInfo::Linear { .. } => "linear",
            AxisInfo::Coordinate { .. } => "coordinate",
        }
    }
}
