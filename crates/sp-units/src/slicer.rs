use sp_array::{ArrayError, AxisArray};

use crate::error::{Result, UnitError};
use crate::processor::Processor;

/// One parsed element of a slice-selection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Take every index along the axis.
    All,
    /// Take a single index (negative counts from the end). As the only
    /// selector, this drops the sliced dimension.
    Index(isize),
    /// Take a range of indices. Unset fields fall back to the defaults of
    /// Python slice semantics.
    Range {
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    },
}

/// Parse a string representation of a slice selection.
///
/// - `""`, `":"`, or `"none"` (case-insensitive) -> take all
/// - `"5"` (any integer) -> take only that index
/// - `"{start}:{stop}"` or `"{start}:{stop}:{step}"` -> a range; any field
///   may be omitted
/// - A comma-separated list of the above -> one selector per token
///
/// Whitespace around tokens and fields is ignored. An explicit step of 0 and
/// tokens with more than three `:`-separated fields are rejected.
pub fn parse_slice(s: &str) -> Result<Vec<Selector>> {
    if s.contains(',') {
        let mut out = Vec::new();
        for token in s.split(',') {
            out.extend(parse_slice(token)?);
        }
        return Ok(out);
    }
    Ok(vec![parse_token(s)?])
}

fn parse_token(s: &str) -> Result<Selector> {
    let t = s.trim();
    if t.is_empty() || t == ":" || t.eq_ignore_ascii_case("none") {
        return Ok(Selector::All);
    }
    let parts: Vec<&str> = t.split(':').collect();
    match parts.len() {
        1 => Ok(Selector::Index(parse_int(parts[0], t)?)),
        2 | 3 => {
            let start = parse_field(parts[0], t)?;
            let stop = parse_field(parts[1], t)?;
            let step = if parts.len() == 3 {
                parse_field(parts[2], t)?
            } else {
                None
            };
            if step == Some(0) {
                return Err(UnitError::ZeroStep(t.to_string()));
            }
            Ok(Selector::Range { start, stop, step })
        }
        _ => Err(UnitError::MalformedSliceToken(t.to_string())),
    }
}

fn parse_field(part: &str, token: &str) -> Result<Option<isize>> {
    let part = part.trim();
    if part.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parse_int(part, token)?))
    }
}

fn parse_int(part: &str, token: &str) -> Result<isize> {
    part.trim()
        .parse()
        .map_err(|source| UnitError::InvalidSliceToken {
            token: token.to_string(),
            source,
        })
}

/// Resolve range bounds against an axis of length `len` with Python slice
/// semantics: negative bounds count from the end, out-of-range bounds are
/// clamped, and a negative step walks the axis backwards.
///
/// Returns (first index, number of selected indices, step). The first index
/// is meaningless (and returned as 0) when the selection is empty.
fn resolve_range(
    start: Option<isize>,
    stop: Option<isize>,
    step: Option<isize>,
    len: usize,
) -> (usize, usize, isize) {
    let n = len as isize;
    let step = step.unwrap_or(1);
    let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };

    let adjust = |v: Option<isize>, default: isize| -> isize {
        match v {
            None => default,
            Some(mut v) => {
                if v < 0 {
                    v += n;
                    if v < lower {
                        v = lower;
                    }
                } else if v > upper {
                    v = upper;
                }
                v
            }
        }
    };

    let start = adjust(start, if step > 0 { lower } else { upper });
    let stop = adjust(stop, if step > 0 { upper } else { lower });

    let count = if step > 0 && start < stop {
        ((stop - start - 1) / step + 1) as usize
    } else if step < 0 && stop < start {
        ((start - stop - 1) / (-step) + 1) as usize
    } else {
        0
    };

    let first = if count > 0 { start as usize } else { 0 };
    (first, count, step)
}

fn normalize_index(index: isize, len: usize) -> Result<usize> {
    let n = len as isize;
    let v = if index < 0 { index + n } else { index };
    if v < 0 || v >= n {
        return Err(UnitError::IndexOutOfBounds { index, len });
    }
    Ok(v as usize)
}

/// Flatten multiple selectors to a concrete index set against an axis of
/// length `len`, concatenated in order. Duplicates and reordering are
/// preserved.
fn expand_indices(selectors: &[Selector], len: usize) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for sel in selectors {
        match *sel {
            Selector::All => indices.extend(0..len),
            Selector::Index(i) => indices.push(normalize_index(i, len)?),
            Selector::Range { start, stop, step } => {
                let (first, count, step) = resolve_range(start, stop, step, len);
                for k in 0..count {
                    indices.push((first as isize + k as isize * step) as usize);
                }
            }
        }
    }
    Ok(indices)
}

/// Selects a subset of data along one axis of each incoming message.
///
/// A single range selector yields a view aliasing the input storage; a
/// single integer selector drops the sliced dimension; multiple selectors
/// gather a discontinuous index set into a copy. Coordinate labels on the
/// sliced axis follow the data.
///
/// A single selector re-resolves against every message's axis length. A
/// multi-selector index set is expanded against the first message's axis
/// length and cached; call `reset` if the stream's shape along the sliced
/// axis changes.
pub struct Slicer {
    selectors: Vec<Selector>,
    axis: Option<String>,
    cached_indices: Option<Vec<usize>>,
}

impl Slicer {
    /// Create a slicer from a selection string and an optional axis name.
    ///
    /// The selection is parsed eagerly. When `axis` is `None`, each message's
    /// last dimension is sliced.
    pub fn new(selection: &str, axis: Option<&str>) -> Result<Self> {
        Ok(Self {
            selectors: parse_slice(selection)?,
            axis: axis.map(str::to_string),
            cached_indices: None,
        })
    }
}

impl Processor for Slicer {
    fn name(&self) -> &str {
        "slicer"
    }

    fn process(&mut self, msg: &AxisArray) -> Result<AxisArray> {
        let axis_idx = match &self.axis {
            Some(name) => msg.axis_idx(name)?,
            None => msg
                .ndim()
                .checked_sub(1)
                .ok_or(ArrayError::InvalidAxis { axis: 0, ndim: 0 })?,
        };
        let axis_len = msg.shape().dim(axis_idx);

        if let [sel] = self.selectors.as_slice() {
            return Ok(match *sel {
                Selector::All => msg.slice_axis(axis_idx, 0, axis_len, 1)?,
                Selector::Index(i) => {
                    msg.select_index(axis_idx, normalize_index(i, axis_len)?)?
                }
                Selector::Range { start, stop, step } => {
                    let (first, count, step) = resolve_range(start, stop, step, axis_len);
                    msg.slice_axis(axis_idx, first, count, step)?
                }
            });
        }

        let indices = match self.cached_indices.take() {
            Some(ix) => ix,
            None => expand_indices(&self.selectors, axis_len)?,
        };
        // Put the cache back before propagating a failed gather, so one
        // mismatched message does not silently rebuild the index set.
        let out = msg.take(axis_idx, &indices);
        self.cached_indices = Some(indices);
        Ok(out?)
    }

    fn reset(&mut self) {
        self.cached_indices = None;
    }
}
