use std::collections::HashMap;
use std::sync::Arc;

use crate::axis::AxisInfo;
use crate::error::{ArrayError, Result};
use crate::shape::Shape;

/// A labeled multi-dimensional array message.
///
/// Holds f32 data in shared storage, viewed through an offset and signed
/// per-dimension strides. Each dimension has a name (`dims`), and any
/// dimension may carry `AxisInfo` metadata keyed by that name (`axes`).
///
/// Cloning is cheap: storage is reference-counted. Slicing along an axis
/// with `slice_axis` or `select_index` produces a view that aliases the
/// original storage; `take` gathers a discontiguous index set into fresh
/// storage.
#[derive(Debug, Clone)]
pub struct AxisArray {
    storage: Arc<Vec<f32>>,
    offset: usize,
    strides: Vec<isize>,
    shape: Shape,
    dims: Vec<String>,
    axes: HashMap<String, AxisInfo>,
}

impl AxisArray {
    /// Create a new contiguous array from f32 data, a shape, and one name
    /// per dimension.
    pub fn new<S, I, N>(data: Vec<f32>, shape: S, dims: I) -> Result<Self>
    where
        S: Into<Shape>,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let shape = shape.into();
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if data.len() != shape.numel() {
            return Err(ArrayError::DataShapeMismatch {
                len: data.len(),
                dims: shape.dims().to_vec(),
                numel: shape.numel(),
            });
        }
        if dims.len() != shape.ndim() {
            return Err(ArrayError::DimCountMismatch {
                expected: shape.ndim(),
                got: dims.len(),
            });
        }
        for (i, name) in dims.iter().enumerate() {
            if dims[..i].contains(name) {
                return Err(ArrayError::DuplicateDim(name.clone()));
            }
        }
        let strides = shape.strides();
        Ok(AxisArray {
            storage: Arc::new(data),
            offset: 0,
            strides,
            shape,
            dims,
            axes: HashMap::new(),
        })
    }

    /// Attach axis metadata to a named dimension, builder-style.
    ///
    /// The name must be one of this array's dims, and a `Coordinate` axis
    /// must carry exactly one label per index of that dimension.
    pub fn with_axis(mut self, name: &str, info: AxisInfo) -> Result<Self> {
        let idx = self.axis_idx(name)?;
        if let Some(labels) = info.labels() {
            let len = self.shape.dim(idx);
            if labels.len() != len {
                return Err(ArrayError::LabelLengthMismatch {
                    name: name.to_string(),
                    labels: labels.len(),
                    len,
                });
            }
        }
        self.axes.insert(name.to_string(), info);
        Ok(self)
    }

    /// Returns a reference to the array's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Ordered dimension names.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// All attached axis metadata, keyed by dimension name.
    pub fn axes(&self) -> &HashMap<String, AxisInfo> {
        &self.axes
    }

    /// Metadata for a named axis, if any is attached.
    pub fn axis(&self, name: &str) -> Option<&AxisInfo> {
        self.axes.get(name)
    }

    /// Resolve a dimension name to its position.
    pub fn axis_idx(&self, name: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d == name)
            .ok_or_else(|| ArrayError::UnknownAxis {
                name: name.to_string(),
                dims: self.dims.clone(),
            })
    }

    /// True if this view is laid out contiguously in row-major order.
    pub fn is_contiguous(&self) -> bool {
        self.shape.is_contiguous(&self.strides)
    }

    /// True if `self` and `other` view the same backing storage.
    pub fn shares_storage(&self, other: &AxisArray) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Returns the data as a flat slice when the view is contiguous.
    pub fn as_slice(&self) -> Option<&[f32]> {
        if self.is_contiguous() {
            let n = self.shape.numel();
            Some(&self.storage[self.offset..self.offset + n])
        } else {
            None
        }
    }

    fn flat_index(&self, idx: &[usize]) -> usize {
        let mut off = self.offset as isize;
        for (i, &ix) in idx.iter().enumerate() {
            off += ix as isize * self.strides[i];
        }
        off as usize
    }

    /// Read a single element by multi-dimensional index.
    pub fn get(&self, idx: &[usize]) -> Result<f32> {
        if idx.len() != self.ndim() {
            return Err(ArrayError::DimCountMismatch {
                expected: self.ndim(),
                got: idx.len(),
            });
        }
        for (i, &ix) in idx.iter().enumerate() {
            if ix >= self.shape.dim(i) {
                return Err(ArrayError::IndexOutOfBounds {
                    index: ix,
                    len: self.shape.dim(i),
                });
            }
        }
        Ok(self.storage[self.flat_index(idx)])
    }

    /// Materialize the view into a row-major vector, in logical order.
    pub fn to_vec(&self) -> Vec<f32> {
        let n = self.shape.numel();
        let mut out = Vec::with_capacity(n);
        if n == 0 {
            return out;
        }
        let mut idx = vec![0usize; self.ndim()];
        loop {
            out.push(self.storage[self.flat_index(&idx)]);
            // Odometer increment over the logical index space.
            let mut d = self.ndim();
            loop {
                if d == 0 {
                    return out;
                }
                d -= 1;
                idx[d] += 1;
                if idx[d] < self.shape.dim(d) {
                    break;
                }
                idx[d] = 0;
            }
        }
    }

    /// Apply `f` to every element, producing a contiguous array with the
    /// same shape, dims, and axis metadata.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> AxisArray {
        let data: Vec<f32> = self.to_vec().into_iter().map(f).collect();
        AxisArray {
            storage: Arc::new(data),
            offset: 0,
            strides: self.shape.strides(),
            shape: self.shape.clone(),
            dims: self.dims.clone(),
            axes: self.axes.clone(),
        }
    }

    /// Slice one axis into a strided view, without copying data.
    ///
    /// `start` is the first selected index, `len` the number of selected
    /// elements, and `step` the (nonzero, possibly negative) index stride
    /// between them. All `len` selected indices must fall within the axis.
    /// Coordinate labels on the sliced axis are selected in lockstep; other
    /// axis metadata passes through unchanged.
    pub fn slice_axis(&self, axis: usize, start: usize, len: usize, step: isize) -> Result<AxisArray> {
        if axis >= self.ndim() {
            return Err(ArrayError::InvalidAxis {
                axis,
                ndim: self.ndim(),
            });
        }
        if step == 0 {
            return Err(ArrayError::ZeroStep);
        }
        let dim_len = self.shape.dim(axis);
        if len > 0 {
            let last = start as isize + (len as isize - 1) * step;
            if start >= dim_len {
                return Err(ArrayError::IndexOutOfBounds {
                    index: start,
                    len: dim_len,
                });
            }
            if last < 0 || last as usize >= dim_len {
                return Err(ArrayError::IndexOutOfBounds {
                    index: last.unsigned_abs(),
                    len: dim_len,
                });
            }
        }

        let mut shape_dims = self.shape.dims().to_vec();
        shape_dims[axis] = len;
        let mut strides = self.strides.clone();
        let offset = if len > 0 {
            (self.offset as isize + start as isize * strides[axis]) as usize
        } else {
            self.offset
        };
        strides[axis] *= step;

        let name = &self.dims[axis];
        let mut axes = self.axes.clone();
        if let Some(AxisInfo::Coordinate { labels, unit }) = axes.get(name) {
            let picked: Vec<String> = (0..len)
                .map(|k| labels[(start as isize + k as isize * step) as usize].clone())
                .collect();
            let unit = unit.clone();
            axes.insert(
                name.clone(),
                AxisInfo::Coordinate {
                    labels: picked,
                    unit,
                },
            );
        }

        Ok(AxisArray {
            storage: Arc::clone(&self.storage),
            offset,
            strides,
            shape: Shape::new(shape_dims),
            dims: self.dims.clone(),
            axes,
        })
    }

    /// Select a single index along an axis, dropping that dimension.
    ///
    /// The result is a view aliasing the same storage. The dimension's name
    /// and its axis metadata are removed.
    pub fn select_index(&self, axis: usize, index: usize) -> Result<AxisArray> {
        if axis >= self.ndim() {
            return Err(ArrayError::InvalidAxis {
                axis,
                ndim: self.ndim(),
            });
        }
        let dim_len = self.shape.dim(axis);
        if index >= dim_len {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                len: dim_len,
            });
        }

        let offset = (self.offset as isize + index as isize * self.strides[axis]) as usize;
        let mut shape_dims = self.shape.dims().to_vec();
        shape_dims.remove(axis);
        let mut strides = self.strides.clone();
        strides.remove(axis);
        let mut dims = self.dims.clone();
        let name = dims.remove(axis);
        let mut axes = self.axes.clone();
        axes.remove(&name);

        Ok(AxisArray {
            storage: Arc::clone(&self.storage),
            offset,
            strides,
            shape: Shape::new(shape_dims),
            dims,
            axes,
        })
    }

    /// Gather an arbitrary index set along an axis into fresh storage.
    ///
    /// Indices may repeat and need not be ordered; the output axis length is
    /// `indices.len()`. This always copies. Coordinate labels on the gathered
    /// axis are gathered in lockstep.
    pub fn take(&self, axis: usize, indices: &[usize]) -> Result<AxisArray> {
        if axis >= self.ndim() {
            return Err(ArrayError::InvalidAxis {
                axis,
                ndim: self.ndim(),
            });
        }
        let dim_len = self.shape.dim(axis);
        for &ix in indices {
            if ix >= dim_len {
                return Err(ArrayError::IndexOutOfBounds {
                    index: ix,
                    len: dim_len,
                });
            }
        }

        let mut shape_dims = self.shape.dims().to_vec();
        shape_dims[axis] = indices.len();
        let shape = Shape::new(shape_dims);

        let n = shape.numel();
        let mut data = Vec::with_capacity(n);
        if n > 0 {
            let mut idx = vec![0usize; self.ndim()];
            let mut src = idx.clone();
            'outer: loop {
                src.copy_from_slice(&idx);
                src[axis] = indices[idx[axis]];
                data.push(self.storage[self.flat_index(&src)]);
                let mut d = self.ndim();
                loop {
                    if d == 0 {
                        break 'outer;
                    }
                    d -= 1;
                    idx[d] += 1;
                    if idx[d] < shape.dim(d) {
                        break;
                    }
                    idx[d] = 0;
                }
            }
        }

        let name = &self.dims[axis];
        let mut axes = self.axes.clone();
        if let Some(AxisInfo::Coordinate { labels, unit }) = axes.get(name) {
            let picked: Vec<String> = indices.iter().map(|&i| labels[i].clone()).collect();
            let unit = unit.clone();
            axes.insert(
                name.clone(),
                AxisInfo::Coordinate {
                    labels: picked,
                    unit,
                },
            );
        }

        let strides = shape.strides();
        Ok(AxisArray {
            storage: Arc::new(data),
            offset: 0,
            strides,
            shape,
            dims: self.dims.clone(),
            axes,
        })
    }
}

/// Logical equality: same dims, shape, axis metadata, and element values,
/// regardless of memory layout.
impl PartialEq for AxisArray {
    fn eq(&self, other: &AxisArray) -> bool {
        self.dims == other.dims
            && self.shape == other.shape
            && self.axes == other.axes
            && self.to_vec() == other.to_vec()
    }
}
