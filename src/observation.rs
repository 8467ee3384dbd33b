//! Observation payloads returned by the Catcher environment.
//!
//! Pixel observations are a flat `f32` buffer plus the shape the caller asked
//! for, in row-major order. With the `ndarray` feature they convert into an
//! `ndarray::ArrayD<f32>` of that shape.

/// A dense row-major image with an explicit shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Pixels {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Pixels {
    /// `data.len()` must equal the product of `shape`; callers inside the crate guarantee it.
    pub(crate) fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { shape, data }
    }

    pub fn shape(&self) -> &[usize] { &self.shape }
    pub fn data(&self) -> &[f32] { &self.data }
    pub fn into_data(self) -> Vec<f32> { self.data }

    /// Number of cells set to a non-zero value.
    pub fn lit_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }
}

/// What `observe()` hands back, depending on the configured output type.
#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// `[fruit_row, fruit_col, basket_col]`
    Position([usize; 3]),
    Pixels(Pixels),
}

impl Observation {
    pub fn as_position(&self) -> Option<&[usize; 3]> {
        match self {
            Observation::Position(p) => Some(p),
            Observation::Pixels(_) => None,
        }
    }

    pub fn as_pixels(&self) -> Option<&Pixels> {
        match self {
            Observation::Pixels(p) => Some(p),
            Observation::Position(_) => None,
        }
    }
}

#[cfg(feature = "ndarray")]
mod ndarray_impl {
    use super::Pixels;
    use crate::core::{EnvError, Result};
    use ndarray::{ArrayD, IxDyn};

    impl Pixels {
        /// Copy into an `ndarray::ArrayD<f32>` with this observation's shape.
        pub fn to_ndarray(&self) -> Result<ArrayD<f32>> {
            ArrayD::from_shape_vec(IxDyn(&self.shape), self.data.clone())
                .map_err(|e| EnvError::Other(format!("pixel shape mismatch: {e}")))
        }
    }

}
