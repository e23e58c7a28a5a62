use crate::traits::State;
use serde::{Deserialize, Serialize};

/// A sampled orbit stored as three coordinate columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Trajectory {
    /// Allocates `len` zeroed points. Sweeps allocate once and overwrite per step.
    pub fn with_len(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            z: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Resizes the columns to `len` points, keeping the allocation when possible.
    pub fn resize(&mut self, len: usize) {
        self.x.resize(len, 0.0);
        self.y.resize(len, 0.0);
        self.z.resize(len, 0.0);
    }

    pub fn set(&mut self, index: usize, state: &State) {
        self.x[index] = state.x;
        self.y[index] = state.y;
        self.z[index] = state.z;
    }

    pub fn point(&self, index: usize) -> State {
        State::new(self.x[index], self.y[index], self.z[index])
    }

    pub fn first(&self) -> Option<State> {
        (!self.is_empty()).then(|| self.point(0))
    }

    pub fn last(&self) -> Option<State> {
        self.len().checked_sub(1).map(|i| self.point(i))
    }

    pub fn points(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }
}
