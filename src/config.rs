//! Scalar parameters handed through to the engine.

use crate::error::Result;
use crate::utils::validate_thread_count;
use serde::{Deserialize, Serialize};

/// Scalars passed alongside the batch. No cross-field invariants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallParameters {
    /// Upper bound on segment length, in bins
    pub max_segment_size: f64,
    /// Worker threads the engine may start
    pub thread_count: usize,
    pub verbose: bool,
}

impl Default for CallParameters {
    fn default() -> Self {
        Self {
            max_segment_size: f64::INFINITY,
            thread_count: 1,
            verbose: false,
        }
    }
}

impl CallParameters {
    pub fn new(max_segment_size: f64, thread_count: usize, verbose: bool) -> Self {
        Self {
            max_segment_size,
            thread_count,
            verbose,
        }
    }

    pub fn with_max_segment_size(mut self, max_segment_size: f64) -> Self {
        self.max_segment_size = max_segment_size;
        self
    }

    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Only `thread_count` is checked; `max_segment_size` is the engine's
    /// to interpret, whatever its value.
    pub fn validate(&self) -> Result<()> {
        validate_thread_count(self.thread_count)
    }
}
