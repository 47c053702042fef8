use crate::methods::C14nMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a canonicalization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Method that produced the bytes.
    pub method: C14nMethod,
    /// Counters such as `elements` or `comments_dropped`.
    pub metrics: BTreeMap<String, u64>,
}

impl TransformReport {
    /// Creates an empty report for `method`.
    pub fn new(method: C14nMethod) -> Self {
        Self {
            method,
            metrics: BTreeMap::new(),
        }
    }

    /// Increments the named counter by `by`.
    pub fn add(&mut self, metric: &str, by: u64) {
        *self.metrics.entry(metric.to_string()).or_insert(0) += by;
    }

    /// Current value of a counter; absent counters read as zero.
    pub fn metric(&self, metric: &str) -> u64 {
        self.metrics.get(metric).copied().unwrap_or(0)
    }
}
