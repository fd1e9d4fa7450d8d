//! Execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// Histogram of measured bit strings.
///
/// Bit strings are written qubit 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring`.
    pub fn get(&self, bitstring: &str) -> Option<u64> {
        self.counts.get(bitstring).copied()
    }

    /// Sum of all observations.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bit strings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Entries by descending count, ties broken by bit string.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent bit string.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequencies.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), if total > 0.0 { v as f64 / total } else { 0.0 }))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Counts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for bitstring in iter {
            counts.insert(bitstring, 1);
        }
        counts
    }
}

/// The outcome of a finished job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The job that produced it.
    pub job_id: JobId,
    /// Name of the backend the job ran on.
    pub backend_name: String,
    /// Number of shots executed.
    pub shots: u32,
    /// Whether every shot completed.
    pub success: bool,
    /// Histogram of outcomes.
    pub counts: Counts,
    /// Per-shot outcomes, in shot order.
    pub memory: Vec<String>,
    /// Job seed the per-shot seeds were derived from.
    pub seed: u64,
    /// Execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

/// Render a raw measurement register as a bit string, qubit 0 first.
///
/// The value is zero-padded to `num_qubits` binary digits and reversed.
/// Values wider than `num_qubits` keep all their bits.
pub fn outcome_to_bitstring(raw: u64, num_qubits: u32) -> String {
    format!("{raw:0width$b}", width = num_qubits as usize)
        .chars()
        .rev()
        .collect()
}
