//! Descriptive statistics over branch samples
//!
//! All functions borrow the sample immutably; sorting and grouping happen on
//! copies so the caller's ordering is never disturbed. Empty samples yield
//! zero for every measure rather than an error.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A numeric measurement that can enter mean/median computations
pub trait Measurement: Copy + PartialOrd + Default {
    fn to_f64(self) -> f64;
}

impl Measurement for usize {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Measurement for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Largest element, or zero for an empty sample
pub fn max<T: Measurement>(sample: &[T]) -> T {
    sample
        .iter()
        .copied()
        .reduce(|largest, value| if value > largest { value } else { largest })
        .unwrap_or_default()
}

/// Arithmetic mean, or 0.0 for an empty sample
pub fn mean<T: Measurement>(sample: &[T]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let sum: f64 = sample.iter().map(|value| value.to_f64()).sum();
    sum / sample.len() as f64
}

/// Median of a sorted copy, or 0.0 for an empty sample
///
/// Even-length samples average the two central elements.
pub fn median<T: Measurement>(sample: &[T]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }

    let mut sorted: Vec<f64> = sample.iter().map(|value| value.to_f64()).collect();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Group `sample` by `key`, ascending by key
///
/// The result depends only on the multiset of values, not on their order.
pub fn frequency_table<T, K, F>(sample: &[T], key: F) -> Vec<(K, usize)>
where
    T: Copy,
    K: Ord,
    F: Fn(T) -> K,
{
    let mut groups: BTreeMap<K, usize> = BTreeMap::new();
    for value in sample {
        *groups.entry(key(*value)).or_insert(0) += 1;
    }
    groups.into_iter().collect()
}

/// Grouping key for broadcast weights: the weight rounded to 2 decimals
///
/// Stored as integer hundredths so equality and ordering are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightKey(i64);

impl WeightKey {
    pub fn from_weight(weight: f64) -> Self {
        WeightKey((weight * 100.0).round() as i64)
    }

    pub fn hundredths(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.value()))
    }
}

impl Serialize for WeightKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyBucket<K> {
    pub value: K,
    pub count: usize,
}

/// Count, maximum, mean, median and distribution of one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary<T, K> {
    pub count: usize,
    pub max: T,
    pub mean: f64,
    pub median: f64,
    pub distribution: Vec<FrequencyBucket<K>>,
}

/// Summary of branch sizes (transactions per branch)
pub type SizeSummary = SampleSummary<usize, usize>;

/// Summary of branch broadcast weights
pub type WeightSummary = SampleSummary<f64, WeightKey>;

impl<T: Measurement, K> SampleSummary<T, K> {
    fn build<F>(sample: &[T], key: F) -> Self
    where
        K: Ord,
        F: Fn(T) -> K,
    {
        Self {
            count: sample.len(),
            max: max(sample),
            mean: mean(sample),
            median: median(sample),
            distribution: frequency_table(sample, key)
                .into_iter()
                .map(|(value, count)| FrequencyBucket { value, count })
                .collect(),
        }
    }
}

impl SizeSummary {
    pub fn from_sizes(sizes: &[usize]) -> Self {
        Self::build(sizes, |size| size)
    }
}

impl WeightSummary {
    pub fn from_weights(weights: &[f64]) -> Self {
        Self::build(weights, WeightKey::from_weight)
    }
}
