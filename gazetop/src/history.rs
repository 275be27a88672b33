//! Bounded rolling window of samples backing the live chart.

use std::collections::VecDeque;

use crate::error::ChartError;
use crate::types::{Emotion, EmotionCounts, Sample};

pub const DEFAULT_CAPACITY: i64 = 20;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Keeps the last `cap` samples as six parallel axes: the sample index and
/// one count per emotion. All axes always have the same length.
#[derive(Debug, Clone)]
pub struct RollingSeriesBuffer {
    indices: VecDeque<i64>,
    counts: [VecDeque<i64>; 5],
    cap: usize,
}

impl RollingSeriesBuffer {
    pub fn new(capacity: i64) -> Result<Self, ChartError> {
        if capacity <= 0 {
            return Err(ChartError::InvalidConfig(format!(
                "buffer capacity must be positive, got {capacity}"
            )));
        }
        let cap = usize::try_from(capacity).map_err(|_| {
            ChartError::InvalidConfig(format!("buffer capacity too large: {capacity}"))
        })?;
        // Don't preallocate absurd capacities up front
        let prealloc = cap.min(1024);
        Ok(Self {
            indices: VecDeque::with_capacity(prealloc),
            counts: std::array::from_fn(|_| VecDeque::with_capacity(prealloc)),
            cap,
        })
    }

    /// Append one sample to every axis, evicting the oldest once full.
    /// Indices are expected to increase but are not checked.
    pub fn add(
        &mut self,
        index: i64,
        neutral: i64,
        happy: i64,
        sad: i64,
        surprised: i64,
        anger: i64,
    ) {
        push_capped(&mut self.indices, index, self.cap);
        for (dq, v) in self
            .counts
            .iter_mut()
            .zip([neutral, happy, sad, surprised, anger])
        {
            push_capped(dq, v, self.cap);
        }
    }

    pub fn push_sample(&mut self, s: &Sample) {
        let c = s.counts;
        self.add(s.index, c.neutral, c.happy, c.sad, c.surprised, c.anger);
    }

    pub fn indices(&self) -> &VecDeque<i64> {
        &self.indices
    }

    pub fn series(&self, e: Emotion) -> &VecDeque<i64> {
        &self.counts[e.index()]
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn sample_at(&self, i: usize) -> Option<Sample> {
        let index = *self.indices.get(i)?;
        let mut v = [0i64; 5];
        for (slot, dq) in v.iter_mut().zip(&self.counts) {
            *slot = *dq.get(i)?;
        }
        Some(Sample {
            index,
            counts: EmotionCounts::from_array(v),
        })
    }

    pub fn latest(&self) -> Option<Sample> {
        self.sample_at(self.len().checked_sub(1)?)
    }

    /// Samples in arrival order, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|i| self.sample_at(i))
    }

    // (min, max) of the sample index axis
    pub fn x_bounds(&self) -> Option<(i64, i64)> {
        min_max(self.indices.iter().copied())
    }

    // (min, max) across all five count axes combined
    pub fn y_bounds(&self) -> Option<(i64, i64)> {
        min_max(self.counts.iter().flatten().copied())
    }
}

fn min_max(mut it: impl Iterator<Item = i64>) -> Option<(i64, i64)> {
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}
