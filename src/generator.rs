//! SyntheticDataGenerator - deterministic fabrication of seed records.
//!
//! All randomness comes from a [`StdRng`] seeded with a fixed constant, and all
//! times are offsets from an explicit baseline. Two generators built with the
//! same seed and baseline produce identical draws.

use std::ops::Range;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::record::{sort_natural, Record, Timestamp};

/// Seed used by every mock service unless configured otherwise.
pub const DEFAULT_SEED: u64 = 42;

pub struct SyntheticDataGenerator {
    rng: StdRng,
    seed: u64,
    baseline: NaiveDateTime,
}

impl SyntheticDataGenerator {
    pub fn new(seed: u64, baseline: NaiveDateTime) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            baseline,
        }
    }

    /// Generator anchored at midnight of `date`.
    pub fn for_date(seed: u64, date: NaiveDate) -> Self {
        Self::new(seed, date.and_time(chrono::NaiveTime::default()))
    }

    /// Generator anchored at midnight today.
    pub fn today(seed: u64) -> Self {
        Self::for_date(seed, chrono::Local::now().date_naive())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn baseline(&self) -> Timestamp {
        self.baseline
    }

    /// Uniform draw from `range` (end exclusive).
    pub fn between(&mut self, range: Range<i64>) -> i64 {
        if range.is_empty() {
            return range.start;
        }
        self.rng.gen_range(range)
    }

    /// Uniform index into a collection of `len` items.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// True with probability `percent`/100, drawn as `0..100 < percent`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.rng.gen_range(0..100u32) < percent
    }

    /// Seeded pick from a pool. Panics on an empty pool.
    pub fn pick<'a, T>(&mut self, pool: &'a [T]) -> &'a T {
        let i = self.index(pool.len());
        &pool[i]
    }

    /// Pool entry for record number `n`, cycling through the pool.
    pub fn cycle<T>(pool: &[T], n: usize) -> &T {
        &pool[n % pool.len()]
    }

    /// Make `draws` picks from `pool`, rejecting repeats. May return fewer
    /// than `draws` items.
    pub fn distinct<T: Clone + PartialEq>(&mut self, pool: &[T], draws: usize) -> Vec<T> {
        let mut chosen: Vec<T> = Vec::with_capacity(draws);
        for _ in 0..draws {
            let candidate = self.pick(pool);
            if !chosen.contains(candidate) {
                chosen.push(candidate.clone());
            }
        }
        chosen
    }

    /// Baseline shifted by a random number of days from `days`.
    pub fn days_from_baseline(&mut self, days: Range<i64>) -> Timestamp {
        let offset = self.between(days);
        self.baseline + Duration::days(offset)
    }

    /// Baseline shifted by whole days, hours and minutes. No randomness.
    pub fn at(&self, days: i64, hours: i64, minutes: i64) -> Timestamp {
        self.baseline + Duration::days(days) + Duration::hours(hours) + Duration::minutes(minutes)
    }

    /// Sort a generated set into its natural order.
    pub fn sorted<T: Record>(mut records: Vec<T>) -> Vec<T> {
        sort_natural(&mut records);
        records
    }
}
