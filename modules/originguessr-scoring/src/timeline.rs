//! Discretized historical timeline.
//!
//! Years run from 5,000,000 BC to 2025 AD with resolution increasing toward
//! the present: 100,000-year steps in deep prehistory down to single years
//! after 1900. Year scoring measures error in timeline steps rather than in
//! raw years, and the year slider moves along the same entries.

use tracing::debug;

/// `(start, end, step)` generators, both ends inclusive, in order of
/// increasing resolution.
pub const TIMELINE_RANGES: [(i64, i64, i64); 19] = [
    (-5_000_000, -3_100_000, 100_000),
    (-3_000_000, -1_050_000, 50_000),
    (-1_000_000, -525_000, 25_000),
    (-500_000, -320_000, 20_000),
    (-300_000, -110_000, 10_000),
    (-100_000, -55_000, 5_000),
    (-50_000, -32_500, 2_500),
    (-30_000, -11_000, 1_000),
    (-10_000, -5_500, 500),
    (-5_000, -3_250, 250),
    (-3_000, -1_100, 100),
    (-1_000, -250, 50),
    (-200, 25, 25),
    (0, 480, 20),
    (500, 1_015, 15),
    (1_030, 1_490, 10),
    (1_500, 1_745, 5),
    (1_750, 1_898, 2),
    (1_900, 2_025, 1),
];

/// Initial slider year. Always a timeline member even though no range lands on it.
pub const DEFAULT_YEAR: i64 = 1337;

/// Immutable, strictly increasing sequence of representative years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineModel {
    years: Vec<i64>,
}

impl Default for TimelineModel {
    fn default() -> Self {
        Self::build()
    }
}

impl TimelineModel {
    pub fn build() -> Self {
        let mut years: Vec<i64> = TIMELINE_RANGES
            .iter()
            .flat_map(|&(start, end, step)| (start..=end).step_by(step as usize))
            .collect();

        if !years.contains(&DEFAULT_YEAR) {
            years.push(DEFAULT_YEAR);
        }
        years.sort_unstable();
        years.dedup();

        debug!(len = years.len(), "Built timeline");
        Self { years }
    }

    pub fn years(&self) -> &[i64] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn first(&self) -> i64 {
        self.years[0]
    }

    pub fn last(&self) -> i64 {
        self.years[self.years.len() - 1]
    }

    pub fn year_at(&self, index: usize) -> Option<i64> {
        self.years.get(index).copied()
    }

    /// Index of `year` if it is exactly a timeline entry.
    pub fn position_of(&self, year: i64) -> Option<usize> {
        self.years.binary_search(&year).ok()
    }

    /// Slider position the year picker starts at.
    pub fn default_index(&self) -> usize {
        self.position_of(DEFAULT_YEAR).unwrap_or(0)
    }

    /// Entry nearest to `year` and its index. On an exact tie the earlier
    /// (smaller) year wins. Years beyond either end clamp to that end.
    pub fn closest_index(&self, year: i64) -> (i64, usize) {
        let upper = self.years.partition_point(|&y| y < year);

        let index = if upper == 0 {
            0
        } else if upper == self.years.len() {
            upper - 1
        } else {
            let below = self.years[upper - 1];
            let above = self.years[upper];
            if year.abs_diff(below) <= above.abs_diff(year) {
                upper - 1
            } else {
                upper
            }
        };

        (self.years[index], index)
    }

    /// Previous and next entries around `index`, each clamped to the entry
    /// itself at the ends of the timeline. `None` if `index` is out of range.
    pub fn neighbors(&self, index: usize) -> Option<(i64, i64)> {
        let current = self.year_at(index)?;
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.year_at(i))
            .unwrap_or(current);
        let next = self.year_at(index + 1).unwrap_or(current);
        Some((prev, next))
    }
}
