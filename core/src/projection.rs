// Vesting Unlock
// Copyright (C) 2019 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Projection of the locked vesting amount from a reference block until everything is unlocked.
//!
//! [sample] returns a [Projection], an iterator over [ProjectionSample]s in ascending block
//! order. The first sample is taken at the reference block, the last one at the block where the
//! last completing schedule is fully unlocked. Between them samples are spaced evenly so that
//! the number of samples stays between [ProjectionConfig::min_points] and
//! [ProjectionConfig::max_points] (plus the reference point).
//!
//! Each sample carries an estimated wall-clock time derived from a constant block time.

use core::convert::TryFrom;

use time::{Duration, OffsetDateTime};

use crate::aggregate::aggregate;
use crate::inspect::fully_unlocked_block;
use crate::{
    Balance, BlockNumber, VestingError, VestingSchedule, DEFAULT_MAX_POINTS, DEFAULT_MIN_POINTS,
    SECONDS_PER_BLOCK,
};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

const DAYS_PER_MONTH: u64 = 30;

/// Parameters of the projection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProjectionConfig {
    /// Upper bound for the number of steps after the reference point.
    pub max_points: usize,
    /// Lower bound for the number of steps, unless the span has fewer blocks.
    pub min_points: usize,
    /// Assumed block time used to estimate timestamps.
    pub seconds_per_block: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            max_points: DEFAULT_MAX_POINTS,
            min_points: DEFAULT_MIN_POINTS,
            seconds_per_block: SECONDS_PER_BLOCK,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), VestingError> {
        if self.max_points == 0 {
            return Err(VestingError::InvalidConfig("max_points must be positive"));
        }
        if self.seconds_per_block == 0 {
            return Err(VestingError::InvalidConfig(
                "seconds_per_block must be positive",
            ));
        }
        Ok(())
    }

    pub fn blocks_per_day(&self) -> u64 {
        (SECONDS_PER_DAY / u64::from(self.seconds_per_block.max(1))).max(1)
    }

    /// Number of days covered by `blocks`, rounded up.
    pub fn days_for(&self, blocks: BlockNumber) -> u64 {
        div_ceil(blocks, self.blocks_per_day())
    }

    /// Number of 30 day months covered by `days`, rounded up.
    pub fn months_for(days: u64) -> u64 {
        div_ceil(days, DAYS_PER_MONTH)
    }

    /// Estimated wall-clock time of `block`, given that `reference_block` is produced at `now`.
    ///
    /// Blocks before the reference block yield times before `now`. `None` if the time is outside
    /// of the range [OffsetDateTime] can represent.
    pub fn timestamp_at(
        &self,
        now: OffsetDateTime,
        reference_block: BlockNumber,
        block: BlockNumber,
    ) -> Option<OffsetDateTime> {
        estimate_timestamp(now, reference_block, block, self.seconds_per_block)
    }
}

fn estimate_timestamp(
    now: OffsetDateTime,
    reference_block: BlockNumber,
    block: BlockNumber,
    seconds_per_block: u32,
) -> Option<OffsetDateTime> {
    let blocks_from_now = i128::from(block) - i128::from(reference_block);
    let seconds = blocks_from_now.checked_mul(i128::from(seconds_per_block))?;
    now.checked_add(Duration::seconds(i64::try_from(seconds).ok()?))
}

/// A point of the projected unlock curve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectionSample {
    pub block: BlockNumber,
    /// Estimated time at which `block` is produced. `None` for blocks too far in the future to
    /// date.
    pub timestamp: Option<OffsetDateTime>,
    /// Vesting still locked at `block`.
    pub locked_amount: Balance,
    /// True only for the first sample, taken at the reference block.
    pub is_reference_point: bool,
}

/// Lazy sequence of [ProjectionSample]s created by [sample].
///
/// The sequence is finite. Cloning a fresh [Projection] restarts it and yields the same samples.
#[derive(Clone, Debug)]
pub struct Projection {
    schedules: Vec<VestingSchedule>,
    now: OffsetDateTime,
    reference_block: BlockNumber,
    seconds_per_block: u32,
    /// Block from which every completing schedule is fully unlocked.
    end_block: Option<BlockNumber>,
    /// Block of the last sample. Never before the reference block.
    last_block: BlockNumber,
    stride: BlockNumber,
    len: u64,
    index: u64,
}

/// Project the locked vesting of `schedules` from `reference_block` on.
///
/// `now` is the time at which `reference_block` is produced.
///
/// The projection ends at [Projection::end_block], the first block at which every completing
/// schedule has nothing locked. For schedules whose locked amount is a multiple of their per
/// block amount this is the latest [crate::Completion] block. Otherwise it is one block later,
/// when the remainder is released, so that the last sample shows no locked vesting.
///
/// Schedules that never complete are not considered for the end of the projection and their
/// locked amount is included in every sample. If every schedule is already unlocked, or none
/// ever completes, the projection consists of the reference point only.
///
/// With `total` blocks between the reference block and the end block, the samples are
/// `stride = ceil(total / point_count)` blocks apart, where `point_count` is `total` clamped to
/// [ProjectionConfig::min_points] and [ProjectionConfig::max_points]. Rounding the stride up
/// keeps the projection at no more than `max_points` steps after the reference point. The last
/// step is shortened so that the final sample is taken exactly at the end block.
pub fn sample(
    schedules: &[VestingSchedule],
    reference_block: BlockNumber,
    now: OffsetDateTime,
    config: &ProjectionConfig,
) -> Result<Projection, VestingError> {
    config.validate()?;

    let end_block = schedules.iter().filter_map(fully_unlocked_block).max();
    let last_block = end_block.unwrap_or(reference_block).max(reference_block);

    let total_blocks = last_block - reference_block;
    let point_count = total_blocks
        .max(config.min_points as u64)
        .min(config.max_points as u64)
        .max(1);
    let stride = div_ceil(total_blocks, point_count).max(1);
    let len = div_ceil(total_blocks, stride) + 1;

    log::debug!(
        "projecting {} schedules from block {} to block {} in {} samples",
        schedules.len(),
        reference_block,
        last_block,
        len
    );

    Ok(Projection {
        schedules: schedules.to_vec(),
        now,
        reference_block,
        seconds_per_block: config.seconds_per_block,
        end_block,
        last_block,
        stride,
        len,
        index: 0,
    })
}

/// Like [sample] with the current system time as the time of `reference_block`.
pub fn sample_from_now(
    schedules: &[VestingSchedule],
    reference_block: BlockNumber,
    config: &ProjectionConfig,
) -> Result<Projection, VestingError> {
    sample(schedules, reference_block, OffsetDateTime::now_utc(), config)
}

impl Projection {
    pub fn reference_block(&self) -> BlockNumber {
        self.reference_block
    }

    /// The first block at which every completing schedule is fully unlocked.
    ///
    /// May be before the reference block if all schedules are unlocked already. `None` if no
    /// schedule ever completes.
    pub fn end_block(&self) -> Option<BlockNumber> {
        self.end_block
    }

    /// Estimated time of [Projection::end_block]. `None` if there is no end block or it is too
    /// far in the future to date.
    pub fn end_timestamp(&self) -> Option<OffsetDateTime> {
        self.end_block.and_then(|block| self.timestamp_of(block))
    }

    /// Vesting locked at the reference block.
    pub fn currently_locked(&self) -> Balance {
        aggregate(&self.schedules, self.reference_block).currently_locked
    }

    fn timestamp_of(&self, block: BlockNumber) -> Option<OffsetDateTime> {
        estimate_timestamp(self.now, self.reference_block, block, self.seconds_per_block)
    }
}

impl Iterator for Projection {
    type Item = ProjectionSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let offset = self.index.saturating_mul(self.stride);
        let block = self
            .reference_block
            .saturating_add(offset)
            .min(self.last_block);

        let sample = ProjectionSample {
            block,
            timestamp: self.timestamp_of(block),
            locked_amount: aggregate(&self.schedules, block).currently_locked,
            is_reference_point: self.index == 0,
        };
        self.index += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.len - self.index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Projection {}

fn div_ceil(numerator: u64, denominator: u64) -> u64 {
    numerator / denominator + if numerator % denominator == 0 { 0 } else { 1 }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::inspect::{inspect, Completion};
    use num_traits::Zero;

    fn now() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    fn project(
        schedules: &[VestingSchedule],
        reference_block: BlockNumber,
        config: &ProjectionConfig,
    ) -> Vec<ProjectionSample> {
        sample(schedules, reference_block, now(), config)
            .unwrap()
            .collect()
    }

    #[test]
    fn linear_schedule_every_block() {
        let schedules = vec![VestingSchedule::new(100u32, 1u32, 0)];
        let samples = project(&schedules, 0, &ProjectionConfig::default());

        assert_eq!(samples.len(), 101);
        let first = &samples[0];
        assert!(first.is_reference_point);
        assert_eq!(first.block, 0);
        assert_eq!(first.timestamp, Some(now()));
        assert_eq!(first.locked_amount, Balance::from(100u32));

        let last = samples.last().unwrap();
        assert_eq!(last.block, 100);
        assert!(last.locked_amount.is_zero());
        assert_eq!(last.timestamp, Some(now() + Duration::seconds(600)));

        assert!(samples[1..].iter().all(|s| !s.is_reference_point));
        assert_eq!(samples[1].timestamp, Some(now() + Duration::seconds(6)));
    }

    #[test]
    fn limited_points() {
        let schedules = vec![VestingSchedule::new(100u32, 1u32, 0)];
        let config = ProjectionConfig {
            max_points: 10,
            ..ProjectionConfig::default()
        };
        let blocks: Vec<_> = project(&schedules, 0, &config)
            .into_iter()
            .map(|s| s.block)
            .collect();
        assert_eq!(blocks, (0..=10).map(|i| i * 10).collect::<Vec<_>>());
    }

    #[test]
    fn uneven_span_clamps_last_sample() {
        let schedules = vec![VestingSchedule::new(151u32, 1u32, 0)];
        let samples = project(&schedules, 0, &ProjectionConfig::default());

        assert_eq!(samples.len(), 77);
        assert_eq!(samples[75].block, 150);
        assert_eq!(samples[76].block, 151);
        assert!(samples[76].locked_amount.is_zero());
    }

    #[test]
    fn short_span() {
        let schedules = vec![VestingSchedule::new(5u32, 1u32, 0)];
        let blocks: Vec<_> = project(&schedules, 0, &ProjectionConfig::default())
            .into_iter()
            .map(|s| s.block)
            .collect();
        assert_eq!(blocks, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn starts_at_reference_block() {
        let schedules = vec![VestingSchedule::new(1000u32, 10u32, 100)];
        let samples = project(&schedules, 150, &ProjectionConfig::default());

        assert_eq!(samples[0].block, 150);
        assert_eq!(samples[0].locked_amount, Balance::from(500u32));
        assert_eq!(samples.last().unwrap().block, 200);
        for pair in samples.windows(2) {
            assert!(pair[0].block < pair[1].block);
            assert!(pair[0].locked_amount >= pair[1].locked_amount);
        }
    }

    #[test]
    fn remainder_released_after_completion_block() {
        let schedule = VestingSchedule::new(1001u32, 10u32, 0);
        assert_eq!(inspect(&schedule, 0).completion, Completion::At(100));

        let projection = sample(&[schedule], 0, now(), &ProjectionConfig::default()).unwrap();
        assert_eq!(projection.end_block(), Some(101));
        let samples: Vec<_> = projection.collect();
        let last = samples.last().unwrap();
        assert_eq!(last.block, 101);
        assert!(last.locked_amount.is_zero());
        assert!(samples.iter().any(|s| s.locked_amount == Balance::from(1u32)));
    }

    #[test]
    fn already_unlocked() {
        let schedules = vec![VestingSchedule::new(1000u32, 10u32, 100)];
        let projection = sample(&schedules, 500, now(), &ProjectionConfig::default()).unwrap();

        assert_eq!(projection.end_block(), Some(200));
        assert_eq!(
            projection.end_timestamp(),
            Some(now() - Duration::seconds(300 * 6))
        );
        let samples: Vec<_> = projection.collect();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].is_reference_point);
        assert_eq!(samples[0].block, 500);
        assert!(samples[0].locked_amount.is_zero());
    }

    #[test]
    fn no_schedules() {
        let projection = sample(&[], 42, now(), &ProjectionConfig::default()).unwrap();
        assert_eq!(projection.end_block(), None);
        assert_eq!(projection.end_timestamp(), None);
        assert!(projection.currently_locked().is_zero());

        let samples: Vec<_> = projection.collect();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].block, 42);
    }

    #[test]
    fn never_completing_schedule_stays_locked() {
        let schedules = vec![
            VestingSchedule::new(100u32, 0u32, 0),
            VestingSchedule::new(100u32, 1u32, 0),
        ];
        let projection = sample(&schedules, 0, now(), &ProjectionConfig::default()).unwrap();
        assert_eq!(projection.end_block(), Some(100));
        assert_eq!(projection.currently_locked(), Balance::from(200u32));

        let last = projection.last().unwrap();
        assert_eq!(last.block, 100);
        assert_eq!(last.locked_amount, Balance::from(100u32));
    }

    #[test]
    fn only_never_completing_schedules() {
        let schedules = vec![VestingSchedule::new(100u32, 0u32, 0)];
        let samples = project(&schedules, 10, &ProjectionConfig::default());
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].locked_amount, Balance::from(100u32));
    }

    #[test]
    fn restartable() {
        let schedules = vec![
            VestingSchedule::new(1000u32, 3u32, 0),
            VestingSchedule::new(500u32, 7u32, 50),
        ];
        let projection = sample(&schedules, 20, now(), &ProjectionConfig::default()).unwrap();
        assert_eq!(projection.len(), projection.clone().count());

        let first: Vec<_> = projection.clone().collect();
        let second: Vec<_> = projection.collect();
        assert_eq!(first, second);

        let again = project(&schedules, 20, &ProjectionConfig::default());
        assert_eq!(first, again);
    }

    #[test]
    fn invalid_config() {
        let schedules = vec![VestingSchedule::new(100u32, 1u32, 0)];
        let config = ProjectionConfig {
            max_points: 0,
            ..ProjectionConfig::default()
        };
        assert!(matches!(
            sample(&schedules, 0, now(), &config),
            Err(VestingError::InvalidConfig(_))
        ));

        let config = ProjectionConfig {
            seconds_per_block: 0,
            ..ProjectionConfig::default()
        };
        assert!(matches!(
            sample(&schedules, 0, now(), &config),
            Err(VestingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn far_future_end_has_no_timestamp() {
        let schedules = vec![VestingSchedule::new(1_000_000_000_000u64, 1u32, 0)];
        let projection = sample(&schedules, 0, now(), &ProjectionConfig::default()).unwrap();

        assert_eq!(projection.end_block(), Some(1_000_000_000_000));
        assert_eq!(projection.end_timestamp(), None);

        let samples: Vec<_> = projection.collect();
        assert_eq!(samples.len(), 101);
        assert_eq!(samples[0].timestamp, Some(now()));
        let last = samples.last().unwrap();
        assert_eq!(last.block, 1_000_000_000_000);
        assert_eq!(last.timestamp, None);
        assert!(last.locked_amount.is_zero());
    }

    #[test]
    fn completion_beyond_largest_block() {
        let schedules = vec![VestingSchedule::new(u128::MAX, 1u32, 0)];
        let samples = project(&schedules, 0, &ProjectionConfig::default());

        assert_eq!(samples.len(), 101);
        let last = samples.last().unwrap();
        assert_eq!(last.block, BlockNumber::MAX);
        assert_eq!(last.timestamp, None);
        assert_eq!(
            last.locked_amount,
            Balance::from(u128::MAX) - Balance::from(u64::MAX)
        );
    }

    #[test]
    fn timestamps() {
        let config = ProjectionConfig::default();
        assert_eq!(config.timestamp_at(now(), 100, 100), Some(now()));
        assert_eq!(
            config.timestamp_at(now(), 100, 90),
            Some(now() - Duration::seconds(60))
        );
        assert_eq!(config.timestamp_at(now(), 0, u64::MAX), None);
    }

    #[test]
    fn days_and_months() {
        let config = ProjectionConfig::default();
        assert_eq!(config.blocks_per_day(), 14_400);
        assert_eq!(config.days_for(0), 0);
        assert_eq!(config.days_for(14_400), 1);
        assert_eq!(config.days_for(14_401), 2);
        assert_eq!(ProjectionConfig::months_for(30), 1);
        assert_eq!(ProjectionConfig::months_for(31), 2);
    }
}
