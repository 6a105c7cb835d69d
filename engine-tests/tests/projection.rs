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

use num_traits::Zero;
use time::OffsetDateTime;

use vesting_unlock_core::*;
use vesting_unlock_test_utils::*;

const RUNS: usize = 100;

fn now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

/// A projection starts at the reference block, ends where everything is unlocked and the locked
/// amount never increases along the way.
#[test]
fn projection_shape() {
    let config = ProjectionConfig::default();
    for _ in 0..RUNS {
        let schedules = random_schedules(5);
        let reference_block = random_block();
        let projection = sample(&schedules, reference_block, now(), &config).unwrap();
        let end_block = projection.end_block();
        let samples = projection.collect::<Vec<_>>();

        assert!(!samples.is_empty());
        assert!(samples.len() <= config.max_points + 1);
        assert_eq!(samples[0].block, reference_block);
        assert!(samples[0].is_reference_point);
        assert!(samples[1..].iter().all(|sample| !sample.is_reference_point));
        assert_eq!(
            samples[0].locked_amount,
            aggregate(&schedules, reference_block).currently_locked
        );

        for pair in samples.windows(2) {
            assert!(pair[0].block < pair[1].block);
            assert!(pair[0].timestamp.unwrap() < pair[1].timestamp.unwrap());
            assert!(pair[0].locked_amount >= pair[1].locked_amount);
        }

        let last = samples.last().unwrap();
        match end_block {
            Some(end) if end > reference_block => {
                assert_eq!(last.block, end);
                assert!(last.locked_amount.is_zero());
            }
            _ => assert_eq!(samples.len(), 1),
        }
    }
}

/// The sample count stays within the configured bounds when the span is long enough.
#[test]
fn sample_count_bounds() {
    let config = ProjectionConfig {
        max_points: 20,
        min_points: 5,
        seconds_per_block: 6,
    };
    for _ in 0..RUNS {
        let schedules = random_schedules(3);
        let projection = sample(&schedules, 0, now(), &config).unwrap();
        let total = projection.end_block().unwrap_or(0);
        let len = projection.len();
        assert!(len <= config.max_points + 1);
        if total >= config.min_points as u64 {
            assert!(len > config.min_points);
        }
        assert_eq!(projection.count(), len);
    }
}

#[test]
fn never_completing_schedule_stays_locked() {
    let schedules = vec![schedule(1000, 0, 10), schedule(500, 5, 0)];
    let samples = sample(&schedules, 0, now(), &ProjectionConfig::default())
        .unwrap()
        .collect::<Vec<_>>();

    assert_eq!(samples.last().unwrap().block, 100);
    for sample in &samples {
        assert!(sample.locked_amount >= Balance::from(1000u32));
    }
    assert_eq!(
        samples.last().unwrap().locked_amount,
        Balance::from(1000u32)
    );
}

/// Valid schedules always produce a projection, even when its end cannot be dated.
#[test]
fn far_future_projection_terminates() {
    for _ in 0..RUNS {
        let locked = rand::random::<u128>().max(1);
        let per_block = rand::random::<u8>().max(1);
        let schedules = vec![schedule(locked, u128::from(per_block), random_block())];
        let reference_block = random_block();

        let projection = sample(
            &schedules,
            reference_block,
            now(),
            &ProjectionConfig::default(),
        )
        .unwrap();
        let end_block = projection.end_block().unwrap();
        let samples = projection.collect::<Vec<_>>();

        assert!(samples.len() <= ProjectionConfig::default().max_points + 1);
        assert_eq!(samples[0].timestamp, Some(now()));
        assert_eq!(samples.last().unwrap().block, end_block.max(reference_block));
        for pair in samples.windows(2) {
            assert!(pair[0].locked_amount >= pair[1].locked_amount);
        }
    }
}
