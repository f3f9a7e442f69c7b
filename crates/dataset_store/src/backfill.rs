//! Deferred-label backfill.

use aqi_structs::{Horizon, ObservationRow, TargetAlreadySet};
use tracing::trace;

/// Resolves pending target labels from rows that have since been
/// appended.
///
/// For every row with a pending `target_dayN`, if the row at
/// `index + 24 * N` exists its `aqi` becomes the label. Rows whose
/// future row is still missing are left pending; that is the normal
/// "not yet available" state. Already-resolved labels are skipped, so
/// repeated runs are idempotent and a second pass over unchanged data
/// reports zero updates.
///
/// Known limitation: horizons are row offsets, not elapsed time. The
/// labels are only exact while ingestion keeps its one-row-per-hour
/// cadence; gaps or duplicate runs skew which row counts as the
/// 24h/48h/72h neighbor.
///
/// # Errors
///
/// Returns an error if a resolved label would be overwritten, which
/// indicates corruption rather than a normal pending state.
pub fn backfill_targets(rows: &mut [ObservationRow]) -> Result<usize, TargetAlreadySet> {
    let total = rows.len();
    let mut updated = 0;

    for index in 0..total {
        for horizon in Horizon::ALL {
            let future = index + horizon.row_offset();
            if future >= total {
                continue;
            }
            if rows[index].target(horizon).is_some() {
                continue;
            }

            let label = f64::from(rows[future].aqi);
            rows[index].set_target(horizon, label)?;
            trace!(row = rows[index].id, %horizon, label, "resolved target");
            updated += 1;
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hourly rows with a recognisable AQI sequence.
    fn synthetic_rows(count: u64) -> Vec<ObservationRow> {
        (0..count)
            .map(|id| {
                ObservationRow::new(
                    id,
                    1_700_000_000 + id as i64 * 3600,
                    (50 + id * 3 % 200) as i32,
                    35.4,
                    (id % 24) as u32,
                    ((id / 24) % 7) as u32,
                    11,
                    2023,
                    50,
                    0,
                )
            })
            .collect()
    }

    #[test]
    fn every_resolvable_target_matches_future_aqi() {
        let mut rows = synthetic_rows(100);
        backfill_targets(&mut rows).unwrap();

        for (index, row) in rows.iter().enumerate() {
            for horizon in Horizon::ALL {
                let future = index + horizon.row_offset();
                if future < rows.len() {
                    assert_eq!(
                        row.target(horizon),
                        Some(f64::from(rows[future].aqi)),
                        "row {index} {horizon}"
                    );
                } else {
                    assert_eq!(row.target(horizon), None, "row {index} {horizon}");
                }
            }
        }
    }

    #[test]
    fn second_run_reports_zero_updates() {
        let mut rows = synthetic_rows(100);
        let first = backfill_targets(&mut rows).unwrap();
        assert!(first > 0);

        let snapshot_before = rows.clone();
        let second = backfill_targets(&mut rows).unwrap();
        assert_eq!(second, 0);
        assert_eq!(rows, snapshot_before);
    }

    #[test]
    fn update_count_covers_each_horizon() {
        let mut rows = synthetic_rows(100);
        let updated = backfill_targets(&mut rows).unwrap();
        // 76 day1 labels, 52 day2 labels, 28 day3 labels.
        assert_eq!(updated, 76 + 52 + 28);
    }

    #[test]
    fn short_history_has_nothing_to_resolve() {
        let mut rows = synthetic_rows(24);
        assert_eq!(backfill_targets(&mut rows).unwrap(), 0);
    }

    #[test]
    fn new_rows_extend_an_earlier_backfill() {
        let mut rows = synthetic_rows(30);
        backfill_targets(&mut rows).unwrap();

        let mut longer = synthetic_rows(60);
        for (row, done) in longer.iter_mut().zip(&rows) {
            *row = done.clone();
        }
        let updated = backfill_targets(&mut longer).unwrap();
        // day1: rows 6..=35 resolve now; day2: rows 0..=11.
        assert_eq!(updated, 30 + 12);
    }
}
