//! In-memory view of the dataset plus the storage version it was
//! loaded at.

use aqi_structs::ObservationRow;
use object_store::UpdateVersion;

use crate::backfill::backfill_targets;
use crate::StoreError;

/// A loaded copy of the full ordered row collection.
///
/// Mutable only via [`Snapshot::append`] and
/// [`Snapshot::backfill_targets`]; all mutations land atomically in a
/// single conditional push.
#[derive(Debug, Clone)]
pub struct Snapshot {
    rows: Vec<ObservationRow>,
    version: Option<UpdateVersion>,
}

impl Snapshot {
    /// The cold-start snapshot: no rows, no storage version.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            version: None,
        }
    }

    #[must_use]
    pub(crate) fn from_parts(rows: Vec<ObservationRow>, version: Option<UpdateVersion>) -> Self {
        Self { rows, version }
    }

    /// The full ordered row collection.
    #[must_use]
    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recently appended row.
    #[must_use]
    pub fn latest(&self) -> Option<&ObservationRow> {
        self.rows.last()
    }

    /// Storage version observed at load time, `None` for a snapshot
    /// that did not exist yet.
    #[must_use]
    pub(crate) fn version(&self) -> Option<&UpdateVersion> {
        self.version.as_ref()
    }

    /// Appends a row at the end, assigning the next sequential id.
    ///
    /// Returns the assigned id: `previous_max_id + 1`, or `0` for the
    /// first row.
    pub fn append(&mut self, mut row: ObservationRow) -> u64 {
        let id = self.rows.last().map_or(0, |last| last.id + 1);
        row.id = id;
        self.rows.push(row);
        id
    }

    /// Resolves every pending target whose future row now exists.
    ///
    /// Returns the number of labels filled.
    ///
    /// # Errors
    ///
    /// Returns an error on an attempted overwrite of a resolved label.
    pub fn backfill_targets(&mut self) -> Result<usize, StoreError> {
        backfill_targets(&mut self.rows).map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use aqi_structs::ObservationRow;

    use super::*;

    fn row() -> ObservationRow {
        ObservationRow::new(999, 1_700_000_000, 100, 35.4, 0, 0, 1, 2024, 100, 0)
    }

    #[test]
    fn first_append_gets_id_zero() {
        let mut snapshot = Snapshot::empty();
        assert_eq!(snapshot.append(row()), 0);
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let mut snapshot = Snapshot::empty();
        for expected in 0..10 {
            let id = snapshot.append(row());
            assert_eq!(id, expected);
        }
        let ids: Vec<u64> = snapshot.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<u64>>());
    }
}
