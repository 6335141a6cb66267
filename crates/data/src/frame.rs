use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;

use crate::error::DataError;
use crate::partition::Partitions;

/// A record batch bound to the columns that partition it.
#[derive(Debug, Clone)]
pub struct GroupedFrame {
    batch: RecordBatch,
    keys: Vec<String>,
}

impl GroupedFrame {
    /// Groups `batch` by `keys`.
    ///
    /// # Errors
    ///
    /// - [`DataError::UnsupportedTable`] when `keys` is empty.
    /// - [`DataError::MissingColumn`] when a key column does not exist.
    pub fn new<I, S>(batch: RecordBatch, keys: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(DataError::UnsupportedTable(
                "grouped frame requires at least one key column".to_string(),
            ));
        }
        if let Some(missing) = keys.iter().find(|k| batch.column_by_name(k).is_none()) {
            return Err(DataError::MissingColumn(missing.clone()));
        }
        Ok(Self { batch, keys })
    }

    /// The underlying (ungrouped) batch.
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Partition key column names.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Drops the grouping and returns the batch.
    #[must_use]
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    /// Partitions the rows by the key columns.
    ///
    /// # Errors
    ///
    /// Returns an error when a key column is missing or cannot be compared.
    pub fn partitions(&self) -> Result<Partitions, DataError> {
        let columns = self
            .keys
            .iter()
            .map(|k| {
                self.batch
                    .column_by_name(k)
                    .cloned()
                    .ok_or_else(|| DataError::MissingColumn(k.clone()))
            })
            .collect::<Result<Vec<ArrayRef>, _>>()?;
        let parts = Partitions::from_key_columns(&columns, self.batch.num_rows())?;
        tracing::debug!(
            "Partitioned {} rows by {:?} into {} groups",
            self.batch.num_rows(),
            self.keys,
            parts.len()
        );
        Ok(parts)
    }
}

/// Input table handed to the band engine: either one series or a table
/// partitioned by key columns.
#[derive(Debug, Clone)]
pub enum BandFrame {
    /// Whole table is one rolling scope
    Flat(RecordBatch),
    /// Each key combination is an independent rolling scope
    Grouped(GroupedFrame),
}

impl BandFrame {
    /// Builds a flat frame for empty `keys`, a grouped frame otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingColumn`] when a key column does not exist.
    pub fn from_parts<S: AsRef<str>>(batch: RecordBatch, keys: &[S]) -> Result<Self, DataError> {
        if keys.is_empty() {
            Ok(BandFrame::Flat(batch))
        } else {
            GroupedFrame::new(batch, keys.iter().map(|k| k.as_ref().to_string()))
                .map(BandFrame::Grouped)
        }
    }

    /// The underlying batch.
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        match self {
            BandFrame::Flat(batch) => batch,
            BandFrame::Grouped(grouped) => grouped.batch(),
        }
    }

    /// Partition key column names (empty for a flat frame).
    #[must_use]
    pub fn group_keys(&self) -> &[String] {
        match self {
            BandFrame::Flat(_) => &[],
            BandFrame::Grouped(grouped) => grouped.keys(),
        }
    }

    /// Returns true for a grouped frame.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, BandFrame::Grouped(_))
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch().num_rows()
    }

    /// Row partitions: one for a flat frame, one per key combination otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when grouping keys cannot be compared.
    pub fn partitions(&self) -> Result<Partitions, DataError> {
        match self {
            BandFrame::Flat(batch) => Ok(Partitions::single(batch.num_rows())),
            BandFrame::Grouped(grouped) => grouped.partitions(),
        }
    }
}

impl From<RecordBatch> for BandFrame {
    fn from(batch: RecordBatch) -> Self {
        BandFrame::Flat(batch)
    }
}

impl From<GroupedFrame> for BandFrame {
    fn from(grouped: GroupedFrame) -> Self {
        BandFrame::Grouped(grouped)
    }
}
