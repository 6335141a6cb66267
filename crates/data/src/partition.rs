use std::collections::HashMap;

use arrow::array::ArrayRef;
use arrow::row::{RowConverter, SortField};

use crate::error::DataError;

/// Assignment of every row of a table to one partition.
///
/// Partitions are numbered in order of first appearance and each one lists
/// its rows in ascending (original) order, so walking a partition visits its
/// rows in the order the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitions {
    /// Rows of each partition, ascending.
    groups: Vec<Vec<usize>>,
    /// Partition id of each row.
    row_partition: Vec<usize>,
    /// Position of each row inside its partition.
    row_position: Vec<usize>,
}

impl Partitions {
    /// All `num_rows` rows in a single partition (none for an empty table).
    #[must_use]
    pub fn single(num_rows: usize) -> Self {
        let groups = if num_rows == 0 {
            Vec::new()
        } else {
            vec![(0..num_rows).collect()]
        };
        Self {
            groups,
            row_partition: vec![0; num_rows],
            row_position: (0..num_rows).collect(),
        }
    }

    /// Partitions `num_rows` rows by the values of `keys`.
    ///
    /// Keys are compared through Arrow's row format, so composite keys of any
    /// encodable type work and null keys compare equal to each other.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Arrow`] if a key type cannot be row-encoded.
    pub fn from_key_columns(keys: &[ArrayRef], num_rows: usize) -> Result<Self, DataError> {
        if keys.is_empty() {
            return Ok(Self::single(num_rows));
        }

        let fields = keys
            .iter()
            .map(|col| SortField::new(col.data_type().clone()))
            .collect();
        let converter = RowConverter::new(fields)?;
        let rows = converter.convert_columns(keys)?;

        let mut lookup = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut row_partition = Vec::with_capacity(num_rows);
        let mut row_position = Vec::with_capacity(num_rows);

        for (row_idx, row) in rows.iter().enumerate() {
            let id = *lookup.entry(row).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            row_position.push(groups[id].len());
            row_partition.push(id);
            groups[id].push(row_idx);
        }

        Ok(Self {
            groups,
            row_partition,
            row_position,
        })
    }

    /// Number of partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true when there are no partitions (empty table).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of rows covered.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.row_partition.len()
    }

    /// Rows of partition `id`, ascending.
    #[must_use]
    pub fn rows(&self, id: usize) -> &[usize] {
        &self.groups[id]
    }

    /// Iterates partitions in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Size of the largest partition.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.groups.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Partition id of `row`.
    #[must_use]
    pub fn partition_of(&self, row: usize) -> usize {
        self.row_partition[row]
    }

    /// Row `lag` steps before `row` within the same partition, if any.
    #[must_use]
    pub fn lagged_row(&self, row: usize, lag: usize) -> Option<usize> {
        let pos = self.row_position[row].checked_sub(lag)?;
        Some(self.groups[self.row_partition[row]][pos])
    }
}
