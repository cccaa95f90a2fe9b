//! Named metric tables

use std::collections::btree_map::{self, BTreeMap};

use arrow::record_batch::RecordBatch;

use crate::stats::{column_values, SummaryStats};
use crate::Result;

/// Delimiter between the table kind and its series token in artifact names,
/// e.g. `advantages__iter_0`.
pub const LABEL_DELIMITER: &str = "__";

/// A named two-dimensional table loaded from one CSV artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    name: String,
    batch: RecordBatch,
}

impl MetricTable {
    /// Create a table from a name and its data.
    #[must_use]
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Get the table name (artifact stem).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the underlying record batch.
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Series label: the token after the first `__` in the name.
    ///
    /// Names without the delimiter are used whole.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .split(LABEL_DELIMITER)
            .nth(1)
            .unwrap_or(&self.name)
    }

    /// Values of the first column as `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no columns or the column cannot be
    /// cast to Float64.
    pub fn first_column(&self) -> Result<Vec<f64>> {
        column_values(&self.batch, 0)
    }

    /// Summary statistics of the first column, `None` if it holds no values.
    ///
    /// # Errors
    ///
    /// Same as [`first_column`](Self::first_column).
    pub fn first_column_stats(&self) -> Result<Option<SummaryStats>> {
        Ok(SummaryStats::from_values(&self.first_column()?))
    }
}

/// Metric tables keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTables {
    tables: BTreeMap<String, MetricTable>,
}

impl MetricTables {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, replacing any table with the same name.
    pub fn insert(&mut self, table: MetricTable) -> Option<MetricTable> {
        self.tables.insert(table.name().to_string(), table)
    }

    /// Look up a table by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricTable> {
        self.tables.get(name)
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over all tables in name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, MetricTable> {
        self.tables.values()
    }

    /// Tables whose name contains `keyword`, ignoring case.
    #[must_use]
    pub fn matching(&self, keyword: &str) -> Vec<&MetricTable> {
        let keyword = keyword.to_lowercase();
        self.tables
            .values()
            .filter(|t| t.name().to_lowercase().contains(&keyword))
            .collect()
    }
}

impl FromIterator<MetricTable> for MetricTables {
    fn from_iter<I: IntoIterator<Item = MetricTable>>(iter: I) -> Self {
        let mut tables = Self::new();
        for table in iter {
            tables.insert(table);
        }
        tables
    }
}

impl<'a> IntoIterator for &'a MetricTables {
    type Item = &'a MetricTable;
    type IntoIter = btree_map::Values<'a, String, MetricTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
