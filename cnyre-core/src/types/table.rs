use super::column::Column;
use super::record::{CategoryPool, PropertyRecord};

/// Immutable in-memory result of the snapshot join
///
/// An empty table built from a missing database has neither rows nor columns;
/// a loaded table always carries the full column set, even with zero rows.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    columns: Vec<Column>,
    rows: Vec<PropertyRecord>,
    categories: CategoryPool,
}

impl PropertyTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(rows: Vec<PropertyRecord>, categories: CategoryPool) -> Self {
        Self {
            columns: Column::ALL.to_vec(),
            rows,
            categories,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn rows(&self) -> &[PropertyRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct categorical values interned while loading
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_has_no_columns() {
        let table = PropertyTable::empty();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert!(!table.has_column(Column::Id));
        assert_eq!(table.category_count(), 0);
    }

    #[test]
    fn test_loaded_table_keeps_schema_without_rows() {
        let table = PropertyTable::new(Vec::new(), CategoryPool::new());
        assert_eq!(table.len(), 0);
        assert_eq!(table.columns().len(), 16);
        assert!(table.has_column(Column::ResidentialAssessmentRatio));
    }
}
