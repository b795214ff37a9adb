//! Derived views over an immutable `PropertyTable`
//!
//! A view is the shared table plus an ordered list of row indices. Every
//! operation returns a new view; the table itself is never touched.

use crate::pagination::page_bounds;
use crate::types::{Selection, SortDirection};
use cnyre_core::{Cell, Column, PropertyRecord, PropertyTable, Value};
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TableView {
    table: Arc<PropertyTable>,
    rows: Vec<usize>,
}

impl TableView {
    /// Every row of `table` in load order
    pub fn full(table: Arc<PropertyTable>) -> Self {
        let rows = (0..table.len()).collect();
        Self { table, rows }
    }

    pub fn table(&self) -> &Arc<PropertyTable> {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row indices into the underlying table, in view order
    pub fn indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> + '_ {
        self.rows.iter().map(|&i| &self.table.rows()[i])
    }

    fn cell(&self, index: usize, column: Column) -> Cell<'_> {
        self.table.rows()[index].cell(column)
    }

    fn retain(&self, keep: impl Fn(Cell<'_>) -> bool, column: Column) -> Self {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&i| keep(self.cell(i, column)))
            .collect();
        Self {
            table: Arc::clone(&self.table),
            rows,
        }
    }

    /// Rows whose value is one of `values`; an empty set keeps nothing
    pub fn filter_in(&self, column: Column, values: &[Value]) -> Self {
        self.retain(|cell| values.iter().any(|v| cell.matches(v)), column)
    }

    pub fn filter_eq(&self, column: Column, selection: &Selection) -> Self {
        match selection {
            Selection::All => self.clone(),
            Selection::Only(value) => self.retain(|cell| cell.matches(value), column),
        }
    }

    /// Case-insensitive substring match on the stringified value
    ///
    /// Nulls never match, not even the empty term.
    pub fn search(&self, column: Column, term: &str) -> Self {
        let needle = term.to_lowercase();
        self.retain(
            |cell| {
                cell.to_text()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            },
            column,
        )
    }

    /// Stable sort with nulls last in either direction
    pub fn sort(&self, column: Column, direction: SortDirection) -> Self {
        let mut rows = self.rows.clone();
        rows.sort_by(|&a, &b| {
            let (left, right) = (self.cell(a, column), self.cell(b, column));
            match (left.is_null(), right.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ordering = left.cmp_value(&right);
                    if direction.is_descending() {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                }
            }
        });
        Self {
            table: Arc::clone(&self.table),
            rows,
        }
    }

    /// Zero-based page; out-of-range pages are empty
    pub fn page(&self, page: usize, size: usize) -> Self {
        let bounds = page_bounds(self.rows.len(), page, size);
        Self {
            table: Arc::clone(&self.table),
            rows: self.rows[bounds].to_vec(),
        }
    }

    /// Sorted distinct non-null values of `column`
    pub fn distinct(&self, column: Column) -> Vec<Value> {
        let mut cells: Vec<Cell<'_>> = self
            .rows
            .iter()
            .map(|&i| self.cell(i, column))
            .filter(|cell| !cell.is_null())
            .collect();
        cells.sort_by(|a, b| a.cmp_value(b));
        cells.dedup_by(|a, b| a.cmp_value(b) == Ordering::Equal);
        cells.iter().filter_map(Cell::to_value).collect()
    }

    /// Non-null values of a numeric column, widened to f64
    pub fn numeric_values(&self, column: Column) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|&i| match self.cell(i, column) {
                Cell::Int(v) => Some(v as f64),
                Cell::Float(v) => Some(v as f64),
                _ => None,
            })
            .collect()
    }
}
