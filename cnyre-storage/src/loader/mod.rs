//! Reads the materialized snapshot into an in-memory `PropertyTable`

pub mod query;

pub use query::SNAPSHOT_QUERY;

use cnyre_core::types::{CategoryPool, PropertyRecord, PropertyTable};
use query::*;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to open database {path}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("Error reading database: {0}")]
    Query(String),

    #[error("Failed to close database: {0}")]
    Close(String),
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        LoadError::Query(err.to_string())
    }
}

pub struct DatasetLoader {
    path: PathBuf,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every joined row. A missing file is an empty table, not an error.
    pub fn load(&self) -> Result<PropertyTable, LoadError> {
        if !self.path.exists() {
            tracing::info!(
                "No local database at {}, starting with an empty table",
                self.path.display()
            );
            return Ok(PropertyTable::empty());
        }

        let started = Instant::now();
        let table = self.with_connection(read_table)?;
        tracing::info!(
            "Loaded {} rows ({} distinct categories) from {} in {:?}",
            table.len(),
            table.category_count(),
            self.path.display(),
            started.elapsed()
        );
        Ok(table)
    }

    /// Like `load`, but degrades to an empty table and hands back the error
    pub fn load_or_empty(&self) -> (PropertyTable, Option<LoadError>) {
        match self.load() {
            Ok(table) => (table, None),
            Err(e) => {
                tracing::warn!("{}", e);
                (PropertyTable::empty(), Some(e))
            }
        }
    }

    /// Run `f` on a read-only connection that is closed before returning,
    /// whatever `f` returned
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, LoadError>,
    ) -> Result<T, LoadError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| LoadError::Open {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let result = f(&conn);
        let closed = conn
            .close()
            .map_err(|(_, e)| LoadError::Close(e.to_string()));

        match (result, closed) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(value), Ok(())) => Ok(value),
        }
    }
}

fn read_table(conn: &Connection) -> Result<PropertyTable, LoadError> {
    let mut stmt = conn.prepare(SNAPSHOT_QUERY)?;
    let mut rows = stmt.query([])?;

    let mut pool = CategoryPool::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    while let Some(row) = rows.next()? {
        match read_record(row, &mut pool)? {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(
            "Skipped {} rows missing an id, county, market value or valid roll year",
            skipped
        );
    }
    Ok(PropertyTable::new(records, pool))
}

/// None when a required field is null or out of range
fn read_record(row: &Row<'_>, pool: &mut CategoryPool) -> Result<Option<PropertyRecord>, LoadError> {
    let text = |idx: usize| -> Result<Option<String>, LoadError> { Ok(text_of(row.get_ref(idx)?)) };
    let float = |idx: usize| -> Result<Option<f32>, LoadError> { Ok(float_of(row.get_ref(idx)?)) };

    let (Some(id), Some(county), Some(market_value)) =
        (text(COL_ID)?, text(COL_COUNTY)?, float(COL_MARKET_VALUE)?)
    else {
        return Ok(None);
    };
    let Some(roll_year) = int_of(row.get_ref(COL_ROLL_YEAR)?).and_then(|y| i16::try_from(y).ok())
    else {
        return Ok(None);
    };

    Ok(Some(PropertyRecord {
        id,
        county_name: pool.intern(&county),
        school_district_name: pool.intern_opt(text(COL_DISTRICT)?.as_deref()),
        address_street: text(COL_STREET)?,
        municipality_name: pool.intern_opt(text(COL_MUNICIPALITY)?.as_deref()),
        address_state: pool.intern_opt(text(COL_STATE)?.as_deref()),
        address_zip: text(COL_ZIP)?,
        roll_year,
        property_category: pool.intern_opt(text(COL_CATEGORY)?.as_deref()),
        property_class_description: pool.intern_opt(text(COL_CLASS)?.as_deref()),
        full_market_value: market_value,
        front: float(COL_FRONT)?,
        depth: float(COL_DEPTH)?,
        assessment_land: float(COL_LAND)?,
        assessment_total: float(COL_TOTAL)?,
        residential_assessment_ratio: float(COL_RATIO)?,
    }))
}

// SQLite columns are dynamically typed; coerce whatever is stored

fn text_of(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

fn float_of(value: ValueRef<'_>) -> Option<f32> {
    match value {
        ValueRef::Integer(i) => Some(i as f32),
        ValueRef::Real(f) => Some(f as f32),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn int_of(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}
