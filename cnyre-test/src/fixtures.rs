//! Fixture property rows and snapshot databases built from them

use anyhow::{Context, Result};
use cnyre_core::types::{CategoryPool, PropertyRecord, PropertyTable};
use flate2::write::GzEncoder;
use flate2::Compression;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Schema of the published snapshot, as written by the upstream ETL
pub const SNAPSHOT_SCHEMA_SQL: &str = r"
CREATE TABLE properties (
  id TEXT PRIMARY KEY,
  county_name TEXT,
  school_district_name TEXT,
  address_street TEXT,
  municipality_name TEXT,
  municipality_code TEXT,
  address_state TEXT,
  address_zip TEXT
);

CREATE TABLE ny_property_assessments (
  property_id TEXT NOT NULL,
  roll_year INTEGER NOT NULL,
  property_category TEXT,
  property_class_description TEXT,
  full_market_value REAL,
  front REAL,
  depth REAL,
  assessment_land REAL,
  assessment_total REAL,
  PRIMARY KEY (property_id, roll_year)
);

CREATE TABLE municipality_assessment_ratios (
  municipality_code TEXT PRIMARY KEY,
  residential_assessment_ratio REAL
);
";

/// One parcel with a single assessment row
#[derive(Debug, Clone)]
pub struct FixtureProperty {
    pub id: String,
    pub county: String,
    pub school_district: Option<String>,
    pub street: Option<String>,
    pub municipality: Option<String>,
    pub municipality_code: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub roll_year: i64,
    pub category: Option<String>,
    pub class_description: Option<String>,
    pub market_value: f64,
    pub front: Option<f64>,
    pub depth: Option<f64>,
    pub assessment_land: Option<f64>,
    pub assessment_total: Option<f64>,
    /// Written to the ratio table under `municipality_code`, first value wins
    pub ratio: Option<f64>,
}

impl FixtureProperty {
    pub fn new(id: &str, county: &str, market_value: f64) -> Self {
        Self {
            id: id.to_string(),
            county: county.to_string(),
            school_district: None,
            street: Some(format!("{} Main St", id.len() * 10)),
            municipality: None,
            municipality_code: None,
            state: Some("NY".to_string()),
            zip: None,
            roll_year: 2024,
            category: None,
            class_description: None,
            market_value,
            front: None,
            depth: None,
            assessment_land: None,
            assessment_total: Some(market_value * 0.9),
            ratio: None,
        }
    }

    pub fn district(mut self, district: &str) -> Self {
        self.school_district = Some(district.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn street(mut self, street: &str) -> Self {
        self.street = Some(street.to_string());
        self
    }

    pub fn municipality(mut self, name: &str, code: &str, ratio: Option<f64>) -> Self {
        self.municipality = Some(name.to_string());
        self.municipality_code = Some(code.to_string());
        self.ratio = ratio;
        self
    }

    /// In-memory record equivalent to what the loader produces for this fixture
    pub fn to_record(&self, pool: &mut CategoryPool) -> PropertyRecord {
        PropertyRecord {
            id: self.id.clone(),
            county_name: pool.intern(&self.county),
            school_district_name: pool.intern_opt(self.school_district.as_deref()),
            address_street: self.street.clone(),
            municipality_name: pool.intern_opt(self.municipality.as_deref()),
            address_state: pool.intern_opt(self.state.as_deref()),
            address_zip: self.zip.clone(),
            roll_year: self.roll_year as i16,
            property_category: pool.intern_opt(self.category.as_deref()),
            property_class_description: pool.intern_opt(self.class_description.as_deref()),
            full_market_value: self.market_value as f32,
            front: self.front.map(|v| v as f32),
            depth: self.depth.map(|v| v as f32),
            assessment_land: self.assessment_land.map(|v| v as f32),
            assessment_total: self.assessment_total.map(|v| v as f32),
            residential_assessment_ratio: self.ratio.map(|v| v as f32),
        }
    }
}

/// Central New York sample covering every county, nulls and a missing ratio
pub fn sample_properties() -> Vec<FixtureProperty> {
    vec![
        FixtureProperty::new("OSW-001", "Oswego", 100000.0)
            .district("Fulton City")
            .category("Residential")
            .municipality("Fulton", "3512", Some(0.95)),
        FixtureProperty::new("CAY-001", "Cayuga", 250000.0)
            .district("Auburn City")
            .category("Commercial")
            .street("8 Genesee St")
            .municipality("Auburn", "0501", Some(1.0)),
        FixtureProperty::new("OSW-002", "Oswego", 175000.0)
            .district("Oswego City")
            .category("Residential")
            .street("41 Lake Shore Rd")
            .municipality("Oswego", "3515", None),
        FixtureProperty::new("ONO-001", "Onondaga", 320000.0)
            .district("Syracuse City")
            .category("Residential")
            .street("300 James St")
            .municipality("Syracuse", "3115", Some(0.82)),
        FixtureProperty::new("MAD-001", "Madison", 89000.0)
            .category("Vacant Land")
            .municipality("Cazenovia", "2520", Some(1.0)),
        FixtureProperty::new("COR-001", "Cortland", 143500.0)
            .district("Cortland City")
            .street("5 Tompkins St"),
    ]
}

/// In-memory table built the same way the loader would build it
pub fn build_table(properties: &[FixtureProperty]) -> PropertyTable {
    let mut pool = CategoryPool::new();
    let rows = properties.iter().map(|p| p.to_record(&mut pool)).collect();
    PropertyTable::new(rows, pool)
}

/// Write a snapshot database containing `properties`
pub fn write_fixture_database(path: &Path, properties: &[FixtureProperty]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to create fixture database at {}", path.display()))?;
    conn.execute_batch(SNAPSHOT_SCHEMA_SQL)
        .context("failed to create fixture schema")?;

    let tx = conn.transaction()?;
    let mut ratios: HashMap<&str, f64> = HashMap::new();
    for p in properties {
        tx.execute(
            "INSERT INTO properties (id, county_name, school_district_name, address_street,
               municipality_name, municipality_code, address_state, address_zip)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                p.id,
                p.county,
                p.school_district,
                p.street,
                p.municipality,
                p.municipality_code,
                p.state,
                p.zip
            ],
        )?;
        tx.execute(
            "INSERT INTO ny_property_assessments (property_id, roll_year, property_category,
               property_class_description, full_market_value, front, depth,
               assessment_land, assessment_total)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                p.id,
                p.roll_year,
                p.category,
                p.class_description,
                p.market_value,
                p.front,
                p.depth,
                p.assessment_land,
                p.assessment_total
            ],
        )?;
        if let (Some(code), Some(ratio)) = (p.municipality_code.as_deref(), p.ratio) {
            ratios.entry(code).or_insert(ratio);
        }
    }
    for (code, ratio) in ratios {
        tx.execute(
            "INSERT INTO municipality_assessment_ratios (municipality_code, residential_assessment_ratio)
             VALUES (?1, ?2)",
            params![code, ratio],
        )?;
    }
    tx.commit()?;
    Ok(())
}

/// Gzip `src` into `dest`
pub fn gzip_file(src: &Path, dest: &Path) -> Result<()> {
    let mut input = BufReader::new(File::open(src)?);
    let output = File::create(dest)?;
    let mut encoder = GzEncoder::new(output, Compression::fast());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnyre_core::Column;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_database_has_three_relations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixture.db");
        write_fixture_database(&path, &sample_properties()).unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM properties", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 6);
        let ratios: i64 = conn
            .query_row("SELECT COUNT(*) FROM municipality_assessment_ratios", [], |row| row.get(0))
            .unwrap();
        assert_eq!(ratios, 4);
    }

    #[test]
    fn test_build_table_matches_fixture_order() {
        let table = build_table(&sample_properties());
        assert_eq!(table.len(), 6);
        assert_eq!(table.rows()[0].cell(Column::Id).to_string(), "OSW-001");
        assert!(table.rows()[2].residential_assessment_ratio.is_none());
    }
}
