use super::column::Column;
use super::value::Cell;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Dictionary-encoded categorical value shared by every row that carries it
pub type Category = Arc<str>;

/// Interns categorical strings so each distinct value is stored once per table
#[derive(Debug, Default, Clone)]
pub struct CategoryPool {
    values: HashSet<Arc<str>>,
}

impl CategoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, value: &str) -> Category {
        if let Some(existing) = self.values.get(value) {
            return Arc::clone(existing);
        }
        let category: Arc<str> = Arc::from(value);
        self.values.insert(Arc::clone(&category));
        category
    }

    pub fn intern_opt(&mut self, value: Option<&str>) -> Option<Category> {
        value.map(|v| self.intern(v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One row of the properties ⋈ assessments ⟕ ratios join
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub id: String,
    pub county_name: Category,
    pub school_district_name: Option<Category>,
    pub address_street: Option<String>,
    pub municipality_name: Option<Category>,
    pub address_state: Option<Category>,
    pub address_zip: Option<String>,
    pub roll_year: i16,
    pub property_category: Option<Category>,
    pub property_class_description: Option<Category>,
    pub full_market_value: f32,
    pub front: Option<f32>,
    pub depth: Option<f32>,
    pub assessment_land: Option<f32>,
    pub assessment_total: Option<f32>,
    pub residential_assessment_ratio: Option<f32>,
}

fn text(value: &Option<impl AsRef<str>>) -> Cell<'_> {
    value.as_ref().map_or(Cell::Null, |v| Cell::Text(v.as_ref()))
}

fn float(value: Option<f32>) -> Cell<'static> {
    value.map_or(Cell::Null, Cell::Float)
}

impl PropertyRecord {
    pub fn cell(&self, column: Column) -> Cell<'_> {
        match column {
            Column::Id => Cell::Text(&self.id),
            Column::CountyName => Cell::Text(&self.county_name),
            Column::SchoolDistrictName => text(&self.school_district_name),
            Column::AddressStreet => text(&self.address_street),
            Column::MunicipalityName => text(&self.municipality_name),
            Column::AddressState => text(&self.address_state),
            Column::AddressZip => text(&self.address_zip),
            Column::RollYear => Cell::Int(self.roll_year as i64),
            Column::PropertyCategory => text(&self.property_category),
            Column::PropertyClassDescription => text(&self.property_class_description),
            Column::FullMarketValue => Cell::Float(self.full_market_value),
            Column::Front => float(self.front),
            Column::Depth => float(self.depth),
            Column::AssessmentLand => float(self.assessment_land),
            Column::AssessmentTotal => float(self.assessment_total),
            Column::ResidentialAssessmentRatio => float(self.residential_assessment_ratio),
        }
    }
}
