use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Columns of the joined property table, in query order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    CountyName,
    SchoolDistrictName,
    AddressStreet,
    MunicipalityName,
    AddressState,
    AddressZip,
    RollYear,
    PropertyCategory,
    PropertyClassDescription,
    FullMarketValue,
    Front,
    Depth,
    AssessmentLand,
    AssessmentTotal,
    ResidentialAssessmentRatio,
}

/// Storage class of a column after load-time coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Category,
    SmallInt,
    Float,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::Id,
        Column::CountyName,
        Column::SchoolDistrictName,
        Column::AddressStreet,
        Column::MunicipalityName,
        Column::AddressState,
        Column::AddressZip,
        Column::RollYear,
        Column::PropertyCategory,
        Column::PropertyClassDescription,
        Column::FullMarketValue,
        Column::Front,
        Column::Depth,
        Column::AssessmentLand,
        Column::AssessmentTotal,
        Column::ResidentialAssessmentRatio,
    ];

    /// Name as it appears in the query result
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::CountyName => "county_name",
            Column::SchoolDistrictName => "school_district_name",
            Column::AddressStreet => "address_street",
            Column::MunicipalityName => "municipality_name",
            Column::AddressState => "address_state",
            Column::AddressZip => "address_zip",
            Column::RollYear => "roll_year",
            Column::PropertyCategory => "property_category",
            Column::PropertyClassDescription => "property_class_description",
            Column::FullMarketValue => "full_market_value",
            Column::Front => "front",
            Column::Depth => "depth",
            Column::AssessmentLand => "assessment_land",
            Column::AssessmentTotal => "assessment_total",
            Column::ResidentialAssessmentRatio => "residential_assessment_ratio",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Id | Column::AddressStreet | Column::AddressZip => ColumnKind::Text,
            Column::CountyName
            | Column::SchoolDistrictName
            | Column::MunicipalityName
            | Column::AddressState
            | Column::PropertyCategory
            | Column::PropertyClassDescription => ColumnKind::Category,
            Column::RollYear => ColumnKind::SmallInt,
            Column::FullMarketValue
            | Column::Front
            | Column::Depth
            | Column::AssessmentLand
            | Column::AssessmentTotal
            | Column::ResidentialAssessmentRatio => ColumnKind::Float,
        }
    }

    pub fn is_nullable(self) -> bool {
        !matches!(
            self,
            Column::Id | Column::CountyName | Column::RollYear | Column::FullMarketValue
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("Unknown column: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for column in Column::ALL {
            assert_eq!(column.name().parse::<Column>().unwrap(), column);
        }
    }

    #[test]
    fn test_from_str_accepts_dashes_and_case() {
        assert_eq!("Full-Market-Value".parse::<Column>().unwrap(), Column::FullMarketValue);
        assert!("market".parse::<Column>().is_err());
    }

    #[test]
    fn test_categorical_columns() {
        let categorical: Vec<_> = Column::ALL
            .iter()
            .filter(|c| c.kind() == ColumnKind::Category)
            .map(|c| c.name())
            .collect();
        assert_eq!(
            categorical,
            vec![
                "county_name",
                "school_district_name",
                "municipality_name",
                "address_state",
                "property_category",
                "property_class_description",
            ]
        );
    }

    #[test]
    fn test_required_columns() {
        assert!(!Column::Id.is_nullable());
        assert!(!Column::CountyName.is_nullable());
        assert!(!Column::FullMarketValue.is_nullable());
        assert!(Column::ResidentialAssessmentRatio.is_nullable());
    }
}
