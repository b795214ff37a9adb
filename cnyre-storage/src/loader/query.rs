/// Properties joined to their assessment rows, with the municipality's
/// residential assessment ratio attached when one is published.
///
/// Column order here is relied on by `read_record`.
pub const SNAPSHOT_QUERY: &str = "
SELECT
    p.id,
    p.county_name,
    p.school_district_name,
    p.address_street,
    p.municipality_name,
    p.address_state,
    p.address_zip,
    nypa.roll_year,
    nypa.property_category,
    nypa.property_class_description,
    nypa.full_market_value,
    nypa.front,
    nypa.depth,
    nypa.assessment_land,
    nypa.assessment_total,
    mar.residential_assessment_ratio
FROM properties p
INNER JOIN ny_property_assessments nypa ON p.id = nypa.property_id
LEFT JOIN municipality_assessment_ratios mar ON p.municipality_code = mar.municipality_code
";

pub(crate) const COL_ID: usize = 0;
pub(crate) const COL_COUNTY: usize = 1;
pub(crate) const COL_DISTRICT: usize = 2;
pub(crate) const COL_STREET: usize = 3;
pub(crate) const COL_MUNICIPALITY: usize = 4;
pub(crate) const COL_STATE: usize = 5;
pub(crate) const COL_ZIP: usize = 6;
pub(crate) const COL_ROLL_YEAR: usize = 7;
pub(crate) const COL_CATEGORY: usize = 8;
pub(crate) const COL_CLASS: usize = 9;
pub(crate) const COL_MARKET_VALUE: usize = 10;
pub(crate) const COL_FRONT: usize = 11;
pub(crate) const COL_DEPTH: usize = 12;
pub(crate) const COL_LAND: usize = 13;
pub(crate) const COL_TOTAL: usize = 14;
pub(crate) const COL_RATIO: usize = 15;
