/// USGS Elevation Point Query Service endpoint
pub const EPQS_URL: &str = "https://nationalmap.gov/epqs/pqs.php";
pub const EPQS_UNITS: &str = "Meters";
pub const USER_AGENT: &str = concat!("lake-prep/", env!("CARGO_PKG_VERSION"));

/// Column names
pub const SITE_ID_COLUMN: &str = "site_id";
pub const ELEVATION_COLUMN: &str = "elevation";
pub const DEFAULT_LAT_COLUMN: &str = "centroid_lat";
pub const DEFAULT_LON_COLUMN: &str = "centroid_lon";
pub const DEFAULT_ELEVATION_SOURCE_COLUMN: &str = "elevation";

/// Cell values read as a missing elevation. Mirrors the null markers of
/// common dataframe CSV readers so tables written by other pipeline steps
/// round-trip.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Environment prefix for settings overrides
pub const ENV_PREFIX: &str = "LAKE_PREP";
