use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_ELEVATION_SOURCE_COLUMN, DEFAULT_LAT_COLUMN, DEFAULT_LON_COLUMN, ENV_PREFIX, EPQS_URL,
    SITE_ID_COLUMN, USER_AGENT,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Pipeline parameters, layered from defaults, an optional config file and
/// `LAKE_PREP_*` environment variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub epqs_url: String,

    #[validate(length(min = 1))]
    pub user_agent: String,

    #[validate(length(min = 1))]
    pub site_id_column: String,

    #[validate(length(min = 1))]
    pub lat_column: String,

    #[validate(length(min = 1))]
    pub lon_column: String,

    #[validate(length(min = 1))]
    pub elevation_column: String,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("epqs_url", EPQS_URL)?
            .set_default("user_agent", USER_AGENT)?
            .set_default("site_id_column", SITE_ID_COLUMN)?
            .set_default("lat_column", DEFAULT_LAT_COLUMN)?
            .set_default("lon_column", DEFAULT_LON_COLUMN)?
            .set_default("elevation_column", DEFAULT_ELEVATION_SOURCE_COLUMN)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            epqs_url: EPQS_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            site_id_column: SITE_ID_COLUMN.to_string(),
            lat_column: DEFAULT_LAT_COLUMN.to_string(),
            lon_column: DEFAULT_LON_COLUMN.to_string(),
            elevation_column: DEFAULT_ELEVATION_SOURCE_COLUMN.to_string(),
        }
    }
}
