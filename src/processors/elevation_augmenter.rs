use crate::error::Result;
use crate::models::MetadataTable;
use crate::processors::ElevationMerger;
use crate::readers::TableReader;
use crate::services::ElevationService;
use crate::settings::Settings;
use crate::utils::constants::{
    DEFAULT_ELEVATION_SOURCE_COLUMN, DEFAULT_LAT_COLUMN, DEFAULT_LON_COLUMN, ELEVATION_COLUMN,
    SITE_ID_COLUMN,
};
use crate::utils::coordinates::parse_decimal_degrees;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use std::path::Path;
use tracing::{debug, info};

/// Column names the augmenter reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentColumns {
    pub site_id: String,
    pub latitude: String,
    pub longitude: String,
    /// Elevation column in the reference elevation table
    pub elevation_source: String,
}

impl Default for AugmentColumns {
    fn default() -> Self {
        Self {
            site_id: SITE_ID_COLUMN.to_string(),
            latitude: DEFAULT_LAT_COLUMN.to_string(),
            longitude: DEFAULT_LON_COLUMN.to_string(),
            elevation_source: DEFAULT_ELEVATION_SOURCE_COLUMN.to_string(),
        }
    }
}

impl From<&Settings> for AugmentColumns {
    fn from(settings: &Settings) -> Self {
        Self {
            site_id: settings.site_id_column.clone(),
            latitude: settings.lat_column.clone(),
            longitude: settings.lon_column.clone(),
            elevation_source: settings.elevation_column.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentSummary {
    pub rows: usize,
    /// Rows whose elevation came from the elevation service
    pub queried: usize,
    pub duplicate_site_ids: usize,
}

impl AugmentSummary {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Augmented {} rows ({} from elevation service)",
            self.rows, self.queried
        );
        if self.duplicate_site_ids > 0 {
            summary.push_str(&format!(
                "\nWarning: {} site ids repeated in elevation file",
                self.duplicate_site_ids
            ));
        }
        summary
    }
}

pub struct ElevationAugmenter<S> {
    service: S,
    columns: AugmentColumns,
    reader: TableReader,
    writer: CsvWriter,
}

impl<S: ElevationService> ElevationAugmenter<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            columns: AugmentColumns::default(),
            reader: TableReader::new(),
            writer: CsvWriter::new(),
        }
    }

    pub fn with_columns(mut self, columns: AugmentColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Add an `elevation` column to every row of `input` using only the
    /// elevation service, one query per row in table order
    pub async fn augment_with_remote_elevations(
        &self,
        input: &Path,
        output: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<AugmentSummary> {
        let mut table = self.reader.read_table(input)?;
        info!(rows = table.len(), input = %input.display(), "Loaded lake metadata");

        let elevation_idx = table.ensure_column(ELEVATION_COLUMN);
        let rows: Vec<usize> = (0..table.len()).collect();
        self.fill_from_service(&mut table, elevation_idx, &rows, progress)
            .await?;

        self.writer.write_table(&table, output)?;

        Ok(AugmentSummary {
            rows: table.len(),
            queried: rows.len(),
            duplicate_site_ids: 0,
        })
    }

    /// Join elevations from `elevation_file` onto `input` by site id, then
    /// query the elevation service for the rows still missing one
    pub async fn augment_with_file_and_backfill(
        &self,
        input: &Path,
        elevation_file: &Path,
        output: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<AugmentSummary> {
        let metadata = self.reader.read_table(input)?;
        let elevations = self.reader.read_table(elevation_file)?;
        info!(
            metadata_rows = metadata.len(),
            elevation_rows = elevations.len(),
            "Loaded lake metadata and elevations"
        );

        let outcome = ElevationMerger::new(self.columns.elevation_source.as_str())
            .with_site_id_column(self.columns.site_id.as_str())
            .left_join(&metadata, &elevations)?;

        let mut table = outcome.table;
        let queried = self.backfill_missing(&mut table, progress).await?;

        self.writer.write_table(&table, output)?;

        Ok(AugmentSummary {
            rows: table.len(),
            queried,
            duplicate_site_ids: outcome.duplicate_site_ids,
        })
    }

    /// Fill missing `elevation` cells from the elevation service. Rows that
    /// already hold a value are left untouched. Returns the number of rows
    /// queried.
    pub async fn backfill_missing(
        &self,
        table: &mut MetadataTable,
        progress: Option<&ProgressReporter>,
    ) -> Result<usize> {
        let elevation_idx = table.require_column(ELEVATION_COLUMN)?;
        let missing = table.missing_rows(elevation_idx);

        info!(
            "Querying elevation service to fill in {} missing elevations",
            missing.len()
        );

        self.fill_from_service(table, elevation_idx, &missing, progress)
            .await?;
        Ok(missing.len())
    }

    async fn fill_from_service(
        &self,
        table: &mut MetadataTable,
        elevation_idx: usize,
        rows: &[usize],
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let lat_idx = table.require_column(&self.columns.latitude)?;
        let lon_idx = table.require_column(&self.columns.longitude)?;

        if let Some(p) = progress {
            p.set_length(rows.len() as u64);
        }

        for &row in rows {
            let latitude = parse_decimal_degrees(table.value(row, lat_idx), &self.columns.latitude)?;
            let longitude =
                parse_decimal_degrees(table.value(row, lon_idx), &self.columns.longitude)?;

            let elevation = self.service.elevation(latitude, longitude).await?;
            debug!(row, latitude, longitude, elevation, "Filled elevation");

            table.set_value(row, elevation_idx, format_elevation(elevation));

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        Ok(())
    }
}

/// Render a fetched elevation the way a float column is written, so whole
/// meters keep a trailing `.0`
pub fn format_elevation(elevation: f64) -> String {
    if elevation.is_finite() && elevation.fract() == 0.0 {
        format!("{:.1}", elevation)
    } else {
        elevation.to_string()
    }
}
