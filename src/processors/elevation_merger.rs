use crate::error::{ProcessingError, Result};
use crate::models::MetadataTable;
use crate::utils::constants::{ELEVATION_COLUMN, SITE_ID_COLUMN};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub table: MetadataTable,
    /// Metadata rows with no entry in the elevation table
    pub unmatched_rows: usize,
    /// Site ids listed more than once in the elevation table
    pub duplicate_site_ids: usize,
}

pub struct ElevationMerger {
    site_id_column: String,
    elevation_column: String,
}

impl ElevationMerger {
    pub fn new(elevation_column: impl Into<String>) -> Self {
        Self {
            site_id_column: SITE_ID_COLUMN.to_string(),
            elevation_column: elevation_column.into(),
        }
    }

    pub fn with_site_id_column(mut self, site_id_column: impl Into<String>) -> Self {
        self.site_id_column = site_id_column.into();
        self
    }

    /// Left join the elevation column of `elevations` onto `metadata` by site
    /// id. The joined column is appended as `elevation`. Metadata row order
    /// is kept; a site listed several times in `elevations` yields one output
    /// row per listing, in elevation-file order.
    pub fn left_join(
        &self,
        metadata: &MetadataTable,
        elevations: &MetadataTable,
    ) -> Result<JoinOutcome> {
        let site_idx = metadata.require_column(&self.site_id_column)?;

        for column in [self.elevation_column.as_str(), ELEVATION_COLUMN] {
            if metadata.column_index(column).is_some() {
                return Err(ProcessingError::ColumnConflict {
                    column: column.to_string(),
                    file: metadata.source().to_path_buf(),
                });
            }
        }

        // Project the elevation table down to site id and elevation
        let elev_site_idx = elevations.require_column(&self.site_id_column)?;
        let elev_value_idx = elevations.require_column(&self.elevation_column)?;

        let mut lookup: HashMap<&str, Vec<&str>> = HashMap::with_capacity(elevations.len());
        for row in 0..elevations.len() {
            lookup
                .entry(elevations.value(row, elev_site_idx))
                .or_default()
                .push(elevations.value(row, elev_value_idx));
        }

        let duplicate_site_ids = lookup.values().filter(|v| v.len() > 1).count();
        if duplicate_site_ids > 0 {
            warn!(
                duplicate_site_ids,
                "Elevation table lists some sites more than once; matching metadata rows will be repeated"
            );
        }

        let mut headers = metadata.headers().to_vec();
        headers.push(ELEVATION_COLUMN.to_string());

        let mut rows = Vec::with_capacity(metadata.len());
        let mut unmatched_rows = 0;
        for (row_idx, row) in metadata.rows().iter().enumerate() {
            match lookup.get(metadata.value(row_idx, site_idx)) {
                Some(values) => {
                    for value in values {
                        let mut joined = row.clone();
                        joined.push((*value).to_string());
                        rows.push(joined);
                    }
                }
                None => {
                    unmatched_rows += 1;
                    let mut joined = row.clone();
                    joined.push(String::new());
                    rows.push(joined);
                }
            }
        }

        debug!(
            metadata_rows = metadata.len(),
            joined_rows = rows.len(),
            unmatched_rows,
            "Joined elevation table"
        );

        Ok(JoinOutcome {
            table: MetadataTable::new(headers, rows).with_source(metadata.source()),
            unmatched_rows,
            duplicate_site_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> MetadataTable {
        MetadataTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn metadata() -> MetadataTable {
        table(
            &["site_id", "centroid_lat", "centroid_lon"],
            &[
                &["nhdhr_1", "46.1", "-89.7"],
                &["nhdhr_2", "45.9", "-90.2"],
                &["nhdhr_3", "44.0", "-91.0"],
            ],
        )
    }

    #[test]
    fn test_left_join_keeps_every_metadata_row() -> Result<()> {
        let elevations = table(
            &["elevation_m", "site_id", "area"],
            &[&["310.2", "nhdhr_3", "9"], &["501.0", "nhdhr_1", "2"]],
        );

        let outcome = ElevationMerger::new("elevation_m").left_join(&metadata(), &elevations)?;

        assert_eq!(
            outcome.table.headers(),
            ["site_id", "centroid_lat", "centroid_lon", "elevation"]
        );
        let elevation: Vec<&str> = (0..outcome.table.len())
            .map(|row| outcome.table.value(row, 3))
            .collect();
        assert_eq!(elevation, vec!["501.0", "", "310.2"]);
        assert_eq!(outcome.unmatched_rows, 1);
        assert_eq!(outcome.duplicate_site_ids, 0);
        Ok(())
    }

    #[test]
    fn test_duplicate_site_ids_fan_out() -> Result<()> {
        let elevations = table(
            &["site_id", "elevation_m"],
            &[
                &["nhdhr_2", "400"],
                &["nhdhr_2", "401"],
                &["nhdhr_1", "500"],
                &["nhdhr_3", "300"],
            ],
        );

        let outcome = ElevationMerger::new("elevation_m").left_join(&metadata(), &elevations)?;

        assert_eq!(outcome.table.len(), 4);
        assert_eq!(outcome.duplicate_site_ids, 1);
        assert_eq!(outcome.table.rows()[1][0], "nhdhr_2");
        assert_eq!(outcome.table.rows()[1][3], "400");
        assert_eq!(outcome.table.rows()[2][0], "nhdhr_2");
        assert_eq!(outcome.table.rows()[2][3], "401");
        Ok(())
    }

    #[test]
    fn test_existing_elevation_column_conflicts() {
        let metadata = table(&["site_id", "elevation"], &[&["nhdhr_1", "5"]]);
        let elevations = table(&["site_id", "elevation_m"], &[&["nhdhr_1", "500"]]);

        let result = ElevationMerger::new("elevation_m").left_join(&metadata, &elevations);
        assert!(matches!(
            result,
            Err(ProcessingError::ColumnConflict { column, .. }) if column == "elevation"
        ));
    }

    #[test]
    fn test_missing_elevation_column() {
        let elevations = table(&["site_id", "height"], &[&["nhdhr_1", "500"]]);

        let result = ElevationMerger::new("elevation_m").left_join(&metadata(), &elevations);
        assert!(matches!(
            result,
            Err(ProcessingError::MissingColumn { column, .. }) if column == "elevation_m"
        ));
    }

    #[test]
    fn test_custom_site_id_column() -> Result<()> {
        let metadata = table(&["lake", "lat", "lon"], &[&["a", "1", "2"]]);
        let elevations = table(&["lake", "z"], &[&["a", "7.5"]]);

        let outcome = ElevationMerger::new("z")
            .with_site_id_column("lake")
            .left_join(&metadata, &elevations)?;

        assert_eq!(outcome.table.value(0, 3), "7.5");
        Ok(())
    }
}
