use crate::archive::ExtractionPlan;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{AugmentColumns, ElevationAugmenter};
use crate::services::EpqsClient;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Unzip {
            archive,
            source_dir,
            destination_dir,
            dry_run,
        } => {
            let plan = ExtractionPlan::new(&archive, &source_dir, &destination_dir)?;
            info!(
                archive = %plan.archive.display(),
                destination = %plan.destination.display(),
                "Resolved extraction destination"
            );

            if dry_run {
                println!("Would extract into {}", plan.destination.display());
                return Ok(());
            }

            let progress = ProgressReporter::new_spinner("Extracting archive...", cli.quiet);
            let members = plan.extract()?;
            progress.finish_with_message(&format!(
                "Extracted {} members into {}",
                members.len(),
                plan.destination.display()
            ));

            for member in &members {
                println!("{}", member);
            }
        }

        Commands::Augment {
            metadata,
            elevation_file,
            output,
            lat_column,
            lon_column,
            elevation_column,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;
            let mut columns = AugmentColumns::from(&settings);
            if let Some(lat) = lat_column {
                columns.latitude = lat;
            }
            if let Some(lon) = lon_column {
                columns.longitude = lon;
            }
            if let Some(elevation) = elevation_column {
                columns.elevation_source = elevation;
            }

            let client = EpqsClient::with_endpoint(settings.epqs_url.as_str(), &settings.user_agent)?;
            let augmenter = ElevationAugmenter::new(client).with_columns(columns);

            println!("Augmenting lake metadata with elevation...");
            println!("Input file: {}", metadata.display());
            println!("Output file: {}", output.display());

            let progress = ProgressReporter::new(0, "Querying elevation service...", cli.quiet);

            let summary = match elevation_file {
                Some(elevation_file) => {
                    println!("Elevation file: {}", elevation_file.display());
                    augmenter
                        .augment_with_file_and_backfill(
                            &metadata,
                            &elevation_file,
                            &output,
                            Some(&progress),
                        )
                        .await?
                }
                None => {
                    augmenter
                        .augment_with_remote_elevations(&metadata, &output, Some(&progress))
                        .await?
                }
            };

            progress.finish_with_message(&format!("Queried {} elevations", summary.queried));
            println!("\n{}", summary.summary());
        }
    }

    Ok(())
}
