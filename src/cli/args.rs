use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lake-prep")]
#[command(about = "Lake data preparation steps: archive extraction and elevation augmentation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a zip archive into the mirrored path under the destination directory
    Unzip {
        #[arg(short, long, help = "Zip archive located under the source directory")]
        archive: PathBuf,

        #[arg(short, long)]
        source_dir: PathBuf,

        #[arg(short, long)]
        destination_dir: PathBuf,

        #[arg(long, help = "Print the destination without extracting")]
        dry_run: bool,
    },

    /// Add an elevation column to a lake metadata CSV
    Augment {
        #[arg(short, long, help = "Lake metadata CSV with site_id and coordinates")]
        metadata: PathBuf,

        #[arg(
            short,
            long,
            help = "Reference elevation CSV; without it every row is queried remotely"
        )]
        elevation_file: Option<PathBuf>,

        #[arg(short, long, help = "Augmented CSV to write")]
        output: PathBuf,

        #[arg(long)]
        lat_column: Option<String>,

        #[arg(long)]
        lon_column: Option<String>,

        #[arg(long, help = "Elevation column in the reference elevation CSV")]
        elevation_column: Option<String>,
    },
}
