pub mod archive;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod services;
pub mod settings;
pub mod utils;
pub mod writers;

pub use archive::extract;
pub use error::{ProcessingError, Result};
pub use processors::ElevationAugmenter;
pub use services::{ElevationService, EpqsClient};
