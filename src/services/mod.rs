pub mod epqs_client;

pub use epqs_client::{parse_elevation_response, EpqsClient};

use crate::error::Result;
use std::future::Future;

/// Point elevation lookup
pub trait ElevationService {
    /// Elevation in meters at a point given in decimal degrees
    fn elevation(&self, latitude: f64, longitude: f64) -> impl Future<Output = Result<f64>> + Send;
}

impl<S: ElevationService> ElevationService for &S {
    fn elevation(&self, latitude: f64, longitude: f64) -> impl Future<Output = Result<f64>> + Send {
        (**self).elevation(latitude, longitude)
    }
}
