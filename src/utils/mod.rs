pub mod constants;
pub mod coordinates;
pub mod progress;

pub use constants::*;
pub use coordinates::parse_decimal_degrees;
pub use progress::ProgressReporter;
