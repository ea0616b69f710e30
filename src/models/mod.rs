pub mod table;

pub use table::{is_missing, MetadataTable};
