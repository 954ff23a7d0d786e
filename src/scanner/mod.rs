pub mod asset_scanner;
pub mod file_filter;

pub use asset_scanner::{AssetFile, AssetScanner, ScanOutcome, ScanStatistics};
pub use file_filter::{FileFilter, FilterDecision};
