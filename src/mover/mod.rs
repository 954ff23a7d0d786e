pub mod file_mover;
pub mod report;

pub use file_mover::{FileMover, MoveEvent, MoveProgress, MovedFile};
pub use report::SiftReport;
