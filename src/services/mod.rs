//! External service interactions
//!
//! - Dataset loading from CSV, JSON and YAML files
//! - The background page worker
//! - Icon name resolution

pub mod icons;
pub mod page_worker;
pub mod source;

pub use page_worker::{PageWorker, WorkerMessage};
pub use source::SourceError;
