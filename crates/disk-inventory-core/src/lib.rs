pub mod aggregator;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod progress;
pub mod scanner;
pub mod units;
pub mod usage;

pub use aggregator::aggregate;
pub use api::{DiskApi, DiskFilter, DiskPage};
pub use config::AppConfig;
pub use engine::{ScanEngine, ScanReport};
pub use error::{Error, FieldError};
pub use model::{ContentRecord, Disk, DiskHealth, DiskKind, ScanResult, SelectedFile};
pub use progress::{ProgressReporter, SilentReporter};
pub use usage::{DiskUsage, UsageLevel};
