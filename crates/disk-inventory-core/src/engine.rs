use crate::aggregator;
use crate::config::AppConfig;
use crate::error::Error;
use crate::model::ScanResult;
use crate::progress::ProgressReporter;
use crate::scanner;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct ScanEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct ScanReport {
    pub walk_duration: Duration,
    pub file_count: usize,
    pub total_bytes: u64,
    pub result: ScanResult,
}

impl ScanEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the folder scan pipeline:
    /// 1. Walk the folder into a flat file list (native folder picker)
    /// 2. Aggregate the list into top-level content records
    pub fn scan(&self, root: &Path, reporter: &dyn ProgressReporter) -> Result<ScanReport, Error> {
        info!("Scanning {}", root.display());

        let ignore_pattern_slices: Vec<&str> =
            self.config.ignore_patterns.iter().map(|s| s.as_str()).collect();

        let walk_start = Instant::now();
        let files = scanner::collect_selected_files(
            root,
            &ignore_pattern_slices,
            self.config.skip_hidden,
            reporter,
        )?;
        let walk_duration = walk_start.elapsed();
        reporter.on_scan_complete(files.len(), walk_duration.as_secs_f64());

        let total_bytes = files
            .iter()
            .fold(0u64, |acc, f| acc.saturating_add(f.size_bytes));
        debug!(
            "Walk completed in {:.2}s, {} files, {} bytes total",
            walk_duration.as_secs_f64(),
            files.len(),
            total_bytes,
        );

        let result = aggregator::aggregate(&files)?;
        reporter.on_aggregate_complete(result.items.len(), result.total_size_gb);

        Ok(ScanReport {
            walk_duration,
            file_count: files.len(),
            total_bytes,
            result,
        })
    }
}
