use crate::error::Error;
use crate::model::{ContentRecord, ScanResult, SelectedFile};
use crate::units;
use ahash::AHashMap;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

/// Roll-up of every file sitting under one immediate child of the selected root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelItem {
    pub name: String,
    pub aggregate_bytes: u64,
    pub latest_modified: NaiveDate,
    pub is_directory: bool,
}

/// Group files by the first path segment below the root.
///
/// Files lying directly at the root (a single path segment) belong to no
/// item. Items come back in order of first appearance.
pub fn collect_top_level_items(files: &[SelectedFile]) -> Vec<TopLevelItem> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut items: Vec<TopLevelItem> = Vec::new();

    for file in files {
        let parts: Vec<&str> = file.relative_path.split('/').collect();
        if parts.len() < 2 {
            continue;
        }

        let key = parts[1];
        let modified = modified_day(file.last_modified_epoch_ms);
        let nested = parts.len() > 2;

        match index.get(key) {
            Some(&pos) => {
                let item = &mut items[pos];
                item.aggregate_bytes = item.aggregate_bytes.saturating_add(file.size_bytes);
                if modified > item.latest_modified {
                    item.latest_modified = modified;
                }
                item.is_directory |= nested;
            }
            None => {
                index.insert(key, items.len());
                items.push(TopLevelItem {
                    name: key.to_string(),
                    aggregate_bytes: file.size_bytes,
                    latest_modified: modified,
                    is_directory: nested,
                });
            }
        }
    }

    items
}

/// Turn a folder selection into content records ready for a disk record.
///
/// Sizes are binary gigabytes rounded half-up to two decimals, per item and
/// for the total independently. The total covers every selected file,
/// including loose files at the root that produce no record.
pub fn aggregate(files: &[SelectedFile]) -> Result<ScanResult, Error> {
    let first = files.first().ok_or(Error::EmptySelection)?;

    let suggested_root_name = first
        .relative_path
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let total_bytes = files
        .iter()
        .fold(0u64, |acc, f| acc.saturating_add(f.size_bytes));

    let items: Vec<ContentRecord> = collect_top_level_items(files)
        .into_iter()
        .map(|item| ContentRecord {
            name: item.name,
            size_gb: units::bytes_to_gb(item.aggregate_bytes),
            last_modified: item.latest_modified,
        })
        .collect();

    debug!(
        "Aggregated {} files into {} top-level items under '{}' ({} bytes)",
        files.len(),
        items.len(),
        suggested_root_name,
        total_bytes,
    );

    Ok(ScanResult {
        suggested_root_name,
        total_size_gb: units::bytes_to_gb(total_bytes),
        items,
    })
}

fn modified_day(epoch_ms: i64) -> NaiveDate {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(ts) => ts.date_naive(),
        None => {
            warn!("Modification time {} out of range, using epoch", epoch_ms);
            DateTime::<Utc>::UNIX_EPOCH.date_naive()
        }
    }
}
