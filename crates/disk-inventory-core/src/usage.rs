use crate::model::Disk;
use crate::units::round_2dp;

const WARNING_PERCENT: f64 = 50.0;
const DANGER_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Safe,
    Warning,
    Danger,
}

impl UsageLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= DANGER_PERCENT {
            UsageLevel::Danger
        } else if percent >= WARNING_PERCENT {
            UsageLevel::Warning
        } else {
            UsageLevel::Safe
        }
    }
}

/// Space accounting for a disk, derived from its recorded contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent_used: f64,
    pub level: UsageLevel,
}

impl DiskUsage {
    pub fn of(disk: &Disk) -> Self {
        let used: f64 = disk.contenidos.iter().map(|c| c.size_gb).sum();
        let percent_used = if disk.tamanio_gb > 0.0 {
            round_2dp(used / disk.tamanio_gb * 100.0)
        } else {
            0.0
        };

        DiskUsage {
            used_gb: round_2dp(used),
            free_gb: round_2dp(disk.tamanio_gb - used),
            percent_used,
            level: UsageLevel::from_percent(percent_used),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentRecord;
    use chrono::NaiveDate;

    fn disk(size: f64, contents: &[f64]) -> Disk {
        Disk {
            nombre: "d".to_string(),
            tamanio_gb: size,
            contenidos: contents
                .iter()
                .map(|&gb| ContentRecord {
                    name: "c".to_string(),
                    size_gb: gb,
                    last_modified: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(UsageLevel::from_percent(0.0), UsageLevel::Safe);
        assert_eq!(UsageLevel::from_percent(49.99), UsageLevel::Safe);
        assert_eq!(UsageLevel::from_percent(50.0), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percent(79.99), UsageLevel::Warning);
        assert_eq!(UsageLevel::from_percent(80.0), UsageLevel::Danger);
    }

    #[test]
    fn test_usage_of_disk() {
        let usage = DiskUsage::of(&disk(500.0, &[15.5, 8.2]));
        assert_eq!(usage.used_gb, 23.7);
        assert_eq!(usage.free_gb, 476.3);
        assert_eq!(usage.percent_used, 4.74);
        assert_eq!(usage.level, UsageLevel::Safe);
    }

    #[test]
    fn test_full_disk_is_danger() {
        let usage = DiskUsage::of(&disk(100.0, &[60.0, 25.0]));
        assert_eq!(usage.percent_used, 85.0);
        assert_eq!(usage.level, UsageLevel::Danger);
    }

    #[test]
    fn test_zero_size_disk() {
        let usage = DiskUsage::of(&disk(0.0, &[1.0]));
        assert_eq!(usage.percent_used, 0.0);
        assert_eq!(usage.free_gb, -1.0);
    }
}
