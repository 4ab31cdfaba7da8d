use crate::error::{Error, FieldError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAME_MAX_LEN: usize = 100;
const CONTENT_NAME_MAX_LEN: usize = 255;
/// Backend stores sizes as decimal(7, 2).
const MAX_GB: f64 = 100_000.0;

/// One file handed over by a folder selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Slash-separated; the first segment is the selected root folder.
    pub relative_path: String,
    pub size_bytes: u64,
    pub last_modified_epoch_ms: i64,
}

/// A file or folder recorded as living on a disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "peso_gb", deserialize_with = "decimal::deserialize")]
    pub size_gb: f64,
    #[serde(rename = "fecha_modificacion")]
    pub last_modified: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub suggested_root_name: String,
    pub total_size_gb: f64,
    pub items: Vec<ContentRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiskKind {
    #[default]
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "CD/DVD")]
    CdDvd,
    #[serde(rename = "OTRO")]
    Other,
}

impl DiskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiskKind::Hdd => "HDD",
            DiskKind::Ssd => "SSD",
            DiskKind::CdDvd => "CD/DVD",
            DiskKind::Other => "OTRO",
        }
    }
}

impl fmt::Display for DiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiskKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HDD" => Ok(DiskKind::Hdd),
            "SSD" => Ok(DiskKind::Ssd),
            "CD/DVD" | "CD" | "DVD" => Ok(DiskKind::CdDvd),
            "OTRO" | "OTHER" => Ok(DiskKind::Other),
            other => Err(Error::Other(format!(
                "Invalid disk kind '{}', expected HDD, SSD, CD/DVD or OTRO",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiskHealth {
    #[default]
    Bueno,
    EnRiesgo,
    Danado,
}

impl DiskHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiskHealth::Bueno => "BUENO",
            DiskHealth::EnRiesgo => "EN_RIESGO",
            DiskHealth::Danado => "DANADO",
        }
    }
}

impl fmt::Display for DiskHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiskHealth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUENO" => Ok(DiskHealth::Bueno),
            "EN_RIESGO" => Ok(DiskHealth::EnRiesgo),
            "DANADO" => Ok(DiskHealth::Danado),
            other => Err(Error::Other(format!(
                "Invalid disk health '{}', expected BUENO, EN_RIESGO or DANADO",
                other
            ))),
        }
    }
}

/// A physical storage disk and its indexed top-level contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Disk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub tipo: DiskKind,
    #[serde(deserialize_with = "decimal::deserialize")]
    pub tamanio_gb: f64,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub estado: DiskHealth,
    #[serde(default)]
    pub contenidos: Vec<ContentRecord>,
}

impl Disk {
    /// Draft a new disk record named and sized after the scanned folder.
    pub fn from_scan(scan: ScanResult) -> Self {
        Disk {
            nombre: scan.suggested_root_name,
            tamanio_gb: scan.total_size_gb,
            contenidos: scan.items,
            ..Default::default()
        }
    }

    /// Replace the contents with a fresh scan. Name and size are only taken
    /// from the scan when the record does not have them yet.
    pub fn apply_scan(&mut self, scan: ScanResult) {
        if self.nombre.trim().is_empty() {
            self.nombre = scan.suggested_root_name;
        }
        if self.tamanio_gb <= 0.0 {
            self.tamanio_gb = scan.total_size_gb;
        }
        self.contenidos = scan.items;
    }

    pub fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();

        let name = self.nombre.trim();
        if name.is_empty() {
            errors.push(FieldError::new("nombre", "Name is required"));
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.push(FieldError::new(
                "nombre",
                format!("Name must be at most {} characters", NAME_MAX_LEN),
            ));
        }

        if !self.tamanio_gb.is_finite() || self.tamanio_gb <= 0.0 {
            errors.push(FieldError::new("tamanio_gb", "Size must be a positive number"));
        } else if self.tamanio_gb >= MAX_GB {
            errors.push(FieldError::new(
                "tamanio_gb",
                format!("Size must be below {} GB", MAX_GB),
            ));
        }

        for (idx, content) in self.contenidos.iter().enumerate() {
            let field = |name: &str| format!("contenidos[{}].{}", idx, name);
            let content_name = content.name.trim();
            if content_name.is_empty() {
                errors.push(FieldError::new(field("nombre"), "Name is required"));
            } else if content_name.chars().count() > CONTENT_NAME_MAX_LEN {
                errors.push(FieldError::new(
                    field("nombre"),
                    format!("Name must be at most {} characters", CONTENT_NAME_MAX_LEN),
                ));
            }
            if !content.size_gb.is_finite() || content.size_gb < 0.0 || content.size_gb >= MAX_GB
            {
                errors.push(FieldError::new(
                    field("peso_gb"),
                    format!("Size must be between 0 and {} GB", MAX_GB),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// The backend serializes decimal columns as strings ("15.50"), while
/// locally built records carry plain numbers. Accept both.
mod decimal {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal number or numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }
}
