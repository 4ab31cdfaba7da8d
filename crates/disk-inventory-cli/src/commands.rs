use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use disk_inventory_core::{DiskFilter, DiskHealth, DiskKind};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "disk-inventory")]
#[command(about = "Index storage disks and keep the inventory backend up to date", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a folder and show its top-level contents
    Scan(ScanArgs),
    /// Scan a folder and create or update a disk record from it
    Push(PushArgs),
    /// List disks on the backend
    List(ListArgs),
    /// Show one disk with its contents
    Show {
        id: i64,
    },
    /// Delete a disk record
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List a directory on the backend host
    RemoteScan {
        path: String,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Folder to scan
    pub path: PathBuf,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Also write the contents to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Folder to scan
    pub path: PathBuf,
    /// Update this disk instead of creating a new one
    #[arg(long)]
    pub id: Option<i64>,
    /// Disk name (defaults to the folder name)
    #[arg(long)]
    pub name: Option<String>,
    /// HDD, SSD, CD/DVD or OTRO
    #[arg(long)]
    pub kind: Option<DiskKind>,
    /// Disk capacity in GB (defaults to the scanned size)
    #[arg(long)]
    pub size_gb: Option<f64>,
    #[arg(long)]
    pub description: Option<String>,
    /// BUENO, EN_RIESGO or DANADO
    #[arg(long)]
    pub health: Option<DiskHealth>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Disk name contains
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub kind: Option<DiskKind>,
    /// Description contains
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub health: Option<DiskHealth>,
    /// Any content name contains
    #[arg(long)]
    pub content: Option<String>,
    /// Contents modified on or after (YYYY-MM-DD)
    #[arg(long)]
    pub modified_from: Option<NaiveDate>,
    /// Contents modified on or before (YYYY-MM-DD)
    #[arg(long)]
    pub modified_to: Option<NaiveDate>,
    #[arg(long)]
    pub min_size_gb: Option<f64>,
    #[arg(long)]
    pub max_size_gb: Option<f64>,
    #[arg(long)]
    pub min_free_gb: Option<f64>,
    #[arg(long)]
    pub max_free_gb: Option<f64>,
    /// Free-text search over names, descriptions and contents
    #[arg(long)]
    pub search: Option<String>,
    /// nombre, tipo or tamanio_gb; prefix with '-' to reverse
    #[arg(long, allow_hyphen_values = true)]
    pub ordering: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    /// Follow every page
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
}

impl ListArgs {
    pub fn to_filter(&self) -> DiskFilter {
        DiskFilter {
            nombre: self.name.clone(),
            tipo: self.kind,
            descripcion: self.description.clone(),
            estado: self.health,
            contenido_nombre: self.content.clone(),
            contenido_fecha_desde: self.modified_from,
            contenido_fecha_hasta: self.modified_to,
            tamanio_gb_min: self.min_size_gb,
            tamanio_gb_max: self.max_size_gb,
            espacio_libre_min: self.min_free_gb,
            espacio_libre_max: self.max_free_gb,
            search: self.search.clone(),
            ordering: self.ordering.clone(),
            page: self.page,
        }
    }
}
