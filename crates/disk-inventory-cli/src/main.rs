mod commands;
mod logging;
mod progress;
mod render;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, ListArgs, PushArgs, ScanArgs};
use disk_inventory_core::{export, AppConfig, Disk, DiskApi, ScanEngine, ScanReport};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info, warn};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match disk_inventory_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(_guard);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let outcome = match args.command {
        Some(Commands::Scan(scan_args)) => run_scan(&config, &scan_args),
        Some(Commands::Push(push_args)) => run_push(&config, push_args),
        Some(Commands::List(list_args)) => run_list(&config, &list_args),
        Some(Commands::Show { id }) => run_show(&config, id),
        Some(Commands::Delete { id, yes }) => run_delete(&config, id, yes),
        Some(Commands::RemoteScan { path }) => run_remote_scan(&config, &path),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("Error: {:#}", err);
        drop(_guard);
        process::exit(1);
    }
}

fn scan_folder(config: &AppConfig, path: &Path) -> anyhow::Result<ScanReport> {
    let engine = ScanEngine::new(config.clone());
    let reporter = CliReporter::new();
    engine
        .scan(path, &reporter)
        .with_context(|| format!("scanning {}", path.display()))
}

fn run_scan(config: &AppConfig, args: &ScanArgs) -> anyhow::Result<()> {
    let report = scan_folder(config, &args.path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.result)?);
    } else {
        render::print_scan(&report);
    }

    if let Some(csv_path) = &args.csv {
        let file = File::create(csv_path)
            .with_context(|| format!("creating {}", csv_path.display()))?;
        let rows = export::write_contents_csv(
            BufWriter::new(file),
            &report.result.suggested_root_name,
            &report.result.items,
        )?;
        info!("Wrote {} rows to {}", rows, csv_path.display());
    }

    Ok(())
}

fn run_push(config: &AppConfig, args: PushArgs) -> anyhow::Result<()> {
    let report = scan_folder(config, &args.path)?;
    let api = DiskApi::new(config)?;

    let mut disk = match args.id {
        Some(id) => {
            let mut existing = api
                .get_disk(id)
                .with_context(|| format!("fetching disk {}", id))?;
            existing.apply_scan(report.result);
            existing
        }
        None => Disk::from_scan(report.result),
    };

    if let Some(name) = args.name {
        disk.nombre = name;
    }
    if let Some(kind) = args.kind {
        disk.tipo = kind;
    }
    if let Some(size_gb) = args.size_gb {
        disk.tamanio_gb = size_gb;
    }
    if let Some(description) = args.description {
        disk.descripcion = description;
    }
    if let Some(health) = args.health {
        disk.estado = health;
    }

    let saved = match args.id {
        Some(id) => api.update_disk(id, &disk)?,
        None => api.create_disk(&disk)?,
    };

    info!(
        "Disk {} saved with {} contents",
        saved.nombre.green(),
        saved.contenidos.len()
    );
    render::print_disk(&saved);
    Ok(())
}

fn run_list(config: &AppConfig, args: &ListArgs) -> anyhow::Result<()> {
    let api = DiskApi::new(config)?;
    let filter = args.to_filter();

    if args.all {
        let disks = api.list_all(&filter)?;
        render::print_disks(&disks);
        info!("{} disks", disks.len());
    } else {
        let page = api.list_disks(&filter)?;
        render::print_disks(&page.results);
        match (page.count, page.next.is_some()) {
            (Some(count), true) => info!(
                "Showing {} of {} disks, use --page or --all for more",
                page.results.len(),
                count
            ),
            (_, true) => info!("More disks available, use --page or --all"),
            _ => {}
        }
    }
    Ok(())
}

fn run_show(config: &AppConfig, id: i64) -> anyhow::Result<()> {
    let api = DiskApi::new(config)?;
    let disk = api.get_disk(id)?;
    render::print_disk(&disk);
    Ok(())
}

fn run_delete(config: &AppConfig, id: i64, yes: bool) -> anyhow::Result<()> {
    let api = DiskApi::new(config)?;
    let disk = api.get_disk(id)?;

    if !yes
        && !prompt_confirm(
            &format!("Are you SURE you want to delete disk \"{}\"?", disk.nombre),
            Some(false),
        )?
    {
        warn!("Delete cancelled");
        return Ok(());
    }

    api.delete_disk(id)?;
    info!("Deleted disk {}", disk.nombre.red());
    Ok(())
}

fn run_remote_scan(config: &AppConfig, path: &str) -> anyhow::Result<()> {
    let api = DiskApi::new(config)?;
    let items = api.scan_remote(path)?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(default.unwrap_or(false));
        }

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
