use colored::*;
use disk_inventory_core::{ContentRecord, Disk, DiskUsage, ScanReport, UsageLevel};

fn paint(text: String, level: UsageLevel) -> ColoredString {
    match level {
        UsageLevel::Safe => text.green(),
        UsageLevel::Warning => text.yellow(),
        UsageLevel::Danger => text.red(),
    }
}

fn print_contents(items: &[ContentRecord]) {
    println!(
        "  {:<40} {:>12} {:>10}",
        "Name".bold(),
        "Modified".bold(),
        "GB".bold()
    );
    for item in items {
        println!(
            "  {:<40} {:>12} {:>10.2}",
            item.name,
            item.last_modified.format("%Y-%m-%d").to_string(),
            item.size_gb
        );
    }
}

pub fn print_scan(report: &ScanReport) {
    let result = &report.result;
    println!(
        "{} {} ({} files, {} GB)",
        "Folder".bold(),
        result.suggested_root_name.cyan(),
        report.file_count,
        format!("{:.2}", result.total_size_gb).cyan()
    );
    print_contents(&result.items);

    let listed: f64 = result.items.iter().map(|i| i.size_gb).sum();
    if (result.total_size_gb - listed).abs() >= 0.01 {
        println!(
            "  {}",
            format!(
                "{:.2} GB listed of {:.2} GB total (loose root files and rounding)",
                listed, result.total_size_gb
            )
            .dimmed()
        );
    }
}

pub fn print_disks(disks: &[Disk]) {
    println!(
        "{:>6}  {:<30} {:<7} {:<10} {:>10} {:>10} {:>8}",
        "ID".bold(),
        "Name".bold(),
        "Kind".bold(),
        "Health".bold(),
        "Size GB".bold(),
        "Free GB".bold(),
        "Used".bold()
    );
    for disk in disks {
        let usage = DiskUsage::of(disk);
        println!(
            "{:>6}  {:<30} {:<7} {:<10} {:>10.2} {:>10.2} {:>8}",
            disk.id.map(|id| id.to_string()).unwrap_or_default(),
            disk.nombre,
            disk.tipo.as_str(),
            disk.estado.as_str(),
            disk.tamanio_gb,
            usage.free_gb,
            paint(format!("{:.2}%", usage.percent_used), usage.level)
        );
    }
}

pub fn print_disk(disk: &Disk) {
    let usage = DiskUsage::of(disk);
    println!(
        "{} {} [{}] {}",
        disk.id.map(|id| format!("#{}", id)).unwrap_or_default().dimmed(),
        disk.nombre.bold(),
        disk.tipo,
        disk.estado
    );
    if !disk.descripcion.is_empty() {
        println!("  {}", disk.descripcion);
    }
    println!(
        "  {:.2} GB capacity, {:.2} GB used, {:.2} GB free ({})",
        disk.tamanio_gb,
        usage.used_gb,
        usage.free_gb,
        paint(format!("{:.2}%", usage.percent_used), usage.level)
    );
    print_contents(&disk.contenidos);
}
