use std::fs;
use std::io;
use std::path::Path;
use tempfile::tempdir;

use disk_inventory_core::scanner::collect_selected_files;
use disk_inventory_core::{AppConfig, Disk, Error, ScanEngine, SilentReporter};

/// Layout:
///   scan_root/
///     $RECYCLE.BIN/x          (70 bytes, hidden)
///     .git/config             (50 bytes, hidden)
///     Docs/a.txt              (1000 bytes)
///     Docs/sub/b.txt          (2000 bytes)
///     Media/c.bin             (4096 bytes)
///     loose.txt               (10 bytes)
///     node_modules/pkg/i.js   (30 bytes)
fn create_test_tree(root: &Path) {
    let write = |rel: &str, len: usize| {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0x5Au8; len]).unwrap();
    };
    write("$RECYCLE.BIN/x", 70);
    write(".git/config", 50);
    write("Docs/a.txt", 1000);
    write("Docs/sub/b.txt", 2000);
    write("Media/c.bin", 4096);
    write("loose.txt", 10);
    write("node_modules/pkg/i.js", 30);
}

fn config(ignore: &[&str], skip_hidden: bool) -> AppConfig {
    AppConfig {
        ignore_patterns: ignore.iter().map(|s| s.to_string()).collect(),
        skip_hidden,
        ..Default::default()
    }
}

#[test]
fn test_full_scan_pipeline() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("scan_root");
    create_test_tree(&root);

    let engine = ScanEngine::new(config(&["**/node_modules"], true));
    let report = engine.scan(&root, &SilentReporter).unwrap();

    assert_eq!(report.file_count, 4);
    assert_eq!(report.total_bytes, 7106);
    assert_eq!(report.result.suggested_root_name, "scan_root");

    let names: Vec<&str> = report
        .result
        .items
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["Docs", "Media", "loose.txt"]);
    assert_eq!(report.result.total_size_gb, 0.0);
}

#[test]
fn test_selected_paths_start_with_root_name() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("scan_root");
    create_test_tree(&root);

    let files = collect_selected_files(&root, &[], true, &SilentReporter).unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "scan_root/Docs/a.txt",
            "scan_root/Docs/sub/b.txt",
            "scan_root/Media/c.bin",
            "scan_root/loose.txt",
            "scan_root/node_modules/pkg/i.js",
        ]
    );
    assert_eq!(files[1].size_bytes, 2000);
    assert!(files.iter().all(|f| f.last_modified_epoch_ms > 0));
}

#[test]
fn test_hidden_entries_kept_when_not_skipped() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("scan_root");
    create_test_tree(&root);

    let files = collect_selected_files(&root, &[], false, &SilentReporter).unwrap();
    assert_eq!(files.len(), 7);
    assert!(files.iter().any(|f| f.relative_path == "scan_root/.git/config"));
    assert!(files.iter().any(|f| f.relative_path == "scan_root/$RECYCLE.BIN/x"));
}

#[test]
fn test_invalid_glob_is_ignored() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("scan_root");
    create_test_tree(&root);

    let files = collect_selected_files(&root, &["[", "*.bin"], true, &SilentReporter).unwrap();
    assert!(files.iter().all(|f| !f.relative_path.ends_with(".bin")));
    assert_eq!(files.len(), 4);
}

#[test]
fn test_missing_root_is_not_found() {
    let tmp = tempdir().unwrap();
    let err = collect_selected_files(&tmp.path().join("nope"), &[], true, &SilentReporter)
        .unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
        other => panic!("expected IO error, got {:?}", other),
    }
}

#[test]
fn test_file_root_is_invalid_input() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let err = collect_selected_files(&file, &[], true, &SilentReporter).unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidInput),
        other => panic!("expected IO error, got {:?}", other),
    }
}

#[test]
fn test_empty_folder_is_empty_selection() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("empty");
    fs::create_dir_all(root.join("only_dirs")).unwrap();

    let engine = ScanEngine::new(AppConfig::default());
    let err = engine.scan(&root, &SilentReporter).unwrap_err();
    assert!(matches!(err, Error::EmptySelection));
}

#[test]
fn test_scan_merges_into_disk_record() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("Backup 2024");
    create_test_tree(&root);

    let report = ScanEngine::new(AppConfig::default())
        .scan(&root, &SilentReporter)
        .unwrap();

    let mut disk = Disk {
        nombre: "Archive shelf 3".to_string(),
        tamanio_gb: 500.0,
        ..Default::default()
    };
    disk.apply_scan(report.result);
    assert_eq!(disk.nombre, "Archive shelf 3");
    assert_eq!(disk.contenidos.len(), 4);
    assert!(disk.validate().is_ok());

    let json = serde_json::to_value(&disk).unwrap();
    let first = &json["contenidos"][0];
    assert_eq!(first["nombre"], "Docs");
    assert!(first["fecha_modificacion"].as_str().unwrap().len() == 10);
}

#[cfg(unix)]
#[test]
fn test_symlinked_root_keeps_chosen_name() {
    let tmp = tempdir().unwrap();
    let target = tmp.path().join("real_target");
    fs::create_dir_all(target.join("Docs")).unwrap();
    fs::write(target.join("Docs/a.txt"), b"abc").unwrap();
    let link = tmp.path().join("Backup2024");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let files = collect_selected_files(&link, &[], true, &SilentReporter).unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(paths, vec!["Backup2024/Docs/a.txt"]);

    let report = ScanEngine::new(AppConfig::default())
        .scan(&link, &SilentReporter)
        .unwrap();
    assert_eq!(report.result.suggested_root_name, "Backup2024");
}
