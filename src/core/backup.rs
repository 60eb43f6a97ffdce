//! Storage backup
//!
//! Copies the device's internal storage entry by entry with `adb pull`,
//! skipping excluded folders, and optionally zips the result.
//!
//! Exclusions without a `/` name top-level folders and are never
//! transferred. Nested exclusions such as `WhatsApp/Media` cannot be skipped
//! by `adb pull`, so they are deleted from the local copy once their parent
//! has been pulled.

use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::exec::Executor;
use crate::core::platform_tools::Adb;
use crate::error::ToolkitError;
use crate::infra::filesystem;

/// Backup parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    /// Local destination directory
    pub destination: PathBuf,
    /// Device directory to copy
    pub remote_root: String,
    /// Folder names or relative paths to leave out
    pub excludes: Vec<String>,
    /// Zip the destination afterwards
    pub compress: bool,
}

/// What a backup run did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackupReport {
    /// Top-level entries pulled
    pub pulled: Vec<String>,
    /// Top-level entries skipped by an exclusion
    pub skipped: Vec<String>,
    /// Local paths removed for nested exclusions
    pub pruned: Vec<PathBuf>,
    /// Zip archive written, if any
    pub archive: Option<PathBuf>,
}

fn normalize(exclude: &str) -> &str {
    exclude.trim().trim_matches('/')
}

/// Exclusions naming a top-level folder
pub fn top_level_excludes(excludes: &[String]) -> Vec<&str> {
    excludes
        .iter()
        .map(|e| normalize(e))
        .filter(|e| !e.is_empty() && !e.contains('/'))
        .collect()
}

/// Exclusions naming a folder below the top level
pub fn nested_excludes(excludes: &[String]) -> Vec<&str> {
    excludes
        .iter()
        .map(|e| normalize(e))
        .filter(|e| e.contains('/'))
        .collect()
}

/// Whether a top-level `entry` is excluded
pub fn is_excluded(entry: &str, excludes: &[String]) -> bool {
    top_level_excludes(excludes).contains(&entry)
}

/// Split an `ls -1` listing into entries to pull and entries to skip
pub fn partition_listing(listing: &str, excludes: &[String]) -> (Vec<String>, Vec<String>) {
    listing
        .lines()
        .map(|l| l.trim_end_matches('\r').trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .partition(|entry| !is_excluded(entry, excludes))
}

/// Join a device directory and an entry name
pub fn remote_path(root: &str, entry: &str) -> String {
    format!("{}/{entry}", root.trim_end_matches('/'))
}

/// Delete nested exclusions from the local copy
///
/// Only plain relative paths are honoured; anything that could escape
/// `destination` is ignored.
pub fn prune_nested(destination: &Path, excludes: &[String]) -> Result<Vec<PathBuf>, ToolkitError> {
    let mut pruned = Vec::new();
    for nested in nested_excludes(excludes) {
        let relative = Path::new(nested);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            debug!(exclude = nested, "ignoring exclusion outside the backup");
            continue;
        }
        let target = destination.join(relative);
        if target.exists() {
            filesystem::remove_path(&target)?;
            info!(path = %target.display(), "pruned excluded folder");
            pruned.push(target);
        }
    }
    Ok(pruned)
}

/// Archive path for a destination directory (`<dir>.zip`)
pub fn archive_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_os_string();
    name.push(".zip");
    PathBuf::from(name)
}

/// Zip the contents of `source` into `<source>.zip`
///
/// Entry names are relative to `source`.
pub fn compress_dir(source: &Path) -> Result<PathBuf, ToolkitError> {
    let archive = archive_path(source);
    let file = File::create(&archive).map_err(|e| ToolkitError::Io {
        path: archive.clone(),
        error: e.to_string(),
    })?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let archive_err = |e: &dyn std::fmt::Display| ToolkitError::Archive(e.to_string());

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| archive_err(&e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| archive_err(&e))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| archive_err(&e))?;
        } else {
            writer
                .start_file(name, options)
                .map_err(|e| archive_err(&e))?;
            let mut input = File::open(entry.path()).map_err(|e| ToolkitError::Io {
                path: entry.path().to_path_buf(),
                error: e.to_string(),
            })?;
            io::copy(&mut input, &mut writer).map_err(|e| archive_err(&e))?;
        }
    }
    writer.finish().map_err(|e| archive_err(&e))?;
    Ok(archive)
}

/// Run a backup
///
/// In dry-run mode nothing is created, listed or pulled; the invocations that
/// would run are printed instead.
pub fn run_backup(
    options: &BackupOptions,
    adb: &Adb,
    exec: &Executor<'_>,
) -> Result<BackupReport, ToolkitError> {
    let dry_run = exec.mode().is_dry_run();
    let mut report = BackupReport::default();

    println!("Creando carpeta local de backup: {}", options.destination.display());
    if !dry_run {
        filesystem::create_dir_all(&options.destination)?;
    }
    if !options.excludes.is_empty() {
        println!("Exclusiones: {}", options.excludes.join(", "));
    }

    println!("Iniciando pull de {} ... (esto puede tardar)", options.remote_root);
    let listing = exec.capture_success(&adb.list_dir(&options.remote_root))?;
    if dry_run {
        println!(
            "DRY-RUN: {} para cada entrada de {} no excluida",
            adb.pull(&options.remote_root, &options.destination),
            options.remote_root
        );
    } else {
        let (pull, skip) = partition_listing(&listing, &options.excludes);
        for entry in &skip {
            info!(entry = %entry, "skipping excluded entry");
        }
        for entry in &pull {
            let remote = remote_path(&options.remote_root, entry);
            exec.check(&adb.pull(&remote, &options.destination))?;
        }
        report.pruned = prune_nested(&options.destination, &options.excludes)?;
        report.pulled = pull;
        report.skipped = skip;
    }

    if options.compress {
        if dry_run {
            println!(
                "DRY-RUN: comprimir {} en {}",
                options.destination.display(),
                archive_path(&options.destination).display()
            );
        } else {
            let archive = compress_dir(&options.destination)?;
            println!("Backup comprimido en {}", archive.display());
            report.archive = Some(archive);
        }
    }

    println!(
        "Backup de {} en {} completado.",
        options.remote_root,
        options.destination.display()
    );
    Ok(report)
}
