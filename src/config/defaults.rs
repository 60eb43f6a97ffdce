//! Default configuration values

use std::time::Duration;

/// Device bridge executable name looked up on `PATH`
pub const ADB_TOOL: &str = "adb";

/// Bootloader executable name looked up on `PATH`
pub const FASTBOOT_TOOL: &str = "fastboot";

/// Model substrings accepted by the device validator (compared upper-case)
pub const EXPECTED_MODEL_MARKERS: &[&str] = &["A2 LITE", "A2LITE"];

/// Property holding the device model
pub const MODEL_PROPERTY: &str = "ro.product.model";

/// Properties printed by `info`, in order
pub const INFO_PROPERTIES: &[&str] = &[
    MODEL_PROPERTY,
    "ro.build.version.release",
    "ro.build.version.sdk",
    "ro.serialno",
];

/// Device storage root copied by `backup`
pub const BACKUP_REMOTE_ROOT: &str = "/sdcard";

/// Local destination of `backup` when none is given
pub const DEFAULT_BACKUP_DIR: &str = "backup";

/// Folders skipped by `backup` unless `--exclude` is given
pub const DEFAULT_BACKUP_EXCLUDES: &[&str] = &["DCIM", "Pictures", "Videos", ".thumbnails"];

/// Output file of `logcat` when none is given
pub const DEFAULT_LOGCAT_FILE: &str = "logcat.txt";

/// Partition suggested by the flash dialog of the TUI
pub const DEFAULT_FLASH_PARTITION: &str = "recovery";

/// Bounded wait for informational queries launched from the TUI
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(120);
