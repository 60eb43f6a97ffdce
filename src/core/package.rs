//! Flash packages
//!
//! A flash package is a JSON manifest listing `(partition, image)` pairs:
//!
//! ```json
//! {
//!   "actions": [
//!     {"partition": "recovery", "image": "twrp.img"},
//!     {"partition": "boot", "image": "boot.img"}
//!   ]
//! }
//! ```
//!
//! Every image is checked before anything is flashed. Actions then run
//! strictly in manifest order, one at a time, and the run halts at the first
//! failed step.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::core::confirm::{require_confirmation, Confirmer, PACKAGE_PROMPT};
use crate::core::exec::Executor;
use crate::core::platform_tools::Fastboot;
use crate::error::{ManifestError, ToolkitError};

/// One partition to flash
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlashAction {
    /// Target partition name
    pub partition: String,
    /// Image file on local storage
    pub image: PathBuf,
}

/// Ordered list of flash actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FlashManifest {
    /// Actions in execution order
    #[serde(default)]
    pub actions: Vec<FlashAction>,
}

impl FlashManifest {
    /// Parse a manifest document
    ///
    /// An absent `actions` key parses as an empty list; use
    /// [`FlashManifest::validate`] to reject it.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read, parse and structurally validate the manifest at `path`
    ///
    /// Relative image paths are taken from the working directory. An image
    /// missing there but present next to the manifest uses the latter.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut manifest = Self::from_json(&content).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        manifest.validate()?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            manifest.resolve_relative_to(base);
        }
        Ok(manifest)
    }

    /// Reject empty manifests and actions without a partition
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.actions.is_empty() {
            return Err(ManifestError::Empty);
        }
        if let Some(index) = self
            .actions
            .iter()
            .position(|a| a.partition.trim().is_empty())
        {
            return Err(ManifestError::MissingPartition { index: index + 1 });
        }
        Ok(())
    }

    /// Fall back to `base` for relative images absent from the working directory
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for action in &mut self.actions {
            if action.image.is_relative() && !action.image.exists() {
                let candidate = base.join(&action.image);
                if candidate.exists() {
                    action.image = candidate;
                }
            }
        }
    }

    /// Verify that every image exists
    ///
    /// Stops at the first missing image, before anything has been flashed.
    pub fn check_images(&self) -> Result<(), ManifestError> {
        match self.actions.iter().find(|a| !a.image.exists()) {
            Some(missing) => Err(ManifestError::MissingImage {
                partition: missing.partition.clone(),
                image: missing.image.clone(),
            }),
            None => Ok(()),
        }
    }

    /// One human readable line per action, in execution order
    pub fn plan_lines(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|a| format!(" - flash {} <- {}", a.partition, a.image.display()))
            .collect()
    }
}

/// Summary of a completed package run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    /// Partitions flashed, in order
    pub flashed: Vec<String>,
}

/// Check, show, confirm and flash a manifest
///
/// # Errors
///
/// - [`ManifestError::MissingImage`] before any flashing if an image is absent
/// - [`ToolkitError::Cancelled`] if the plan is not confirmed
/// - [`ManifestError::StepFailed`] when a step fails; later steps are skipped
pub fn run_package(
    manifest: &FlashManifest,
    fastboot: &Fastboot,
    exec: &Executor<'_>,
    confirmer: &dyn Confirmer,
    confirmed: bool,
) -> Result<PackageReport, ToolkitError> {
    manifest.validate()?;
    manifest.check_images()?;

    println!("Plan de flasheo:");
    for line in manifest.plan_lines() {
        println!("{line}");
    }

    require_confirmation(confirmed, confirmer, PACKAGE_PROMPT)?;

    let total = manifest.actions.len();
    let mut flashed = Vec::with_capacity(total);
    for (index, action) in manifest.actions.iter().enumerate() {
        info!(step = index + 1, total, partition = %action.partition, "flashing");
        let invocation = fastboot.flash(&action.partition, &action.image);
        if let Err(source) = exec.check(&invocation) {
            error!(partition = %action.partition, "flash step failed, halting package");
            return Err(ManifestError::StepFailed {
                step: index + 1,
                total,
                partition: action.partition.clone(),
                skipped: total - index - 1,
                source,
            }
            .into());
        }
        flashed.push(action.partition.clone());
    }

    Ok(PackageReport { flashed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exec::ExecutionMode;
    use crate::test_utils::{generators::partition_name, FakeRunner, ScriptedConfirmer};
    use proptest::prelude::*;
    use tempfile::TempDir;

    const EXAMPLE: &str = r#"{"actions":[{"partition":"recovery","image":"twrp.img"},{"partition":"boot","image":"boot.img"}]}"#;

    fn write_images(dir: &TempDir, names: &[&str]) {
        for name in names {
            std::fs::write(dir.path().join(name), b"ANDROID!").unwrap();
        }
    }

    fn example_in(dir: &TempDir) -> FlashManifest {
        let path = dir.path().join("package.json");
        std::fs::write(&path, EXAMPLE).unwrap();
        FlashManifest::load(&path).unwrap()
    }

    #[test]
    fn test_parse_example_manifest() {
        let manifest = FlashManifest::from_json(EXAMPLE).unwrap();
        assert_eq!(manifest.actions.len(), 2);
        assert_eq!(manifest.actions[0].partition, "recovery");
        assert_eq!(manifest.actions[1].image, PathBuf::from("boot.img"));
    }

    #[test]
    fn test_empty_or_absent_actions_rejected() {
        for doc in [r#"{"actions": []}"#, "{}"] {
            let manifest = FlashManifest::from_json(doc).unwrap();
            assert!(matches!(manifest.validate(), Err(ManifestError::Empty)));
        }
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"actions\": [").unwrap();
        assert!(matches!(
            FlashManifest::load(&path),
            Err(ManifestError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_rejects_blank_partition() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{"actions":[{"partition":" ","image":"a.img"}]}"#).unwrap();
        assert!(matches!(
            FlashManifest::load(&path),
            Err(ManifestError::MissingPartition { index: 1 })
        ));
    }

    #[test]
    fn test_load_falls_back_to_manifest_directory() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img"]);
        let manifest = example_in(&dir);
        assert_eq!(manifest.actions[0].image, dir.path().join("twrp.img"));
        // Missing everywhere: left as written so the error names it
        assert_eq!(manifest.actions[1].image, PathBuf::from("boot.img"));
    }

    #[test]
    fn test_working_directory_image_wins() {
        let dir = TempDir::new().unwrap();
        let manifest_dir = dir.path().join("pkg");
        std::fs::create_dir_all(&manifest_dir).unwrap();
        std::fs::write(manifest_dir.join("Cargo.toml"), b"other").unwrap();

        let mut manifest = FlashManifest {
            actions: vec![FlashAction {
                partition: "boot".to_string(),
                image: PathBuf::from("Cargo.toml"),
            }],
        };
        manifest.resolve_relative_to(&manifest_dir);
        assert_eq!(manifest.actions[0].image, PathBuf::from("Cargo.toml"));
    }

    #[test]
    fn test_missing_image_blocks_every_flash() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img"]);
        let manifest = example_in(&dir);
        let runner = FakeRunner::new();
        let confirmer = ScriptedConfirmer::new(&[true]);

        let err = run_package(
            &manifest,
            &Fastboot::new("fastboot"),
            &Executor::normal(&runner),
            &confirmer,
            false,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ToolkitError::Manifest(ManifestError::MissingImage { ref partition, .. }) if partition == "boot"
        ));
        assert!(runner.calls().is_empty());
        assert!(confirmer.prompts().is_empty());
    }

    #[test]
    fn test_example_plan_lists_two_lines_in_order() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img", "boot.img"]);
        let manifest = example_in(&dir);

        let lines = manifest.plan_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" - flash recovery <- "));
        assert!(lines[0].ends_with("twrp.img"));
        assert!(lines[1].starts_with(" - flash boot <- "));
        assert!(lines[1].ends_with("boot.img"));
    }

    #[test]
    fn test_confirmed_dry_run_flashes_nothing() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img", "boot.img"]);
        let manifest = example_in(&dir);
        let runner = FakeRunner::new();
        let confirmer = ScriptedConfirmer::new(&[]);

        let report = run_package(
            &manifest,
            &Fastboot::new("fastboot"),
            &Executor::new(&runner, ExecutionMode::DryRun),
            &confirmer,
            true,
        )
        .unwrap();

        assert_eq!(report.flashed, vec!["recovery", "boot"]);
        assert!(runner.calls().is_empty());
        assert!(confirmer.prompts().is_empty());
    }

    #[test]
    fn test_declined_plan_flashes_nothing() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img", "boot.img"]);
        let manifest = example_in(&dir);
        let runner = FakeRunner::new();
        let confirmer = ScriptedConfirmer::new(&[false]);

        let err = run_package(
            &manifest,
            &Fastboot::new("fastboot"),
            &Executor::normal(&runner),
            &confirmer,
            false,
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(runner.calls().is_empty());
        assert_eq!(confirmer.prompts(), vec![PACKAGE_PROMPT]);
    }

    #[test]
    fn test_actions_run_in_manifest_order() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img", "boot.img"]);
        let manifest = example_in(&dir);
        let runner = FakeRunner::new();

        run_package(
            &manifest,
            &Fastboot::new("fastboot"),
            &Executor::normal(&runner),
            &ScriptedConfirmer::new(&[true]),
            false,
        )
        .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("fastboot flash recovery "));
        assert!(calls[1].starts_with("fastboot flash boot "));
    }

    #[test]
    fn test_failed_step_halts_remaining_actions() {
        let dir = TempDir::new().unwrap();
        write_images(&dir, &["twrp.img", "boot.img"]);
        let manifest = example_in(&dir);
        let runner = FakeRunner::new().respond("recovery", 1, "");

        let err = run_package(
            &manifest,
            &Fastboot::new("fastboot"),
            &Executor::normal(&runner),
            &ScriptedConfirmer::new(&[]),
            true,
        )
        .unwrap_err();

        match err {
            ToolkitError::Manifest(ManifestError::StepFailed {
                step,
                total,
                partition,
                skipped,
                ..
            }) => {
                assert_eq!((step, total, skipped), (1, 2, 1));
                assert_eq!(partition, "recovery");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.calls().len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn test_any_missing_image_means_zero_invocations(
            partitions in proptest::collection::vec(partition_name(), 1..6),
            missing_at in any::<prop::sample::Index>(),
        ) {
            let dir = TempDir::new().unwrap();
            let missing = missing_at.index(partitions.len());
            let actions = partitions
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let image = dir.path().join(format!("{i}.img"));
                    if i != missing {
                        std::fs::write(&image, b"img").unwrap();
                    }
                    FlashAction { partition: p.clone(), image }
                })
                .collect();
            let manifest = FlashManifest { actions };
            let runner = FakeRunner::new();

            let result = run_package(
                &manifest,
                &Fastboot::new("fastboot"),
                &Executor::normal(&runner),
                &ScriptedConfirmer::new(&[true]),
                true,
            );

            prop_assert!(result.is_err());
            prop_assert!(runner.calls().is_empty());
        }
    }
}
