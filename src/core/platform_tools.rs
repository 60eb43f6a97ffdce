//! Invocation templates for the Android platform tools
//!
//! [`Adb`] and [`Fastboot`] are thin builders: each method maps to exactly
//! one command line of the real tool, with no chaining and no custom
//! sub-commands. They only describe what to run; execution goes through
//! [`crate::core::exec::Executor`].

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::invocation::Invocation;

/// Reboot destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RebootTarget {
    /// Normal Android boot
    Device,
    /// Bootloader (fastboot mode)
    Bootloader,
    /// Recovery
    Recovery,
}

impl fmt::Display for RebootTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Device => "device",
            Self::Bootloader => "bootloader",
            Self::Recovery => "recovery",
        };
        f.write_str(name)
    }
}

/// Device bridge (`adb`) command templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adb {
    path: PathBuf,
}

impl Adb {
    /// Templates for the `adb` binary at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn base(&self) -> Invocation {
        Invocation::new(&self.path)
    }

    /// `adb version`
    pub fn version(&self) -> Invocation {
        self.base().arg("version")
    }

    /// `adb devices`
    pub fn devices(&self) -> Invocation {
        self.base().arg("devices")
    }

    /// `adb shell getprop <property>`
    pub fn getprop(&self, property: &str) -> Invocation {
        self.base().args(["shell", "getprop", property])
    }

    /// `adb reboot [bootloader|recovery]`
    pub fn reboot(&self, target: RebootTarget) -> Invocation {
        let inv = self.base().arg("reboot");
        match target {
            RebootTarget::Device => inv,
            RebootTarget::Bootloader => inv.arg("bootloader"),
            RebootTarget::Recovery => inv.arg("recovery"),
        }
    }

    /// `adb sideload <package>`
    pub fn sideload(&self, package: &Path) -> Invocation {
        self.base().arg("sideload").arg(package)
    }

    /// `adb pull <remote> <local>`
    pub fn pull(&self, remote: &str, local: &Path) -> Invocation {
        self.base().arg("pull").arg(remote).arg(local)
    }

    /// `adb push <local> <remote>`
    pub fn push(&self, local: &Path, remote: &str) -> Invocation {
        self.base().arg("push").arg(local).arg(remote)
    }

    /// `adb shell ls -1 <remote_dir>`
    pub fn list_dir(&self, remote_dir: &str) -> Invocation {
        self.base().args(["shell", "ls", "-1", remote_dir])
    }

    /// `adb logcat -d` (dump and exit)
    pub fn logcat_dump(&self) -> Invocation {
        self.base().args(["logcat", "-d"])
    }
}

/// Bootloader tool (`fastboot`) command templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fastboot {
    path: PathBuf,
}

impl Fastboot {
    /// Templates for the `fastboot` binary at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn base(&self) -> Invocation {
        Invocation::new(&self.path)
    }

    /// `fastboot --version`
    pub fn version(&self) -> Invocation {
        self.base().arg("--version")
    }

    /// `fastboot devices`
    pub fn devices(&self) -> Invocation {
        self.base().arg("devices")
    }

    /// `fastboot flash <partition> <image>`
    pub fn flash(&self, partition: &str, image: &Path) -> Invocation {
        self.base().arg("flash").arg(partition).arg(image)
    }

    /// `fastboot flashing unlock`
    ///
    /// Older bootloaders only understand `fastboot oem unlock`; that variant
    /// is not offered.
    pub fn unlock(&self) -> Invocation {
        self.base().args(["flashing", "unlock"])
    }
}
