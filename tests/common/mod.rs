//! Common test utilities and helpers
//!
//! Integration tests run the real `redmi-tool` binary against fake `adb` and
//! `fastboot` shell scripts. The fakes append every invocation to a log file
//! so tests can assert on what would have reached a device.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Fake `adb`: answers the queries the tool makes and logs its arguments
///
/// Runs with an empty `PATH`, so it only uses shell builtins and absolute
/// paths.
const FAKE_ADB: &str = r#"#!/bin/sh
echo "adb $*" >> "@LOG@"
case "$1" in
  version) echo "Android Debug Bridge version 1.0.41" ;;
  devices) printf 'List of devices attached\nFAKE123\tdevice\n' ;;
  shell)
    if [ "$2" = "getprop" ]; then
      case "$3" in
        ro.product.model) echo "${FAKE_MODEL:-Redmi A2 Lite}" ;;
        ro.build.version.release) echo "13" ;;
        ro.build.version.sdk) echo "33" ;;
        ro.serialno) echo "FAKE123" ;;
      esac
    elif [ "$2" = "ls" ]; then
      printf '%s\n' ${FAKE_LISTING:-DCIM Download Music}
    fi
    ;;
  pull)
    /bin/mkdir -p "$3/${2##*/}"
    echo "contenido" > "$3/${2##*/}/archivo.txt"
    ;;
  logcat) echo "I/Zygote: fake log line" ;;
esac
exit ${FAKE_ADB_EXIT:-0}
"#;

/// Fake `fastboot`
const FAKE_FASTBOOT: &str = r#"#!/bin/sh
echo "fastboot $*" >> "@LOG@"
case "$1" in
  --version) echo "fastboot version 35.0.1-11580240" ;;
  devices) printf 'FAKE123\tfastboot\n' ;;
esac
exit ${FAKE_FASTBOOT_EXIT:-0}
"#;

/// Isolated environment for one test
///
/// Holds a working directory, a private config directory and the fake tools.
pub struct TestEnv {
    /// Temporary root for everything the test touches
    pub dir: TempDir,
}

impl TestEnv {
    /// Create an environment with both fake tools installed
    pub fn new() -> Self {
        let env = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        std::fs::create_dir_all(env.work_dir()).expect("Failed to create work dir");
        std::fs::create_dir_all(env.config_dir()).expect("Failed to create config dir");
        std::fs::create_dir_all(env.bin_dir()).expect("Failed to create bin dir");
        env.install_tool("adb", FAKE_ADB);
        env.install_tool("fastboot", FAKE_FASTBOOT);
        env
    }

    /// Directory the binary runs in
    pub fn work_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn adb_path(&self) -> PathBuf {
        self.bin_dir().join("adb")
    }

    pub fn fastboot_path(&self) -> PathBuf {
        self.bin_dir().join("fastboot")
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("tools.log")
    }

    fn install_tool(&self, name: &str, script: &str) {
        let path = self.bin_dir().join(name);
        let script = script.replace("@LOG@", &self.log_path().display().to_string());
        std::fs::write(&path, script).expect("Failed to write fake tool");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make fake tool executable");
        }
    }

    /// Invocations received by the fake tools, one per line
    pub fn tool_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Create a file under the work directory
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.work_dir().join(name).exists()
    }

    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.work_dir().join(name)).expect("Failed to read file")
    }

    /// Command for the binary, isolated from the host's tools and config
    ///
    /// `PATH` is emptied so a host installation of the platform tools is
    /// never picked up.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_redmi-tool"));
        cmd.current_dir(self.work_dir())
            .args(args)
            .env("REDMI_TOOL_CONFIG_DIR", self.config_dir())
            .env("PATH", self.dir.path().join("empty-path"))
            .env_remove("RUST_LOG")
            .env_remove("REDMI_TOOL_ADB")
            .env_remove("REDMI_TOOL_FASTBOOT");
        cmd
    }

    /// Command with both fake tools passed through the environment
    pub fn command_with_tools(&self, args: &[&str]) -> Command {
        let mut cmd = self.command(args);
        cmd.env("REDMI_TOOL_ADB", self.adb_path())
            .env("REDMI_TOOL_FASTBOOT", self.fastboot_path());
        cmd
    }

    /// Run with the fake tools
    pub fn run(&self, args: &[&str]) -> Output {
        self.command_with_tools(args)
            .output()
            .expect("Failed to execute redmi-tool")
    }

    /// Run with the fake tools, typing `input` on stdin
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        run_with_input(self.command_with_tools(args), input)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn `cmd` with `input` on its stdin and wait for it
pub fn run_with_input(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn redmi-tool");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for redmi-tool")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Path as the binary prints it
pub fn shown(path: &Path) -> String {
    path.display().to_string()
}

/// Two-action manifest used across tests
pub const TWO_ACTION_MANIFEST: &str = r#"{
  "actions": [
    {"partition": "recovery", "image": "twrp.img"},
    {"partition": "boot", "image": "boot.img"}
  ]
}"#;
