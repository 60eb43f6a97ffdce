//! Test doubles and proptest generators
//!
//! [`FakeRunner`] records every invocation instead of spawning it and answers
//! from a small rule table. [`ScriptedConfirmer`] replays canned answers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::cli::session::Session;
use crate::core::confirm::Confirmer;
use crate::core::invocation::Invocation;
use crate::core::settings::Settings;
use crate::error::CommandError;
use crate::infra::process::{ProcessRunner, RunMode, RunOutcome};
use crate::infra::tools::ToolPaths;

/// Canned reaction to an invocation containing `token`
struct Rule {
    token: String,
    reaction: Reaction,
}

enum Reaction {
    Exit { code: i32, output: String },
    SpawnError,
}

/// Recording [`ProcessRunner`]
///
/// Unmatched invocations exit with code 0 and no output.
#[derive(Default)]
pub struct FakeRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<(String, RunMode)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer invocations that have `token` as an argument
    #[must_use]
    pub fn respond(mut self, token: &str, code: i32, output: &str) -> Self {
        self.rules.push(Rule {
            token: token.to_string(),
            reaction: Reaction::Exit {
                code,
                output: output.to_string(),
            },
        });
        self
    }

    /// Fail to spawn invocations that have `token` as an argument
    #[must_use]
    pub fn fail_spawn(mut self, token: &str) -> Self {
        self.rules.push(Rule {
            token: token.to_string(),
            reaction: Reaction::SpawnError,
        });
        self
    }

    /// Rendered invocations in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(inv, _)| inv.clone())
            .collect()
    }

    /// Run modes in call order
    pub fn modes(&self) -> Vec<RunMode> {
        self.calls.lock().unwrap().iter().map(|(_, m)| *m).collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, invocation: &Invocation, mode: RunMode) -> Result<RunOutcome, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push((invocation.to_string(), mode));

        let args = invocation.arguments_lossy();
        let rule = self
            .rules
            .iter()
            .find(|r| args.iter().any(|a| *a == r.token));

        match rule.map(|r| &r.reaction) {
            Some(Reaction::Exit { code, output }) => Ok(RunOutcome {
                code: Some(*code),
                output: output.clone(),
            }),
            Some(Reaction::SpawnError) => Err(CommandError::Spawn {
                invocation: invocation.to_string(),
                error: "No such file or directory (os error 2)".to_string(),
            }),
            None => Ok(RunOutcome {
                code: Some(0),
                output: String::new(),
            }),
        }
    }
}

/// Shared handle, so a test can keep inspecting a runner it handed over
impl ProcessRunner for Arc<FakeRunner> {
    fn run(&self, invocation: &Invocation, mode: RunMode) -> Result<RunOutcome, CommandError> {
        self.as_ref().run(invocation, mode)
    }
}

/// [`Confirmer`] replaying a fixed list of answers
///
/// Runs out of answers as "no".
#[derive(Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

impl Confirmer for Arc<ScriptedConfirmer> {
    fn confirm(&self, prompt: &str) -> bool {
        self.as_ref().confirm(prompt)
    }
}

/// Session wired to fakes, with `adb` and `fastboot` both "found"
pub fn fake_session(runner: &Arc<FakeRunner>, confirmer: &Arc<ScriptedConfirmer>) -> Session {
    Session::new(
        Settings::default(),
        ToolPaths::new(Some("adb".into()), Some("fastboot".into())),
        Box::new(Arc::clone(runner)),
        Box::new(Arc::clone(confirmer)),
    )
}

pub mod generators {
    use proptest::prelude::*;

    /// Plausible partition names
    pub fn partition_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,15}"
    }

    /// Folder names as seen under `/sdcard`
    pub fn folder_name() -> impl Strategy<Value = String> {
        "[A-Za-z.][A-Za-z0-9_.-]{0,15}"
    }

    /// Model strings that never contain an accepted marker
    pub fn foreign_model() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ]{0,24}".prop_filter("must not look like an A2 Lite", |m| {
            let upper = m.to_uppercase();
            !upper.contains("A2 LITE") && !upper.contains("A2LITE")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fake_runner_matches_argument_tokens() {
        let runner = FakeRunner::new().respond("getprop", 0, "Redmi A2 Lite\n");
        let inv = Invocation::new("adb").args(["shell", "getprop", "ro.product.model"]);
        let out = runner.run(&inv, RunMode::Capture).unwrap();
        assert_eq!(out.output, "Redmi A2 Lite\n");

        let other = Invocation::new("adb").arg("devices");
        assert!(runner.run(&other, RunMode::Capture).unwrap().output.is_empty());
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_scripted_confirmer_defaults_to_no() {
        let confirmer = ScriptedConfirmer::new(&[true]);
        assert!(confirmer.confirm("first?"));
        assert!(!confirmer.confirm("second?"));
        assert_eq!(confirmer.prompts(), vec!["first?", "second?"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_partition_name_generator(name in partition_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
