// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use super::Matcher;
use crate::resources::Resource;

/// Hard wall-clock limit for one external evaluation.
const EXEC_TIMEOUT: Duration = Duration::from_secs(2);

/// How often a running child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Matches resources based on the exit status of an external program.
///
/// The command string is tokenized shell-style once at construction. Per
/// evaluation the resource is serialized to a single line of json on the
/// program's stdin (scripts can consume it with a single `read` call), and
/// the program matches the resource only by exiting with status zero.
/// Timeouts, spawn failures and non-zero exits all prevent matching.
pub struct ExecMatcher {
    program: String,
    arguments: Vec<String>,
}

impl ExecMatcher {
    pub fn new(command: &str) -> Result<Self> {
        let Some(tokens) = shlex::split(command) else {
            bail!("invalid command {:?}", command);
        };

        let Some((program, arguments)) = tokens.split_first() else {
            bail!("empty command");
        };

        Ok(Self {
            program: program.clone(),
            arguments: arguments.to_vec(),
        })
    }
}

impl Matcher for ExecMatcher {
    fn matches(&self, item: &Resource) -> bool {
        let Ok(input) = serde_json::to_string(item.content()) else {
            return false;
        };

        // Several helpful environment variable values are configured into
        // the executed process, usable for e.g. short-circuiting without
        // parsing the input json.
        let command = duct::cmd(self.program.as_str(), &self.arguments)
            .stdin_bytes(input.into_bytes())
            .env("RESOURCE_APIVERSION", item.api_version())
            .env("RESOURCE_KIND", item.kind())
            .env("RESOURCE_NAME", item.name())
            .env("RESOURCE_NAMESPACE", item.namespace())
            .stdout_null()
            .stderr_null()
            .unchecked();

        let Ok(handle) = command.start() else {
            return false;
        };

        let started = Instant::now();
        loop {
            match handle.try_wait() {
                Ok(Some(output)) => return output.status.success(),
                Ok(None) if started.elapsed() < EXEC_TIMEOUT => {
                    std::thread::sleep(POLL_INTERVAL);
                }
                // Timed out or unwaitable; make sure the child is gone
                // either way so no orphan is left behind.
                Ok(None) | Err(_) => {
                    if let Err(err) = handle.kill() {
                        tracing::warn!(program = %self.program, error = %err, "failed to kill timed out child");
                    }
                    return false;
                }
            }
        }
    }
}
