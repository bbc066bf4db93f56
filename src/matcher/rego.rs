// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::path::Path;

use anyhow::{Context, Result};

use super::Matcher;
use crate::resources::Resource;

/// The rule evaluated against each resource. Policy files must declare
/// `package k8filter` and provide a `matched` rule in order to match.
const MATCHED_RULE: &str = "data.k8filter.matched";

/// Matches resources based on an evaluation of the given rego policy file.
///
/// A minimal policy matching every Service:
///
/// ```rego
/// package k8filter
///
/// default matched = false
///
/// matched { input.kind == "Service" }
/// ```
pub struct RegoMatcher {
    engine: regorus::Engine,
}

impl RegoMatcher {
    pub fn new(filename: &Path) -> Result<Self> {
        let policy = std::fs::read_to_string(filename)
            .with_context(|| format!("Failed to read policy file: {}", filename.display()))?;

        let mut engine = regorus::Engine::new();
        engine
            .add_policy(filename.display().to_string(), policy)
            .with_context(|| format!("Failed to compile policy file: {}", filename.display()))?;

        Ok(Self { engine })
    }
}

impl Matcher for RegoMatcher {
    fn matches(&self, item: &Resource) -> bool {
        let Ok(input) = serde_json::to_string(item.content()) else {
            return false;
        };
        let Ok(input) = regorus::Value::from_json_str(&input) else {
            return false;
        };

        // The engine mutates during evaluation, so evaluate on a clone and
        // keep the compiled matcher itself immutable.
        let mut engine = self.engine.clone();
        engine.set_input(input);

        match engine.eval_query(MATCHED_RULE.to_string(), false) {
            Ok(results) => results
                .result
                .iter()
                .flat_map(|result| result.expressions.iter())
                .any(|expression| expression.value == regorus::Value::Bool(true)),
            Err(_) => false,
        }
    }
}
