// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::path::Path;

use anyhow::{Context, Result};

use super::Matcher;
use crate::resources::{self, Resource};

/// Matches resources that differ from companion resources decoded from the
/// given baseline file.
///
/// An example usage would be to save the output of `kustomize build` to a
/// file, refactor the kustomize code, then rerun `kustomize build` through
/// this matcher to surface what actually changed. Counterparts are paired
/// by identity (apiVersion, kind, namespace, name); a resource with no
/// counterpart in the baseline has, by definition, differed.
pub struct DiffMatcher {
    originals: Vec<Resource>,
}

impl DiffMatcher {
    pub fn new(filename: &Path) -> Result<Self> {
        let mut originals = Vec::new();
        resources::file(filename, &mut |item| originals.push(item))
            .with_context(|| format!("Failed to decode baseline: {}", filename.display()))?;

        Ok(Self { originals })
    }
}

impl Matcher for DiffMatcher {
    fn matches(&self, item: &Resource) -> bool {
        for original in &self.originals {
            if item.identity() != original.identity() {
                continue;
            }

            // Deep equality against the counterpart decides the diff.
            return item.content() != original.content();
        }

        // No counterpart, so the resource has differed.
        true
    }
}
