// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::Result;

use super::glob::Glob;
use super::Matcher;
use crate::resources::Resource;

/// Matches resources by namespace glob, with the hyphen prefix/suffix
/// wildcard convenience.
pub struct NamespaceMatcher {
    glob: Glob,

    /// Whether an absent namespace matches. Only an explicit empty-string
    /// request does; a wildcard never matches a resource that set no
    /// namespace at all.
    empty_requested: bool,
}

impl NamespaceMatcher {
    pub fn new(namespace: &str) -> Result<Self> {
        Ok(Self {
            glob: Glob::compile_with_hyphen_wildcards(namespace)?,
            empty_requested: namespace.is_empty(),
        })
    }
}

impl Matcher for NamespaceMatcher {
    fn matches(&self, item: &Resource) -> bool {
        if item.namespace().is_empty() {
            return self.empty_requested;
        }

        self.glob.matches(item.namespace())
    }
}
