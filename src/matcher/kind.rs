// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::sync::Arc;

use anyhow::Result;

use super::glob::Glob;
use super::Matcher;
use crate::resolver::Resolver;
use crate::resources::Resource;

/// Matches resources by kind, which might be the kind verbatim, a glob, or
/// a registered kind alias. Comparison is case-insensitive.
///
/// For example, a resource of kind `Service` is matched by the inputs
/// `Service`, `svc`, or `sv*`.
pub struct KindMatcher {
    glob: Glob,
    resolver: Arc<Resolver>,
}

impl KindMatcher {
    pub fn new(kind: &str, resolver: Arc<Resolver>) -> Result<Self> {
        Ok(Self {
            glob: Glob::compile(&kind.to_lowercase())?,
            resolver,
        })
    }
}

impl Matcher for KindMatcher {
    fn matches(&self, item: &Resource) -> bool {
        // Initially, try to match the kind itself.
        if self.glob.matches(&item.kind().to_lowercase()) {
            return true;
        }

        // Otherwise try to match any registered alias for the kind.
        if let Some(metadata) = self.resolver.lookup_kind(item.kind()) {
            return metadata
                .aliases
                .iter()
                .any(|alias| self.glob.matches(alias));
        }

        false
    }
}
