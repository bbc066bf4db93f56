// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use super::Matcher;
use crate::resources::Resource;

/// Matches resources that were decoded from a kustomize patch file, the
/// convention being a filename with the `.patch.yaml` suffix.
///
/// For example, a resource decoded from the file
/// `kustomize/environments/production/deployment.patch.yaml` is matched.
pub struct PatchMatcher;

impl PatchMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PatchMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for PatchMatcher {
    fn matches(&self, item: &Resource) -> bool {
        item.filename()
            .is_some_and(|filename| filename.ends_with(".patch.yaml"))
    }
}
