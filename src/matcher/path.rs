// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use super::Matcher;
use crate::resources::Resource;

/// Matches resources by file path substring.
///
/// For example, a resource decoded from the file
/// `kustomize/environments/production/deployment.yaml` is matched by the
/// input `environments/production` or `deployment.yaml`. A resource that
/// was not decoded from a file never matches.
pub struct PathMatcher {
    path: String,
}

impl PathMatcher {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, item: &Resource) -> bool {
        match item.filename() {
            Some(filename) => filename.contains(&self.path),
            None => false,
        }
    }
}
