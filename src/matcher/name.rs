// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::Result;

use super::glob::Glob;
use super::Matcher;
use crate::resources::Resource;

/// Matches resources by name glob, with the hyphen prefix/suffix wildcard
/// convenience.
pub struct NameMatcher {
    glob: Glob,
}

impl NameMatcher {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            glob: Glob::compile_with_hyphen_wildcards(name)?,
        })
    }
}

impl Matcher for NameMatcher {
    fn matches(&self, item: &Resource) -> bool {
        self.glob.matches(item.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    #[test]
    fn test_exact_name() {
        let matcher = NameMatcher::new("my-service").unwrap();
        assert_matches(&matcher, &["Service/my-service"]);
    }

    #[test]
    fn test_glob() {
        let matcher = NameMatcher::new("my*").unwrap();
        assert_matches(&matcher, &["Service/my-service", "ConfigMap/my-configmap"]);
    }

    #[test]
    fn test_implicit_suffix_wildcard() {
        let matcher = NameMatcher::new("nginx-").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_implicit_prefix_wildcard() {
        let matcher = NameMatcher::new("-deployment").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_no_match() {
        let matcher = NameMatcher::new("other").unwrap();
        assert_matches(&matcher, &[]);
    }
}
