// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{bail, Result};

use super::glob::{split_selector, Glob};
use super::Matcher;
use crate::resources::Resource;

/// Matches resources that carry the given label, and optionally a matching
/// value for that label. The selector is a `key` or `key=value` pair where
/// both sides are globs.
pub struct LabelMatcher {
    key_glob: Glob,
    value_glob: Option<Glob>,
}

impl LabelMatcher {
    pub fn new(selector: &str) -> Result<Self> {
        let (key, value) = split_selector(selector);

        if key.is_empty() {
            bail!("empty label matcher");
        }

        Ok(Self {
            key_glob: Glob::compile(key)?,
            // No label value given means we only check for the existence of
            // a matching key.
            value_glob: match value {
                "" => None,
                value => Some(Glob::compile(value)?),
            },
        })
    }
}

impl Matcher for LabelMatcher {
    fn matches(&self, item: &Resource) -> bool {
        item.labels().any(|(key, value)| {
            self.key_glob.matches(key)
                && self
                    .value_glob
                    .as_ref()
                    .is_none_or(|glob| glob.matches(value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    #[test]
    fn test_key_existence() {
        let matcher = LabelMatcher::new("app").unwrap();
        assert_matches(&matcher, &["Service/my-service", "Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_key_and_value() {
        let matcher = LabelMatcher::new("app=myapp").unwrap();
        assert_matches(&matcher, &["Service/my-service"]);
    }

    #[test]
    fn test_value_glob() {
        let matcher = LabelMatcher::new("app=ngin*").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_key_glob() {
        let matcher = LabelMatcher::new("ro*=worker").unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_empty_selector_rejected() {
        assert!(LabelMatcher::new("").is_err());
        assert!(LabelMatcher::new("=value").is_err());
    }
}
