// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{bail, Result};

use super::glob::{split_selector, Glob};
use super::Matcher;
use crate::resources::Resource;

/// Matches resources that carry the given annotation, and optionally a
/// matching value for that annotation. The selector is a `key` or
/// `key=value` pair where both sides are globs.
pub struct AnnotationMatcher {
    key_glob: Glob,
    value_glob: Option<Glob>,
}

impl AnnotationMatcher {
    pub fn new(selector: &str) -> Result<Self> {
        let (key, value) = split_selector(selector);

        if key.is_empty() {
            bail!("empty annotation matcher");
        }

        Ok(Self {
            key_glob: Glob::compile(key)?,
            // No annotation value given means we only check for the
            // existence of a matching key.
            value_glob: match value {
                "" => None,
                value => Some(Glob::compile(value)?),
            },
        })
    }
}

impl Matcher for AnnotationMatcher {
    fn matches(&self, item: &Resource) -> bool {
        item.annotations().any(|(key, value)| {
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
        let matcher = AnnotationMatcher::new("team").unwrap();
        assert_matches(&matcher, &["ConfigMap/my-configmap"]);
    }

    #[test]
    fn test_key_and_value() {
        let matcher = AnnotationMatcher::new("team=platform").unwrap();
        assert_matches(&matcher, &["ConfigMap/my-configmap"]);

        let matcher = AnnotationMatcher::new("team=other").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_key_with_slash() {
        let matcher = AnnotationMatcher::new("checksum/config").unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_empty_selector_rejected() {
        assert!(AnnotationMatcher::new("").is_err());
    }
}
