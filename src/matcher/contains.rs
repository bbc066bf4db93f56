// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use super::Matcher;
use crate::resources::Resource;

/// Matches resources that contain the given substring after being
/// re-marshalled back into yaml. This also applies to resources originally
/// decoded from json. The re-marshalled document no longer carries any of
/// the original comments or formatting.
pub struct ContainsMatcher {
    substring: String,
}

impl ContainsMatcher {
    pub fn new(substring: &str) -> Self {
        Self {
            substring: substring.to_string(),
        }
    }
}

impl Matcher for ContainsMatcher {
    fn matches(&self, item: &Resource) -> bool {
        match serde_yaml::to_string(item.content()) {
            Ok(body) => body.contains(&self.substring),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    #[test]
    fn test_contains_value() {
        let matcher = ContainsMatcher::new("nginx:1.14.2");
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_contains_key() {
        let matcher = ContainsMatcher::new("serviceAccountName");
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_contains_no_match() {
        let matcher = ContainsMatcher::new("not-anywhere");
        assert_matches(&matcher, &[]);
    }
}
