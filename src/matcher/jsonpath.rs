// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{bail, Result};
use serde_json::Value;

use super::glob::{split_selector, Glob};
use super::Matcher;
use crate::jsonpath;
use crate::resources::Resource;

/// Matches resources that contain the given jsonpath, and optionally a
/// value at that path.
///
/// Examples: `$.spec.template.spec.containers[*].image=nginx*`,
/// `..serviceAccountName=app-sa`. The leading `$` may be omitted.
pub struct JsonpathMatcher {
    query: jsonpath::Query,
    value_glob: Option<Glob>,
}

impl JsonpathMatcher {
    pub fn new(selector: &str) -> Result<Self> {
        let (key, value) = split_selector(selector);

        if key.is_empty() {
            bail!("empty jsonpath matcher");
        }

        // Do not require that the user include a '$' prefix.
        let query = if key.starts_with('$') {
            jsonpath::parse(key)?
        } else {
            jsonpath::parse(&format!("${}", key))?
        };

        Ok(Self {
            query,
            // No value given means we only check that the jsonpath
            // resolves to something.
            value_glob: match value {
                "" => None,
                value => Some(Glob::compile(value)?),
            },
        })
    }
}

impl Matcher for JsonpathMatcher {
    fn matches(&self, item: &Resource) -> bool {
        let results = jsonpath::evaluate(&self.query, item.content());

        let Some(value_glob) = &self.value_glob else {
            // Existence check: the path must resolve to something that is
            // actually there, an explicit null does not count.
            return results.iter().any(|value| !value.is_null());
        };

        // Only simple types are comparable; any object or list results are
        // skipped. Null compares against the literal token "null".
        results.iter().any(|value| match value {
            Value::String(text) => value_glob.matches(text),
            Value::Number(number) => value_glob.matches(&number.to_string()),
            Value::Bool(flag) => value_glob.matches(&flag.to_string()),
            Value::Null => value_glob.matches("null"),
            Value::Object(_) | Value::Array(_) => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    #[test]
    fn test_existence() {
        let matcher = JsonpathMatcher::new("$.spec.serviceAccountName").unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_dollar_prefix_optional() {
        let matcher = JsonpathMatcher::new(".spec.serviceAccountName").unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_value_glob() {
        let matcher =
            JsonpathMatcher::new("$.spec.template.spec.containers[*].image=nginx*").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);

        let matcher =
            JsonpathMatcher::new("$.spec.template.spec.containers[*].image=httpd*").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_recursive_descent() {
        let matcher = JsonpathMatcher::new("$..secretKeyRef.name=example-secret").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_numeric_value_stringified() {
        let matcher = JsonpathMatcher::new("$.spec.replicas=3").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_filter_expression() {
        let matcher =
            JsonpathMatcher::new(r#"$.spec.containers[?@.name == "main"].image=busybox*"#)
                .unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_object_result_never_matches_value() {
        let matcher = JsonpathMatcher::new("$.metadata=anything").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(JsonpathMatcher::new("").is_err());
        assert!(JsonpathMatcher::new("$.spec[").is_err());
    }
}
