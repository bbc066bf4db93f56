// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{bail, Result};
use serde_json::Value;

use super::glob::{split_selector, Glob};
use super::Matcher;
use crate::resources::Resource;

/// One step of a kustomize-style fieldpath.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    /// Descend into a map by key.
    Field(String),
    /// Descend into a list by position: `[0]`.
    Index(usize),
    /// Descend into a list by selecting the first element whose field
    /// matches: `[name=main]`.
    Select { key: String, value: String },
}

/// Matches resources that contain the given kustomize-style fieldpath, and
/// optionally a target value at that path.
///
/// Examples: `spec.replicas`, `.spec.containers.[name=main].image`,
/// `spec.containers[0].image=nginx*`.
pub struct FieldPathMatcher {
    steps: Vec<Step>,
    value_glob: Option<Glob>,
}

impl FieldPathMatcher {
    pub fn new(selector: &str) -> Result<Self> {
        let (path, value) = split_selector(selector);

        Ok(Self {
            steps: parse_steps(path)?,
            // No target value given means we only check for the existence
            // of the fieldpath.
            value_glob: match value {
                "" => None,
                value => Some(Glob::compile(value)?),
            },
        })
    }

    fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.steps.iter().try_fold(root, |current, step| match step {
            Step::Field(key) => current.as_object()?.get(key),
            Step::Index(index) => current.as_array()?.get(*index),
            Step::Select { key, value } => current.as_array()?.iter().find(|element| {
                element
                    .get(key)
                    .and_then(stringify)
                    .is_some_and(|text| text == *value)
            }),
        })
    }
}

impl Matcher for FieldPathMatcher {
    fn matches(&self, item: &Resource) -> bool {
        let Some(value) = self.resolve(item.content()) else {
            return false;
        };

        // Return the existence of the fieldpath, since value matching was
        // not requested.
        let Some(value_glob) = &self.value_glob else {
            return true;
        };

        // Only simple types are comparable; objects and lists never match.
        match stringify(value) {
            Some(text) => value_glob.matches(&text),
            None => false,
        }
    }
}

/// Stringifies a scalar for comparison. Null compares as the literal token
/// `null`; objects and lists have no comparable form.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Object(_) | Value::Array(_) => None,
    }
}

fn parse_steps(path: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        // A segment may carry trailing bracket steps: `containers[0]`.
        let (name, mut rest) = match segment.find('[') {
            Some(at) => (&segment[..at], &segment[at..]),
            None => (segment, ""),
        };

        if !name.is_empty() {
            steps.push(Step::Field(name.to_string()));
        }

        while !rest.is_empty() {
            let Some(end) = rest.find(']') else {
                bail!("invalid fieldpath {:?}: unterminated bracket", path);
            };

            steps.push(parse_bracket(path, &rest[1..end])?);
            rest = &rest[end + 1..];
        }
    }

    if steps.is_empty() {
        bail!("empty fieldpath matcher");
    }

    Ok(steps)
}

fn parse_bracket(path: &str, inner: &str) -> Result<Step> {
    if inner.chars().all(|c| c.is_ascii_digit()) && !inner.is_empty() {
        return Ok(Step::Index(inner.parse()?));
    }

    match inner.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(Step::Select {
            key: key.to_string(),
            value: value.to_string(),
        }),
        _ => bail!("invalid fieldpath {:?}: bad bracket segment [{}]", path, inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    #[test]
    fn test_existence() {
        let matcher = FieldPathMatcher::new("spec.replicas").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_value() {
        let matcher = FieldPathMatcher::new("spec.replicas=3").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);

        let matcher = FieldPathMatcher::new("spec.replicas=4").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_leading_dot_and_select() {
        let matcher =
            FieldPathMatcher::new(".spec.template.spec.containers.[name=nginx].image=nginx*")
                .unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);

        let matcher =
            FieldPathMatcher::new(".spec.template.spec.containers.[name=other].image").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_index() {
        let matcher = FieldPathMatcher::new("spec.containers[0].image=busybox*").unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_non_scalar_value_never_matches() {
        let matcher = FieldPathMatcher::new("spec=anything").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_invalid_paths_rejected() {
        assert!(FieldPathMatcher::new("").is_err());
        assert!(FieldPathMatcher::new("spec.containers[0").is_err());
        assert!(FieldPathMatcher::new("spec.containers.[=x]").is_err());
    }
}
