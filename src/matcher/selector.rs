// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{bail, Result};

use super::Matcher;
use crate::resources::Resource;

/// One parsed selector requirement.
#[derive(Debug, Clone, PartialEq)]
struct Requirement {
    key: String,
    operator: Operator,
    values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

/// Matches resources whose labels satisfy the given Kubernetes label
/// selector.
///
/// Supports equality requirements (`app=nginx`, `env!=prod`), set
/// requirements (`tier in (web, api)`, `release notin (canary)`), and
/// existence requirements (`app`, `!legacy`). Comma-joined requirements
/// must all hold.
pub struct SelectorMatcher {
    requirements: Vec<Requirement>,
}

impl SelectorMatcher {
    pub fn new(selector: &str) -> Result<Self> {
        let mut requirements = Vec::new();

        for part in split_requirements(selector) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            requirements.push(parse_requirement(part)?);
        }

        Ok(Self { requirements })
    }
}

impl Matcher for SelectorMatcher {
    fn matches(&self, item: &Resource) -> bool {
        self.requirements.iter().all(|requirement| {
            let value = item
                .labels()
                .find(|(key, _)| *key == requirement.key)
                .map(|(_, value)| value);

            match requirement.operator {
                Operator::Equals | Operator::In => {
                    value.is_some_and(|value| requirement.values.iter().any(|v| v == value))
                }
                // Absence also satisfies a negated requirement.
                Operator::NotEquals | Operator::NotIn => {
                    !value.is_some_and(|value| requirement.values.iter().any(|v| v == value))
                }
                Operator::Exists => value.is_some(),
                Operator::DoesNotExist => value.is_none(),
            }
        })
    }
}

/// Splits on commas outside of parentheses, since set requirement values
/// legitimately contain commas.
fn split_requirements(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (at, char) in selector.char_indices() {
        match char {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&selector[start..at]);
                start = at + 1;
            }
            _ => {}
        }
    }
    parts.push(&selector[start..]);

    parts
}

fn parse_requirement(part: &str) -> Result<Requirement> {
    // Set requirement: `key in (a, b)` / `key notin (a, b)`.
    if let Some(open) = part.find('(') {
        let Some(inner) = part[open..].strip_prefix('(').and_then(|rest| rest.strip_suffix(')'))
        else {
            bail!("invalid selector requirement {:?}", part);
        };

        let head: Vec<&str> = part[..open].split_whitespace().collect();
        let operator = match head.as_slice() {
            [_, "in"] => Operator::In,
            [_, "notin"] => Operator::NotIn,
            _ => bail!("invalid selector requirement {:?}", part),
        };

        let values: Vec<String> = inner
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();
        if values.is_empty() {
            bail!("invalid selector requirement {:?}: empty value set", part);
        }

        return Ok(Requirement {
            key: head[0].to_string(),
            operator,
            values,
        });
    }

    // Inequality: `key != value`.
    if let Some((key, value)) = part.split_once("!=") {
        return requirement(key, Operator::NotEquals, value);
    }

    // Equality: `key == value` or `key = value`.
    if let Some((key, value)) = part.split_once('=') {
        let value = value.strip_prefix('=').unwrap_or(value);
        return requirement(key, Operator::Equals, value);
    }

    // Negated existence: `!key`.
    if let Some(key) = part.strip_prefix('!') {
        return requirement(key, Operator::DoesNotExist, "");
    }

    // Bare existence: `key`.
    let key = part.trim();
    if key.split_whitespace().count() != 1 {
        bail!("invalid selector requirement {:?}", part);
    }

    Ok(Requirement {
        key: key.to_string(),
        operator: Operator::Exists,
        values: Vec::new(),
    })
}

fn requirement(key: &str, operator: Operator, value: &str) -> Result<Requirement> {
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        bail!("invalid selector key {:?}", key);
    }

    let values = match operator {
        Operator::Exists | Operator::DoesNotExist => Vec::new(),
        _ => vec![value.trim().to_string()],
    };

    Ok(Requirement {
        key: key.to_string(),
        operator,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    #[test]
    fn test_equality() {
        let matcher = SelectorMatcher::new("app=myapp").unwrap();
        assert_matches(&matcher, &["Service/my-service"]);

        let matcher = SelectorMatcher::new("app == nginx").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_inequality_includes_unlabeled() {
        // Everything except the service either lacks the label or has a
        // different value; both satisfy `!=`.
        let matcher = SelectorMatcher::new("app!=myapp").unwrap();
        assert_matches(
            &matcher,
            &[
                "Deployment/nginx-deployment",
                "ConfigMap/my-configmap",
                "Pod/test-pod",
                "ClusterRoleBinding/read-secrets-global",
            ],
        );
    }

    #[test]
    fn test_set_requirements() {
        let matcher = SelectorMatcher::new("app in (myapp, nginx)").unwrap();
        assert_matches(&matcher, &["Service/my-service", "Deployment/nginx-deployment"]);

        let matcher = SelectorMatcher::new("role notin (worker)").unwrap();
        assert_matches(
            &matcher,
            &[
                "Service/my-service",
                "Deployment/nginx-deployment",
                "ConfigMap/my-configmap",
                "ClusterRoleBinding/read-secrets-global",
            ],
        );
    }

    #[test]
    fn test_existence() {
        let matcher = SelectorMatcher::new("role").unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);

        let matcher = SelectorMatcher::new("!app").unwrap();
        assert_matches(
            &matcher,
            &[
                "ConfigMap/my-configmap",
                "Pod/test-pod",
                "ClusterRoleBinding/read-secrets-global",
            ],
        );
    }

    #[test]
    fn test_conjunction() {
        let matcher = SelectorMatcher::new("app=nginx,app").unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);

        let matcher = SelectorMatcher::new("app=nginx,role=worker").unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_invalid_selectors_rejected() {
        assert!(SelectorMatcher::new("=value").is_err());
        assert!(SelectorMatcher::new("key in ()").is_err());
        assert!(SelectorMatcher::new("key badop (a)").is_err());
        assert!(SelectorMatcher::new("two words").is_err());
    }
}
