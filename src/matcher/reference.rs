// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::sync::Arc;

use anyhow::Result;

use super::glob::Glob;
use super::Matcher;
use crate::references;
use crate::resolver::Resolver;
use crate::resources::Resource;

/// Matches resources that reference the given named resource.
///
/// A name glob like `my-secret-*` matches any reference to a resource with
/// that name; a `kind/name` selector like `cm/my-configmap-*` restricts the
/// match to references of that kind. The kind component resolves through
/// alias lookup, falling back to the literal string so an already-canonical
/// kind keeps working. The name component gets the same hyphen wildcard
/// convenience as the name matcher.
pub struct ReferenceMatcher {
    /// Canonical kinds to consider; empty means references to any kind.
    kinds: Vec<String>,
    name_glob: Glob,
    resolver: Arc<Resolver>,
}

impl ReferenceMatcher {
    pub fn new(reference: &str, resolver: Arc<Resolver>) -> Result<Self> {
        // Split a selector like "cm/my-configmap" or "my-configmap" into
        // the kind and name.
        let (kind, name) = match reference.split_once('/') {
            Some((kind, name)) => (kind, name),
            None => ("", reference),
        };

        let name_glob = Glob::compile_with_hyphen_wildcards(name)?;

        let mut kinds: Vec<String> = Vec::new();
        if !kind.is_empty() {
            kinds = resolver
                .lookup_alias(kind)
                .into_iter()
                .map(|metadata| metadata.kind.clone())
                .collect();

            // No alias resolved; assume the kind was given canonically.
            if kinds.is_empty() {
                kinds = vec![kind.to_string()];
            }
        }

        Ok(Self {
            kinds,
            name_glob,
            resolver,
        })
    }
}

impl Matcher for ReferenceMatcher {
    fn matches(&self, item: &Resource) -> bool {
        // References to any kind.
        if self.kinds.is_empty() {
            return references::references(item, &self.resolver, "", &mut |name| {
                self.name_glob.matches(name)
            });
        }

        // References to only the requested kind(s).
        self.kinds.iter().any(|kind| {
            references::references(item, &self.resolver, kind, &mut |name| {
                self.name_glob.matches(name)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::{assert_matches, resolver};

    #[test]
    fn test_reference_by_name() {
        let matcher = ReferenceMatcher::new("example-config", resolver()).unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_implicit_wildcard_suffix() {
        let matcher = ReferenceMatcher::new("example-", resolver()).unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment", "Pod/test-pod"]);
    }

    #[test]
    fn test_reference_kind() {
        let matcher = ReferenceMatcher::new("Secret/example-", resolver()).unwrap();
        assert_matches(&matcher, &["Deployment/nginx-deployment"]);
    }

    #[test]
    fn test_reference_kind_alias() {
        let matcher = ReferenceMatcher::new("cm/example-", resolver()).unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }

    #[test]
    fn test_reference_unknown_kind_taken_literally() {
        let matcher = ReferenceMatcher::new("Widget/example-", resolver()).unwrap();
        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_service_account_reference() {
        let matcher = ReferenceMatcher::new("sa/app-sa", resolver()).unwrap();
        assert_matches(&matcher, &["Pod/test-pod"]);
    }
}
