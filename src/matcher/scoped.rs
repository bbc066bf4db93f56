// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::sync::Arc;

use super::Matcher;
use crate::resolver::Resolver;
use crate::resources::Resource;

/// Matches resources known (via the registry) to be cluster-scoped.
///
/// A resource with an explicit namespace is decisively namespace-scoped and
/// never matches, whatever the registry says. As a caveat, a resource of an
/// unregistered kind never matches either, even if it is cluster-scoped in
/// reality; with no concrete conclusion the resource is rejected.
pub struct ClusterScopedMatcher {
    resolver: Arc<Resolver>,
}

impl ClusterScopedMatcher {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }
}

impl Matcher for ClusterScopedMatcher {
    fn matches(&self, item: &Resource) -> bool {
        if !item.namespace().is_empty() {
            // An explicit namespace means this resource cannot be global.
            return false;
        }

        match self.resolver.lookup_kind(item.kind()) {
            // The registered namespaced value is authoritative.
            Some(metadata) => !metadata.namespaced,
            None => false,
        }
    }
}

/// Matches resources known (via the registry) to be namespace-scoped.
///
/// The same caveat applies: a resource of an unregistered kind without an
/// explicit namespace never matches.
pub struct NamespaceScopedMatcher {
    resolver: Arc<Resolver>,
}

impl NamespaceScopedMatcher {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }
}

impl Matcher for NamespaceScopedMatcher {
    fn matches(&self, item: &Resource) -> bool {
        if !item.namespace().is_empty() {
            // An explicit namespace means this resource must be namespaced.
            return true;
        }

        match self.resolver.lookup_kind(item.kind()) {
            // The registered namespaced value is authoritative.
            Some(metadata) => metadata.namespaced,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::{assert_matches, resolver};
    use serde_json::json;

    #[test]
    fn test_cluster_scoped() {
        let matcher = ClusterScopedMatcher::new(resolver());
        assert_matches(&matcher, &["ClusterRoleBinding/read-secrets-global"]);
    }

    #[test]
    fn test_namespace_scoped() {
        // The deployment sets no namespace but its kind is registered as
        // namespaced, which is authoritative.
        let matcher = NamespaceScopedMatcher::new(resolver());
        assert_matches(
            &matcher,
            &[
                "Service/my-service",
                "Deployment/nginx-deployment",
                "ConfigMap/my-configmap",
                "Pod/test-pod",
            ],
        );
    }

    #[test]
    fn test_explicit_namespace_is_decisive() {
        // Even a kind registered as cluster-scoped is treated as namespaced
        // when the manifest explicitly sets a namespace.
        let item = Resource::new(json!({
            "apiVersion": "rbac.authorization.k8s.io/v1",
            "kind": "ClusterRole",
            "metadata": {"name": "odd", "namespace": "default"},
        }));

        assert!(!ClusterScopedMatcher::new(resolver()).matches(&item));
        assert!(NamespaceScopedMatcher::new(resolver()).matches(&item));
    }

    #[test]
    fn test_unregistered_kind_matches_neither() {
        let item = Resource::new(json!({
            "apiVersion": "example.com/v1",
            "kind": "Widget",
            "metadata": {"name": "w"},
        }));

        assert!(!ClusterScopedMatcher::new(resolver()).matches(&item));
        assert!(!NamespaceScopedMatcher::new(resolver()).matches(&item));
    }
}
