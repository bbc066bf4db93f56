// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Manifest document model
//!
//! A [`Resource`] is one decoded Kubernetes-style manifest held as a generic
//! JSON value tree, plus the file it was decoded from (when it came from a
//! file). Resources are created by the decode layer and never mutated
//! afterwards; matchers only read them.

mod decode;

pub use decode::{decode, directory, file, reader};

use serde_json::Value;

/// A single decoded manifest.
#[derive(Debug, Clone)]
pub struct Resource {
    /// The decoded object contents.
    content: Value,

    /// File the resource was decoded from. Only set when the resource came
    /// from a file, as opposed to stdin or an in-memory reader.
    filename: Option<String>,
}

impl Resource {
    pub fn new(content: Value) -> Self {
        Self {
            content,
            filename: None,
        }
    }

    pub fn with_filename(content: Value, filename: impl Into<String>) -> Self {
        Self {
            content,
            filename: Some(filename.into()),
        }
    }

    /// The raw object tree.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// File this resource was decoded from, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn api_version(&self) -> &str {
        self.content
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.content
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.metadata_str("name")
    }

    /// Namespace, or the empty string when the manifest does not set one.
    pub fn namespace(&self) -> &str {
        self.metadata_str("namespace")
    }

    /// Iterates over `metadata.labels` entries with string values.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata_map("labels")
    }

    /// Iterates over `metadata.annotations` entries with string values.
    pub fn annotations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata_map("annotations")
    }

    /// Identity tuple used for diffing and lookup: apiVersion, kind,
    /// namespace, name.
    pub fn identity(&self) -> (&str, &str, &str, &str) {
        (
            self.api_version(),
            self.kind(),
            self.namespace(),
            self.name(),
        )
    }

    fn metadata_str(&self, key: &str) -> &str {
        self.content
            .get("metadata")
            .and_then(|metadata| metadata.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn metadata_map(&self, key: &str) -> impl Iterator<Item = (&str, &str)> {
        self.content
            .get("metadata")
            .and_then(|metadata| metadata.get(key))
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let item = Resource::new(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {
                "name": "my-service",
                "namespace": "custom-app",
                "labels": {"app": "myapp"},
            },
        }));

        assert_eq!(item.api_version(), "v1");
        assert_eq!(item.kind(), "Service");
        assert_eq!(item.name(), "my-service");
        assert_eq!(item.namespace(), "custom-app");
        assert_eq!(item.labels().collect::<Vec<_>>(), vec![("app", "myapp")]);
        assert_eq!(item.annotations().count(), 0);
        assert_eq!(item.filename(), None);
    }

    #[test]
    fn test_missing_metadata() {
        let item = Resource::new(json!({"apiVersion": "v1", "kind": "Pod"}));

        assert_eq!(item.name(), "");
        assert_eq!(item.namespace(), "");
        assert_eq!(item.labels().count(), 0);
    }

    #[test]
    fn test_identity() {
        let item = Resource::new(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "nginx-deployment"},
        }));

        assert_eq!(
            item.identity(),
            ("apps/v1", "Deployment", "", "nginx-deployment")
        );
    }

    #[test]
    fn test_non_string_label_values_skipped() {
        let item = Resource::new(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {
                "name": "test-pod",
                "labels": {"app": "myapp", "replicas": 3},
            },
        }));

        assert_eq!(item.labels().collect::<Vec<_>>(), vec![("app", "myapp")]);
    }
}
