// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Kind metadata registry
//!
//! Maps a kind to its metadata: short aliases, whether the kind is
//! namespaced, and where inside its manifests named references to other
//! kinds appear. The registry is built once from configuration before any
//! matcher that consults it is constructed, and is read-only afterwards;
//! it is shared by reference (`Arc`) rather than held in ambient global
//! state so that construction order stays explicit and tests can use
//! isolated registries.

use serde::{Deserialize, Serialize};

/// Declares where, within manifests of one kind, named references to a
/// target kind may appear.
///
/// Each path is a `/`-separated sequence of map keys (`\` escapes a literal
/// separator). When traversal meets a list, every element is tried with the
/// same remaining path; see [`crate::references::walk`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSpec {
    /// Kind being referenced, e.g. `ConfigMap`.
    pub kind: String,

    /// Path patterns locating the referenced names.
    pub paths: Vec<String>,
}

/// Metadata definition for a single kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindMetadata {
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    pub kind: String,

    /// Short names accepted in place of the kind, compared
    /// case-insensitively. Stored lowercase by convention.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Whether manifests of this kind live inside a namespace.
    #[serde(default)]
    pub namespaced: bool,

    /// Where manifests of this kind reference other kinds by name.
    #[serde(default)]
    pub references: Vec<ReferenceSpec>,
}

/// Read-only collection of [`KindMetadata`] definitions.
#[derive(Debug, Default)]
pub struct Resolver {
    kinds: Vec<KindMetadata>,
}

impl Resolver {
    pub fn new(kinds: Vec<KindMetadata>) -> Self {
        Self { kinds }
    }

    /// Looks up metadata by exact kind, e.g. `Service`. Meant to be used
    /// with a kind taken directly from an actual manifest. An unregistered
    /// kind yields `None`, never an error; callers treat that as
    /// undecidable.
    pub fn lookup_kind(&self, kind: &str) -> Option<&KindMetadata> {
        self.kinds.iter().find(|metadata| metadata.kind == kind)
    }

    /// Looks up metadata by alias, e.g. `po` for `Pod`. Compared
    /// case-insensitively. Returns every kind sharing the alias, since
    /// aliases are allowed to overlap.
    pub fn lookup_alias(&self, alias: &str) -> Vec<&KindMetadata> {
        let alias = alias.to_lowercase();

        self.kinds
            .iter()
            .filter(|metadata| {
                metadata
                    .aliases
                    .iter()
                    .any(|candidate| candidate.to_lowercase() == alias)
            })
            .collect()
    }
}
