// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Cross-manifest reference resolution
//!
//! Searches a resource for named references to other resources, e.g. a Pod
//! referencing a named ConfigMap or a StatefulSet referencing a named
//! Service. Which positions inside a manifest hold such names is declared
//! per kind in the [`Resolver`](crate::resolver::Resolver); this module
//! combines those declarations with the path walker to answer questions
//! about them.

mod path;

pub use path::walk;

use crate::resolver::Resolver;
use crate::resources::Resource;

/// Searches the given resource for named references to the given kind,
/// passing each located name to `visit`. An empty `target_kind` considers
/// references to any kind. Returns true as soon as `visit` does; a resource
/// of an unregistered kind is undecidable and never matches.
pub fn references(
    item: &Resource,
    resolver: &Resolver,
    target_kind: &str,
    visit: &mut dyn FnMut(&str) -> bool,
) -> bool {
    let Some(metadata) = resolver.lookup_kind(item.kind()) else {
        return false;
    };

    for reference in &metadata.references {
        if !target_kind.is_empty() && target_kind != reference.kind {
            continue;
        }

        for pattern in &reference.paths {
            if walk(item.content(), pattern, visit) {
                return true;
            }
        }
    }

    false
}

/// Iterates over every named reference the given resource makes, passing
/// the target kind and name of each to `callback`.
pub fn all(item: &Resource, resolver: &Resolver, callback: &mut dyn FnMut(&str, &str)) {
    let Some(metadata) = resolver.lookup_kind(item.kind()) else {
        return;
    };

    for reference in &metadata.references {
        for pattern in &reference.paths {
            walk(item.content(), pattern, &mut |name| {
                callback(&reference.kind, name);
                false
            });
        }
    }
}
