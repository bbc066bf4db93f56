// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt::Write;

use crate::references;
use crate::resolver::Resolver;
use crate::resources::Resource;

/// Prints every named reference each surviving resource makes, one
/// `Kind/name -> TargetKind/target-name` line per reference.
pub struct ReferencesFormatter;

impl ReferencesFormatter {
    pub fn format(items: &[Resource], resolver: &Resolver) -> String {
        let mut rendered = String::new();

        for item in items {
            references::all(item, resolver, &mut |kind, name| {
                let _ = writeln!(
                    rendered,
                    "{}/{} -> {}/{}",
                    item.kind(),
                    item.name(),
                    kind,
                    name
                );
            });
        }

        rendered
    }
}
