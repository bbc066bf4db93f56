// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt::Write;

use crate::resources::Resource;

/// Prints one `Kind/name` line per resource.
pub struct NameFormatter;

impl NameFormatter {
    pub fn format(items: &[Resource]) -> String {
        let mut rendered = String::new();
        for item in items {
            let _ = writeln!(rendered, "{}/{}", item.kind(), item.name());
        }

        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testutil::items;

    #[test]
    fn test_names() {
        assert_eq!(
            NameFormatter::format(&items()),
            "Service/my-service\nDeployment/nginx-deployment\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(NameFormatter::format(&[]), "");
    }
}
