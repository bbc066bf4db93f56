// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use comfy_table::{presets::ASCII_BORDERS_ONLY_CONDENSED, Table};

use crate::resources::Resource;

pub struct TableFormatter;

impl TableFormatter {
    pub fn format(items: &[Resource], no_headers: bool) -> String {
        if items.is_empty() {
            return "(0 resources)\n".to_string();
        }

        let mut table = Table::new();
        table.load_preset(ASCII_BORDERS_ONLY_CONDENSED);

        if !no_headers {
            table.set_header(["KIND", "NAMESPACE", "NAME", "FILE"]);
        }

        for item in items {
            table.add_row([
                item.kind(),
                item.namespace(),
                item.name(),
                item.filename().unwrap_or_default(),
            ]);
        }

        format!("{}\n", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testutil::items;

    #[test]
    fn test_table() {
        let rendered = TableFormatter::format(&items(), false);

        assert!(rendered.contains("KIND"));
        assert!(rendered.contains("my-service"));
        assert!(rendered.contains("custom-app"));
        assert!(rendered.contains("testdata/service.yaml"));
    }

    #[test]
    fn test_no_headers() {
        let rendered = TableFormatter::format(&items(), true);

        assert!(!rendered.contains("KIND"));
        assert!(rendered.contains("nginx-deployment"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(TableFormatter::format(&[], false), "(0 resources)\n");
    }
}
