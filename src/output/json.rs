// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use crate::resources::Resource;

/// Renders the surviving resources as one pretty-printed json array.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format(items: &[Resource]) -> String {
        let contents: Vec<_> = items.iter().map(Resource::content).collect();

        match serde_json::to_string_pretty(&contents) {
            Ok(body) => format!("{}\n", body),
            Err(_) => "[]\n".to_string(),
        }
    }
}
