// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use crate::resources::Resource;

/// Re-marshals the surviving resources as a yaml document stream. The
/// output carries none of the input's comments or formatting.
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn format(items: &[Resource]) -> String {
        let mut rendered = String::new();
        for item in items {
            let body = serde_yaml::to_string(item.content()).unwrap_or_else(|_| "{}\n".to_string());
            rendered.push_str("---\n");
            rendered.push_str(&body);
        }

        rendered
    }
}
