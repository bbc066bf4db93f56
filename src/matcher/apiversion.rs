// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::Result;

use super::glob::Glob;
use super::Matcher;
use crate::resources::Resource;

/// Matches resources by apiVersion glob.
pub struct ApiVersionMatcher {
    glob: Glob,
}

impl ApiVersionMatcher {
    pub fn new(api_version: &str) -> Result<Self> {
        Ok(Self {
            glob: Glob::compile(api_version)?,
        })
    }
}

impl Matcher for ApiVersionMatcher {
    fn matches(&self, item: &Resource) -> bool {
        self.glob.matches(item.api_version())
    }
}
