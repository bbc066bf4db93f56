// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Output rendering for filtered resources.

mod json;
mod name;
mod references;
mod table;
mod yaml;

pub use json::JsonFormatter;
pub use name::NameFormatter;
pub use references::ReferencesFormatter;
pub use table::TableFormatter;
pub use yaml::YamlFormatter;

use crate::cli::OutputFormat;
use crate::resolver::Resolver;
use crate::resources::Resource;

/// Renders the filtered resources in the requested format. The returned
/// string is ready to print, including a trailing newline when non-empty.
pub fn render(
    items: &[Resource],
    format: &OutputFormat,
    resolver: &Resolver,
    no_headers: bool,
) -> String {
    match format {
        OutputFormat::Table => TableFormatter::format(items, no_headers),
        OutputFormat::Name => NameFormatter::format(items),
        OutputFormat::Yaml => YamlFormatter::format(items),
        OutputFormat::Json => JsonFormatter::format(items),
        OutputFormat::References => ReferencesFormatter::format(items, resolver),
    }
}
