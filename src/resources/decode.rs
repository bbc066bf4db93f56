// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Manifest decoding
//!
//! Decodes [`Resource`] values from a number of different sources, in a
//! number of different shapes:
//! - a single object in yaml or json format (`kubectl get` for one resource)
//! - a `v1.List` wrapper containing multiple objects (`kubectl get` for many)
//! - a stream of yaml documents (`kustomize build` output)
//! - a directory tree of yaml files
//!
//! Decoded resources are handed to a push-style callback one at a time; no
//! ordering beyond input order is guaranteed, and callers treat every
//! resource independently.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use super::Resource;

/// Decodes resources from the given generic source and passes each one to
/// `handler`. The strings `""` and `"-"` read from stdin; otherwise the
/// source is treated as a directory or file path.
pub fn decode(source: &str, handler: &mut dyn FnMut(Resource)) -> Result<()> {
    match source {
        "" | "-" => reader(std::io::stdin().lock(), handler),
        path => {
            let metadata = fs::metadata(path)
                .with_context(|| format!("Failed to read manifest source: {}", path))?;

            if metadata.is_dir() {
                directory(Path::new(path), handler)
            } else {
                file(Path::new(path), handler)
            }
        }
    }
}

/// Decodes resources from yaml files discovered while walking the given
/// directory.
///
/// Behavior notes:
/// - Any directories named `.git` or `node_modules` are skipped entirely.
/// - Any files not ending with `.yaml` are skipped.
/// - Per-file decoding errors are ignored. Walking an arbitrary tree
///   commonly encounters yaml that is not a manifest (Helm templates for
///   example), and that must not interrupt the walk.
pub fn directory(directory: &Path, handler: &mut dyn FnMut(Resource)) -> Result<()> {
    let walker = WalkDir::new(directory).into_iter().filter_entry(|entry| {
        !entry.file_type().is_dir()
            || !matches!(entry.file_name().to_str(), Some(".git" | "node_modules"))
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", directory.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(".yaml") {
            continue;
        }

        if let Err(err) = file(entry.path(), handler) {
            tracing::debug!(file = %entry.path().display(), error = %err, "skipping undecodable file");
        }
    }

    Ok(())
}

/// Decodes resources from the given file, recording the filename on each
/// decoded resource.
pub fn file(filename: &Path, handler: &mut dyn FnMut(Resource)) -> Result<()> {
    let body = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read file: {}", filename.display()))?;

    decode_str(&body, &mut |item| {
        handler(Resource::with_filename(
            item.content,
            filename.display().to_string(),
        ));
    })
    .with_context(|| format!("Failed to decode file: {}", filename.display()))
}

/// Decodes resources from the given reader.
pub fn reader(mut reader: impl Read, handler: &mut dyn FnMut(Resource)) -> Result<()> {
    let mut body = String::new();
    reader
        .read_to_string(&mut body)
        .context("Failed to read manifest stream")?;

    decode_str(&body, handler)
}

fn decode_str(body: &str, handler: &mut dyn FnMut(Resource)) -> Result<()> {
    for document in serde_yaml::Deserializer::from_str(body) {
        let value =
            Value::deserialize(document).context("Failed to decode manifest document")?;
        emit(value, handler);
    }

    Ok(())
}

/// Unwraps one decoded document into zero or more resources.
///
/// Objects missing an apiVersion or kind are not manifests and are skipped.
/// `*List` wrapper objects are unwrapped into their items and never surface
/// as resources themselves. Any unit without a name is skipped; names are
/// commonly omitted from list wrappers but required on everything else.
fn emit(value: Value, handler: &mut dyn FnMut(Resource)) {
    let item = Resource::new(value);

    if item.api_version().is_empty() || item.kind().is_empty() {
        return;
    }

    let is_list = item.kind().ends_with("List") && item.content().get("items").is_some();
    if !is_list {
        if item.name().is_empty() {
            return;
        }

        handler(item);
        return;
    }

    let Some(Value::Array(items)) = item.content.get("items").cloned() else {
        return;
    };

    for entry in items {
        let item = Resource::new(entry);
        if item.name().is_empty() {
            continue;
        }

        handler(item);
    }
}
