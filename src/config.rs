// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration loading for k8filter
//!
//! The configuration file declares the kind metadata table consumed by the
//! resolver. It lives at ~/.k8filter/configuration.yaml and is created from
//! a builtin default on first run. Loading must complete before any
//! registry-dependent matcher is constructed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::resolver::KindMetadata;

/// Expected header values; anything else is likely not our file.
const SUPPORTED_API_VERSION: &str = "k8filter.dev/v1beta1";
const SUPPORTED_KIND: &str = "Configuration";

/// Default configuration shipped inside the binary, written out on first
/// run.
const BUILTIN: &str = include_str!("files/configuration.yaml");

/// The contents of a k8filter configuration file.
#[derive(Debug)]
pub struct Configuration {
    pub resources: Vec<KindMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigurationFile {
    #[serde(rename = "apiVersion")]
    api_version: String,

    kind: String,

    #[serde(default)]
    resources: Vec<KindMetadata>,
}

/// The default configuration file path (~/.k8filter/configuration.yaml).
pub fn default_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".k8filter").join("configuration.yaml"))
        .context("Could not determine home directory")
}

/// Creates the named configuration file from the builtin default if it does
/// not exist, then loads it.
pub fn init_and_load(filename: &Path) -> Result<Configuration> {
    if !filename.exists() {
        if let Some(parent) = filename.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(filename, BUILTIN)
            .with_context(|| format!("Failed to write config file: {}", filename.display()))?;
    }

    load(filename)
}

/// Parses the named configuration file.
pub fn load(filename: &Path) -> Result<Configuration> {
    let body = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file: {}", filename.display()))?;

    parse(&body).with_context(|| format!("Failed to parse config file: {}", filename.display()))
}

/// The builtin configuration, usable without touching the filesystem.
pub fn builtin() -> Result<Configuration> {
    parse(BUILTIN)
}

fn parse(body: &str) -> Result<Configuration> {
    let file: ConfigurationFile = serde_yaml::from_str(body)?;

    if file.api_version != SUPPORTED_API_VERSION {
        bail!("unsupported apiVersion: {}", file.api_version);
    }
    if file.kind != SUPPORTED_KIND {
        bail!("unsupported kind: {}", file.kind);
    }

    Ok(Configuration {
        resources: file.resources,
    })
}
