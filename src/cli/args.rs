// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Default)]
#[command(name = "k8filter")]
#[command(author, version, about = "Filter collections of Kubernetes manifests")]
pub struct Args {
    /// Manifest source: a file, a directory tree, or "-" for stdin
    #[arg(value_name = "PATH", default_value = "-")]
    pub source: String,

    /// Include resources whose name matches the glob
    #[arg(long, value_name = "PATTERN")]
    pub name: Vec<String>,

    /// Exclude resources whose name matches the glob
    #[arg(long, value_name = "PATTERN")]
    pub not_name: Vec<String>,

    /// Include resources whose namespace matches the glob
    #[arg(long, value_name = "PATTERN")]
    pub namespace: Vec<String>,

    /// Exclude resources whose namespace matches the glob
    #[arg(long, value_name = "PATTERN")]
    pub not_namespace: Vec<String>,

    /// Include resources by kind, kind glob, or kind alias
    #[arg(long, value_name = "KIND")]
    pub kind: Vec<String>,

    /// Exclude resources by kind, kind glob, or kind alias
    #[arg(long, value_name = "KIND")]
    pub not_kind: Vec<String>,

    /// Include resources whose apiVersion matches the glob
    #[arg(long, value_name = "PATTERN")]
    pub apiversion: Vec<String>,

    /// Exclude resources whose apiVersion matches the glob
    #[arg(long, value_name = "PATTERN")]
    pub not_apiversion: Vec<String>,

    /// Include resources carrying the label (key or key=value globs)
    #[arg(long, value_name = "SELECTOR")]
    pub label: Vec<String>,

    /// Exclude resources carrying the label (key or key=value globs)
    #[arg(long, value_name = "SELECTOR")]
    pub not_label: Vec<String>,

    /// Include resources carrying the annotation (key or key=value globs)
    #[arg(long, value_name = "SELECTOR")]
    pub annotation: Vec<String>,

    /// Exclude resources carrying the annotation (key or key=value globs)
    #[arg(long, value_name = "SELECTOR")]
    pub not_annotation: Vec<String>,

    /// Include resources whose yaml form contains the substring
    #[arg(long, value_name = "SUBSTRING")]
    pub contains: Vec<String>,

    /// Exclude resources whose yaml form contains the substring
    #[arg(long, value_name = "SUBSTRING")]
    pub not_contains: Vec<String>,

    /// Include resources decoded from files whose path contains the substring
    #[arg(long, value_name = "SUBSTRING")]
    pub path: Vec<String>,

    /// Exclude resources decoded from files whose path contains the substring
    #[arg(long, value_name = "SUBSTRING")]
    pub not_path: Vec<String>,

    /// Include resources containing the fieldpath (optionally =value glob)
    #[arg(long, value_name = "FIELDPATH")]
    pub fieldpath: Vec<String>,

    /// Exclude resources containing the fieldpath (optionally =value glob)
    #[arg(long, value_name = "FIELDPATH")]
    pub not_fieldpath: Vec<String>,

    /// Include resources containing the jsonpath (optionally =value glob)
    #[arg(long, value_name = "JSONPATH")]
    pub jsonpath: Vec<String>,

    /// Exclude resources containing the jsonpath (optionally =value glob)
    #[arg(long, value_name = "JSONPATH")]
    pub not_jsonpath: Vec<String>,

    /// Include resources matching the Kubernetes label selector
    #[arg(long, value_name = "SELECTOR")]
    pub selector: Vec<String>,

    /// Exclude resources matching the Kubernetes label selector
    #[arg(long, value_name = "SELECTOR")]
    pub not_selector: Vec<String>,

    /// Include resources referencing the named resource ([kind/]name glob)
    #[arg(long, value_name = "REFERENCE")]
    pub reference: Vec<String>,

    /// Exclude resources referencing the named resource ([kind/]name glob)
    #[arg(long, value_name = "REFERENCE")]
    pub not_reference: Vec<String>,

    /// Include resources for which the boolean CEL expression holds
    #[arg(long, value_name = "EXPRESSION")]
    pub cel: Vec<String>,

    /// Include resources matched by the rego policy file
    #[arg(long, value_name = "FILE")]
    pub rego: Vec<PathBuf>,

    /// Include resources for which the command exits with status zero
    #[arg(long, value_name = "COMMAND")]
    pub exec: Vec<String>,

    /// Include resources whose file has the git status class
    /// (added/modified/unmodified/untracked)
    #[arg(long, value_name = "CLASS")]
    pub git: Vec<String>,

    /// Include resources that differ from the baseline manifests in the file
    #[arg(long, value_name = "FILE")]
    pub diff: Vec<PathBuf>,

    /// Include only cluster-scoped resources
    #[arg(long)]
    pub cluster_scoped: bool,

    /// Include only namespace-scoped resources
    #[arg(long)]
    pub namespace_scoped: bool,

    /// Include only resources decoded from .patch.yaml files
    #[arg(long)]
    pub patch: bool,

    /// Exclude resources decoded from .patch.yaml files
    #[arg(long)]
    pub not_patch: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Omit column headers in table output
    #[arg(long)]
    pub no_headers: bool,

    /// Configuration file (defaults to ~/.k8filter/configuration.yaml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Name,
    Yaml,
    Json,
    References,
}
