// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! JSONPath query engine (RFC 9535 subset)
//!
//! Supports:
//! - `$.spec.replicas` — direct child access
//! - `$['spec']['replicas']` — bracket-quoted child access
//! - `$.spec.containers[0]` — array index, `[-1]` counts from the end
//! - `$.spec.containers[0:2]` — array slice
//! - `$.spec.containers[*]` — wildcard (all elements / all values)
//! - `$..image` — recursive descent
//! - `$.spec.containers[?@.name == "main"]` — filter expressions
//!
//! Queries are parsed once and evaluated against `serde_json::Value` trees,
//! returning every matched value.

mod ast;
mod eval;
mod parser;

pub use ast::Query;
pub use eval::evaluate;
pub use parser::parse;
