// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Parsed JSONPath query representation

/// A parsed JSONPath query: the segments following the root `$`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) segments: Vec<Segment>,
}

impl Query {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

/// One step of a JSONPath query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Child access: `.key` or `['key']`.
    Child(String),
    /// Array index: `[0]`, `[-1]`.
    Index(i64),
    /// Array slice: `[start:end]` or `[start:end:step]`.
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// Wildcard: `[*]` or `.*`.
    Wildcard,
    /// Recursive descent to a key: `..key`.
    Descendants(String),
    /// Recursive descent wildcard: `..*`.
    AllDescendants,
    /// Filter over array elements: `[?expr]`.
    Filter(Filter),
}

/// A filter expression, evaluated per array element with `@` bound to the
/// element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Filter {
    Compare {
        left: Operand,
        op: Comparison,
        right: Operand,
    },
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
    /// Bare `@.field` existence check.
    Exists(Vec<String>),
}

/// Either side of a filter comparison.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    /// Field path relative to the current element, `@.a.b`.
    Path(Vec<String>),
    Literal(serde_json::Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}
