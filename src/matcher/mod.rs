// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Resource matchers
//!
//! A [`Matcher`] is a boolean predicate over one decoded [`Resource`]. Each
//! concrete matcher evaluates a single dimension of a resource (name,
//! namespace, labels, references, ...) and is built once from user input;
//! construction is where invalid input fails. Evaluation never fails: any
//! runtime problem (a process timeout, an expression error, an unresolvable
//! path) degrades to "no match" so that one odd manifest never aborts a
//! whole filtering run.
//!
//! Matchers compose through [`NotMatcher`], [`AllMatcher`] and
//! [`AnyMatcher`]; the combinator layer neither knows nor cares which leaf
//! matchers perform I/O.

mod annotations;
mod apiversion;
mod cel;
mod contains;
mod diff;
mod exec;
mod fieldpath;
mod git;
mod glob;
mod jsonpath;
mod kind;
mod labels;
mod logic;
mod name;
mod namespace;
mod path;
mod patch;
mod reference;
mod rego;
mod scoped;
mod selector;

pub use annotations::AnnotationMatcher;
pub use apiversion::ApiVersionMatcher;
pub use cel::CelMatcher;
pub use contains::ContainsMatcher;
pub use diff::DiffMatcher;
pub use exec::ExecMatcher;
pub use fieldpath::FieldPathMatcher;
pub use git::GitMatcher;
pub use jsonpath::JsonpathMatcher;
pub use kind::KindMatcher;
pub use labels::LabelMatcher;
pub use logic::{AllMatcher, AnyMatcher, NotMatcher};
pub use name::NameMatcher;
pub use namespace::NamespaceMatcher;
pub use path::PathMatcher;
pub use patch::PatchMatcher;
pub use reference::ReferenceMatcher;
pub use rego::RegoMatcher;
pub use scoped::{ClusterScopedMatcher, NamespaceScopedMatcher};
pub use selector::SelectorMatcher;

use crate::resources::Resource;

/// The logic for matching against the properties of a [`Resource`].
pub trait Matcher {
    /// Returns true if the given resource matches based on the logic and
    /// inputs of a concrete matcher.
    fn matches(&self, item: &Resource) -> bool;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn matches(&self, item: &Resource) -> bool {
        (**self).matches(item)
    }
}
