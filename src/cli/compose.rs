// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Composition of one aggregate matcher from command line flags.
//!
//! Every exclusion flag value is negated and added directly to the
//! top-level conjunction, so any exclusion match vetoes the whole resource.
//! Every inclusion flag wraps its values in one disjunction, so repeated
//! values for the same flag are ORed; the disjunctions then AND together
//! through the same top-level conjunction. A flag the user never passed
//! contributes nothing and does not constrain the result.

use std::sync::Arc;

use anyhow::Result;

use crate::matcher::{
    AllMatcher, AnnotationMatcher, AnyMatcher, ApiVersionMatcher, CelMatcher,
    ClusterScopedMatcher, ContainsMatcher, DiffMatcher, ExecMatcher, FieldPathMatcher,
    GitMatcher, JsonpathMatcher, KindMatcher, LabelMatcher, Matcher, NameMatcher,
    NamespaceMatcher, NamespaceScopedMatcher, NotMatcher, PatchMatcher, PathMatcher,
    ReferenceMatcher, RegoMatcher, SelectorMatcher,
};
use crate::resolver::Resolver;

use super::Args;

type Constructor<'a> = &'a dyn Fn(&str) -> Result<Box<dyn Matcher>>;

/// Builds the aggregate matcher for the given parsed arguments.
pub fn build_matcher(args: &Args, resolver: &Arc<Resolver>) -> Result<AllMatcher> {
    let mut chain = AllMatcher::new();

    let name: Constructor = &|v| Ok(Box::new(NameMatcher::new(v)?));
    let namespace: Constructor = &|v| Ok(Box::new(NamespaceMatcher::new(v)?));
    let kind: Constructor = &|v| Ok(Box::new(KindMatcher::new(v, Arc::clone(resolver))?));
    let apiversion: Constructor = &|v| Ok(Box::new(ApiVersionMatcher::new(v)?));
    let label: Constructor = &|v| Ok(Box::new(LabelMatcher::new(v)?));
    let annotation: Constructor = &|v| Ok(Box::new(AnnotationMatcher::new(v)?));
    let contains: Constructor = &|v| Ok(Box::new(ContainsMatcher::new(v)));
    let path: Constructor = &|v| Ok(Box::new(PathMatcher::new(v)));
    let fieldpath: Constructor = &|v| Ok(Box::new(FieldPathMatcher::new(v)?));
    let jsonpath: Constructor = &|v| Ok(Box::new(JsonpathMatcher::new(v)?));
    let selector: Constructor = &|v| Ok(Box::new(SelectorMatcher::new(v)?));
    let reference: Constructor = &|v| Ok(Box::new(ReferenceMatcher::new(v, Arc::clone(resolver))?));

    // Exclusions come first: if any of them match, the whole chain fails.
    let exclusions: [(&[String], Constructor); 12] = [
        (&args.not_name, name),
        (&args.not_namespace, namespace),
        (&args.not_kind, kind),
        (&args.not_apiversion, apiversion),
        (&args.not_label, label),
        (&args.not_annotation, annotation),
        (&args.not_contains, contains),
        (&args.not_path, path),
        (&args.not_fieldpath, fieldpath),
        (&args.not_jsonpath, jsonpath),
        (&args.not_selector, selector),
        (&args.not_reference, reference),
    ];
    for (values, construct) in exclusions {
        for value in values {
            chain.push(Box::new(NotMatcher::new(construct(value)?)));
        }
    }
    if args.not_patch {
        chain.push(Box::new(NotMatcher::new(Box::new(PatchMatcher::new()))));
    }

    // Inclusions second: values of one flag OR together, and at least one
    // per passed flag has to hold.
    let inclusions: [(&[String], Constructor); 12] = [
        (&args.name, name),
        (&args.namespace, namespace),
        (&args.kind, kind),
        (&args.apiversion, apiversion),
        (&args.label, label),
        (&args.annotation, annotation),
        (&args.contains, contains),
        (&args.path, path),
        (&args.fieldpath, fieldpath),
        (&args.jsonpath, jsonpath),
        (&args.selector, selector),
        (&args.reference, reference),
    ];
    for (values, construct) in inclusions {
        chain.push_opt(any_of(values, construct)?);
    }

    chain.push_opt(any_of(&args.cel, &|v| Ok(Box::new(CelMatcher::new(v)?)))?);
    chain.push_opt(any_of(&args.exec, &|v| Ok(Box::new(ExecMatcher::new(v)?)))?);
    chain.push_opt(any_of(&args.git, &|v| Ok(Box::new(GitMatcher::new(v)?)))?);

    if !args.rego.is_empty() {
        let mut any = AnyMatcher::new();
        for file in &args.rego {
            any.push(Box::new(RegoMatcher::new(file)?));
        }
        chain.push(Box::new(any));
    }
    if !args.diff.is_empty() {
        let mut any = AnyMatcher::new();
        for file in &args.diff {
            any.push(Box::new(DiffMatcher::new(file)?));
        }
        chain.push(Box::new(any));
    }

    if args.cluster_scoped {
        chain.push(Box::new(ClusterScopedMatcher::new(Arc::clone(resolver))));
    }
    if args.namespace_scoped {
        chain.push(Box::new(NamespaceScopedMatcher::new(Arc::clone(resolver))));
    }
    if args.patch {
        chain.push(Box::new(PatchMatcher::new()));
    }

    Ok(chain)
}

fn any_of(values: &[String], construct: Constructor) -> Result<Option<Box<dyn Matcher>>> {
    if values.is_empty() {
        return Ok(None);
    }

    let mut any = AnyMatcher::new();
    for value in values {
        any.push(construct(value)?);
    }

    Ok(Some(Box::new(any)))
}
