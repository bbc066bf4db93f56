// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Boolean combinators over matchers.

use super::Matcher;
use crate::resources::Resource;

/// Wraps a single matcher and inverts its value.
pub struct NotMatcher {
    matcher: Box<dyn Matcher>,
}

impl NotMatcher {
    pub fn new(matcher: Box<dyn Matcher>) -> Self {
        Self { matcher }
    }
}

impl Matcher for NotMatcher {
    fn matches(&self, item: &Resource) -> bool {
        !self.matcher.matches(item)
    }
}

/// Wraps a sequence of matchers and returns true if every one of them
/// returns true. Evaluation stops at the first non-match. An empty
/// `AllMatcher` returns true.
#[derive(Default)]
pub struct AllMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AllMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given matcher to the sequence of wrapped matchers.
    pub fn push(&mut self, matcher: Box<dyn Matcher>) {
        self.matchers.push(matcher);
    }

    /// Adds the given matcher if there is one. Absent matchers are no-ops
    /// so optional dimensions can be wired unconditionally by callers.
    pub fn push_opt(&mut self, matcher: Option<Box<dyn Matcher>>) {
        if let Some(matcher) = matcher {
            self.matchers.push(matcher);
        }
    }
}

impl Matcher for AllMatcher {
    fn matches(&self, item: &Resource) -> bool {
        self.matchers.iter().all(|matcher| matcher.matches(item))
    }
}

/// Wraps a sequence of matchers and returns true if any of them returns
/// true. Evaluation stops at the first match.
///
/// An empty `AnyMatcher` also returns true: each inclusion flag wraps its
/// values in one `AnyMatcher`, and a flag the user never passed must not
/// constrain the result.
#[derive(Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given matcher to the sequence of wrapped matchers.
    pub fn push(&mut self, matcher: Box<dyn Matcher>) {
        self.matchers.push(matcher);
    }

    /// Adds the given matcher if there is one. Absent matchers are no-ops.
    pub fn push_opt(&mut self, matcher: Option<Box<dyn Matcher>>) {
        if let Some(matcher) = matcher {
            self.matchers.push(matcher);
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, item: &Resource) -> bool {
        if self.matchers.is_empty() {
            return true;
        }

        self.matchers.iter().any(|matcher| matcher.matches(item))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::matcher::testutil::assert_matches;
    use crate::matcher::{ApiVersionMatcher, LabelMatcher, NameMatcher, NamespaceMatcher};

    /// Counts evaluations, so short-circuiting is observable.
    struct Counting {
        result: bool,
        hits: Rc<Cell<usize>>,
    }

    impl Counting {
        fn new(result: bool) -> (Box<dyn Matcher>, Rc<Cell<usize>>) {
            let hits = Rc::new(Cell::new(0));
            (
                Box::new(Self {
                    result,
                    hits: Rc::clone(&hits),
                }),
                hits,
            )
        }
    }

    impl Matcher for Counting {
        fn matches(&self, _item: &Resource) -> bool {
            self.hits.set(self.hits.get() + 1);
            self.result
        }
    }

    fn item() -> Resource {
        Resource::new(serde_json::json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "test-pod"},
        }))
    }

    #[test]
    fn test_not_matcher() {
        let matcher = NotMatcher::new(Box::new(ApiVersionMatcher::new("v1").unwrap()));

        assert_matches(
            &matcher,
            &["Deployment/nginx-deployment", "ClusterRoleBinding/read-secrets-global"],
        );
    }

    #[test]
    fn test_any_matcher() {
        let mut matcher = AnyMatcher::new();
        matcher.push(Box::new(NameMatcher::new("my-service").unwrap()));
        matcher.push(Box::new(NameMatcher::new("my-configmap").unwrap()));

        assert_matches(&matcher, &["Service/my-service", "ConfigMap/my-configmap"]);
    }

    #[test]
    fn test_any_matcher_partial() {
        let mut matcher = AnyMatcher::new();
        matcher.push(Box::new(NameMatcher::new("my-service").unwrap()));
        matcher.push(Box::new(NameMatcher::new("not-a-real-name").unwrap()));

        assert_matches(&matcher, &["Service/my-service"]);
    }

    #[test]
    fn test_any_matcher_empty_is_vacuously_true() {
        let matcher = AnyMatcher::new();
        assert!(matcher.matches(&item()));
    }

    #[test]
    fn test_all_matcher() {
        let mut matcher = AllMatcher::new();
        matcher.push(Box::new(NameMatcher::new("my-*").unwrap()));
        matcher.push(Box::new(LabelMatcher::new("app").unwrap()));

        assert_matches(&matcher, &["Service/my-service"]);
    }

    #[test]
    fn test_all_matcher_failed() {
        let mut matcher = AllMatcher::new();
        matcher.push(Box::new(NameMatcher::new("test-pod").unwrap()));
        matcher.push(Box::new(NamespaceMatcher::new("does-not-exist").unwrap()));

        assert_matches(&matcher, &[]);
    }

    #[test]
    fn test_all_matcher_empty_is_vacuously_true() {
        let matcher = AllMatcher::new();
        assert!(matcher.matches(&item()));
    }

    #[test]
    fn test_all_short_circuits() {
        let (falsy, falsy_hits) = Counting::new(false);
        let (truthy, truthy_hits) = Counting::new(true);

        let mut matcher = AllMatcher::new();
        matcher.push(falsy);
        matcher.push(truthy);

        assert!(!matcher.matches(&item()));
        assert_eq!(falsy_hits.get(), 1);
        assert_eq!(truthy_hits.get(), 0);
    }

    #[test]
    fn test_any_short_circuits() {
        let (truthy, truthy_hits) = Counting::new(true);
        let (never, never_hits) = Counting::new(true);

        let mut matcher = AnyMatcher::new();
        matcher.push(truthy);
        matcher.push(never);

        assert!(matcher.matches(&item()));
        assert_eq!(truthy_hits.get(), 1);
        assert_eq!(never_hits.get(), 0);
    }

    #[test]
    fn test_push_opt() {
        let mut matcher = AllMatcher::new();
        matcher.push_opt(None);
        assert!(matcher.matches(&item()));

        let mut matcher = AnyMatcher::new();
        matcher.push_opt(Some(Box::new(NameMatcher::new("test-pod").unwrap())));
        assert!(!matcher.is_empty());
        assert!(matcher.matches(&item()));
    }
}
