// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Declarative path traversal over manifest value trees
//!
//! A path pattern is a `/`-separated sequence of map keys; a `\` escapes
//! the next character so that keys containing a literal `/` stay
//! expressible. Traversal descends through maps by exact key and fans out
//! over every element of a list *without* consuming a segment, so one
//! pattern covers both a single object and a list of objects at the same
//! position. Only string leaves reached with the whole pattern consumed
//! count as located values.

use serde_json::Value;

/// Splits a path pattern into segments around unescaped `/` characters. A
/// leading `/` is ignored.
fn split(pattern: &str) -> Vec<String> {
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for char in pattern.chars() {
        match char {
            _ if escaped => {
                current.push(char);
                escaped = false;
            }
            '\\' => escaped = true,
            '/' => segments.push(std::mem::take(&mut current)),
            _ => current.push(char),
        }
    }
    segments.push(current);

    segments
}

/// Traverses the given value to find strings located by the given path
/// pattern. Each located string is passed to `visit`; if `visit` ever
/// returns true, traversal stops immediately and `walk` returns true.
pub fn walk(value: &Value, pattern: &str, visit: &mut dyn FnMut(&str) -> bool) -> bool {
    walk_segments(value, &split(pattern), visit)
}

fn walk_segments(value: &Value, segments: &[String], visit: &mut dyn FnMut(&str) -> bool) -> bool {
    match value {
        Value::Object(map) => {
            // A map can never itself be a located value; with no segments
            // left there is nowhere further to go.
            let Some((next, rest)) = segments.split_first() else {
                return false;
            };

            match map.get(next) {
                Some(value) => walk_segments(value, rest, visit),
                None => false,
            }
        }

        // Lists fan out over every element with the same unconsumed
        // remainder, stopping at the first element that succeeds.
        Value::Array(items) => items
            .iter()
            .any(|item| walk_segments(item, segments, visit)),

        Value::String(leaf) => segments.is_empty() && visit(leaf),

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn walk_all(value: &Value, pattern: &str) -> Vec<String> {
        let mut found = Vec::new();
        walk(value, pattern, &mut |leaf| {
            found.push(leaf.to_string());
            false
        });
        found
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split("a/b/c"), vec!["a", "b", "c"]);
        assert_eq!(split("/a/b"), vec!["a", "b"]);
        assert_eq!(split("a"), vec!["a"]);
    }

    #[test]
    fn test_split_escaped_separator() {
        assert_eq!(split(r"a\/b/c"), vec!["a/b", "c"]);
        assert_eq!(split(r"a\\b"), vec![r"a\b"]);
    }

    #[test]
    fn test_walk_map() {
        let value = json!({"a": {"b": "z"}});
        assert_eq!(walk_all(&value, "a/b"), vec!["z"]);
    }

    #[test]
    fn test_walk_list_fans_out_in_order() {
        let value = json!({"a": [{"b": "x"}, {"b": "y"}]});
        assert_eq!(walk_all(&value, "a/b"), vec!["x", "y"]);
    }

    #[test]
    fn test_walk_nested_lists_share_pattern() {
        // Descending into a list consumes no segment, so a list of lists
        // still resolves with the same pattern.
        let value = json!({"a": [[{"b": "x"}], [{"b": "y"}]]});
        assert_eq!(walk_all(&value, "a/b"), vec!["x", "y"]);
    }

    #[test]
    fn test_walk_missing_key() {
        let value = json!({"a": {"b": "z"}});
        assert!(walk_all(&value, "a/c").is_empty());
    }

    #[test]
    fn test_walk_non_string_leaves_ignored() {
        let value = json!({"a": {"b": 3, "c": true, "d": null}});
        assert!(walk_all(&value, "a/b").is_empty());
        assert!(walk_all(&value, "a/c").is_empty());
        assert!(walk_all(&value, "a/d").is_empty());
    }

    #[test]
    fn test_walk_map_with_exhausted_pattern() {
        // The pattern resolves to a map, not a string; nothing is located.
        let value = json!({"a": {"b": "z"}});
        assert!(walk_all(&value, "a").is_empty());
    }

    #[test]
    fn test_walk_stops_on_first_true() {
        let value = json!({"a": [{"b": "x"}, {"b": "y"}]});

        let mut seen = Vec::new();
        let stopped = walk(&value, "a/b", &mut |leaf| {
            seen.push(leaf.to_string());
            true
        });

        assert!(stopped);
        assert_eq!(seen, vec!["x"]);
    }
}
