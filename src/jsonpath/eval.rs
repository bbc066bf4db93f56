// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! JSONPath evaluation

use std::cmp::Ordering;

use serde_json::Value;

use super::ast::{Comparison, Filter, Operand, Query, Segment};

/// Evaluates a parsed query against a value tree, returning every matched
/// value in document order.
pub fn evaluate<'a>(query: &Query, root: &'a Value) -> Vec<&'a Value> {
    let mut results = vec![root];

    for segment in &query.segments {
        let mut next = Vec::new();
        for current in results {
            match segment {
                Segment::Child(key) => {
                    if let Some(value) = current.get(key) {
                        next.push(value);
                    }
                }
                Segment::Index(index) => {
                    if let Some(value) = index_into(current, *index) {
                        next.push(value);
                    }
                }
                Segment::Slice { start, end, step } => {
                    next.extend(slice(current, *start, *end, *step));
                }
                Segment::Wildcard => match current {
                    Value::Object(map) => next.extend(map.values()),
                    Value::Array(items) => next.extend(items.iter()),
                    _ => {}
                },
                Segment::Descendants(key) => collect_descendants(current, key, &mut next),
                Segment::AllDescendants => collect_all(current, &mut next),
                Segment::Filter(filter) => {
                    if let Value::Array(items) = current {
                        next.extend(items.iter().filter(|item| matches_filter(filter, item)));
                    }
                }
            }
        }
        results = next;
    }

    results
}

fn index_into(value: &Value, index: i64) -> Option<&Value> {
    let items = value.as_array()?;
    let resolved = if index < 0 {
        items.len().checked_sub(index.unsigned_abs() as usize)?
    } else {
        index as usize
    };
    items.get(resolved)
}

fn slice(value: &Value, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<&Value> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    let len = items.len() as i64;
    let step = step.unwrap_or(1);
    if step <= 0 {
        // Negative steps are rare in practice and not supported; an explicit
        // zero step would never terminate.
        return Vec::new();
    }

    let clamp = |index: i64| -> usize {
        if index < 0 {
            (len + index).max(0) as usize
        } else {
            index.min(len) as usize
        }
    };

    let mut results = Vec::new();
    let mut i = clamp(start.unwrap_or(0));
    let end = clamp(end.unwrap_or(len));
    while i < end {
        results.push(&items[i]);
        i += step as usize;
    }

    results
}

fn collect_descendants<'a>(value: &'a Value, key: &str, results: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                results.push(found);
            }
            for child in map.values() {
                collect_descendants(child, key, results);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_descendants(item, key, results);
            }
        }
        _ => {}
    }
}

fn collect_all<'a>(value: &'a Value, results: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for child in map.values() {
                results.push(child);
                collect_all(child, results);
            }
        }
        Value::Array(items) => {
            for item in items {
                results.push(item);
                collect_all(item, results);
            }
        }
        _ => {}
    }
}

fn matches_filter(filter: &Filter, current: &Value) -> bool {
    match filter {
        Filter::Compare { left, op, right } => {
            compare(resolve(left, current), *op, resolve(right, current))
        }
        Filter::And(a, b) => matches_filter(a, current) && matches_filter(b, current),
        Filter::Or(a, b) => matches_filter(a, current) || matches_filter(b, current),
        Filter::Not(inner) => !matches_filter(inner, current),
        Filter::Exists(path) => resolve_path(path, current).is_some(),
    }
}

fn resolve<'a>(operand: &'a Operand, current: &'a Value) -> Option<&'a Value> {
    match operand {
        Operand::Path(path) => resolve_path(path, current),
        Operand::Literal(value) => Some(value),
    }
}

fn resolve_path<'a>(path: &[String], current: &'a Value) -> Option<&'a Value> {
    path.iter()
        .try_fold(current, |value, key| value.as_object()?.get(key))
}

fn compare(left: Option<&Value>, op: Comparison, right: Option<&Value>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => match op {
            Comparison::Eq => equal(left, right),
            Comparison::Ne => !equal(left, right),
            Comparison::Lt => ordering(left, right) == Some(Ordering::Less),
            Comparison::Le => matches!(
                ordering(left, right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Comparison::Gt => ordering(left, right) == Some(Ordering::Greater),
            Comparison::Ge => matches!(
                ordering(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        },
        // A missing operand only satisfies inequality.
        (None, None) => matches!(op, Comparison::Eq),
        _ => matches!(op, Comparison::Ne),
    }
}

fn equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        // Numbers compare numerically so 2 == 2.0 holds.
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

fn ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
