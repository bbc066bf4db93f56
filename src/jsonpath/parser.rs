// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! JSONPath parser

use anyhow::{bail, Result};
use serde_json::Value;

use super::ast::{Comparison, Filter, Operand, Query, Segment};

/// Parses a JSONPath query string. The query must start with `$`.
pub fn parse(input: &str) -> Result<Query> {
    Parser { input, pos: 0 }.parse_query()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance(1);
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance(c.len_utf8());
                Ok(())
            }
            Some(c) => bail!("jsonpath: expected '{}', got '{}'", expected, c),
            None => bail!("jsonpath: expected '{}', got end of input", expected),
        }
    }

    fn parse_query(&mut self) -> Result<Query> {
        self.skip_whitespace();
        self.expect('$')?;

        let mut segments = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.advance(1);
                    segments.push(self.parse_dot_segment()?);
                }
                Some('[') => segments.push(self.parse_bracket_segment()?),
                Some(c) => bail!("jsonpath: unexpected '{}'", c),
                None => break,
            }
        }

        Ok(Query::new(segments))
    }

    fn parse_dot_segment(&mut self) -> Result<Segment> {
        match self.peek() {
            // `..key` or `..*`
            Some('.') => {
                self.advance(1);
                if self.peek() == Some('*') {
                    self.advance(1);
                    Ok(Segment::AllDescendants)
                } else {
                    Ok(Segment::Descendants(self.parse_name()?))
                }
            }
            Some('*') => {
                self.advance(1);
                Ok(Segment::Wildcard)
            }
            _ => Ok(Segment::Child(self.parse_name()?)),
        }
    }

    /// Consumes a field name: alphanumerics, `_`, and `-` (hyphenated keys
    /// are common in manifests).
    fn parse_name(&mut self) -> Result<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            self.advance(1);
        }

        if self.pos == start {
            bail!("jsonpath: expected a field name");
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_bracket_segment(&mut self) -> Result<Segment> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some('*') => {
                self.advance(1);
                Segment::Wildcard
            }
            Some('?') => {
                self.advance(1);
                Segment::Filter(self.parse_filter()?)
            }
            Some('\'') | Some('"') => Segment::Child(self.parse_quoted()?),
            _ => return self.parse_index_or_slice(),
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(segment)
    }

    fn parse_index_or_slice(&mut self) -> Result<Segment> {
        let first = self.parse_integer();
        self.skip_whitespace();

        if self.peek() != Some(':') {
            self.expect(']')?;
            return match first {
                Some(index) => Ok(Segment::Index(index)),
                None => bail!("jsonpath: expected an array index"),
            };
        }

        self.advance(1);
        let end = self.parse_integer();
        self.skip_whitespace();

        let step = if self.peek() == Some(':') {
            self.advance(1);
            self.parse_integer()
        } else {
            None
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(Segment::Slice {
            start: first,
            end,
            step,
        })
    }

    fn parse_integer(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance(1);
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
        }
        self.input[start..self.pos].parse().ok()
    }

    fn parse_quoted(&mut self) -> Result<String> {
        let Some(quote) = self.peek() else {
            bail!("jsonpath: expected a quoted string");
        };
        self.advance(1);

        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.advance(1);
                    return Ok(value);
                }
                Some('\\') => {
                    self.advance(1);
                    match self.peek() {
                        Some(escaped) => {
                            value.push(escaped);
                            self.advance(escaped.len_utf8());
                        }
                        None => bail!("jsonpath: unterminated escape"),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance(c.len_utf8());
                }
                None => bail!("jsonpath: unterminated string"),
            }
        }
    }

    fn parse_filter(&mut self) -> Result<Filter> {
        self.skip_whitespace();
        let left = self.parse_filter_atom()?;
        self.skip_whitespace();

        if self.rest().starts_with("&&") {
            self.advance(2);
            let right = self.parse_filter()?;
            return Ok(Filter::And(Box::new(left), Box::new(right)));
        }
        if self.rest().starts_with("||") {
            self.advance(2);
            let right = self.parse_filter()?;
            return Ok(Filter::Or(Box::new(left), Box::new(right)));
        }

        Ok(left)
    }

    fn parse_filter_atom(&mut self) -> Result<Filter> {
        self.skip_whitespace();

        if self.peek() == Some('!') {
            self.advance(1);
            return Ok(Filter::Not(Box::new(self.parse_filter_atom()?)));
        }

        if self.peek() == Some('(') {
            self.advance(1);
            let inner = self.parse_filter()?;
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(inner);
        }

        let left = self.parse_operand()?;
        self.skip_whitespace();

        match self.parse_comparison() {
            Some(op) => {
                self.skip_whitespace();
                let right = self.parse_operand()?;
                Ok(Filter::Compare { left, op, right })
            }
            None => match left {
                // A bare path is an existence check.
                Operand::Path(path) => Ok(Filter::Exists(path)),
                Operand::Literal(_) => bail!("jsonpath: expected a comparison operator"),
            },
        }
    }

    fn parse_comparison(&mut self) -> Option<Comparison> {
        let rest = self.rest();
        let (op, len) = if rest.starts_with("==") {
            (Comparison::Eq, 2)
        } else if rest.starts_with("!=") {
            (Comparison::Ne, 2)
        } else if rest.starts_with("<=") {
            (Comparison::Le, 2)
        } else if rest.starts_with(">=") {
            (Comparison::Ge, 2)
        } else if rest.starts_with('<') {
            (Comparison::Lt, 1)
        } else if rest.starts_with('>') {
            (Comparison::Gt, 1)
        } else {
            return None;
        };

        self.advance(len);
        Some(op)
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        self.skip_whitespace();

        if self.peek() == Some('@') {
            self.advance(1);
            let mut path = Vec::new();
            while self.peek() == Some('.') {
                self.advance(1);
                path.push(self.parse_name()?);
            }
            return Ok(Operand::Path(path));
        }

        Ok(Operand::Literal(self.parse_literal()?))
    }

    fn parse_literal(&mut self) -> Result<Value> {
        match self.peek() {
            Some('\'') | Some('"') => Ok(Value::String(self.parse_quoted()?)),
            Some('t') if self.rest().starts_with("true") => {
                self.advance(4);
                Ok(Value::Bool(true))
            }
            Some('f') if self.rest().starts_with("false") => {
                self.advance(5);
                Ok(Value::Bool(false))
            }
            Some('n') if self.rest().starts_with("null") => {
                self.advance(4);
                Ok(Value::Null)
            }
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            _ => bail!("jsonpath: expected a literal value"),
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance(1);
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(1);
        }

        if self.peek() == Some('.') {
            self.advance(1);
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance(1);
            }

            let number: f64 = self.input[start..self.pos]
                .parse()
                .map_err(|_| anyhow::anyhow!("jsonpath: invalid number"))?;
            return serde_json::Number::from_f64(number)
                .map(Value::Number)
                .ok_or_else(|| anyhow::anyhow!("jsonpath: invalid number"));
        }

        let number: i64 = self.input[start..self.pos]
            .parse()
            .map_err(|_| anyhow::anyhow!("jsonpath: invalid integer"))?;
        Ok(Value::Number(number.into()))
    }
}
