// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{Context as _, Result};
use cel_interpreter::{Context, Program, Value};

use super::Matcher;
use crate::resources::Resource;

/// Matches resources based on the result of evaluating a boolean CEL
/// expression. The resource object is bound to a single variable called
/// `object`.
///
/// For example: `object.kind == 'Service' && has(object.metadata.labels)`.
pub struct CelMatcher {
    program: Program,
}

impl CelMatcher {
    pub fn new(expression: &str) -> Result<Self> {
        // Compile the user-supplied CEL expression once. The interpreter
        // performs no static type inference, so a non-boolean result is
        // caught per evaluation instead of here.
        let program = Program::compile(expression)
            .with_context(|| format!("invalid cel expression {:?}", expression))?;

        Ok(Self { program })
    }
}

impl Matcher for CelMatcher {
    fn matches(&self, item: &Resource) -> bool {
        let mut context = Context::default();
        if context
            .add_variable("object", item.content().clone())
            .is_err()
        {
            return false;
        }

        // Evaluate the program against the current resource. Any runtime
        // error, and any non-boolean result, prevents matching.
        match self.program.execute(&context) {
            Ok(Value::Bool(result)) => result,
            Ok(_) | Err(_) => false,
        }
    }
}
