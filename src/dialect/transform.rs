//! Statement rewriting for NodeScript sources
//!
//! Emits plain JavaScript from a parsed tree: inferred statement terminators
//! are made explicit, and the first assignment to a name nothing has declared
//! yet becomes a `let` binding.

use std::collections::HashSet;

use super::{DialectError, Statement, StatementKind, SyntaxTree};

/// Transformer options
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Rewrite a first assignment to an undeclared name as a `let` binding
    pub insert_declarations: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            insert_declarations: true,
        }
    }
}

/// Names an assignment may never declare
const RESERVED: &[&str] = &[
    "true", "false", "null", "undefined", "this", "arguments", "super",
];

pub fn transform(
    tree: &SyntaxTree,
    source: &str,
    options: &TransformOptions,
) -> Result<String, DialectError> {
    let mut declared: HashSet<&str> = HashSet::new();
    let mut lines: Vec<String> = Vec::with_capacity(tree.statements.len());

    for statement in &tree.statements {
        for name in &statement.declares {
            declared.insert(name.as_str());
        }

        match &statement.kind {
            StatementKind::Trivia => lines.push(statement.text.clone()),
            StatementKind::Block => lines.push(statement.text.clone()),
            StatementKind::Simple => lines.push(emit_terminated(statement)),
            StatementKind::Assignment { target } => {
                if declared.contains(target.as_str()) {
                    lines.push(emit_terminated(statement));
                    continue;
                }
                if RESERVED.contains(&target.as_str()) {
                    return Err(DialectError::new(
                        statement.line,
                        format!("cannot assign to reserved word '{target}'"),
                    ));
                }
                if options.insert_declarations {
                    declared.insert(target.as_str());
                    lines.push(emit_declared(statement));
                } else {
                    lines.push(emit_terminated(statement));
                }
            }
        }
    }

    let mut output = lines.join("\n");
    if source.ends_with('\n') && !tree.statements.is_empty() {
        output.push('\n');
    }
    Ok(output)
}

/// Emit a statement, appending the terminator the source omitted
fn emit_terminated(statement: &Statement) -> String {
    let mut text = statement.text.clone();
    if !statement.terminated {
        text.insert(statement.code_end, ';');
    }
    text
}

/// Emit an assignment with a `let` prefix spliced in front of the target
fn emit_declared(statement: &Statement) -> String {
    let mut text = emit_terminated(statement);
    let indent = statement
        .text
        .len()
        .saturating_sub(statement.text.trim_start().len());
    text.insert_str(indent, "let ");
    text
}
