/*
 * Copyright (c) 2026. Mikhail Kulik.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Turns a concrete syntax tree into the AST.
//!
//! Every node tag maps to one AST production. Tags that have no production
//! in the supported language are rejected with a [`SyntaxError`]; nothing is
//! silently skipped. Block ordering rules are enforced here as well:
//! definitions come before statements, functions do not nest, and variable
//! definitions only appear at the top of a function body or at top level.

mod def;
mod expr;
mod stmt;

use ast::{Def, Program, Span, Spanned};
use thiserror::Error;

use crate::cst::{Cursor, NodeKind, SyntaxNode, SyntaxTree};
use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse {}..{}: {text:?}, {message}", .span.start, .span.end)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    /// Source text under `span`
    pub text: String,
    /// Tag of the offending node, when the error came from the tree walk
    pub node: Option<NodeKind>,
}

impl SyntaxError {
    pub fn from_parse_error(error: ParseError, source: &str) -> Self {
        Self {
            text: source.get(error.span.clone()).unwrap_or("").to_string(),
            message: error.message,
            span: error.span,
            node: None,
        }
    }
}

pub type BuildResult<T> = Result<T, SyntaxError>;

/// What a block-level node declares, decided by looking at its tag and,
/// for assignments, whether a type annotation follows the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    VarDef,
    FuncDef,
    Class,
    Stmt,
}

pub struct Builder<'src> {
    source: &'src str,
}

impl<'src> Builder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    /// Build the program held by `tree`.
    pub fn build(tree: &SyntaxTree<'src>) -> BuildResult<Program> {
        Builder::new(tree.source).build_script(&tree.root)
    }

    pub fn build_script(&self, root: &SyntaxNode) -> BuildResult<Program> {
        self.assert_kind(root, NodeKind::Script)?;

        let mut program = Program::default();
        let mut stmt_mode = false;
        for node in &root.children {
            match (self.classify(node), stmt_mode) {
                (Form::Stmt, _) => {
                    stmt_mode = true;
                    program.stmts.push(self.build_stmt(node)?);
                }
                (_, true) => {
                    return Err(self.error(node, "Declaration cannot be after Statement"))
                }
                (Form::Class, false) => program.classes.push(self.build_class(node)?),
                (Form::VarDef, false) => {
                    let var = self.build_var_def(node)?;
                    program
                        .defs
                        .push(Spanned::new(Def::Var(var.node), var.span));
                }
                (Form::FuncDef, false) => {
                    let func = self.build_func_def(node)?;
                    program.defs.push(Spanned::new(Def::Func(func), node.span.clone()));
                }
            }
        }
        Ok(program)
    }

    fn classify(&self, node: &SyntaxNode) -> Form {
        match node.kind {
            NodeKind::ClassDefinition => Form::Class,
            NodeKind::FunctionDefinition => Form::FuncDef,
            NodeKind::AssignStatement => match node.children.get(1) {
                Some(next) if next.kind == NodeKind::TypeDef => Form::VarDef,
                _ => Form::Stmt,
            },
            _ => Form::Stmt,
        }
    }

    // --- Cursor helpers ---

    fn text(&self, node: &SyntaxNode) -> &'src str {
        node.text(self.source)
    }

    fn error(&self, node: &SyntaxNode, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            message: message.into(),
            span: node.span.clone(),
            text: self.text(node).to_string(),
            node: Some(node.kind),
        }
    }

    fn assert_kind(&self, node: &SyntaxNode, kind: NodeKind) -> BuildResult<()> {
        if node.kind == kind {
            Ok(())
        } else {
            Err(self.error(
                node,
                format!("Expecting {}, encountered {}", kind, node.kind),
            ))
        }
    }

    /// Asserts a punctuation or keyword leaf with the given text.
    fn assert_token(&self, node: &SyntaxNode, text: &str) -> BuildResult<()> {
        if self.text(node) == text && node.children.is_empty() {
            Ok(())
        } else {
            Err(self.error(
                node,
                format!("Expecting {:?}, encountered {}", text, node.kind),
            ))
        }
    }

    fn next<'t>(&self, cursor: &mut Cursor<'t>) -> BuildResult<&'t SyntaxNode> {
        let current = cursor.current();
        cursor
            .next_sibling()
            .ok_or_else(|| self.error(current, "Missing token"))
    }

    fn next_kind<'t>(&self, cursor: &mut Cursor<'t>, kind: NodeKind) -> BuildResult<&'t SyntaxNode> {
        let node = self.next(cursor)?;
        self.assert_kind(node, kind)?;
        Ok(node)
    }

    /// Fails if the cursor has children left.
    fn finish(&self, cursor: &Cursor<'_>) -> BuildResult<()> {
        match cursor.peek() {
            Some(trailing) => Err(self.error(trailing, "Trailing expression")),
            None => Ok(()),
        }
    }
}
