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

//! Concrete syntax tree.
//!
//! Every node is a tag plus a byte span plus its children in source order.
//! Tokens that matter to the tree shape (keywords, operators, punctuation)
//! are kept as leaf nodes, so the builder can see exactly what was written.

use logos::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Script,

    // Statements
    AssignStatement,
    FunctionDefinition,
    ClassDefinition,
    IfStatement,
    WhileStatement,
    ReturnStatement,
    PassStatement,
    BreakStatement,
    ContinueStatement,
    ExpressionStatement,

    // Statement parts
    TypeDef,
    AssignOp,
    ParamList,
    Body,
    ArgList,

    // Expressions
    CallExpression,
    MemberExpression,
    BinaryExpression,
    UnaryExpression,
    ParenthesizedExpression,
    VariableName,
    Number,
    String,
    Boolean,
    None,

    // Tokens
    Keyword,
    Operator,
    Punctuation,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// A node spanning from its first child to its last.
    pub fn branch(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        let start = children.first().map(|c| c.span.start).unwrap_or(0);
        let end = children.last().map(|c| c.span.end).unwrap_or(start);
        Self {
            kind,
            span: start..end,
            children,
        }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or("")
    }

    pub fn is_token(&self, kind: NodeKind, source: &str, text: &str) -> bool {
        self.kind == kind && self.text(source) == text
    }

    /// Renders the tree one node per line, indented by depth.
    pub fn dump(&self, source: &str) -> String {
        let mut out = String::new();
        self.dump_into(source, 0, &mut out);
        out
    }

    fn dump_into(&self, source: &str, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} {}..{}", self.kind, self.span.start, self.span.end));
        if self.children.is_empty() {
            out.push_str(&format!(" {:?}", self.text(source)));
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(source, depth + 1, out);
        }
    }
}

/// A parsed source file together with the text its spans refer to.
#[derive(Debug, Clone)]
pub struct SyntaxTree<'src> {
    pub source: &'src str,
    pub root: SyntaxNode,
}

impl<'src> SyntaxTree<'src> {
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.root)
    }
}

/// Walks the children of one node, left to right.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    parent: &'t SyntaxNode,
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(parent: &'t SyntaxNode) -> Self {
        Self { parent, pos: 0 }
    }

    pub fn parent(&self) -> &'t SyntaxNode {
        self.parent
    }

    pub fn peek(&self) -> Option<&'t SyntaxNode> {
        self.parent.children.get(self.pos)
    }

    /// The most recently consumed child, or the parent before the first step.
    pub fn current(&self) -> &'t SyntaxNode {
        match self.pos {
            0 => self.parent,
            n => &self.parent.children[n - 1],
        }
    }

    pub fn next_sibling(&mut self) -> Option<&'t SyntaxNode> {
        let node = self.parent.children.get(self.pos)?;
        self.pos += 1;
        Some(node)
    }
}
