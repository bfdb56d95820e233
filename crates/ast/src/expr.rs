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

use crate::op::{BinOp, UnaryOp};
use crate::types::Type;
use crate::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i32),
    Bool(bool),
    None,
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Int(_) => Type::Int,
            Literal::Bool(_) => Type::Bool,
            Literal::None => Type::None,
        }
    }

    /// The machine word a literal is represented by at runtime.
    pub fn to_word(&self) -> i32 {
        match self {
            Literal::Int(value) => *value,
            Literal::Bool(true) => 1,
            Literal::Bool(false) | Literal::None => 0,
        }
    }
}

/// An expression node.
///
/// `ty` stays empty until the semantic analyzer builds the typed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span, ty: None }
    }

    pub fn typed(kind: ExprKind, span: Span, ty: Type) -> Self {
        Self {
            kind,
            span,
            ty: Some(ty),
        }
    }

    pub fn is_none_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(Literal::None))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Name(String),
    /// `f(a, b)`. Builtins and user functions share this form.
    Call {
        func: String,
        args: Vec<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Paren(Box<Expr>),
    /// `value.attr`, reserved for class support
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    /// `Class()`, reserved for class support
    Construct {
        class: String,
    },
}
