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

pub mod display;
pub mod expr;
pub mod op;
pub mod stmt;
pub mod types;

pub use logos::Span;

use expr::Literal;
use stmt::Stmt;
use types::Type;

/// Every AST node carries a source span for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A whole source file: definitions first, then the statements of the entry body.
///
/// Class declarations are kept apart from `defs`. They are recorded by the
/// front end but never analyzed or compiled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub defs: Vec<Spanned<Def>>,
    pub stmts: Vec<Spanned<Stmt>>,
    pub classes: Vec<Spanned<ClassDef>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Def {
    Var(VarDef),
    Func(FuncDef),
}

impl Def {
    pub fn name(&self) -> &str {
        match self {
            Def::Var(var) => &var.name,
            Def::Func(func) => &func.name,
        }
    }
}

/// `name: type = literal`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub ty: Spanned<Type>,
    pub init: Spanned<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Type,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// A function body. Only variable definitions may precede its statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub defs: Vec<Spanned<VarDef>>,
    pub stmts: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub fields: Vec<Spanned<VarDef>>,
}
