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

//! Source-like rendering of AST nodes, used by diagnostics and `--emit ast`.

use std::fmt::{self, Write};

use crate::expr::{Expr, ExprKind, Literal};
use crate::op::UnaryOp;
use crate::stmt::Stmt;
use crate::types::Type;
use crate::{Body, ClassDef, Def, FuncDef, Program, Spanned, VarDef};

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::None => write!(f, "None"),
            Type::Class(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
            Literal::None => write!(f, "None"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{}", lit),
            ExprKind::Name(name) => write!(f, "{}", name),
            ExprKind::Call { func, args } => {
                write!(f, "{}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ExprKind::BinOp { left, op, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            ExprKind::UnaryOp { op, operand } => match op {
                UnaryOp::Not => write!(f, "not {}", operand),
                UnaryOp::Neg => write!(f, "-{}", operand),
            },
            ExprKind::Paren(inner) => write!(f, "({})", inner),
            ExprKind::Attribute { value, attr } => write!(f, "{}.{}", value, attr),
            ExprKind::Construct { class } => write!(f, "{}()", class),
        }
    }
}

/// Pretty printer for whole programs.
///
/// With `annotate` set, every statement-level expression is followed by its
/// inferred type as a trailing comment.
pub struct Printer {
    out: String,
    annotate: bool,
}

impl Printer {
    pub fn new(annotate: bool) -> Self {
        Self {
            out: String::new(),
            annotate,
        }
    }

    pub fn print(mut self, program: &Program) -> String {
        for class in &program.classes {
            self.class_def(class, 0);
        }
        for def in &program.defs {
            match &def.node {
                Def::Var(var) => self.var_def(var, 0),
                Def::Func(func) => self.func_def(func, 0),
            }
        }
        self.block(&program.stmts, 0);
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn expr_line(&mut self, depth: usize, prefix: &str, expr: &Expr, suffix: &str) {
        let mut text = format!("{}{}{}", prefix, expr, suffix);
        if self.annotate {
            if let Some(ty) = &expr.ty {
                let _ = write!(text, "  # {}", ty);
            }
        }
        self.line(depth, &text);
    }

    fn var_def(&mut self, var: &VarDef, depth: usize) {
        let text = format!("{}: {} = {}", var.name, var.ty.node, var.init.node);
        self.line(depth, &text);
    }

    fn func_def(&mut self, func: &FuncDef, depth: usize) {
        let params = func
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        let header = format!("def {}({}) -> {}:", func.name, params, func.ret);
        self.line(depth, &header);
        self.body(&func.body, depth + 1);
    }

    fn class_def(&mut self, class: &Spanned<ClassDef>, depth: usize) {
        let header = format!("class {}:", class.node.name);
        self.line(depth, &header);
        if class.node.fields.is_empty() {
            self.line(depth + 1, "pass");
        }
        for field in &class.node.fields {
            self.var_def(&field.node, depth + 1);
        }
    }

    fn body(&mut self, body: &Body, depth: usize) {
        for def in &body.defs {
            self.var_def(&def.node, depth);
        }
        if body.defs.is_empty() && body.stmts.is_empty() {
            self.line(depth, "pass");
        }
        self.block(&body.stmts, depth);
    }

    fn block(&mut self, stmts: &[Spanned<Stmt>], depth: usize) {
        for stmt in stmts {
            self.stmt(&stmt.node, depth);
        }
    }

    fn nested(&mut self, stmts: &[Spanned<Stmt>], depth: usize) {
        if stmts.is_empty() {
            self.line(depth, "pass");
        } else {
            self.block(stmts, depth);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Assign { target, value } => {
                self.expr_line(depth, &format!("{} = ", target), value, "")
            }
            Stmt::Expr(expr) => self.expr_line(depth, "", expr, ""),
            Stmt::Pass => self.line(depth, "pass"),
            Stmt::FieldAssign {
                object,
                field,
                value,
            } => self.expr_line(depth, &format!("{}.{} = ", object, field), value, ""),
            Stmt::Return(expr) => self.expr_line(depth, "return ", expr, ""),
            Stmt::If { test, body, orelse } => {
                self.expr_line(depth, "if ", test, ":");
                self.nested(body, depth + 1);
                if !orelse.is_empty() {
                    self.line(depth, "else:");
                    self.block(orelse, depth + 1);
                }
            }
            Stmt::While { test, body } => {
                self.expr_line(depth, "while ", test, ":");
                self.nested(body, depth + 1);
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::new(false).print(self))
    }
}
