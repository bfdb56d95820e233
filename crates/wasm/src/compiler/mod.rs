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

//! Code generator.
//!
//! Lowers an analyzed program to an instruction-level [`Module`]. Assumes the
//! semantic analyzer accepted the program: every expression carries its type
//! and every name resolves. A failed lookup here is a [`CodegenError`], a bug
//! in one of the two stages, never a user diagnostic.

mod control_flow;
mod data_access;
mod helpers;
pub mod instr;
mod literal;
mod op;

use ast::expr::{Expr, ExprKind};
use ast::op::Builtin;
use ast::stmt::Stmt;
use ast::{Def, FuncDef, Spanned};
use log::debug;

use crate::error::CodegenError;
use crate::functions::{FunctionContext, RET_LOCAL};
use crate::host::{HostImport, ENTRY_EXPORT};
use crate::type_checker::Analysis;
use crate::types::WasmType;
use instr::{Func, Global, Instr, Module};

/// Generate the module for an analyzed program.
pub fn generate(analysis: &Analysis) -> Result<Module, CodegenError> {
    Compiler::new(analysis).compile_module()
}

/// The code generator.
///
/// ## Compilation strategy
///
/// - Top-level variable definitions become mutable `i32` globals.
/// - Each function definition becomes one function, in declaration order.
/// - Top-level statements are compiled into an exported entry function
///   whose result is the value of the last top-level expression statement.
/// - Every value is an `i32`.
pub struct Compiler<'a> {
    analysis: &'a Analysis,
    /// Context of the function being compiled
    ctx: FunctionContext,
}

impl<'a> Compiler<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            analysis,
            ctx: FunctionContext::new_entry(analysis.globals.clone()),
        }
    }

    /// Compile the whole program.
    ///
    /// `module ::= import* global* func* entry`
    pub fn compile_module(mut self) -> Result<Module, CodegenError> {
        let analysis = self.analysis;
        let program = &analysis.program;

        let mut globals = Vec::new();
        let mut functions = Vec::new();
        for def in &program.defs {
            match &def.node {
                Def::Var(var) => {
                    WasmType::from_type(&var.ty.node)?;
                    globals.push(Global {
                        name: var.name.clone(),
                        init: Self::literal_word(&var.init.node),
                    });
                }
                Def::Func(func) => functions.push(self.compile_function(func)?),
            }
        }

        let entry = self.compile_entry(&program.stmts)?;
        debug!(
            "generated {} globals, {} functions and the entry",
            globals.len(),
            functions.len()
        );

        Ok(Module {
            globals,
            functions,
            entry,
        })
    }

    /// `(func $name (param ..) (result i32) (local ..) inits body unreachable 0)`
    fn compile_function(&mut self, func: &FuncDef) -> Result<Func, CodegenError> {
        let vars = self
            .analysis
            .scopes
            .get(&func.name)
            .cloned()
            .ok_or_else(|| CodegenError::UnresolvedSymbol(func.name.clone()))?;
        for param in &func.params {
            WasmType::from_type(&param.ty)?;
        }
        WasmType::from_type(&func.ret)?;

        let outer = std::mem::replace(&mut self.ctx, FunctionContext::new(vars));

        for local in &func.body.defs {
            WasmType::from_type(&local.node.ty.node)?;
            self.ctx.declare_local(&local.node.name);
        }
        for local in &func.body.defs {
            self.ctx.emit(Instr::I32Const(Self::literal_word(&local.node.init.node)));
            self.emit_store(&local.node.name)?;
        }
        self.compile_block(&func.body.stmts)?;

        // Every path of a well-typed body returns before this point
        self.ctx.emit(Instr::Unreachable);
        self.ctx.emit(Instr::I32Const(0));

        let ctx = std::mem::replace(&mut self.ctx, outer);
        ctx.build(Some(func.name.clone()), None)
    }

    /// The exported zero-argument entry function.
    fn compile_entry(&mut self, stmts: &[Spanned<Stmt>]) -> Result<Func, CodegenError> {
        self.ctx.emit(Instr::I32Const(0));
        self.ctx.emit(Instr::LocalSet(RET_LOCAL.to_string()));
        self.compile_block(stmts)?;
        self.ctx.emit(Instr::LocalGet(RET_LOCAL.to_string()));

        let ctx = std::mem::replace(
            &mut self.ctx,
            FunctionContext::new_entry(self.analysis.globals.clone()),
        );
        ctx.build(None, Some(ENTRY_EXPORT.to_string()))
    }

    // ─── Statements ──────────────────────────────────────────────────────

    fn compile_block(&mut self, stmts: &[Spanned<Stmt>]) -> Result<(), CodegenError> {
        for stmt in stmts {
            self.compile_stmt(&stmt.node)?;
        }
        Ok(())
    }

    fn compile_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match stmt {
            Stmt::Assign { target, value } => {
                self.compile_expr(value)?;
                self.emit_store(target)?;
            }
            Stmt::Expr(expr) => {
                self.compile_expr(expr)?;
                if self.ctx.is_top_level() {
                    self.ctx.emit(Instr::LocalSet(RET_LOCAL.to_string()));
                } else {
                    self.ctx.emit(Instr::Drop);
                }
            }
            Stmt::Pass => {}
            Stmt::Return(expr) => {
                self.compile_expr(expr)?;
                self.ctx.emit(Instr::Return);
            }
            Stmt::If { test, body, orelse } => self.compile_if(test, body, orelse)?,
            Stmt::While { test, body } => self.compile_while(test, body)?,
            Stmt::FieldAssign { .. } => return Err(CodegenError::UnsupportedNode("field assignment")),
        }
        Ok(())
    }

    // ─── Expressions ─────────────────────────────────────────────────────

    fn compile_expr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::Literal(lit) => self.ctx.emit(Instr::I32Const(Self::literal_word(lit))),
            ExprKind::Name(name) => self.emit_load(name)?,
            ExprKind::Call { func, args } => self.compile_call(func, args)?,
            ExprKind::BinOp { left, op, right } => self.compile_binop(left, *op, right)?,
            ExprKind::UnaryOp { op, operand } => self.compile_unary(*op, operand)?,
            ExprKind::Paren(inner) => self.compile_expr(inner)?,
            ExprKind::Attribute { .. } => return Err(CodegenError::UnsupportedNode("field lookup")),
            ExprKind::Construct { .. } => {
                return Err(CodegenError::UnsupportedNode("object construction"))
            }
        }
        Ok(())
    }

    /// Arguments left to right, then the call. Builtins go to their host
    /// import; `print` is picked by the static type of its argument.
    fn compile_call(&mut self, func: &str, args: &[Expr]) -> Result<(), CodegenError> {
        for arg in args {
            self.compile_expr(arg)?;
        }

        let target = match Builtin::from_name(func) {
            Some(builtin) => {
                let arg_ty = match args.first() {
                    Some(arg) => Self::annotation(arg)?.clone(),
                    None => ast::types::Type::None,
                };
                HostImport::for_builtin(builtin, &arg_ty)
                    .ok_or(CodegenError::NoRuntimeRepresentation(arg_ty))?
                    .name()
                    .to_string()
            }
            None if self.analysis.functions.get(func).is_some() => func.to_string(),
            None => return Err(CodegenError::UnresolvedSymbol(func.to_string())),
        };
        self.ctx.emit(Instr::Call(target));
        Ok(())
    }
}
