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

//! Static semantic analysis.
//!
//! This module walks the untyped AST and enforces:
//! - Names are defined once per definition list, and never shadow a builtin
//! - Every referenced variable and called function exists
//! - Call arity and argument types match the callee's signature
//! - Operand, condition, assignment and return types match exactly
//! - A function's declared return type matches the type inferred from its
//!   last statement
//!
//! Analysis is two-pass per scope. Pass 1 collects every definition's type
//! or signature without looking at function bodies; pass 2 checks bodies
//! against the collected tables. The input tree is never modified: every
//! expression of the returned tree is a fresh node with its type filled in.

mod env;
mod expr;
mod stmt;

pub use env::{Binding, FuncSig, FunctionEnv, StorageClass, VariableEnv};

use ast::expr::Literal;
use ast::op::Builtin;
use ast::types::Type;
use ast::{Def, FuncDef, Program, Span, Spanned, VarDef};
use log::debug;
use std::collections::HashMap;

use crate::error::CompileError;
use crate::host::HostImport;

/// The analyzer's output: both environment tables and the typed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub functions: FunctionEnv,
    pub globals: VariableEnv,
    /// Merged environment of each user function, as built by [`function_env`]
    pub scopes: HashMap<String, VariableEnv>,
    pub program: Program,
}

/// Type-check `program`, returning the typed tree and its environments, or
/// the first violation found.
pub fn analyze(program: &Program) -> Result<Analysis, CompileError> {
    let (functions, globals) = collect_defs(&program.defs)?;

    let mut defs = Vec::with_capacity(program.defs.len());
    let mut scopes = HashMap::new();
    for def in &program.defs {
        match &def.node {
            // Initializers were checked while collecting
            Def::Var(_) => defs.push(def.clone()),
            Def::Func(func) => {
                let vars = function_env(func, &globals)?;
                let typed = check_function(func, &def.span, &functions, &vars)?;
                defs.push(Spanned::new(Def::Func(typed), def.span.clone()));
                scopes.insert(func.name.clone(), vars);
            }
        }
    }

    let stmts = TypeChecker::new(&functions, &globals, None).check_block(&program.stmts)?;
    debug!(
        "analyzed {} functions, {} globals, {} top-level statements",
        functions.len(),
        globals.len(),
        stmts.len()
    );

    Ok(Analysis {
        functions,
        globals,
        scopes,
        program: Program {
            defs,
            stmts,
            classes: program.classes.clone(),
        },
    })
}

// ─── Pass 1: definition tables ───────────────────────────────────────────────

/// Records every top-level variable's declared type and every function's
/// signature. Variables and functions share one namespace, which also
/// contains the builtins and the host import names.
fn collect_defs(defs: &[Spanned<Def>]) -> Result<(FunctionEnv, VariableEnv), CompileError> {
    let mut functions = FunctionEnv::new();
    let mut globals = VariableEnv::new();

    for def in defs {
        let name = def.node.name();
        if Builtin::from_name(name).is_some()
            || HostImport::from_name(name).is_some()
            || functions.get(name).is_some()
            || globals.contains(name)
        {
            return Err(CompileError::duplicate(name, def.span.clone()));
        }

        match &def.node {
            Def::Var(var) => {
                check_initializer(var)?;
                globals.declare(name, var.ty.node.clone(), StorageClass::Global, def.span.clone())?;
            }
            Def::Func(func) => {
                let sig = FuncSig {
                    params: func.params.iter().map(|p| p.ty.clone()).collect(),
                    ret: func.ret.clone(),
                };
                functions.declare(name, sig, def.span.clone())?;
            }
        }
    }

    Ok((functions, globals))
}

/// The literal's own type must equal the declared one.
fn check_initializer(var: &VarDef) -> Result<(), CompileError> {
    let got = var.init.node.ty();
    if got != var.ty.node {
        return Err(mismatch(&var.init.node, &var.ty.node, &got, var.init.span.clone()));
    }
    Ok(())
}

fn mismatch(shown: &impl std::fmt::Display, expected: &Type, got: &Type, span: Span) -> CompileError {
    CompileError::type_error(
        format!("expression: {}, expecting {}, got {}", shown, expected, got),
        span,
    )
}

// ─── Pass 2: function bodies ─────────────────────────────────────────────────

/// The variables visible inside `func`: `globals` overlaid with the
/// function's parameters (`Param(0..n)` in declaration order) and its own
/// `Local` definitions.
///
/// A repeated parameter name, or a local named like a parameter or another
/// local, is a duplicate definition.
pub fn function_env(func: &FuncDef, globals: &VariableEnv) -> Result<VariableEnv, CompileError> {
    let mut own = VariableEnv::new();
    for (index, param) in func.params.iter().enumerate() {
        own.declare(
            &param.name,
            param.ty.clone(),
            StorageClass::Param(index as u32),
            param.span.clone(),
        )?;
    }
    for local in &func.body.defs {
        check_initializer(&local.node)?;
        own.declare(
            &local.node.name,
            local.node.ty.node.clone(),
            StorageClass::Local,
            local.span.clone(),
        )?;
    }
    Ok(globals.merged(&own))
}

fn check_function(
    func: &FuncDef,
    span: &Span,
    functions: &FunctionEnv,
    vars: &VariableEnv,
) -> Result<FuncDef, CompileError> {
    let checker = TypeChecker::new(functions, vars, Some(&func.ret));

    let stmts = checker.check_block(&func.body.stmts)?;
    let inferred = checker.return_type(&func.body.stmts)?;
    if inferred != func.ret {
        return Err(CompileError::type_error(
            format!(
                "function '{}' is declared to return {}, but the actual return type is {}",
                func.name, func.ret, inferred
            ),
            span.clone(),
        ));
    }

    debug!("checked function '{}' ({} statements)", func.name, stmts.len());
    Ok(FuncDef {
        body: ast::Body {
            defs: func.body.defs.clone(),
            stmts,
        },
        ..func.clone()
    })
}

/// Checks statements and expressions of one scope against fixed tables.
pub(crate) struct TypeChecker<'a> {
    functions: &'a FunctionEnv,
    vars: &'a VariableEnv,
    /// Declared return type of the enclosing function; absent at top level,
    /// where `return` is not checked.
    ret: Option<&'a Type>,
}

impl<'a> TypeChecker<'a> {
    pub(crate) fn new(
        functions: &'a FunctionEnv,
        vars: &'a VariableEnv,
        ret: Option<&'a Type>,
    ) -> Self {
        Self {
            functions,
            vars,
            ret,
        }
    }
}

/// `None` literal used where the tree needs a typed placeholder.
fn none_literal(span: Span) -> ast::expr::Expr {
    ast::expr::Expr::typed(
        ast::expr::ExprKind::Literal(Literal::None),
        span,
        Type::None,
    )
}
