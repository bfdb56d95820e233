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

use super::expr::expect_type;
use super::*;
use ast::expr::Expr;
use ast::stmt::Stmt;

impl TypeChecker<'_> {
    pub(super) fn check_block(&self, stmts: &[Spanned<Stmt>]) -> Result<Vec<Spanned<Stmt>>, CompileError> {
        stmts.iter().map(|stmt| self.check_stmt(stmt)).collect()
    }

    fn check_stmt(&self, stmt: &Spanned<Stmt>) -> Result<Spanned<Stmt>, CompileError> {
        let span = stmt.span.clone();
        let node = match &stmt.node {
            Stmt::Assign { target, value } => {
                let (value, got) = self.check_expr(value)?;
                let binding = self
                    .vars
                    .get(target)
                    .ok_or_else(|| CompileError::undefined(target, span.clone()))?;
                if binding.ty != got {
                    return Err(CompileError::type_error(
                        format!(
                            "variable: {} with type {} cannot be assigned value of type {}",
                            target, binding.ty, got
                        ),
                        span,
                    ));
                }
                Stmt::Assign {
                    target: target.clone(),
                    value,
                }
            }

            Stmt::Expr(expr) => Stmt::Expr(self.check_expr(expr)?.0),

            Stmt::Pass => Stmt::Pass,

            Stmt::Return(expr) => {
                let (expr, got) = self.check_expr(expr)?;
                if let Some(ret) = self.ret {
                    expect_type(&expr, ret, &got)?;
                }
                Stmt::Return(expr)
            }

            Stmt::If { test, body, orelse } => Stmt::If {
                test: self.check_condition(test)?,
                body: self.check_block(body)?,
                orelse: self.check_block(orelse)?,
            },

            Stmt::While { test, body } => Stmt::While {
                test: self.check_condition(test)?,
                body: self.check_block(body)?,
            },

            Stmt::FieldAssign { .. } => {
                return Err(CompileError::type_error(
                    "field assignment is not supported",
                    span,
                ))
            }
        };
        Ok(Spanned::new(node, span))
    }

    fn check_condition(&self, test: &Expr) -> Result<Expr, CompileError> {
        let (test, got) = self.check_expr(test)?;
        expect_type(&test, &Type::Bool, &got)?;
        Ok(test)
    }

    /// The type a block evaluates to, judged by its last statement.
    ///
    /// `return e` gives the type of `e`; both arms of an `if` must agree;
    /// a `while` gives the type of its body. Anything else, and an empty
    /// block, gives `None`.
    pub(super) fn return_type(&self, stmts: &[Spanned<Stmt>]) -> Result<Type, CompileError> {
        let Some(last) = stmts.last() else {
            return Ok(Type::None);
        };
        match &last.node {
            Stmt::Return(expr) => Ok(self.check_expr(expr)?.1),
            Stmt::If { body, orelse, .. } => {
                let yes = self.return_type(body)?;
                let no = self.return_type(orelse)?;
                if yes != no {
                    return Err(CompileError::type_error(
                        format!(
                            "two branches have different return types, one is {}, one is {}",
                            yes, no
                        ),
                        last.span.clone(),
                    ));
                }
                Ok(yes)
            }
            Stmt::While { body, .. } => self.return_type(body),
            Stmt::Assign { .. } | Stmt::Expr(_) | Stmt::Pass | Stmt::FieldAssign { .. } => {
                Ok(Type::None)
            }
        }
    }
}
