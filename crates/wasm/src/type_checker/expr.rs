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

use super::*;
use ast::expr::{Expr, ExprKind};
use ast::op::{BinOp, UnaryOp};

type Checked = Result<(Expr, Type), CompileError>;

/// Fails unless `got` is exactly `expected`.
pub(super) fn expect_type(expr: &Expr, expected: &Type, got: &Type) -> Result<(), CompileError> {
    if expected == got {
        Ok(())
    } else {
        Err(mismatch(expr, expected, got, expr.span.clone()))
    }
}

impl TypeChecker<'_> {
    /// Type an expression. Returns a new annotated node together with its type.
    pub(super) fn check_expr(&self, expr: &Expr) -> Checked {
        let span = expr.span.clone();
        let (kind, ty) = match &expr.kind {
            ExprKind::Literal(lit) => (ExprKind::Literal(lit.clone()), lit.ty()),

            ExprKind::Name(name) => {
                let binding = self
                    .vars
                    .get(name)
                    .ok_or_else(|| CompileError::undefined(name, span.clone()))?;
                (ExprKind::Name(name.clone()), binding.ty.clone())
            }

            ExprKind::Call { func, args } => return self.check_call(func, args, span),

            ExprKind::BinOp { left, op, right } => {
                return self.check_binop(left, *op, right, span)
            }

            ExprKind::UnaryOp { op, operand } => {
                let (operand, got) = self.check_expr(operand)?;
                let ty = match op {
                    UnaryOp::Neg => Type::Int,
                    UnaryOp::Not => Type::Bool,
                };
                expect_type(&operand, &ty, &got)?;
                (
                    ExprKind::UnaryOp {
                        op: *op,
                        operand: Box::new(operand),
                    },
                    ty,
                )
            }

            ExprKind::Paren(inner) => {
                let (inner, ty) = self.check_expr(inner)?;
                (ExprKind::Paren(Box::new(inner)), ty)
            }

            ExprKind::Attribute { .. } | ExprKind::Construct { .. } => {
                return Err(CompileError::type_error(
                    format!("expression: {}, classes are not supported", expr),
                    span,
                ))
            }
        };
        Ok((Expr::typed(kind, span, ty.clone()), ty))
    }

    fn check_binop(&self, left: &Expr, op: BinOp, right: &Expr, span: Span) -> Checked {
        let (left, left_ty) = self.check_expr(left)?;

        let (right, ty) = if op == BinOp::Is {
            // Only `x is None` is allowed; the right side is never evaluated
            if !right.is_none_literal() {
                return Err(CompileError::type_error(
                    "right operand of 'is' can only be None",
                    right.span.clone(),
                ));
            }
            (none_literal(right.span.clone()), Type::Bool)
        } else {
            let (right, right_ty) = self.check_expr(right)?;
            if op.is_arithmetic() {
                expect_type(&left, &Type::Int, &left_ty)?;
                expect_type(&right, &Type::Int, &right_ty)?;
                (right, Type::Int)
            } else {
                expect_type(&right, &left_ty, &right_ty)?;
                (right, Type::Bool)
            }
        };

        let kind = ExprKind::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
        Ok((Expr::typed(kind, span, ty.clone()), ty))
    }

    fn check_call(&self, func: &str, args: &[Expr], span: Span) -> Checked {
        let (params, ret): (Vec<Option<Type>>, Type) = match Builtin::from_name(func) {
            Some(builtin) => {
                let param = match builtin {
                    Builtin::Print => None,
                    _ => Some(Type::Int),
                };
                let ret = match builtin {
                    Builtin::Print => Type::None,
                    _ => Type::Int,
                };
                (vec![param; builtin.arity()], ret)
            }
            None => {
                let sig = self
                    .functions
                    .get(func)
                    .ok_or_else(|| CompileError::undefined(func, span.clone()))?;
                (sig.params.iter().cloned().map(Some).collect(), sig.ret.clone())
            }
        };

        if args.len() != params.len() {
            return Err(CompileError::arity(func, params.len(), args.len(), span));
        }

        let mut typed = Vec::with_capacity(args.len());
        for (arg, param) in args.iter().zip(&params) {
            let (arg, got) = self.check_expr(arg)?;
            if let Some(expected) = param {
                expect_type(&arg, expected, &got)?;
            }
            typed.push(arg);
        }

        let kind = ExprKind::Call {
            func: func.to_string(),
            args: typed,
        };
        Ok((Expr::typed(kind, span, ret.clone()), ret))
    }
}
