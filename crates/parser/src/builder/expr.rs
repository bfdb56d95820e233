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
use ast::expr::{Expr, ExprKind, Literal};
use ast::op::{BinOp, UnaryOp};

impl<'src> Builder<'src> {
    pub(super) fn build_expr(&self, node: &SyntaxNode) -> BuildResult<Expr> {
        let kind = match node.kind {
            NodeKind::Boolean => ExprKind::Literal(Literal::Bool(self.text(node) == "True")),
            NodeKind::None => ExprKind::Literal(Literal::None),
            NodeKind::Number => ExprKind::Literal(Literal::Int(self.build_int(node)?)),
            NodeKind::VariableName => ExprKind::Name(self.text(node).to_string()),

            NodeKind::CallExpression => {
                let mut cursor = Cursor::new(node);
                let callee = self.next(&mut cursor)?;
                if callee.kind != NodeKind::VariableName {
                    return Err(self.error(callee, "Only named functions can be called"));
                }
                let args = self.build_args(self.next_kind(&mut cursor, NodeKind::ArgList)?)?;
                self.finish(&cursor)?;
                ExprKind::Call {
                    func: self.text(callee).to_string(),
                    args,
                }
            }

            NodeKind::BinaryExpression => {
                let mut cursor = Cursor::new(node);
                let left = self.build_expr(self.next(&mut cursor)?)?;
                let op_node = self.next_kind(&mut cursor, NodeKind::Operator)?;
                // `is not` spans two words
                let symbol = self.text(op_node).split_whitespace().collect::<Vec<_>>().join(" ");
                let op = BinOp::from_symbol(&symbol)
                    .ok_or_else(|| self.error(op_node, format!("{} is not supported", symbol)))?;
                let right = self.build_expr(self.next(&mut cursor)?)?;
                self.finish(&cursor)?;
                ExprKind::BinOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                }
            }

            NodeKind::UnaryExpression => {
                let mut cursor = Cursor::new(node);
                let op_node = self.next_kind(&mut cursor, NodeKind::Operator)?;
                let op = UnaryOp::from_symbol(self.text(op_node))
                    .ok_or_else(|| self.error(op_node, "Unsupported operator"))?;
                let operand = self.build_expr(self.next(&mut cursor)?)?;
                self.finish(&cursor)?;
                ExprKind::UnaryOp {
                    op,
                    operand: Box::new(operand),
                }
            }

            NodeKind::ParenthesizedExpression => {
                let mut cursor = Cursor::new(node);
                self.assert_token(self.next(&mut cursor)?, "(")?;
                let inner = self.build_expr(self.next(&mut cursor)?)?;
                self.assert_token(self.next(&mut cursor)?, ")")?;
                self.finish(&cursor)?;
                ExprKind::Paren(Box::new(inner))
            }

            _ => return Err(self.error(node, "Unsupported expression")),
        };
        Ok(Expr::new(kind, node.span.clone()))
    }

    fn build_int(&self, node: &SyntaxNode) -> BuildResult<i32> {
        let text = self.text(node);
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.error(node, "Unsupported number literal"));
        }
        text.parse::<i32>()
            .map_err(|_| self.error(node, "Integer literal out of range"))
    }

    /// `(a, b, ...)`, trailing comma allowed.
    fn build_args(&self, node: &SyntaxNode) -> BuildResult<Vec<Expr>> {
        let mut cursor = Cursor::new(node);
        self.assert_token(self.next(&mut cursor)?, "(")?;

        let mut args = Vec::new();
        loop {
            let item = self.next(&mut cursor)?;
            if item.kind == NodeKind::Punctuation && self.text(item) == ")" {
                break;
            }
            args.push(self.build_expr(item)?);

            let sep = self.next(&mut cursor)?;
            match self.text(sep) {
                "," => {}
                ")" => break,
                _ => return Err(self.error(sep, "Unexpected token")),
            }
        }
        self.finish(&cursor)?;
        Ok(args)
    }
}
