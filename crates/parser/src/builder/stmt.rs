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
use ast::stmt::Stmt;
use ast::VarDef;

impl<'src> Builder<'src> {
    /// Build the statements of a `Body` node.
    ///
    /// With `allow_defs`, variable definitions may lead the block (function
    /// bodies). Inside `if`/`while` they are rejected.
    pub(super) fn build_block(
        &self,
        node: &SyntaxNode,
        allow_defs: bool,
    ) -> BuildResult<(Vec<Spanned<VarDef>>, Vec<Spanned<Stmt>>)> {
        let mut cursor = Cursor::new(node);
        let colon = self.next(&mut cursor)?;
        self.assert_token(colon, ":")?;

        let mut defs = Vec::new();
        let mut stmts = Vec::new();
        let mut stmt_mode = false;
        while let Some(child) = cursor.next_sibling() {
            match (self.classify(child), stmt_mode) {
                (Form::Stmt, _) => {
                    stmt_mode = true;
                    stmts.push(self.build_stmt(child)?);
                }
                (_, true) => {
                    return Err(self.error(child, "Declaration cannot be after Statement"))
                }
                (Form::VarDef, false) if allow_defs => defs.push(self.build_var_def(child)?),
                (Form::VarDef, false) => {
                    return Err(self.error(child, "Can't have variable declaration here"))
                }
                (Form::FuncDef, false) => {
                    return Err(self.error(child, "Nested function definition not allowed"))
                }
                (Form::Class, false) => {
                    return Err(self.error(child, "Nested class definition not allowed"))
                }
            }
        }
        Ok((defs, stmts))
    }

    pub(super) fn build_stmt(&self, node: &SyntaxNode) -> BuildResult<Spanned<Stmt>> {
        let stmt = match node.kind {
            NodeKind::AssignStatement => self.build_assign(node)?,
            NodeKind::PassStatement => Stmt::Pass,
            NodeKind::ReturnStatement => self.build_return(node)?,
            NodeKind::ExpressionStatement => {
                let mut cursor = Cursor::new(node);
                let expr = self.build_expr(self.next(&mut cursor)?)?;
                self.finish(&cursor)?;
                Stmt::Expr(expr)
            }
            NodeKind::IfStatement => {
                let mut cursor = Cursor::new(node);
                let keyword = self.next(&mut cursor)?;
                self.assert_token(keyword, "if")?;
                let stmt = self.build_if(&mut cursor, node.span.end)?;
                self.finish(&cursor)?;
                stmt.node
            }
            NodeKind::WhileStatement => {
                let mut cursor = Cursor::new(node);
                self.next(&mut cursor)?; // `while`
                let test = self.build_expr(self.next(&mut cursor)?)?;
                let (_, body) = self.build_block(self.next_kind(&mut cursor, NodeKind::Body)?, false)?;
                self.finish(&cursor)?;
                Stmt::While { test, body }
            }
            _ => return Err(self.error(node, format!("Unsupported statement: {}", node.kind))),
        };
        Ok(Spanned::new(stmt, node.span.clone()))
    }

    /// `name = value`. Chained or attribute targets are rejected.
    fn build_assign(&self, node: &SyntaxNode) -> BuildResult<Stmt> {
        let mut cursor = Cursor::new(node);
        let target = self.next_kind(&mut cursor, NodeKind::VariableName)?;
        self.next_kind(&mut cursor, NodeKind::AssignOp)?;
        let value = self.build_expr(self.next(&mut cursor)?)?;
        self.finish(&cursor)?;
        Ok(Stmt::Assign {
            target: self.text(target).to_string(),
            value,
        })
    }

    /// A bare `return` yields `None`.
    fn build_return(&self, node: &SyntaxNode) -> BuildResult<Stmt> {
        let mut cursor = Cursor::new(node);
        let keyword = self.next(&mut cursor)?;
        let value = match cursor.next_sibling() {
            Some(expr) => self.build_expr(expr)?,
            None => Expr::new(ExprKind::Literal(Literal::None), keyword.span.clone()),
        };
        self.finish(&cursor)?;
        Ok(Stmt::Return(value))
    }

    /// Builds one `if`/`elif` arm with the cursor just past its keyword.
    /// A following `elif` becomes the only statement of `orelse`; an `else`
    /// contributes its body; no tail leaves `orelse` empty.
    fn build_if(&self, cursor: &mut Cursor<'_>, end: usize) -> BuildResult<Spanned<Stmt>> {
        let start = cursor.current().span.start;
        let test = self.build_expr(self.next(cursor)?)?;
        let (_, body) = self.build_block(self.next_kind(cursor, NodeKind::Body)?, false)?;

        let orelse = match cursor.next_sibling() {
            None => Vec::new(),
            Some(keyword) => match self.text(keyword) {
                "elif" => vec![self.build_if(cursor, end)?],
                "else" => {
                    let (_, stmts) =
                        self.build_block(self.next_kind(cursor, NodeKind::Body)?, false)?;
                    stmts
                }
                _ => return Err(self.error(keyword, "Expecting elif or else")),
            },
        };

        Ok(Spanned::new(Stmt::If { test, body, orelse }, start..end))
    }
}
