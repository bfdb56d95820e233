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
use ast::expr::{ExprKind, Literal};
use ast::op::UnaryOp;
use ast::types::Type;
use ast::{Body, ClassDef, FuncDef, Param, VarDef};

impl<'src> Builder<'src> {
    /// `name: type = literal`
    pub(super) fn build_var_def(&self, node: &SyntaxNode) -> BuildResult<Spanned<VarDef>> {
        let mut cursor = Cursor::new(node);
        let name = self.next_kind(&mut cursor, NodeKind::VariableName)?;

        let type_node = self.next(&mut cursor)?;
        if type_node.kind != NodeKind::TypeDef {
            return Err(self.error(type_node, "Missing type declaration"));
        }
        let ty = self.build_type_def(type_node)?;

        self.next_kind(&mut cursor, NodeKind::AssignOp)?;
        let value_node = self.next(&mut cursor)?;
        let value = self.build_expr(value_node)?;
        self.finish(&cursor)?;

        let init = self
            .literal_initializer(&value.kind)
            .ok_or_else(|| self.error(value_node, "Declaration has to be literal"))?;

        Ok(Spanned::new(
            VarDef {
                name: self.text(name).to_string(),
                ty,
                init: Spanned::new(init, value.span),
            },
            node.span.clone(),
        ))
    }

    /// A literal, or a negated integer literal folded into one.
    fn literal_initializer(&self, kind: &ExprKind) -> Option<Literal> {
        match kind {
            ExprKind::Literal(lit) => Some(lit.clone()),
            ExprKind::UnaryOp {
                op: UnaryOp::Neg,
                operand,
            } => match &operand.kind {
                ExprKind::Literal(Literal::Int(value)) => Some(Literal::Int(value.wrapping_neg())),
                _ => None,
            },
            _ => None,
        }
    }

    /// `: type` or `-> type`
    pub(super) fn build_type_def(&self, node: &SyntaxNode) -> BuildResult<Spanned<Type>> {
        let mut cursor = Cursor::new(node);
        self.next(&mut cursor)?; // `:` or `->`
        let ty_node = self.next(&mut cursor)?;
        let ty = match ty_node.kind {
            NodeKind::VariableName | NodeKind::None => Type::from_annotation(self.text(ty_node)),
            _ => None,
        }
        .ok_or_else(|| self.error(ty_node, "Unsupported type"))?;
        self.finish(&cursor)?;
        Ok(Spanned::new(ty, ty_node.span.clone()))
    }

    /// `def name(params) [-> type]: body`. Without an annotation the
    /// function returns `None`.
    pub(super) fn build_func_def(&self, node: &SyntaxNode) -> BuildResult<FuncDef> {
        let mut cursor = Cursor::new(node);
        let keyword = self.next(&mut cursor)?;
        self.assert_token(keyword, "def")?;
        let name = self.next_kind(&mut cursor, NodeKind::VariableName)?;
        let params = self.build_params(self.next_kind(&mut cursor, NodeKind::ParamList)?)?;

        let mut next = self.next(&mut cursor)?;
        let mut ret = Type::None;
        if next.kind == NodeKind::TypeDef {
            ret = self.build_type_def(next)?.node;
            next = self.next(&mut cursor)?;
        }
        self.assert_kind(next, NodeKind::Body)?;
        let (defs, stmts) = self.build_block(next, true)?;
        self.finish(&cursor)?;

        Ok(FuncDef {
            name: self.text(name).to_string(),
            params,
            ret,
            body: Body { defs, stmts },
        })
    }

    /// `(name: type, ...)`. Every parameter must be annotated.
    fn build_params(&self, node: &SyntaxNode) -> BuildResult<Vec<Param>> {
        let mut cursor = Cursor::new(node);
        let open = self.next(&mut cursor)?;
        self.assert_token(open, "(")?;

        let mut params = Vec::new();
        let mut item = self.next(&mut cursor)?;
        while self.text(item) != ")" {
            self.assert_kind(item, NodeKind::VariableName)?;
            let ty = self.build_type_def(self.next_kind(&mut cursor, NodeKind::TypeDef)?)?;
            params.push(Param {
                name: self.text(item).to_string(),
                ty: ty.node,
                span: item.span.start..ty.span.end,
            });

            let sep = self.next(&mut cursor)?;
            match self.text(sep) {
                "," => item = self.next(&mut cursor)?,
                ")" => break,
                _ => return Err(self.error(sep, "Unexpected token")),
            }
        }
        self.finish(&cursor)?;
        Ok(params)
    }

    /// `class Name[(bases)]: fields`. Only field declarations and `pass`
    /// may appear in the body.
    pub(super) fn build_class(&self, node: &SyntaxNode) -> BuildResult<Spanned<ClassDef>> {
        let mut cursor = Cursor::new(node);
        self.next(&mut cursor)?; // `class`
        let name = self.next_kind(&mut cursor, NodeKind::VariableName)?;

        let mut body = self.next(&mut cursor)?;
        if body.kind == NodeKind::ArgList {
            body = self.next(&mut cursor)?;
        }
        self.assert_kind(body, NodeKind::Body)?;
        self.finish(&cursor)?;

        let mut fields = Vec::new();
        let mut members = Cursor::new(body);
        self.next(&mut members)?; // `:`
        while let Some(member) = members.next_sibling() {
            match member.kind {
                NodeKind::PassStatement => {}
                NodeKind::AssignStatement => fields.push(self.build_var_def(member)?),
                _ => {
                    return Err(
                        self.error(member, "Only field declarations allowed in class body")
                    )
                }
            }
        }

        Ok(Spanned::new(
            ClassDef {
                name: self.text(name).to_string(),
                fields,
            },
            node.span.clone(),
        ))
    }
}
