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

impl<'src, I: Iterator<Item = SpannedToken>> Parser<'src, I> {
    pub(super) fn parse_expr(&mut self) -> ParseResult<SyntaxNode> {
        self.parse_or()
    }

    pub(super) fn binary(left: SyntaxNode, op: SyntaxNode, right: SyntaxNode) -> SyntaxNode {
        SyntaxNode::branch(NodeKind::BinaryExpression, vec![left, op, right])
    }

    fn parse_or(&mut self) -> ParseResult<SyntaxNode> {
        let mut left = self.parse_and()?;
        while self.peek_is_name("or") {
            let op = self.bump(NodeKind::Operator);
            let right = self.parse_and()?;
            left = Self::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<SyntaxNode> {
        let mut left = self.parse_not()?;
        while self.peek_is_name("and") {
            let op = self.bump(NodeKind::Operator);
            let right = self.parse_not()?;
            left = Self::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> ParseResult<SyntaxNode> {
        if self.peek_is_name("not") {
            let op = self.bump(NodeKind::Operator);
            let operand = self.parse_not()?;
            return Ok(SyntaxNode::branch(
                NodeKind::UnaryExpression,
                vec![op, operand],
            ));
        }
        self.parse_comparison()
    }

    /// Calls and member access on a primary expression.
    pub(super) fn parse_postfix(&mut self) -> ParseResult<SyntaxNode> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_token() {
                Token::LParen => {
                    let args = self.parse_arg_list()?;
                    expr = SyntaxNode::branch(NodeKind::CallExpression, vec![expr, args]);
                }
                Token::Dot => {
                    let dot = self.bump(NodeKind::Punctuation);
                    let attr = self.expect_name()?;
                    expr = SyntaxNode::branch(NodeKind::MemberExpression, vec![expr, dot, attr]);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// `(arg, ...)` with every paren and comma kept as a child.
    pub(super) fn parse_arg_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = vec![self.expect(Token::LParen, NodeKind::Punctuation)?];
        while self.peek_token() != Token::RParen {
            children.push(self.parse_expr()?);
            if self.peek_token() == Token::Comma {
                children.push(self.bump(NodeKind::Punctuation));
            } else {
                break;
            }
        }
        children.push(self.expect(Token::RParen, NodeKind::Punctuation)?);
        Ok(SyntaxNode::branch(NodeKind::ArgList, children))
    }

    fn parse_primary(&mut self) -> ParseResult<SyntaxNode> {
        match self.peek_token() {
            Token::Name => Ok(self.bump(NodeKind::VariableName)),
            Token::Number => Ok(self.bump(NodeKind::Number)),
            Token::String => Ok(self.bump(NodeKind::String)),
            Token::True | Token::False => Ok(self.bump(NodeKind::Boolean)),
            Token::None_ => Ok(self.bump(NodeKind::None)),
            Token::LParen => {
                let open = self.bump(NodeKind::Punctuation);
                let inner = self.parse_expr()?;
                let close = self.expect(Token::RParen, NodeKind::Punctuation)?;
                Ok(SyntaxNode::branch(
                    NodeKind::ParenthesizedExpression,
                    vec![open, inner, close],
                ))
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}
