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
    // == != < > <= >= is [not] [not] in
    pub(super) fn parse_comparison(&mut self) -> ParseResult<SyntaxNode> {
        let mut left = self.parse_arith()?;
        loop {
            let op = match self.peek_token() {
                Token::Eq | Token::NotEq | Token::Lt | Token::Gt | Token::Le | Token::Ge => {
                    self.bump(NodeKind::Operator)
                }
                Token::Name if self.peek_is_name("in") => self.bump(NodeKind::Operator),
                Token::Name if self.peek_is_name("is") => {
                    let mut op = self.bump(NodeKind::Operator);
                    if self.peek_is_name("not") {
                        self.advance();
                        op.span.end = self.current_span.end;
                    }
                    op
                }
                Token::Name if self.peek_is_name("not") => {
                    let start = self.peek_span().start;
                    self.advance();
                    if !self.peek_is_name("in") {
                        return Err(ParseError {
                            message: "expected 'in' after 'not' in comparison".into(),
                            span: self.peek_span(),
                        });
                    }
                    self.advance();
                    SyntaxNode::leaf(NodeKind::Operator, start..self.current_span.end)
                }
                _ => break,
            };
            let right = self.parse_arith()?;
            left = Self::binary(left, op, right);
        }
        Ok(left)
    }

    // + -
    fn parse_arith(&mut self) -> ParseResult<SyntaxNode> {
        let mut left = self.parse_term()?;
        while matches!(self.peek_token(), Token::Plus | Token::Minus) {
            let op = self.bump(NodeKind::Operator);
            let right = self.parse_term()?;
            left = Self::binary(left, op, right);
        }
        Ok(left)
    }

    // * / // %
    fn parse_term(&mut self) -> ParseResult<SyntaxNode> {
        let mut left = self.parse_factor()?;
        while matches!(
            self.peek_token(),
            Token::Star | Token::Slash | Token::FloorDiv | Token::Percent
        ) {
            let op = self.bump(NodeKind::Operator);
            let right = self.parse_factor()?;
            left = Self::binary(left, op, right);
        }
        Ok(left)
    }

    // Unary: +x, -x
    fn parse_factor(&mut self) -> ParseResult<SyntaxNode> {
        if matches!(self.peek_token(), Token::Plus | Token::Minus) {
            let op = self.bump(NodeKind::Operator);
            let operand = self.parse_factor()?; // right-associative
            return Ok(SyntaxNode::branch(
                NodeKind::UnaryExpression,
                vec![op, operand],
            ));
        }
        self.parse_power()
    }

    // ** (right-associative)
    fn parse_power(&mut self) -> ParseResult<SyntaxNode> {
        let base = self.parse_postfix()?;
        if self.peek_token() == Token::Pow {
            let op = self.bump(NodeKind::Operator);
            let exp = self.parse_factor()?;
            return Ok(Self::binary(base, op, exp));
        }
        Ok(base)
    }
}
