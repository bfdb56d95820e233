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
    pub(super) fn parse_stmt(&mut self) -> ParseResult<SyntaxNode> {
        match self.peek_token() {
            Token::Def => self.parse_function_def(),
            Token::Class => self.parse_class_def(),
            Token::If => self.parse_if(),
            Token::While => self.parse_while(),
            Token::Return => self.parse_return(),
            Token::Pass => self.parse_keyword_stmt(NodeKind::PassStatement),
            Token::Break => self.parse_keyword_stmt(NodeKind::BreakStatement),
            Token::Continue => self.parse_keyword_stmt(NodeKind::ContinueStatement),
            _ => self.parse_expr_or_assign_stmt(),
        }
    }

    // --- Simple statements ---

    fn parse_keyword_stmt(&mut self, kind: NodeKind) -> ParseResult<SyntaxNode> {
        let keyword = self.bump(NodeKind::Keyword);
        self.end_of_statement()?;
        Ok(SyntaxNode::branch(kind, vec![keyword]))
    }

    fn parse_return(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = vec![self.bump(NodeKind::Keyword)];
        if !matches!(
            self.peek_token(),
            Token::Newline | Token::Dedent | Token::Eof
        ) {
            children.push(self.parse_expr()?);
        }
        self.end_of_statement()?;
        Ok(SyntaxNode::branch(NodeKind::ReturnStatement, children))
    }

    /// `target [: type] = value [= value ...]` or a bare expression.
    fn parse_expr_or_assign_stmt(&mut self) -> ParseResult<SyntaxNode> {
        let expr = self.parse_expr()?;

        let mut children = vec![expr];
        if self.peek_token() == Token::Colon {
            children.push(self.parse_type_def(Token::Colon)?);
        }

        while self.peek_token() == Token::Assign {
            children.push(self.bump(NodeKind::AssignOp));
            children.push(self.parse_expr()?);
        }
        self.end_of_statement()?;

        let kind = if children.len() == 1 {
            NodeKind::ExpressionStatement
        } else {
            NodeKind::AssignStatement
        };
        Ok(SyntaxNode::branch(kind, children))
    }

    // --- Compound statements ---

    fn parse_if(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = vec![self.bump(NodeKind::Keyword)]; // `if`
        children.push(self.parse_expr()?);
        children.push(self.parse_body()?);

        while self.peek_token() == Token::Elif {
            children.push(self.bump(NodeKind::Keyword));
            children.push(self.parse_expr()?);
            children.push(self.parse_body()?);
        }

        if self.peek_token() == Token::Else {
            children.push(self.bump(NodeKind::Keyword));
            children.push(self.parse_body()?);
        }

        Ok(SyntaxNode::branch(NodeKind::IfStatement, children))
    }

    fn parse_while(&mut self) -> ParseResult<SyntaxNode> {
        let keyword = self.bump(NodeKind::Keyword);
        let test = self.parse_expr()?;
        let body = self.parse_body()?;
        Ok(SyntaxNode::branch(
            NodeKind::WhileStatement,
            vec![keyword, test, body],
        ))
    }

    /// `def name(params) [-> type]: body`
    fn parse_function_def(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = vec![self.bump(NodeKind::Keyword)];
        children.push(self.expect_name()?);
        children.push(self.parse_param_list()?);
        if self.peek_token() == Token::Arrow {
            children.push(self.parse_type_def(Token::Arrow)?);
        }
        children.push(self.parse_body()?);
        Ok(SyntaxNode::branch(NodeKind::FunctionDefinition, children))
    }

    /// `(name[: type], ...)`
    fn parse_param_list(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = vec![self.expect(Token::LParen, NodeKind::Punctuation)?];
        while self.peek_token() != Token::RParen {
            children.push(self.expect_name()?);
            if self.peek_token() == Token::Colon {
                children.push(self.parse_type_def(Token::Colon)?);
            }
            if self.peek_token() == Token::Comma {
                children.push(self.bump(NodeKind::Punctuation));
            } else {
                break;
            }
        }
        children.push(self.expect(Token::RParen, NodeKind::Punctuation)?);
        Ok(SyntaxNode::branch(NodeKind::ParamList, children))
    }

    /// `class Name[(bases)]: body`
    fn parse_class_def(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = vec![self.bump(NodeKind::Keyword)];
        children.push(self.expect_name()?);
        if self.peek_token() == Token::LParen {
            children.push(self.parse_arg_list()?);
        }
        children.push(self.parse_body()?);
        Ok(SyntaxNode::branch(NodeKind::ClassDefinition, children))
    }
}
