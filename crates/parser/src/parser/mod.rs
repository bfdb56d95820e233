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
mod binop;
mod expr;
mod statement;
mod type_hint;

use logos::Span;
use std::iter::Peekable;
use thiserror::Error;

use crate::cst::{NodeKind, SyntaxNode};
use crate::lexer::{SpannedToken, Token};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ParseError at {}..{}: {message}", .span.start, .span.end)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser from indentation-aware tokens to a concrete
/// syntax tree.
pub struct Parser<'src, I: Iterator<Item = SpannedToken>> {
    tokens: Peekable<I>,
    current_span: Span,
    source: &'src str,
}

impl<'src, I: Iterator<Item = SpannedToken>> Parser<'src, I> {
    pub fn new(source: &'src str, iterator: I) -> Self {
        Self {
            tokens: iterator.peekable(),
            current_span: 0..0,
            source,
        }
    }

    fn peek_token(&mut self) -> Token {
        self.tokens.peek().map(|(t, _)| *t).unwrap_or(Token::Eof)
    }

    fn peek_span(&mut self) -> Span {
        self.tokens
            .peek()
            .map(|(_, s)| s.clone())
            .unwrap_or(self.current_span.clone())
    }

    /// Advances to the next token and returns it, updating the current span.
    fn advance(&mut self) -> Option<Token> {
        let (token, span) = self.tokens.next()?;
        self.current_span = span;
        Some(token)
    }

    fn text(&self, span: &Span) -> &'src str {
        self.source.get(span.clone()).unwrap_or("")
    }

    /// Check if the next token is a Name whose text equals `word`.
    fn peek_is_name(&mut self, word: &str) -> bool {
        if self.peek_token() != Token::Name {
            return false;
        }
        let span = self.peek_span();
        self.text(&span) == word
    }

    fn unexpected(&mut self, expected: &str) -> ParseError {
        let tok = self.peek_token();
        let span = self.peek_span();
        let message = match tok {
            Token::Error if self.text(&span).trim().is_empty() => {
                "unindent does not match any outer indentation level".to_string()
            }
            Token::Error => format!("invalid token {:?}", self.text(&span)),
            _ => format!("expected {}, found {:?}", expected, tok),
        };
        ParseError { message, span }
    }

    /// Consumes the next token as a leaf of `kind` if it matches `expected`.
    fn expect(&mut self, expected: Token, kind: NodeKind) -> ParseResult<SyntaxNode> {
        if self.peek_token() == expected {
            self.advance();
            Ok(SyntaxNode::leaf(kind, self.current_span.clone()))
        } else {
            Err(self.unexpected(&format!("{:?}", expected)))
        }
    }

    /// Consumes the next token unconditionally as a leaf of `kind`.
    fn bump(&mut self, kind: NodeKind) -> SyntaxNode {
        self.advance();
        SyntaxNode::leaf(kind, self.current_span.clone())
    }

    fn expect_name(&mut self) -> ParseResult<SyntaxNode> {
        if self.peek_token() == Token::Name {
            Ok(self.bump(NodeKind::VariableName))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek_token() == Token::Newline {
            self.advance();
        }
    }

    fn eat(&mut self, expected: Token) -> bool {
        if self.peek_token() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Ends a simple statement: a newline, or the end of the enclosing block.
    fn end_of_statement(&mut self) -> ParseResult<()> {
        match self.peek_token() {
            Token::Newline => {
                self.advance();
                Ok(())
            }
            Token::Dedent | Token::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    // --- Top-level ---

    /// Parse a complete file into a `Script` node.
    pub fn parse_script(&mut self) -> ParseResult<SyntaxNode> {
        let mut children = Vec::new();
        self.skip_newlines();
        while self.peek_token() != Token::Eof {
            children.push(self.parse_stmt()?);
            self.skip_newlines();
        }
        Ok(SyntaxNode {
            kind: NodeKind::Script,
            span: 0..self.source.len(),
            children,
        })
    }

    // --- Block ---

    /// `: NEWLINE INDENT stmt+ DEDENT` as a `Body` whose first child is the colon.
    fn parse_body(&mut self) -> ParseResult<SyntaxNode> {
        let colon = self.expect(Token::Colon, NodeKind::Punctuation)?;
        if self.peek_token() != Token::Newline {
            return Err(self.unexpected("a newline before the indented block"));
        }
        self.advance();
        if self.peek_token() != Token::Indent {
            return Err(ParseError {
                message: "expected an indented block".into(),
                span: self.peek_span(),
            });
        }
        self.advance();

        let mut children = vec![colon];
        self.skip_newlines();
        while self.peek_token() != Token::Dedent && self.peek_token() != Token::Eof {
            children.push(self.parse_stmt()?);
            self.skip_newlines();
        }
        self.eat(Token::Dedent);
        Ok(SyntaxNode::branch(NodeKind::Body, children))
    }
}
