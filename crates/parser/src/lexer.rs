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
use logos::{Logos, Span};
use std::collections::VecDeque;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\f]+")] // skip spaces/tabs/form feed but not newlines
pub enum Token {
    #[regex(r"\r?\n")]
    Newline,

    Indent,
    Dedent,

    // Keywords. `and`, `or`, `not`, `is` and `in` stay names and are
    // recognized by text where an operator is allowed.
    #[token("def")] Def,
    #[token("class")] Class,
    #[token("if")] If,
    #[token("elif")] Elif,
    #[token("else")] Else,
    #[token("while")] While,
    #[token("return")] Return,
    #[token("pass")] Pass,
    #[token("break")] Break,
    #[token("continue")] Continue,
    #[token("True")] True,
    #[token("False")] False,
    #[token("None")] None_,

    // Multi-char operators
    #[token("**")] Pow,
    #[token("//")] FloorDiv,
    #[token("==")] Eq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("->")] Arrow,

    // Single-char operators
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("<")] Lt,
    #[token(">")] Gt,
    #[token("=")] Assign,
    #[token(":")] Colon,
    #[token(".")] Dot,
    #[token(",")] Comma,
    #[token("(")] LParen,
    #[token(")")] RParen,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#"'([^'\\\n]|\\.)*'|"([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"#[^\n]*")]
    Comment,

    Eof,

    Error,
}

pub type SpannedToken = (Token, Span);

/// Wraps the Logos lexer and emits `Indent` / `Dedent` tokens from the
/// leading whitespace of each logical line.
pub struct IndentLexer<'src> {
    source: &'src str,
    raw: Vec<SpannedToken>,
    pos: usize,
    /// Column widths of the open blocks; always starts with `[0]`
    indent_stack: Vec<usize>,
    /// Synthetic tokens waiting to be emitted before the next raw token
    pending: VecDeque<SpannedToken>,
    finished: bool,
    /// Newlines inside parentheses do not end a logical line
    paren_depth: usize,
}

impl<'src> IndentLexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let raw = Token::lexer(source)
            .spanned()
            .map(|(token, span)| (token.unwrap_or(Token::Error), span))
            .filter(|(token, _)| *token != Token::Comment)
            .collect();

        Self {
            source,
            raw,
            pos: 0,
            indent_stack: vec![0],
            pending: VecDeque::new(),
            finished: false,
            paren_depth: 0,
        }
    }

    /// Leading whitespace width of the line starting at `start`. Tabs advance
    /// to the next multiple of 8.
    fn measure_indent(&self, start: usize) -> usize {
        let mut col = 0;
        for ch in self.source[start..].chars() {
            match ch {
                ' ' => col += 1,
                '\t' => col = (col / 8 + 1) * 8,
                _ => break,
            }
        }
        col
    }

    fn line_start(&self, offset: usize) -> usize {
        self.source[..offset]
            .rfind('\n')
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    fn queue_indent_change(&mut self, new_indent: usize, span: Span) {
        let current = self.indent_stack.last().copied().unwrap_or(0);

        if new_indent > current {
            self.indent_stack.push(new_indent);
            self.pending.push_back((Token::Indent, span));
            return;
        }

        while self.indent_stack.last().is_some_and(|&top| top > new_indent) {
            self.indent_stack.pop();
            self.pending.push_back((Token::Dedent, span.clone()));
        }
        // unindent does not match any outer indentation level
        if self.indent_stack.last().copied().unwrap_or(0) != new_indent {
            self.pending.push_back((Token::Error, span));
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        let eof_span = self.source.len()..self.source.len();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending.push_back((Token::Dedent, eof_span.clone()));
        }
        self.pending.push_back((Token::Eof, eof_span));
    }
}

impl Iterator for IndentLexer<'_> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<SpannedToken> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            if self.pos >= self.raw.len() {
                self.finish();
                continue;
            }

            let (token, span) = self.raw[self.pos].clone();
            self.pos += 1;

            match token {
                Token::LParen => self.paren_depth += 1,
                Token::RParen => self.paren_depth = self.paren_depth.saturating_sub(1),
                Token::Newline if self.paren_depth > 0 => continue,
                Token::Newline => {
                    // Blank lines never change indentation
                    while self.raw.get(self.pos).is_some_and(|(t, _)| *t == Token::Newline) {
                        self.pos += 1;
                    }
                    let new_indent = match self.raw.get(self.pos) {
                        Some((_, next)) => self.measure_indent(self.line_start(next.start)),
                        None => 0,
                    };
                    self.queue_indent_change(new_indent, span.clone());
                }
                _ => {}
            }
            return Some((token, span));
        }
    }
}
