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

pub mod builder;
pub mod cst;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod tests;

use log::debug;

pub use builder::{Builder, SyntaxError};
pub use cst::{NodeKind, SyntaxNode, SyntaxTree};
pub use parser::ParseError;

use ast::Program;
use lexer::IndentLexer;
use parser::Parser;

/// Parse `source` into a concrete syntax tree.
pub fn parse(source: &str) -> Result<SyntaxTree<'_>, ParseError> {
    let mut parser = Parser::new(source, IndentLexer::new(source));
    let root = parser.parse_script()?;
    debug!("parsed {} top-level nodes", root.children.len());
    Ok(SyntaxTree { source, root })
}

/// Parse and build `source` into an untyped [`Program`].
pub fn parse_program(source: &str) -> Result<Program, SyntaxError> {
    let tree = parse(source).map_err(|e| SyntaxError::from_parse_error(e, source))?;
    let program = Builder::build(&tree)?;
    debug!(
        "built program: {} definitions, {} statements, {} classes",
        program.defs.len(),
        program.stmts.len(),
        program.classes.len()
    );
    Ok(program)
}
