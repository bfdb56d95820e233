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

//! Ahead-of-time compiler from a statically typed Python subset to
//! WebAssembly.
//!
//! ```text
//! source ─ parser ─▶ Program ─ analyze ─▶ Analysis ─ generate ─▶ Module ─▶ WAT / wasm
//! ```

use ast::Program;
use log::debug;
use parser::SyntaxError;
use thiserror::Error;
use wasm::{Analysis, CodegenError, CompileError, Module};

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("{0}")]
    Semantic(#[from] CompileError),

    #[error("{0}")]
    Internal(#[from] CodegenError),
}

/// Everything one successful compilation produced.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The tree as parsed, without types
    pub program: Program,
    pub analysis: Analysis,
    pub module: Module,
}

impl Compilation {
    /// Module text in the folded format.
    pub fn wat(&self) -> String {
        self.module.to_string()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, Error> {
        Ok(wasm::encode(&self.module)?)
    }
}

/// Parse and type-check `source` without generating code.
pub fn check(source: &str) -> Result<(Program, Analysis), Error> {
    let program = parser::parse_program(source)?;
    let analysis = wasm::analyze(&program)?;
    debug!("analysis finished");
    Ok((program, analysis))
}

/// Run the whole pipeline on `source`.
pub fn compile(source: &str) -> Result<Compilation, Error> {
    let (program, analysis) = check(source)?;
    let module = wasm::generate(&analysis)?;
    debug!(
        "generated module with {} functions and {} globals",
        module.functions.len() + 1,
        module.globals.len()
    );
    Ok(Compilation {
        program,
        analysis,
        module,
    })
}
