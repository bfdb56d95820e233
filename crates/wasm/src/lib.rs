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

//! Semantic analysis and WebAssembly code generation.
//!
//! [`analyze`] checks a parsed [`ast::Program`] and returns the typed tree;
//! [`generate`] lowers it to an instruction-level [`Module`], which renders as
//! WAT through `Display` and as a binary through [`encode`].

pub mod compiler;
pub mod encode;
pub mod error;
pub mod functions;
pub mod host;
pub mod type_checker;
pub mod types;
mod wat;

#[cfg(test)]
mod tests;

pub use compiler::generate;
pub use compiler::instr::{Func, Global, Instr, Module};
pub use encode::encode;
pub use error::{CodegenError, CompileError};
pub use host::{HostImport, ENTRY_EXPORT, IMPORT_MODULE};
pub use type_checker::{analyze, Analysis};
