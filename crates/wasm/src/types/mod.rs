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

use ast::types::Type;
use wasm_encoder::ValType;
use std::fmt;

use crate::error::CodegenError;

/// The machine type a source value is represented by.
///
/// `int`, `bool` and `None` all share one 32-bit word: a bool is `0`/`1`
/// and `None` is `0`. Nothing at runtime tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WasmType {
    I32,
}

impl WasmType {
    /// Classes have no runtime representation.
    pub fn from_type(ty: &Type) -> Result<WasmType, CodegenError> {
        match ty {
            Type::Int | Type::Bool | Type::None => Ok(WasmType::I32),
            Type::Class(_) => Err(CodegenError::NoRuntimeRepresentation(ty.clone())),
        }
    }

    pub fn to_val_type(self) -> ValType {
        match self {
            WasmType::I32 => ValType::I32,
        }
    }
}

impl fmt::Display for WasmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasmType::I32 => write!(f, "i32"),
        }
    }
}
