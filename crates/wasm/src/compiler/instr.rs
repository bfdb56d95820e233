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

//! Instruction-level representation of a generated module.
//!
//! Every value is an `i32`. Variables and functions are referred to by name;
//! indices are only assigned when the module is encoded to binary.

/// One stack-machine instruction. Structured control owns its bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    I32Const(i32),
    LocalGet(String),
    LocalSet(String),
    GlobalGet(String),
    GlobalSet(String),
    /// Call a user function or a host import by name
    Call(String),

    I32Add,
    I32Sub,
    I32Mul,
    I32DivS,
    I32RemS,
    I32Eq,
    I32Ne,
    I32LeS,
    I32GeS,
    I32LtS,
    I32GtS,

    Drop,
    Return,
    Unreachable,

    /// Pops the condition; runs `then` when it is non-zero
    If {
        then: Vec<Instr>,
        else_: Vec<Instr>,
    },
    Block(Vec<Instr>),
    Loop(Vec<Instr>),
    /// Exits the `n`-th enclosing block, or restarts it if it is a loop
    Br(u32),
    BrIf(u32),
}

/// A mutable `i32` module-level cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global {
    pub name: String,
    pub init: i32,
}

/// A function taking `params.len()` `i32`s and returning one `i32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    /// Symbolic name; the entry function has none.
    pub id: Option<String>,
    pub export: Option<String>,
    pub params: Vec<String>,
    pub locals: Vec<String>,
    pub body: Vec<Instr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub globals: Vec<Global>,
    /// User functions in declaration order
    pub functions: Vec<Func>,
    pub entry: Func,
}

impl Module {
    pub fn function(&self, name: &str) -> Option<&Func> {
        self.functions
            .iter()
            .find(|f| f.id.as_deref() == Some(name))
    }

    /// The function exported as `name`.
    pub fn export(&self, name: &str) -> Option<&Func> {
        std::iter::once(&self.entry)
            .chain(&self.functions)
            .find(|f| f.export.as_deref() == Some(name))
    }
}
