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

use thiserror::Error;
use wasm::HostImport;

/// A trap or a malformed module. Execution stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("integer divide by zero")]
    DivideByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("unreachable executed")]
    Unreachable,

    #[error("no export named '{0}'")]
    UnknownExport(String),

    #[error("'{name}' expects {expected} arguments but got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("operand stack underflow")]
    StackUnderflow,

    #[error("call stack exhausted ({0} frames)")]
    CallStackExhausted(usize),

    #[error("call to unknown function '{0}'")]
    UnknownFunction(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("branch depth {0} has no enclosing label")]
    InvalidBranch(u32),

    #[error("host function '{import}' failed: {message}")]
    Host { import: HostImport, message: String },
}
