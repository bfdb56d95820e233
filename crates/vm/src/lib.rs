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

//! Reference host for generated modules.
//!
//! The [`Machine`] runs a [`wasm::Module`] the way a WebAssembly engine
//! would run its binary, with the host primitives supplied by a [`Host`].

pub mod compiler;
pub mod error;
pub mod host;
pub mod instruction;
mod vm;

#[cfg(test)]
mod tests;

pub use error::RuntimeError;
pub use host::{Host, HostEvent, RecordingHost, StdoutHost};
pub use vm::{Machine, DEFAULT_MAX_DEPTH};
