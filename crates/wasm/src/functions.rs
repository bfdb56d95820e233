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
use crate::compiler::instr::{Func, Instr};
use crate::error::CodegenError;
use crate::type_checker::{StorageClass, VariableEnv};

/// Name of the entry function's accumulator local.
pub const RET_LOCAL: &str = "ret";

/// Context for compiling a single function body.
///
/// Holds the variable environment the analyzer computed for this scope, the
/// slots declared so far, and a stack of open instruction lists: structured
/// instructions (`if`, `block`, `loop`) are compiled into a fresh frame and
/// wrapped when the frame is popped.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    vars: VariableEnv,
    params: Vec<String>,
    locals: Vec<String>,
    /// Innermost frame last. Never empty.
    frames: Vec<Vec<Instr>>,
    /// Expression statements feed the accumulator instead of being dropped
    top_level: bool,
}

impl FunctionContext {
    /// Context for a user function. Parameters come from the `Param`
    /// entries of `vars`, in index order.
    pub fn new(vars: VariableEnv) -> Self {
        let params = vars
            .params()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect();
        Self {
            vars,
            params,
            locals: Vec::new(),
            frames: vec![Vec::new()],
            top_level: false,
        }
    }

    /// Context for the synthesized entry function, which sees only globals
    /// and owns the accumulator.
    pub fn new_entry(globals: VariableEnv) -> Self {
        Self {
            vars: globals,
            params: Vec::new(),
            locals: vec![RET_LOCAL.to_string()],
            frames: vec![Vec::new()],
            top_level: true,
        }
    }

    /// Declare a local slot. Declaring twice is a no-op.
    pub fn declare_local(&mut self, name: &str) {
        if !self.locals.iter().any(|l| l == name) {
            self.locals.push(name.to_string());
        }
    }

    pub fn storage(&self, name: &str) -> Result<StorageClass, CodegenError> {
        self.vars
            .get(name)
            .map(|b| b.storage)
            .ok_or_else(|| CodegenError::UnboundVariable(name.to_string()))
    }

    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    pub fn emit(&mut self, instr: Instr) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(instr);
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Close the innermost frame and return its instructions. The outermost
    /// frame is the function body and is only taken by `build`.
    pub fn pop_frame(&mut self) -> Result<Vec<Instr>, CodegenError> {
        if self.frames.len() < 2 {
            return Err(CodegenError::UnbalancedFrames(self.frames.len()));
        }
        self.frames.pop().ok_or(CodegenError::UnbalancedFrames(0))
    }

    /// Build the final function from the declared slots and the body frame.
    pub fn build(
        mut self,
        id: Option<String>,
        export: Option<String>,
    ) -> Result<Func, CodegenError> {
        if self.frames.len() != 1 {
            return Err(CodegenError::UnbalancedFrames(self.frames.len()));
        }
        let body = self.frames.pop().ok_or(CodegenError::UnbalancedFrames(0))?;
        Ok(Func {
            id,
            export,
            params: self.params,
            locals: self.locals,
            body,
        })
    }
}
