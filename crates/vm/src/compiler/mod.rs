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

//! Lowers a generated module to flat per-function instruction lists.

mod translate;

use std::collections::HashMap;

use log::debug;
use wasm::{Func, HostImport, Module};

use crate::error::RuntimeError;
use crate::instruction::Instruction;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    pub name: String,
    pub params: usize,
    /// Declared locals, excluding parameters
    pub locals: usize,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledModule {
    /// User functions in declaration order, then the entry
    pub functions: Vec<CompiledFunction>,
    pub globals: Vec<(String, i32)>,
    pub exports: HashMap<String, usize>,
}

impl CompiledModule {
    pub fn global_index(&self, name: &str) -> Option<usize> {
        self.globals.iter().position(|(global, _)| global == name)
    }
}

/// Translates every function of one module against the module's name tables.
pub struct Compiler<'m> {
    module: &'m Module,
    functions: HashMap<&'m str, usize>,
    globals: HashMap<&'m str, usize>,
}

impl<'m> Compiler<'m> {
    pub fn new(module: &'m Module) -> Self {
        let functions = module
            .functions
            .iter()
            .enumerate()
            .filter_map(|(index, func)| func.id.as_deref().map(|id| (id, index)))
            .collect();
        let globals = module
            .globals
            .iter()
            .enumerate()
            .map(|(index, global)| (global.name.as_str(), index))
            .collect();
        Self {
            module,
            functions,
            globals,
        }
    }

    pub fn compile_module(&self) -> Result<CompiledModule, RuntimeError> {
        let mut functions = Vec::with_capacity(self.module.functions.len() + 1);
        let mut exports = HashMap::new();

        for func in self.module.functions.iter().chain(std::iter::once(&self.module.entry)) {
            if let Some(export) = &func.export {
                exports.insert(export.clone(), functions.len());
            }
            functions.push(self.compile_function(func)?);
        }

        debug!(
            "translated {} functions, {} exports",
            functions.len(),
            exports.len()
        );
        Ok(CompiledModule {
            functions,
            globals: self
                .module
                .globals
                .iter()
                .map(|g| (g.name.clone(), g.init))
                .collect(),
            exports,
        })
    }

    fn compile_function(&self, func: &Func) -> Result<CompiledFunction, RuntimeError> {
        let slots: HashMap<&str, usize> = func
            .params
            .iter()
            .chain(&func.locals)
            .enumerate()
            .map(|(slot, name)| (name.as_str(), slot))
            .collect();

        let mut translator = translate::FunctionTranslator::new(self, slots);
        translator.translate_function(&func.body)?;

        Ok(CompiledFunction {
            name: func
                .id
                .clone()
                .or_else(|| func.export.clone())
                .unwrap_or_default(),
            params: func.params.len(),
            locals: func.locals.len(),
            instructions: translator.finish(),
        })
    }

    /// User functions shadow host imports of the same name.
    fn resolve_call(&self, name: &str) -> Result<Instruction, RuntimeError> {
        if let Some(&index) = self.functions.get(name) {
            return Ok(Instruction::Call(index));
        }
        HostImport::from_name(name)
            .map(Instruction::CallHost)
            .ok_or_else(|| RuntimeError::UnknownFunction(name.to_string()))
    }

    fn resolve_global(&self, name: &str) -> Result<usize, RuntimeError> {
        self.globals
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownVariable(name.to_string()))
    }
}
