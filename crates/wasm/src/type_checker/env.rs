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
use ast::Span;
use std::collections::HashMap;

use crate::error::CompileError;

/// Where a variable lives at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Module-level mutable cell
    Global,
    /// Function-scoped slot declared in the body
    Local,
    /// Function-scoped slot filled by the caller, by declaration position
    Param(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub ty: Type,
    pub storage: StorageClass,
}

/// Variables visible in one scope.
///
/// Built once per scope and only read afterwards. A function scope is the
/// global table merged with the function's own parameters and locals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableEnv {
    vars: HashMap<String, Binding>,
}

impl VariableEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding. A name already present in this table is a
    /// duplicate definition, never a shadow.
    pub fn declare(
        &mut self,
        name: &str,
        ty: Type,
        storage: StorageClass,
        span: Span,
    ) -> Result<(), CompileError> {
        if self.vars.contains_key(name) {
            return Err(CompileError::duplicate(name, span));
        }
        self.vars.insert(name.to_string(), Binding { ty, storage });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// `self` overlaid with `inner`. Names of `inner` hide same-named
    /// globals.
    pub fn merged(&self, inner: &VariableEnv) -> VariableEnv {
        let mut vars = self.vars.clone();
        for (name, binding) in &inner.vars {
            vars.insert(name.clone(), binding.clone());
        }
        VariableEnv { vars }
    }

    /// Parameters sorted by index.
    pub fn params(&self) -> Vec<(&str, &Binding)> {
        let mut params: Vec<_> = self
            .vars
            .iter()
            .filter(|(_, b)| matches!(b.storage, StorageClass::Param(_)))
            .map(|(name, b)| (name.as_str(), b))
            .collect();
        params.sort_by_key(|(_, b)| match b.storage {
            StorageClass::Param(index) => index,
            _ => u32::MAX,
        });
        params
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// The resolved signature of a user function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncSig {
    pub params: Vec<Type>,
    pub ret: Type,
}

/// User function signatures, collected before any body is checked so that
/// functions can call each other regardless of order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionEnv {
    funcs: HashMap<String, FuncSig>,
}

impl FunctionEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, sig: FuncSig, span: Span) -> Result<(), CompileError> {
        if self.funcs.contains_key(name) {
            return Err(CompileError::duplicate(name, span));
        }
        self.funcs.insert(name.to_string(), sig);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FuncSig> {
        self.funcs.get(name)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}
