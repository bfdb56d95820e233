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

use super::*;
use crate::type_checker::StorageClass;

impl Compiler<'_> {
    /// Parameters and locals share the local-slot instructions.
    pub(super) fn emit_load(&mut self, name: &str) -> Result<(), CodegenError> {
        let instr = match self.ctx.storage(name)? {
            StorageClass::Global => Instr::GlobalGet(name.to_string()),
            StorageClass::Local | StorageClass::Param(_) => Instr::LocalGet(name.to_string()),
        };
        self.ctx.emit(instr);
        Ok(())
    }

    pub(super) fn emit_store(&mut self, name: &str) -> Result<(), CodegenError> {
        let instr = match self.ctx.storage(name)? {
            StorageClass::Global => Instr::GlobalSet(name.to_string()),
            StorageClass::Local | StorageClass::Param(_) => Instr::LocalSet(name.to_string()),
        };
        self.ctx.emit(instr);
        Ok(())
    }
}
