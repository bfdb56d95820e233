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

//! Binary encoding through `wasm-encoder`.
//!
//! Names become indices here. Host imports take function indices `0..7`,
//! user functions follow in declaration order and the entry comes last.
//! Parameters take the first local indices, declared locals follow.

use std::collections::HashMap;

use log::debug;
use wasm_encoder::{
    BlockType, CodeSection, ConstExpr, EntityType, ExportKind, ExportSection, Function,
    FunctionSection, GlobalSection, GlobalType, ImportSection, Instruction,
    Module as WasmModule, TypeSection,
};

use crate::compiler::instr::{Func, Instr, Module};
use crate::error::CodegenError;
use crate::host::{HostImport, IMPORT_MODULE};
use crate::types::WasmType;

/// Encode `module` as a binary WebAssembly module.
pub fn encode(module: &Module) -> Result<Vec<u8>, CodegenError> {
    let mut encoder = Encoder::new(module);
    encoder.encode_module()?;
    Ok(encoder.finish())
}

struct Encoder<'m> {
    module: &'m Module,
    type_section: TypeSection,
    import_section: ImportSection,
    function_section: FunctionSection,
    global_section: GlobalSection,
    export_section: ExportSection,
    code_section: CodeSection,
    /// Parameter count → type index; every type returns one `i32`
    types: HashMap<usize, u32>,
    func_indices: HashMap<String, u32>,
    global_indices: HashMap<String, u32>,
}

impl<'m> Encoder<'m> {
    fn new(module: &'m Module) -> Self {
        Self {
            module,
            type_section: TypeSection::new(),
            import_section: ImportSection::new(),
            function_section: FunctionSection::new(),
            global_section: GlobalSection::new(),
            export_section: ExportSection::new(),
            code_section: CodeSection::new(),
            types: HashMap::new(),
            func_indices: HashMap::new(),
            global_indices: HashMap::new(),
        }
    }

    fn type_index(&mut self, params: usize) -> u32 {
        if let Some(&index) = self.types.get(&params) {
            return index;
        }
        let index = self.types.len() as u32;
        let val = WasmType::I32.to_val_type();
        self.type_section
            .ty()
            .function(vec![val; params], vec![val]);
        self.types.insert(params, index);
        index
    }

    fn encode_module(&mut self) -> Result<(), CodegenError> {
        let module = self.module;

        for import in HostImport::ALL {
            let ty = self.type_index(import.arity());
            self.import_section
                .import(IMPORT_MODULE, import.name(), EntityType::Function(ty));
            self.func_indices.insert(import.name().to_string(), import.index());
        }

        let first = HostImport::ALL.len() as u32;
        for (offset, func) in module.functions.iter().enumerate() {
            if let Some(id) = &func.id {
                self.func_indices.insert(id.clone(), first + offset as u32);
            }
        }
        let entry_index = first + module.functions.len() as u32;

        for (index, global) in module.globals.iter().enumerate() {
            self.global_section.global(
                GlobalType {
                    val_type: WasmType::I32.to_val_type(),
                    mutable: true,
                    shared: false,
                },
                &ConstExpr::i32_const(global.init),
            );
            self.global_indices.insert(global.name.clone(), index as u32);
        }

        let all = module.functions.iter().chain(std::iter::once(&module.entry));
        for (offset, func) in all.enumerate() {
            let ty = self.type_index(func.params.len());
            self.function_section.function(ty);
            if let Some(export) = &func.export {
                self.export_section
                    .export(export, ExportKind::Func, first + offset as u32);
            }
            let body = self.encode_function(func)?;
            self.code_section.function(&body);
        }

        debug!(
            "encoded {} types, {} functions, entry at index {}",
            self.types.len(),
            module.functions.len() + 1,
            entry_index
        );
        Ok(())
    }

    fn encode_function(&self, func: &Func) -> Result<Function, CodegenError> {
        let locals: HashMap<&str, u32> = func
            .params
            .iter()
            .chain(&func.locals)
            .enumerate()
            .map(|(index, name)| (name.as_str(), index as u32))
            .collect();

        let mut body = Function::new(if func.locals.is_empty() {
            vec![]
        } else {
            vec![(func.locals.len() as u32, WasmType::I32.to_val_type())]
        });
        self.encode_body(&mut body, &func.body, &locals)?;
        body.instruction(&Instruction::End);
        Ok(body)
    }

    fn encode_body(
        &self,
        out: &mut Function,
        instrs: &[Instr],
        locals: &HashMap<&str, u32>,
    ) -> Result<(), CodegenError> {
        for instr in instrs {
            match instr {
                Instr::If { then, else_ } => {
                    out.instruction(&Instruction::If(BlockType::Empty));
                    self.encode_body(out, then, locals)?;
                    if !else_.is_empty() {
                        out.instruction(&Instruction::Else);
                        self.encode_body(out, else_, locals)?;
                    }
                    out.instruction(&Instruction::End);
                }
                Instr::Block(inner) => {
                    out.instruction(&Instruction::Block(BlockType::Empty));
                    self.encode_body(out, inner, locals)?;
                    out.instruction(&Instruction::End);
                }
                Instr::Loop(inner) => {
                    out.instruction(&Instruction::Loop(BlockType::Empty));
                    self.encode_body(out, inner, locals)?;
                    out.instruction(&Instruction::End);
                }
                simple => {
                    out.instruction(&self.simple_instruction(simple, locals)?);
                }
            }
        }
        Ok(())
    }

    fn simple_instruction(
        &self,
        instr: &Instr,
        locals: &HashMap<&str, u32>,
    ) -> Result<Instruction<'static>, CodegenError> {
        let local = |name: &String| {
            locals
                .get(name.as_str())
                .copied()
                .ok_or_else(|| CodegenError::UnboundVariable(name.clone()))
        };
        let global = |name: &String| {
            self.global_indices
                .get(name)
                .copied()
                .ok_or_else(|| CodegenError::UnboundVariable(name.clone()))
        };

        Ok(match instr {
            Instr::I32Const(value) => Instruction::I32Const(*value),
            Instr::LocalGet(name) => Instruction::LocalGet(local(name)?),
            Instr::LocalSet(name) => Instruction::LocalSet(local(name)?),
            Instr::GlobalGet(name) => Instruction::GlobalGet(global(name)?),
            Instr::GlobalSet(name) => Instruction::GlobalSet(global(name)?),
            Instr::Call(name) => Instruction::Call(
                self.func_indices
                    .get(name)
                    .copied()
                    .ok_or_else(|| CodegenError::UnresolvedSymbol(name.clone()))?,
            ),
            Instr::I32Add => Instruction::I32Add,
            Instr::I32Sub => Instruction::I32Sub,
            Instr::I32Mul => Instruction::I32Mul,
            Instr::I32DivS => Instruction::I32DivS,
            Instr::I32RemS => Instruction::I32RemS,
            Instr::I32Eq => Instruction::I32Eq,
            Instr::I32Ne => Instruction::I32Ne,
            Instr::I32LeS => Instruction::I32LeS,
            Instr::I32GeS => Instruction::I32GeS,
            Instr::I32LtS => Instruction::I32LtS,
            Instr::I32GtS => Instruction::I32GtS,
            Instr::Drop => Instruction::Drop,
            Instr::Return => Instruction::Return,
            Instr::Unreachable => Instruction::Unreachable,
            Instr::Br(depth) => Instruction::Br(*depth),
            Instr::BrIf(depth) => Instruction::BrIf(*depth),
            Instr::If { .. } | Instr::Block(_) | Instr::Loop(_) => {
                return Err(CodegenError::UnsupportedNode("nested structured instruction"))
            }
        })
    }

    /// `module ::= type* import* func* global* export* code*`
    fn finish(self) -> Vec<u8> {
        let mut wasm = WasmModule::new();
        wasm.section(&self.type_section);
        wasm.section(&self.import_section);
        wasm.section(&self.function_section);
        wasm.section(&self.global_section);
        wasm.section(&self.export_section);
        wasm.section(&self.code_section);
        wasm.finish()
    }
}
