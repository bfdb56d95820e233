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
use crate::instruction::BinOpKind;
use wasm::Instr;

/// A branch target. Branching to a block, an `if` or the function body
/// jumps past its end; branching to a loop jumps back to its start.
enum Label {
    Forward { patches: Vec<usize> },
    Loop { start: usize },
}

pub(super) struct FunctionTranslator<'c, 'm> {
    compiler: &'c Compiler<'m>,
    slots: HashMap<&'c str, usize>,
    instructions: Vec<Instruction>,
    labels: Vec<Label>,
}

impl<'c, 'm> FunctionTranslator<'c, 'm> {
    pub(super) fn new(compiler: &'c Compiler<'m>, slots: HashMap<&'c str, usize>) -> Self {
        Self {
            compiler,
            slots,
            instructions: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// The body is itself a label; leaving it returns the value on top of
    /// the stack.
    pub(super) fn translate_function(&mut self, body: &[Instr]) -> Result<(), RuntimeError> {
        self.labels.push(Label::Forward { patches: Vec::new() });
        self.translate_body(body)?;
        self.close_label();
        self.emit(Instruction::Return);
        Ok(())
    }

    pub(super) fn finish(self) -> Vec<Instruction> {
        self.instructions
    }

    fn emit(&mut self, instruction: Instruction) -> usize {
        self.instructions.push(instruction);
        self.instructions.len() - 1
    }

    fn here(&self) -> usize {
        self.instructions.len()
    }

    fn close_label(&mut self) {
        let end = self.here();
        if let Some(Label::Forward { patches }) = self.labels.pop() {
            for at in patches {
                self.instructions[at].retarget(end);
            }
        }
    }

    fn translate_body(&mut self, body: &[Instr]) -> Result<(), RuntimeError> {
        for instr in body {
            self.translate_instr(instr)?;
        }
        Ok(())
    }

    fn translate_instr(&mut self, instr: &Instr) -> Result<(), RuntimeError> {
        match instr {
            Instr::If { then, else_ } => {
                let skip_then = self.emit(Instruction::JumpIfFalse(0));
                self.labels.push(Label::Forward { patches: Vec::new() });
                self.translate_body(then)?;
                let skip_else = self.emit(Instruction::Jump(0));
                let else_start = self.here();
                self.instructions[skip_then].retarget(else_start);
                self.translate_body(else_)?;
                self.branch_patch(0, skip_else)?;
                self.close_label();
            }
            Instr::Block(body) => {
                self.labels.push(Label::Forward { patches: Vec::new() });
                self.translate_body(body)?;
                self.close_label();
            }
            Instr::Loop(body) => {
                self.labels.push(Label::Loop { start: self.here() });
                self.translate_body(body)?;
                self.labels.pop();
            }
            Instr::Br(depth) => {
                let at = self.emit(Instruction::Jump(0));
                self.branch_patch(*depth, at)?;
            }
            Instr::BrIf(depth) => {
                let at = self.emit(Instruction::JumpIfTrue(0));
                self.branch_patch(*depth, at)?;
            }
            Instr::I32Const(value) => {
                self.emit(Instruction::Const(*value));
            }
            Instr::LocalGet(name) => {
                let slot = self.slot(name)?;
                self.emit(Instruction::LocalGet(slot));
            }
            Instr::LocalSet(name) => {
                let slot = self.slot(name)?;
                self.emit(Instruction::LocalSet(slot));
            }
            Instr::GlobalGet(name) => {
                let index = self.compiler.resolve_global(name)?;
                self.emit(Instruction::GlobalGet(index));
            }
            Instr::GlobalSet(name) => {
                let index = self.compiler.resolve_global(name)?;
                self.emit(Instruction::GlobalSet(index));
            }
            Instr::Call(name) => {
                let call = self.compiler.resolve_call(name)?;
                self.emit(call);
            }
            Instr::Drop => {
                self.emit(Instruction::Drop);
            }
            Instr::Return => {
                self.emit(Instruction::Return);
            }
            Instr::Unreachable => {
                self.emit(Instruction::Unreachable);
            }
            arithmetic => {
                let kind = Self::translate_binop(arithmetic)?;
                self.emit(Instruction::BinOp(kind));
            }
        }
        Ok(())
    }

    /// Aim the jump at `at` at the label `depth` levels out.
    fn branch_patch(&mut self, depth: u32, at: usize) -> Result<(), RuntimeError> {
        let index = self
            .labels
            .len()
            .checked_sub(depth as usize + 1)
            .ok_or(RuntimeError::InvalidBranch(depth))?;
        match &mut self.labels[index] {
            Label::Forward { patches } => patches.push(at),
            Label::Loop { start } => {
                let start = *start;
                self.instructions[at].retarget(start);
            }
        }
        Ok(())
    }

    fn slot(&self, name: &str) -> Result<usize, RuntimeError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownVariable(name.to_string()))
    }

    fn translate_binop(instr: &Instr) -> Result<BinOpKind, RuntimeError> {
        Ok(match instr {
            Instr::I32Add => BinOpKind::Add,
            Instr::I32Sub => BinOpKind::Sub,
            Instr::I32Mul => BinOpKind::Mul,
            Instr::I32DivS => BinOpKind::DivS,
            Instr::I32RemS => BinOpKind::RemS,
            Instr::I32Eq => BinOpKind::Eq,
            Instr::I32Ne => BinOpKind::Ne,
            Instr::I32LeS => BinOpKind::LeS,
            Instr::I32GeS => BinOpKind::GeS,
            Instr::I32LtS => BinOpKind::LtS,
            Instr::I32GtS => BinOpKind::GtS,
            // Every other instruction is matched by the caller
            _ => return Err(RuntimeError::Unreachable),
        })
    }
}
