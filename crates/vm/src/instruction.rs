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

use wasm::HostImport;

/// Flat instruction of a translated function.
///
/// Names are resolved to slots and structured control flow is lowered to
/// jumps, so the machine only ever moves a program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push a constant
    Const(i32),
    /// Push local slot `n`. Parameters occupy the first slots.
    LocalGet(usize),
    /// Pop into local slot `n`
    LocalSet(usize),
    GlobalGet(usize),
    GlobalSet(usize),
    /// Pop two operands, push `left OP right`
    BinOp(BinOpKind),
    Drop,
    /// Unconditional jump to instruction index
    Jump(usize),
    /// Pop a condition and jump if it is zero
    JumpIfFalse(usize),
    /// Pop a condition and jump if it is non-zero
    JumpIfTrue(usize),
    /// Call user function `n` of the translated module
    Call(usize),
    CallHost(HostImport),
    /// Pop the result and leave the current frame
    Return,
    Unreachable,
}

impl Instruction {
    /// Point a jump at `target`. Other instructions are left alone.
    pub(crate) fn retarget(&mut self, target: usize) {
        match self {
            Instruction::Jump(t) | Instruction::JumpIfFalse(t) | Instruction::JumpIfTrue(t) => {
                *t = target
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    DivS,
    RemS,
    Eq,
    Ne,
    LeS,
    GeS,
    LtS,
    GtS,
}

impl BinOpKind {
    /// i32 semantics: wrapping arithmetic, signed comparisons yielding `0`/`1`.
    pub fn apply(self, left: i32, right: i32) -> Result<i32, crate::RuntimeError> {
        use crate::RuntimeError;
        Ok(match self {
            BinOpKind::Add => left.wrapping_add(right),
            BinOpKind::Sub => left.wrapping_sub(right),
            BinOpKind::Mul => left.wrapping_mul(right),
            BinOpKind::DivS => {
                if right == 0 {
                    return Err(RuntimeError::DivideByZero);
                }
                left.checked_div(right).ok_or(RuntimeError::IntegerOverflow)?
            }
            BinOpKind::RemS => {
                if right == 0 {
                    return Err(RuntimeError::DivideByZero);
                }
                left.wrapping_rem(right)
            }
            BinOpKind::Eq => (left == right) as i32,
            BinOpKind::Ne => (left != right) as i32,
            BinOpKind::LeS => (left <= right) as i32,
            BinOpKind::GeS => (left >= right) as i32,
            BinOpKind::LtS => (left < right) as i32,
            BinOpKind::GtS => (left > right) as i32,
        })
    }
}
