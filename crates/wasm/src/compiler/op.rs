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
use ast::op::{BinOp, UnaryOp};
use ast::types::Type;

impl Compiler<'_> {
    pub(super) fn compile_binop(
        &mut self,
        left: &Expr,
        op: BinOp,
        right: &Expr,
    ) -> Result<(), CodegenError> {
        if op == BinOp::Is {
            // Folded from the left operand's static type. The operand still
            // runs for its side effects.
            let is_none = *Self::annotation(left)? == Type::None;
            self.compile_expr(left)?;
            self.ctx.emit(Instr::Drop);
            self.ctx.emit(Instr::I32Const(is_none as i32));
            return Ok(());
        }

        self.compile_expr(left)?;
        self.compile_expr(right)?;
        self.ctx.emit(Self::binop_instr(op)?);
        Ok(())
    }

    fn binop_instr(op: BinOp) -> Result<Instr, CodegenError> {
        Ok(match op {
            BinOp::Add => Instr::I32Add,
            BinOp::Sub => Instr::I32Sub,
            BinOp::Mul => Instr::I32Mul,
            BinOp::FloorDiv => Instr::I32DivS,
            BinOp::Mod => Instr::I32RemS,
            BinOp::Eq => Instr::I32Eq,
            BinOp::NotEq => Instr::I32Ne,
            BinOp::LtE => Instr::I32LeS,
            BinOp::GtE => Instr::I32GeS,
            BinOp::Lt => Instr::I32LtS,
            BinOp::Gt => Instr::I32GtS,
            BinOp::Is => return Err(CodegenError::UnsupportedNode("runtime 'is'")),
        })
    }

    /// `-e` is `0 - e`; `not e` is `e == 0`.
    pub(super) fn compile_unary(&mut self, op: UnaryOp, operand: &Expr) -> Result<(), CodegenError> {
        match op {
            UnaryOp::Neg => {
                self.ctx.emit(Instr::I32Const(0));
                self.compile_expr(operand)?;
                self.ctx.emit(Instr::I32Sub);
            }
            UnaryOp::Not => {
                self.compile_expr(operand)?;
                self.ctx.emit(Instr::I32Const(0));
                self.ctx.emit(Instr::I32Eq);
            }
        }
        Ok(())
    }
}
