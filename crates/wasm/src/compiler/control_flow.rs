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

impl Compiler<'_> {
    /// `test (if (then body) (else orelse))`. An empty arm compiles to
    /// no instructions.
    pub(super) fn compile_if(
        &mut self,
        test: &Expr,
        body: &[Spanned<Stmt>],
        orelse: &[Spanned<Stmt>],
    ) -> Result<(), CodegenError> {
        self.compile_expr(test)?;

        self.ctx.push_frame();
        self.compile_block(body)?;
        let then = self.ctx.pop_frame()?;

        self.ctx.push_frame();
        self.compile_block(orelse)?;
        let else_ = self.ctx.pop_frame()?;

        self.ctx.emit(Instr::If { then, else_ });
        Ok(())
    }

    pub(super) fn compile_while(
        &mut self,
        test: &Expr,
        body: &[Spanned<Stmt>],
    ) -> Result<(), CodegenError> {
        // block $exit
        //   loop $loop
        //     <test>
        //     i32.const 0
        //     i32.eq
        //     br_if $exit    ;; test is false
        //     <body>
        //     br $loop
        //   end
        // end
        self.ctx.push_frame();
        self.compile_expr(test)?;
        self.ctx.emit(Instr::I32Const(0));
        self.ctx.emit(Instr::I32Eq);
        self.ctx.emit(Instr::BrIf(1));
        self.compile_block(body)?;
        self.ctx.emit(Instr::Br(0));
        let looped = self.ctx.pop_frame()?;

        self.ctx.emit(Instr::Block(vec![Instr::Loop(looped)]));
        Ok(())
    }
}
