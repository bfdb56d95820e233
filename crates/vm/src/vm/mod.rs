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

mod instruction_handlers;

use log::{debug, trace};
use wasm::Module;

use crate::compiler::{CompiledModule, Compiler};
use crate::error::RuntimeError;
use crate::host::Host;
use crate::instruction::Instruction;

/// Frames allowed on the call stack before a call traps.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

struct CallFrame {
    /// Index into the translated module's function table
    function: usize,
    /// Index of the next instruction to execute
    pc: usize,
    /// Parameters first, then declared locals starting at zero
    locals: Vec<i32>,
    /// The frame's operand stack
    stack: Vec<i32>,
}

/// A stack machine executing one translated module.
///
/// Globals keep their values across invocations. Call frames live on the
/// heap, so guest recursion never grows the native stack.
pub struct Machine<H: Host> {
    module: CompiledModule,
    host: H,
    globals: Vec<i32>,
    call_stack: Vec<CallFrame>,
    max_depth: usize,
}

impl<H: Host> Machine<H> {
    pub fn new(module: &Module, host: H) -> Result<Self, RuntimeError> {
        let module = Compiler::new(module).compile_module()?;
        let globals = module.globals.iter().map(|(_, init)| *init).collect();
        Ok(Self {
            module,
            host,
            globals,
            call_stack: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Current value of a global.
    pub fn global(&self, name: &str) -> Option<i32> {
        self.module
            .global_index(name)
            .and_then(|index| self.globals.get(index).copied())
    }

    /// Run the zero-argument export `name` to completion.
    pub fn invoke(&mut self, name: &str) -> Result<i32, RuntimeError> {
        self.invoke_with(name, &[])
    }

    pub fn invoke_with(&mut self, name: &str, args: &[i32]) -> Result<i32, RuntimeError> {
        let function = *self
            .module
            .exports
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownExport(name.to_string()))?;

        debug!("invoking '{}' with {:?}", name, args);
        self.call_stack.clear();
        self.push_frame(function, args.to_vec())?;
        let result = self.run();
        self.call_stack.clear();

        match &result {
            Ok(value) => debug!("'{}' returned {}", name, value),
            Err(err) => debug!("'{}' trapped: {}", name, err),
        }
        result
    }

    fn push_frame(&mut self, function: usize, args: Vec<i32>) -> Result<(), RuntimeError> {
        if self.call_stack.len() >= self.max_depth {
            return Err(RuntimeError::CallStackExhausted(self.max_depth));
        }
        let callee = self
            .module
            .functions
            .get(function)
            .ok_or_else(|| RuntimeError::UnknownFunction(function.to_string()))?;
        if args.len() != callee.params {
            return Err(RuntimeError::ArgumentCount {
                name: callee.name.clone(),
                expected: callee.params,
                got: args.len(),
            });
        }

        let mut locals = args;
        locals.resize(callee.params + callee.locals, 0);
        self.call_stack.push(CallFrame {
            function,
            pc: 0,
            locals,
            stack: Vec::new(),
        });
        Ok(())
    }

    fn run(&mut self) -> Result<i32, RuntimeError> {
        loop {
            let depth = self.call_stack.len();
            let frame = self
                .call_stack
                .last_mut()
                .ok_or(RuntimeError::StackUnderflow)?;
            let instruction = self.module.functions[frame.function]
                .instructions
                .get(frame.pc)
                .copied()
                // Translated bodies end in a return; running past it is a bug
                .ok_or(RuntimeError::Unreachable)?;
            frame.pc += 1;

            trace!(
                "[depth {}] {:?} stack={:?}",
                depth,
                instruction,
                frame.stack
            );

            if let Some(result) = self.match_instruction(instruction)? {
                return Ok(result);
            }
        }
    }

    /// Executes one instruction. Returns the result once the outermost
    /// frame returns.
    fn match_instruction(&mut self, instruction: Instruction) -> Result<Option<i32>, RuntimeError> {
        match instruction {
            Instruction::Const(value) => self.op_const(value),
            Instruction::LocalGet(slot) => self.op_local_get(slot),
            Instruction::LocalSet(slot) => self.op_local_set(slot),
            Instruction::GlobalGet(index) => self.op_global_get(index),
            Instruction::GlobalSet(index) => self.op_global_set(index),
            Instruction::BinOp(kind) => self.op_bin_op(kind),
            Instruction::Drop => self.op_drop(),
            Instruction::Jump(target) => self.op_jump(target),
            Instruction::JumpIfFalse(target) => self.op_jump_if(target, false),
            Instruction::JumpIfTrue(target) => self.op_jump_if(target, true),
            Instruction::Call(function) => self.op_call(function),
            Instruction::CallHost(import) => self.op_call_host(import),
            Instruction::Return => return self.op_return(),
            Instruction::Unreachable => Err(RuntimeError::Unreachable),
        }?;
        Ok(None)
    }
}
