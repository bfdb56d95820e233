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
use wasm::HostImport;

// Handlers for the non-returning instructions. Each one works on the frame
// at the top of the call stack.

impl<H: Host> Machine<H> {
    fn frame(&mut self) -> Result<&mut CallFrame, RuntimeError> {
        self.call_stack.last_mut().ok_or(RuntimeError::StackUnderflow)
    }

    fn push(&mut self, value: i32) -> Result<(), RuntimeError> {
        self.frame()?.stack.push(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<i32, RuntimeError> {
        self.frame()?.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Pop `count` operands, first argument first.
    fn pop_args(&mut self, count: usize) -> Result<Vec<i32>, RuntimeError> {
        let stack = &mut self.frame()?.stack;
        let start = stack
            .len()
            .checked_sub(count)
            .ok_or(RuntimeError::StackUnderflow)?;
        Ok(stack.split_off(start))
    }

    pub(super) fn op_const(&mut self, value: i32) -> Result<(), RuntimeError> {
        self.push(value)
    }

    pub(super) fn op_local_get(&mut self, slot: usize) -> Result<(), RuntimeError> {
        let frame = self.frame()?;
        let value = *frame
            .locals
            .get(slot)
            .ok_or_else(|| RuntimeError::UnknownVariable(format!("local {}", slot)))?;
        frame.stack.push(value);
        Ok(())
    }

    pub(super) fn op_local_set(&mut self, slot: usize) -> Result<(), RuntimeError> {
        let value = self.pop()?;
        let local = self
            .frame()?
            .locals
            .get_mut(slot)
            .ok_or_else(|| RuntimeError::UnknownVariable(format!("local {}", slot)))?;
        *local = value;
        Ok(())
    }

    pub(super) fn op_global_get(&mut self, index: usize) -> Result<(), RuntimeError> {
        let value = *self
            .globals
            .get(index)
            .ok_or_else(|| RuntimeError::UnknownVariable(format!("global {}", index)))?;
        self.push(value)
    }

    pub(super) fn op_global_set(&mut self, index: usize) -> Result<(), RuntimeError> {
        let value = self.pop()?;
        let global = self
            .globals
            .get_mut(index)
            .ok_or_else(|| RuntimeError::UnknownVariable(format!("global {}", index)))?;
        *global = value;
        Ok(())
    }

    pub(super) fn op_bin_op(&mut self, kind: BinOpKind) -> Result<(), RuntimeError> {
        let right = self.pop()?;
        let left = self.pop()?;
        self.push(kind.apply(left, right)?)
    }

    pub(super) fn op_drop(&mut self) -> Result<(), RuntimeError> {
        self.pop().map(|_| ())
    }

    pub(super) fn op_jump(&mut self, target: usize) -> Result<(), RuntimeError> {
        self.frame()?.pc = target;
        Ok(())
    }

    /// Jump when the popped condition's truth equals `when`.
    pub(super) fn op_jump_if(&mut self, target: usize, when: bool) -> Result<(), RuntimeError> {
        if (self.pop()? != 0) == when {
            self.frame()?.pc = target;
        }
        Ok(())
    }

    pub(super) fn op_call(&mut self, function: usize) -> Result<(), RuntimeError> {
        let params = self
            .module
            .functions
            .get(function)
            .map(|f| f.params)
            .ok_or_else(|| RuntimeError::UnknownFunction(function.to_string()))?;
        let args = self.pop_args(params)?;
        self.push_frame(function, args)
    }

    pub(super) fn op_call_host(&mut self, import: HostImport) -> Result<(), RuntimeError> {
        let args = self.pop_args(import.arity())?;
        let result = self.host.call(import, &args)?;
        self.push(result)
    }

    /// Leave the current frame, handing its top value to the caller.
    pub(super) fn op_return(&mut self) -> Result<Option<i32>, RuntimeError> {
        let result = self.pop()?;
        self.call_stack.pop();
        match self.call_stack.last_mut() {
            Some(caller) => {
                caller.stack.push(result);
                Ok(None)
            }
            None => Ok(Some(result)),
        }
    }
}
