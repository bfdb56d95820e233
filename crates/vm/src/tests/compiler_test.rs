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

use wasm::{Func, Instr, Module};

use crate::compiler::Compiler;
use crate::error::RuntimeError;
use crate::instruction::{BinOpKind, Instruction};

fn entry(locals: &[&str], body: Vec<Instr>) -> Func {
    Func {
        id: None,
        export: Some(wasm::ENTRY_EXPORT.to_string()),
        params: Vec::new(),
        locals: locals.iter().map(|l| l.to_string()).collect(),
        body,
    }
}

fn module(body: Vec<Instr>) -> Module {
    Module {
        globals: Vec::new(),
        functions: Vec::new(),
        entry: entry(&["ret"], body),
    }
}

#[test]
fn test_if_lowers_to_jumps() {
    let m = module(vec![
        Instr::I32Const(1),
        Instr::If {
            then: vec![Instr::I32Const(2), Instr::LocalSet("ret".into())],
            else_: vec![Instr::I32Const(3), Instr::LocalSet("ret".into())],
        },
        Instr::LocalGet("ret".into()),
    ]);
    let compiled = Compiler::new(&m).compile_module().expect("translates");
    assert_eq!(
        compiled.functions[0].instructions,
        vec![
            Instruction::Const(1),
            Instruction::JumpIfFalse(5),
            Instruction::Const(2),
            Instruction::LocalSet(0),
            Instruction::Jump(7),
            Instruction::Const(3),
            Instruction::LocalSet(0),
            Instruction::LocalGet(0),
            Instruction::Return,
        ]
    );
}

#[test]
fn test_loop_branches() {
    let m = module(vec![Instr::Block(vec![Instr::Loop(vec![
        Instr::LocalGet("ret".into()),
        Instr::BrIf(1),
        Instr::Br(0),
    ])])]);
    let compiled = Compiler::new(&m).compile_module().expect("translates");
    assert_eq!(
        compiled.functions[0].instructions,
        vec![
            Instruction::LocalGet(0),
            Instruction::JumpIfTrue(3),
            Instruction::Jump(0),
            Instruction::Return,
        ]
    );
}

#[test]
fn test_names_resolve_to_slots() {
    let m = Module {
        globals: vec![wasm::Global {
            name: "g".into(),
            init: 7,
        }],
        functions: vec![Func {
            id: Some("f".into()),
            export: None,
            params: vec!["a".into()],
            locals: vec!["b".into()],
            body: vec![
                Instr::LocalGet("a".into()),
                Instr::LocalGet("b".into()),
                Instr::I32Add,
                Instr::GlobalGet("g".into()),
                Instr::I32Mul,
            ],
        }],
        entry: entry(&["ret"], vec![Instr::I32Const(1), Instr::Call("f".into()), Instr::Call("print".into())]),
    };
    let compiled = Compiler::new(&m).compile_module().expect("translates");
    assert_eq!(
        compiled.functions[0].instructions,
        vec![
            Instruction::LocalGet(0),
            Instruction::LocalGet(1),
            Instruction::BinOp(BinOpKind::Add),
            Instruction::GlobalGet(0),
            Instruction::BinOp(BinOpKind::Mul),
            Instruction::Return,
        ]
    );
    assert_eq!(compiled.functions[1].instructions[1], Instruction::Call(0));
    assert_eq!(
        compiled.functions[1].instructions[2],
        Instruction::CallHost(wasm::HostImport::Print)
    );
    assert_eq!(compiled.exports.get(wasm::ENTRY_EXPORT), Some(&1));
    assert_eq!(compiled.global_index("g"), Some(0));
}

#[test]
fn test_unresolved_names() {
    let m = module(vec![Instr::Call("nope".into())]);
    assert_eq!(
        Compiler::new(&m).compile_module(),
        Err(RuntimeError::UnknownFunction("nope".into()))
    );

    let m = module(vec![Instr::LocalGet("x".into())]);
    assert_eq!(
        Compiler::new(&m).compile_module(),
        Err(RuntimeError::UnknownVariable("x".into()))
    );

    let m = module(vec![Instr::Br(3)]);
    assert_eq!(
        Compiler::new(&m).compile_module(),
        Err(RuntimeError::InvalidBranch(3))
    );
}
