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

//! Module text rendering.
//!
//! Every instruction is written in parenthesized form, one per line, with
//! structured instructions folded around their bodies.

use std::fmt::{self, Display, Formatter};

use crate::compiler::instr::{Func, Global, Instr, Module};
use crate::host::{HostImport, IMPORT_MODULE};
use crate::types::WasmType;

const INDENT: &str = "  ";

fn pad(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "(module")?;
        for import in HostImport::ALL {
            pad(f, 1)?;
            write_import(f, import)?;
            writeln!(f)?;
        }
        for global in &self.globals {
            pad(f, 1)?;
            writeln!(f, "{}", global)?;
        }
        for func in &self.functions {
            write_func(f, func, 1)?;
        }
        write_func(f, &self.entry, 1)?;
        writeln!(f, ")")
    }
}

/// `(func $print (import "imports" "print") (param i32) (result i32))`
fn write_import(f: &mut Formatter<'_>, import: HostImport) -> fmt::Result {
    write!(
        f,
        "(func ${} (import \"{}\" \"{}\") (param",
        import.name(),
        IMPORT_MODULE,
        import.name()
    )?;
    for _ in 0..import.arity() {
        write!(f, " {}", WasmType::I32)?;
    }
    write!(f, ") (result {}))", WasmType::I32)
}

impl Display for Global {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(global ${} (mut {}) (i32.const {}))",
            self.name,
            WasmType::I32,
            self.init
        )
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_func(f, self, 0)
    }
}

fn write_func(f: &mut Formatter<'_>, func: &Func, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    write!(f, "(func")?;
    if let Some(id) = &func.id {
        write!(f, " ${}", id)?;
    }
    if let Some(export) = &func.export {
        write!(f, " (export \"{}\")", export)?;
    }
    for param in &func.params {
        write!(f, " (param ${} {})", param, WasmType::I32)?;
    }
    writeln!(f, " (result {})", WasmType::I32)?;
    for local in &func.locals {
        pad(f, depth + 1)?;
        writeln!(f, "(local ${} {})", local, WasmType::I32)?;
    }
    write_body(f, &func.body, depth + 1)?;
    pad(f, depth)?;
    writeln!(f, ")")
}

fn write_body(f: &mut Formatter<'_>, body: &[Instr], depth: usize) -> fmt::Result {
    for instr in body {
        write_instr(f, instr, depth)?;
    }
    Ok(())
}

fn write_instr(f: &mut Formatter<'_>, instr: &Instr, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    match instr {
        Instr::If { then, else_ } => {
            writeln!(f, "(if")?;
            pad(f, depth + 1)?;
            writeln!(f, "(then")?;
            write_body(f, then, depth + 2)?;
            pad(f, depth + 1)?;
            writeln!(f, ")")?;
            pad(f, depth + 1)?;
            writeln!(f, "(else")?;
            write_body(f, else_, depth + 2)?;
            pad(f, depth + 1)?;
            writeln!(f, "))")
        }
        Instr::Block(body) | Instr::Loop(body) => {
            let keyword = if matches!(instr, Instr::Block(_)) { "block" } else { "loop" };
            writeln!(f, "({}", keyword)?;
            write_body(f, body, depth + 1)?;
            pad(f, depth)?;
            writeln!(f, ")")
        }
        simple => writeln!(f, "({})", simple),
    }
}

/// Renders a non-structured instruction without its parentheses.
impl Display for Instr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instr::I32Const(value) => write!(f, "i32.const {}", value),
            Instr::LocalGet(name) => write!(f, "local.get ${}", name),
            Instr::LocalSet(name) => write!(f, "local.set ${}", name),
            Instr::GlobalGet(name) => write!(f, "global.get ${}", name),
            Instr::GlobalSet(name) => write!(f, "global.set ${}", name),
            Instr::Call(name) => write!(f, "call ${}", name),
            Instr::I32Add => f.write_str("i32.add"),
            Instr::I32Sub => f.write_str("i32.sub"),
            Instr::I32Mul => f.write_str("i32.mul"),
            Instr::I32DivS => f.write_str("i32.div_s"),
            Instr::I32RemS => f.write_str("i32.rem_s"),
            Instr::I32Eq => f.write_str("i32.eq"),
            Instr::I32Ne => f.write_str("i32.ne"),
            Instr::I32LeS => f.write_str("i32.le_s"),
            Instr::I32GeS => f.write_str("i32.ge_s"),
            Instr::I32LtS => f.write_str("i32.lt_s"),
            Instr::I32GtS => f.write_str("i32.gt_s"),
            Instr::Drop => f.write_str("drop"),
            Instr::Return => f.write_str("return"),
            Instr::Unreachable => f.write_str("unreachable"),
            Instr::Br(depth) => write!(f, "br {}", depth),
            Instr::BrIf(depth) => write!(f, "br_if {}", depth),
            Instr::If { .. } => f.write_str("if"),
            Instr::Block(_) => f.write_str("block"),
            Instr::Loop(_) => f.write_str("loop"),
        }
    }
}
