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

use wasmparser::{Parser, Payload, Validator};

use crate::compiler::instr::{Func, Instr, Module};
use crate::error::CodegenError;
use crate::{analyze, encode, generate, ENTRY_EXPORT};

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn compile(source: &str) -> Module {
    let program = parser::parse_program(source).expect("source should parse");
    let analysis = analyze(&program).expect("analysis should succeed");
    generate(&analysis).expect("generation should succeed")
}

/// Encode a module and validate the resulting WASM bytes.
fn encode_and_validate(module: &Module) -> Vec<u8> {
    let bytes = encode(module).expect("encoding should succeed");
    let mut validator = Validator::new();
    validator
        .validate_all(&bytes)
        .expect("WASM validation should succeed");
    bytes
}

fn function<'m>(module: &'m Module, name: &str) -> &'m Func {
    module
        .function(name)
        .unwrap_or_else(|| panic!("function '{}' not generated", name))
}

fn local(name: &str) -> String {
    name.to_string()
}

// ─── Instruction output ───────────────────────────────────────────────────────

#[test]
fn test_entry_function_text() {
    let module = compile("x: int = 5\nprint(x + 1)\n");
    let expected = "\
(func (export \"exported_func\") (result i32)
  (local $ret i32)
  (i32.const 0)
  (local.set $ret)
  (global.get $x)
  (i32.const 1)
  (i32.add)
  (call $print)
  (local.set $ret)
  (local.get $ret)
)
";
    assert_eq!(module.entry.to_string(), expected);
    assert!(module.export(ENTRY_EXPORT).is_some());
}

#[test]
fn test_module_text_layout() {
    let text = compile("x: int = 5\nflag: bool = True\nprint(x)\n").to_string();
    assert!(text.starts_with("(module\n"));
    assert!(text.trim_end().ends_with(')'));
    assert!(text.contains("(func $print (import \"imports\" \"print\") (param i32) (result i32))"));
    assert!(text.contains("(func $pow (import \"imports\" \"pow\") (param i32 i32) (result i32))"));
    assert!(text.contains("(global $x (mut i32) (i32.const 5))"));
    assert!(text.contains("(global $flag (mut i32) (i32.const 1))"));

    let imports = text.find("(import").unwrap_or(usize::MAX);
    let globals = text.find("(global").unwrap_or(0);
    let entry = text.find("(export").unwrap_or(0);
    assert!(imports < globals && globals < entry);
}

#[test]
fn test_print_selected_by_argument_type() {
    let module = compile("print(1)\nprint(True)\nprint(None)\n");
    let calls: Vec<_> = module
        .entry
        .body
        .iter()
        .filter_map(|instr| match instr {
            Instr::Call(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(calls, vec!["print", "print_bool", "print_none"]);
}

#[test]
fn test_function_locals_and_params() {
    let module = compile(
        "\
def add(a: int, b: int) -> int:
    total: int = 0
    total = a + b
    return total
",
    );
    let add = function(&module, "add");
    assert_eq!(add.params, vec![local("a"), local("b")]);
    assert_eq!(add.locals, vec![local("total")]);
    assert_eq!(add.export, None);
    assert_eq!(
        add.body,
        vec![
            Instr::I32Const(0),
            Instr::LocalSet(local("total")),
            Instr::LocalGet(local("a")),
            Instr::LocalGet(local("b")),
            Instr::I32Add,
            Instr::LocalSet(local("total")),
            Instr::LocalGet(local("total")),
            Instr::Return,
            Instr::Unreachable,
            Instr::I32Const(0),
        ]
    );
}

#[test]
fn test_function_reads_and_writes_globals() {
    let module = compile(
        "\
count: int = 0
def bump() -> int:
    count = count + 1
    return count
",
    );
    let bump = function(&module, "bump");
    assert!(bump.locals.is_empty());
    assert_eq!(bump.body[0], Instr::GlobalGet(local("count")));
    assert_eq!(bump.body[3], Instr::GlobalSet(local("count")));
}

#[test]
fn test_expression_statement_dropped_inside_function() {
    let module = compile("def f() -> int:\n    abs(1)\n    return 2\n");
    let f = function(&module, "f");
    assert_eq!(
        &f.body[..3],
        &[Instr::I32Const(1), Instr::Call(local("abs")), Instr::Drop]
    );
}

#[test]
fn test_while_loop_shape() {
    let module = compile("x: int = 0\nwhile x < 3:\n    x = x + 1\n");
    let expected = Instr::Block(vec![Instr::Loop(vec![
        Instr::GlobalGet(local("x")),
        Instr::I32Const(3),
        Instr::I32LtS,
        Instr::I32Const(0),
        Instr::I32Eq,
        Instr::BrIf(1),
        Instr::GlobalGet(local("x")),
        Instr::I32Const(1),
        Instr::I32Add,
        Instr::GlobalSet(local("x")),
        Instr::Br(0),
    ])]);
    assert_eq!(module.entry.body[2], expected);
}

#[test]
fn test_if_arms_and_nested_expression_statement() {
    let module = compile("if True:\n    abs(-1)\nelse:\n    pass\n");
    let Instr::If { then, else_ } = &module.entry.body[3] else {
        panic!("expected an if, got {:?}", module.entry.body);
    };
    assert_eq!(then.last(), Some(&Instr::LocalSet(local("ret"))));
    assert!(else_.is_empty());
}

#[test]
fn test_unary_operators() {
    let module = compile("print(not True)\nprint(-5)\n");
    assert_eq!(
        &module.entry.body[2..6],
        &[
            Instr::I32Const(1),
            Instr::I32Const(0),
            Instr::I32Eq,
            Instr::Call(local("print_bool")),
        ]
    );
    assert_eq!(
        &module.entry.body[7..11],
        &[
            Instr::I32Const(0),
            Instr::I32Const(5),
            Instr::I32Sub,
            Instr::Call(local("print")),
        ]
    );
}

#[test]
fn test_is_none_folds_to_constant() {
    let module = compile("x: int = 0\nn: None = None\nprint(x is None)\nprint(n is None)\n");
    assert_eq!(
        &module.entry.body[2..6],
        &[
            Instr::GlobalGet(local("x")),
            Instr::Drop,
            Instr::I32Const(0),
            Instr::Call(local("print_bool")),
        ]
    );
    assert_eq!(
        &module.entry.body[7..11],
        &[
            Instr::GlobalGet(local("n")),
            Instr::Drop,
            Instr::I32Const(1),
            Instr::Call(local("print_bool")),
        ]
    );
}

#[test]
fn test_floor_division_and_modulo() {
    let module = compile("print(7 // 2)\nprint(7 % 2)\n");
    assert!(module.entry.body.contains(&Instr::I32DivS));
    assert!(module.entry.body.contains(&Instr::I32RemS));
}

#[test]
fn test_generation_is_deterministic() {
    let source = "\
x: int = 1
def f(n: int) -> int:
    if n > 0:
        return n * f(n - 1)
    else:
        return 1
print(f(x))
";
    assert_eq!(compile(source), compile(source));
    assert_eq!(compile(source).to_string(), compile(source).to_string());
}

#[test]
fn test_unanalyzed_tree_is_rejected() {
    let program = parser::parse_program("print(1)\n").expect("source should parse");
    let analysis = crate::Analysis {
        program,
        ..analyze(&ast::Program::default()).expect("empty program analyzes")
    };
    assert!(matches!(
        generate(&analysis),
        Err(CodegenError::MissingAnnotation(_))
    ));
}

// ─── Binary output ────────────────────────────────────────────────────────────

#[test]
fn test_binary_validates() {
    let module = compile(
        "\
limit: int = 10
seen: bool = False
def fact(n: int) -> int:
    acc: int = 1
    while n > 1:
        acc = acc * n
        n = n - 1
    return acc
def pick(b: bool) -> int:
    if b:
        return max(1, 2)
    elif b is None:
        return 0
    else:
        return pow(2, min(3, abs(-4)))
print(fact(limit))
print(pick(not seen))
print(None)
",
    );
    let bytes = encode_and_validate(&module);
    assert_eq!(&bytes[0..4], b"\0asm");
}

#[test]
fn test_binary_imports_and_export() {
    let bytes = encode_and_validate(&compile("def f() -> None:\n    return\nf()\n"));

    let mut imports = Vec::new();
    let mut exports = Vec::new();
    for payload in Parser::new(0).parse_all(&bytes) {
        match payload.expect("payload parses") {
            Payload::ImportSection(reader) => {
                for import in reader {
                    let import = import.expect("import parses");
                    imports.push((import.module.to_string(), import.name.to_string()));
                }
            }
            Payload::ExportSection(reader) => {
                for export in reader {
                    let export = export.expect("export parses");
                    exports.push((export.name.to_string(), export.index));
                }
            }
            _ => {}
        }
    }

    let names: Vec<_> = imports.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["print", "print_bool", "print_none", "abs", "max", "min", "pow"]
    );
    assert!(imports.iter().all(|(module, _)| module == "imports"));
    // 7 imports, then `f`, then the entry
    assert_eq!(exports, vec![(ENTRY_EXPORT.to_string(), 8)]);
}

#[test]
fn test_binary_is_deterministic() {
    let source = "x: int = 3\nwhile x > 0:\n    x = x - 1\n    print(x)\n";
    assert_eq!(
        encode_and_validate(&compile(source)),
        encode_and_validate(&compile(source))
    );
}
