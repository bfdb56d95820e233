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

use wasm::{Func, Instr, Module, ENTRY_EXPORT};

use crate::error::RuntimeError;
use crate::host::RecordingHost;
use crate::vm::Machine;

fn generate(source: &str) -> Module {
    let program = parser::parse_program(source).expect("source should parse");
    let analysis = wasm::analyze(&program).expect("analysis should succeed");
    wasm::generate(&analysis).expect("generation should succeed")
}

/// Run the entry function; returns its result and the printed lines.
fn run(source: &str) -> (Result<i32, RuntimeError>, Vec<String>) {
    let module = generate(source);
    let mut machine = Machine::new(&module, RecordingHost::new()).expect("module loads");
    let result = machine.invoke(ENTRY_EXPORT);
    (result, machine.into_host().lines())
}

fn entry_only(body: Vec<Instr>) -> Module {
    Module {
        globals: Vec::new(),
        functions: Vec::new(),
        entry: Func {
            id: None,
            export: Some(ENTRY_EXPORT.to_string()),
            params: Vec::new(),
            locals: Vec::new(),
            body,
        },
    }
}

#[test]
fn test_print_and_result() {
    let (result, lines) = run("x: int = 5\nprint(x + 1)\n");
    assert_eq!(result, Ok(0));
    assert_eq!(lines, vec!["6"]);
}

#[test]
fn test_last_expression_is_result() {
    let (result, lines) = run("abs(-3)\nmax(4, 9)\n");
    assert_eq!(result, Ok(9));
    assert!(lines.is_empty());
}

#[test]
fn test_function_call() {
    let (result, lines) = run("def f(a: int, b: int) -> int:\n    return a + b\nprint(f(2, 3))\n");
    assert_eq!(result, Ok(0));
    assert_eq!(lines, vec!["5"]);
}

#[test]
fn test_print_variants() {
    let (_, lines) = run("x: int = 0\nprint(True)\nprint(1 > 2)\nprint(None)\nprint(x is None)\n");
    assert_eq!(lines, vec!["True", "False", "None", "False"]);
}

#[test]
fn test_while_loop_and_globals() {
    let source = "total: int = 0
i: int = 1
while i <= 10:
    total = total + i
    i = i + 1
print(total)
";
    let module = generate(source);
    let mut machine = Machine::new(&module, RecordingHost::new()).expect("module loads");
    assert_eq!(machine.invoke(ENTRY_EXPORT), Ok(0));
    assert_eq!(machine.global("total"), Some(55));
    assert_eq!(machine.global("i"), Some(11));
    assert_eq!(machine.host().lines(), vec!["55"]);
}

#[test]
fn test_while_false_never_runs() {
    let (result, lines) = run("while False:\n    print(1)\nprint(2)\n");
    assert_eq!(result, Ok(0));
    assert_eq!(lines, vec!["2"]);
}

#[test]
fn test_if_elif_else() {
    let source = "def classify(n: int) -> int:
    if n < 0:
        return -1
    elif n == 0:
        return 0
    else:
        return 1
print(classify(-5))
print(classify(0))
print(classify(8))
";
    let (_, lines) = run(source);
    assert_eq!(lines, vec!["-1", "0", "1"]);
}

#[test]
fn test_recursion_and_locals() {
    let source = "def fact(n: int) -> int:
    acc: int = 1
    if n <= 1:
        return acc
    else:
        acc = n * fact(n - 1)
        return acc
fact(10)
";
    let (result, _) = run(source);
    assert_eq!(result, Ok(3_628_800));
}

#[test]
fn test_return_from_inside_loop() {
    let source = "def first_over(limit: int) -> int:
    n: int = 0
    while True:
        n = n + 7
        if n > limit:
            return n
        else:
            pass
    return 0
first_over(20)
";
    let (result, _) = run(source);
    assert_eq!(result, Ok(21));
}

#[test]
fn test_division_semantics() {
    let (result, _) = run("-7 // 2\n");
    assert_eq!(result, Ok(-3));
    let (result, _) = run("-7 % 2\n");
    assert_eq!(result, Ok(-1));
    let (result, _) = run("pow(2, 10) // 0\n");
    assert_eq!(result, Err(RuntimeError::DivideByZero));
}

#[test]
fn test_wrapping_arithmetic() {
    let (result, _) = run("x: int = 2147483647\nx + 1\n");
    assert_eq!(result, Ok(i32::MIN));
}

#[test]
fn test_overflowing_division_traps() {
    let module = entry_only(vec![
        Instr::I32Const(i32::MIN),
        Instr::I32Const(-1),
        Instr::I32DivS,
    ]);
    let mut machine = Machine::new(&module, RecordingHost::new()).expect("module loads");
    assert_eq!(machine.invoke(ENTRY_EXPORT), Err(RuntimeError::IntegerOverflow));
}

#[test]
fn test_falling_off_a_function_traps() {
    let (result, _) = run("def f() -> None:\n    pass\nf()\n");
    assert_eq!(result, Err(RuntimeError::Unreachable));
}

#[test]
fn test_unbounded_recursion_is_stopped() {
    let module = generate("def f(n: int) -> int:\n    return f(n + 1)\nf(0)\n");
    let mut machine = Machine::new(&module, RecordingHost::new())
        .expect("module loads")
        .with_max_depth(64);
    assert_eq!(
        machine.invoke(ENTRY_EXPORT),
        Err(RuntimeError::CallStackExhausted(64))
    );
}

#[test]
fn test_unknown_export() {
    let module = entry_only(vec![Instr::I32Const(0)]);
    let mut machine = Machine::new(&module, RecordingHost::new()).expect("module loads");
    assert_eq!(
        machine.invoke("main"),
        Err(RuntimeError::UnknownExport("main".to_string()))
    );
}

#[test]
fn test_stack_underflow() {
    let module = entry_only(vec![Instr::I32Add]);
    let mut machine = Machine::new(&module, RecordingHost::new()).expect("module loads");
    assert_eq!(machine.invoke(ENTRY_EXPORT), Err(RuntimeError::StackUnderflow));
}

#[test]
fn test_top_level_return() {
    let (result, lines) = run("print(1)\nreturn 7\nprint(2)\n");
    assert_eq!(result, Ok(7));
    assert_eq!(lines, vec!["1"]);
}
