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

use vm::{Machine, RecordingHost};
use wasmparser::Validator;

use crate::{check, compile, Error};

/// Compile, validate the binary, then run the entry on the reference VM.
fn execute(source: &str) -> (i32, Vec<String>) {
    let compilation = compile(source).expect("compilation should succeed");
    let bytes = compilation.to_binary().expect("encoding should succeed");
    Validator::new()
        .validate_all(&bytes)
        .expect("WASM validation should succeed");

    let mut machine =
        Machine::new(&compilation.module, RecordingHost::new()).expect("module loads");
    let result = machine
        .invoke(wasm::ENTRY_EXPORT)
        .expect("execution should succeed");
    (result, machine.into_host().lines())
}

#[test]
fn test_print_global_plus_one() {
    let (result, lines) = execute("x: int = 5\nprint(x + 1)\n");
    assert_eq!(result, 0);
    assert_eq!(lines, vec!["6"]);
}

#[test]
fn test_call_user_function() {
    let (result, lines) = execute(
        "def f(a: int, b: int) -> int:
    return a + b
print(f(2, 3))
",
    );
    assert_eq!(result, 0);
    assert_eq!(lines, vec!["5"]);
}

#[test]
fn test_while_false_body_never_runs() {
    let (result, lines) = execute("while False:\n    print(1)\n");
    assert_eq!(result, 0);
    assert!(lines.is_empty());
}

#[test]
fn test_fibonacci() {
    let source = "a: int = 0
b: int = 1
n: int = 0
def fib(k: int) -> int:
    if k < 2:
        return k
    else:
        return fib(k - 1) + fib(k - 2)
while n < 8:
    print(fib(n))
    n = n + 1
fib(15)
";
    let (result, lines) = execute(source);
    assert_eq!(result, 610);
    assert_eq!(lines, vec!["0", "1", "1", "2", "3", "5", "8", "13"]);
}

#[test]
fn test_builtins_end_to_end() {
    let (result, lines) = execute(
        "print(abs(-4))
print(max(3, 8))
print(min(3, 8))
print(pow(3, 4))
print(pow(3, -1))
print(not (1 == 2))
",
    );
    assert_eq!(result, 0);
    assert_eq!(lines, vec!["4", "8", "3", "81", "0", "True"]);
}

#[test]
fn test_is_none_evaluates_left_operand_once() {
    let (result, lines) = execute("print(7) is None\n");
    assert_eq!(result, 1);
    assert_eq!(lines, vec!["7"]);
}

#[test]
fn test_output_is_deterministic() {
    let source = "x: int = 2\ndef sq(v: int) -> int:\n    return v * v\nprint(sq(x))\n";
    let first = compile(source).expect("compiles");
    let second = compile(source).expect("compiles");
    assert_eq!(first.wat(), second.wat());
    assert_eq!(
        first.to_binary().expect("encodes"),
        second.to_binary().expect("encodes")
    );
}

#[test]
fn test_wat_mentions_entry_export() {
    let wat = compile("print(1)\n").expect("compiles").wat();
    assert!(wat.contains("(export \"exported_func\")"));
    assert!(wat.contains("(call $print)"));
}

#[test]
fn test_syntax_error_stops_pipeline() {
    match compile("x: int = \n") {
        Err(Error::Syntax(_)) => {}
        other => panic!("expected a syntax error, got {:?}", other.map(|c| c.wat())),
    }
}

#[test]
fn test_semantic_error_stops_pipeline() {
    match check("x: int = 1\nx = False\n") {
        Err(Error::Semantic(err)) => assert_eq!(
            err.message(),
            "variable: x with type int cannot be assigned value of type bool"
        ),
        other => panic!("expected a semantic error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_error_display() {
    let err = compile("print(y)\n").err().expect("compile fails");
    let text = err.to_string();
    assert!(text.starts_with("undefined name at "), "{}", text);
    assert!(text.ends_with(": name 'y' is not defined"), "{}", text);
}
