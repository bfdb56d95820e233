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

use crate::host::*;
use crate::error::RuntimeError;
use wasm::HostImport;

#[test]
fn test_builtin_arithmetic() {
    assert_eq!(eval_builtin(HostImport::Abs, &[-7]), Ok(7));
    assert_eq!(eval_builtin(HostImport::Abs, &[i32::MIN]), Ok(i32::MIN));
    assert_eq!(eval_builtin(HostImport::Max, &[3, 9]), Ok(9));
    assert_eq!(eval_builtin(HostImport::Min, &[3, 9]), Ok(3));
}

#[test]
fn test_pow() {
    assert_eq!(eval_builtin(HostImport::Pow, &[2, 10]), Ok(1024));
    assert_eq!(eval_builtin(HostImport::Pow, &[5, 0]), Ok(1));
    assert_eq!(eval_builtin(HostImport::Pow, &[2, -1]), Ok(0));
    assert_eq!(eval_builtin(HostImport::Pow, &[2, 32]), Ok(0));
}

#[test]
fn test_missing_argument() {
    match eval_builtin(HostImport::Max, &[1]) {
        Err(RuntimeError::ArgumentCount { expected, got, .. }) => {
            assert_eq!((expected, got), (2, 1));
        }
        other => panic!("expected an argument count error, got {:?}", other),
    }
}

#[test]
fn test_recording_host_lines() {
    let mut host = RecordingHost::new();
    assert_eq!(host.call(HostImport::Print, &[42]), Ok(0));
    assert_eq!(host.call(HostImport::PrintBool, &[1]), Ok(0));
    assert_eq!(host.call(HostImport::PrintBool, &[0]), Ok(0));
    assert_eq!(host.call(HostImport::PrintNone, &[0]), Ok(0));
    assert_eq!(host.call(HostImport::Abs, &[-1]), Ok(1));

    assert_eq!(host.lines(), vec!["42", "True", "False", "None"]);
    assert_eq!(
        host.events[0],
        HostEvent {
            import: HostImport::Print,
            value: 42
        }
    );
}
