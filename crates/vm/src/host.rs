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

use std::io::{self, Write};

use wasm::HostImport;

use crate::error::RuntimeError;

/// Supplies the imported primitives to a running module.
pub trait Host {
    fn call(&mut self, import: HostImport, args: &[i32]) -> Result<i32, RuntimeError>;
}

/// One observable host call: a print primitive and the word it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostEvent {
    pub import: HostImport,
    pub value: i32,
}

impl HostEvent {
    /// The line a print primitive writes for its argument.
    pub fn line(&self) -> String {
        match self.import {
            HostImport::PrintBool => (if self.value != 0 { "True" } else { "False" }).to_string(),
            HostImport::PrintNone => "None".to_string(),
            _ => self.value.to_string(),
        }
    }
}

/// Evaluate a non-printing primitive.
///
/// `pow` wraps on overflow and gives `0` for a negative exponent.
pub fn eval_builtin(import: HostImport, args: &[i32]) -> Result<i32, RuntimeError> {
    let arg = |i: usize| {
        args.get(i).copied().ok_or(RuntimeError::ArgumentCount {
            name: import.name().to_string(),
            expected: import.arity(),
            got: args.len(),
        })
    };
    Ok(match import {
        HostImport::Abs => arg(0)?.wrapping_abs(),
        HostImport::Max => arg(0)?.max(arg(1)?),
        HostImport::Min => arg(0)?.min(arg(1)?),
        HostImport::Pow => {
            let (base, exp) = (arg(0)?, arg(1)?);
            if exp < 0 {
                0
            } else {
                base.wrapping_pow(exp as u32)
            }
        }
        // Print results are `None`
        HostImport::Print | HostImport::PrintBool | HostImport::PrintNone => {
            arg(0)?;
            0
        }
    })
}

fn is_print(import: HostImport) -> bool {
    matches!(
        import,
        HostImport::Print | HostImport::PrintBool | HostImport::PrintNone
    )
}

/// Keeps every print call in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(HostEvent::line).collect()
    }
}

impl Host for RecordingHost {
    fn call(&mut self, import: HostImport, args: &[i32]) -> Result<i32, RuntimeError> {
        let result = eval_builtin(import, args)?;
        if let (true, Some(&value)) = (is_print(import), args.first()) {
            self.events.push(HostEvent { import, value });
        }
        Ok(result)
    }
}

/// Records like [`RecordingHost`] and writes each printed line to stdout.
#[derive(Debug, Default)]
pub struct StdoutHost {
    pub recorded: RecordingHost,
}

impl StdoutHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for StdoutHost {
    fn call(&mut self, import: HostImport, args: &[i32]) -> Result<i32, RuntimeError> {
        let result = self.recorded.call(import, args)?;
        if is_print(import) {
            if let Some(event) = self.recorded.events.last() {
                writeln!(io::stdout().lock(), "{}", event.line()).map_err(|err| {
                    RuntimeError::Host {
                        import,
                        message: err.to_string(),
                    }
                })?;
            }
        }
        Ok(result)
    }
}
