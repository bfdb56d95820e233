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

use ast::op::Builtin;
use ast::types::Type;
use std::fmt;

/// Module name every host primitive is imported from.
pub const IMPORT_MODULE: &str = "imports";

/// Name the entry function is exported under.
pub const ENTRY_EXPORT: &str = "exported_func";

/// The fixed set of host primitives a generated module imports, in import
/// order. Import `i` has function index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostImport {
    Print,
    PrintBool,
    PrintNone,
    Abs,
    Max,
    Min,
    Pow,
}

impl HostImport {
    pub const ALL: [HostImport; 7] = [
        HostImport::Print,
        HostImport::PrintBool,
        HostImport::PrintNone,
        HostImport::Abs,
        HostImport::Max,
        HostImport::Min,
        HostImport::Pow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HostImport::Print => "print",
            HostImport::PrintBool => "print_bool",
            HostImport::PrintNone => "print_none",
            HostImport::Abs => "abs",
            HostImport::Max => "max",
            HostImport::Min => "min",
            HostImport::Pow => "pow",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            HostImport::Max | HostImport::Min | HostImport::Pow => 2,
            _ => 1,
        }
    }

    pub fn from_name(name: &str) -> Option<HostImport> {
        HostImport::ALL.into_iter().find(|i| i.name() == name)
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    /// The import a builtin call lowers to. `print` is picked by the static
    /// type of its argument; `None` for a type with no printer.
    pub fn for_builtin(builtin: Builtin, arg: &Type) -> Option<HostImport> {
        Some(match builtin {
            Builtin::Print => match arg {
                Type::Int => HostImport::Print,
                Type::Bool => HostImport::PrintBool,
                Type::None => HostImport::PrintNone,
                Type::Class(_) => return None,
            },
            Builtin::Abs => HostImport::Abs,
            Builtin::Max => HostImport::Max,
            Builtin::Min => HostImport::Min,
            Builtin::Pow => HostImport::Pow,
        })
    }
}

impl fmt::Display for HostImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
