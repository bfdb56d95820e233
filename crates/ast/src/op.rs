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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    FloorDiv,
    Mod,
    Eq,
    NotEq,
    LtE,
    GtE,
    Lt,
    Gt,
    Is,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        Some(match symbol {
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "//" => BinOp::FloorDiv,
            "%" => BinOp::Mod,
            "==" => BinOp::Eq,
            "!=" => BinOp::NotEq,
            "<=" => BinOp::LtE,
            ">=" => BinOp::GtE,
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "is" => BinOp::Is,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::LtE => "<=",
            BinOp::GtE => ">=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Is => "is",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::FloorDiv | BinOp::Mod
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<UnaryOp> {
        match symbol {
            "-" => Some(UnaryOp::Neg),
            "not" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

/// Functions provided by the host rather than defined in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Print,
    Abs,
    Max,
    Min,
    Pow,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Print,
        Builtin::Abs,
        Builtin::Max,
        Builtin::Min,
        Builtin::Pow,
    ];

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Abs => "abs",
            Builtin::Max => "max",
            Builtin::Min => "min",
            Builtin::Pow => "pow",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Print | Builtin::Abs => 1,
            Builtin::Max | Builtin::Min | Builtin::Pow => 2,
        }
    }
}
