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

use crate::expr::Expr;
use crate::Spanned;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name = value`
    Assign { target: String, value: Expr },

    /// Expression used as a statement (e.g. function call)
    Expr(Expr),

    Pass,

    /// `object.field = value`, reserved for class support
    FieldAssign {
        object: Expr,
        field: String,
        value: Expr,
    },

    /// `return value`. A bare `return` carries a `None` literal.
    Return(Expr),

    /// `elif` chains arrive here already nested inside `orelse`.
    If {
        test: Expr,
        body: Vec<Spanned<Stmt>>,
        orelse: Vec<Spanned<Stmt>>,
    },

    While {
        test: Expr,
        body: Vec<Spanned<Stmt>>,
    },
}
