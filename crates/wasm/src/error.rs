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

use ast::types::Type;
use ast::Span;
use thiserror::Error;

/// A diagnostic raised by the semantic analyzer. The first one found stops
/// the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("type error at {}..{}: {message}", .span.start, .span.end)]
    Type { message: String, span: Span },

    #[error("duplicate definition at {}..{}: {message}", .span.start, .span.end)]
    DuplicateDefinition { message: String, span: Span },

    #[error("arity error at {}..{}: {message}", .span.start, .span.end)]
    Arity { message: String, span: Span },

    #[error("undefined name at {}..{}: {message}", .span.start, .span.end)]
    UndefinedName { message: String, span: Span },
}

impl CompileError {
    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        CompileError::Type {
            message: message.into(),
            span,
        }
    }

    pub fn duplicate(name: &str, span: Span) -> Self {
        CompileError::DuplicateDefinition {
            message: format!("duplicate declaration of '{}'", name),
            span,
        }
    }

    pub fn arity(name: &str, expected: usize, got: usize, span: Span) -> Self {
        CompileError::Arity {
            message: format!("{} expects {} arguments but got {}", name, expected, got),
            span,
        }
    }

    pub fn undefined(name: &str, span: Span) -> Self {
        CompileError::UndefinedName {
            message: format!("name '{}' is not defined", name),
            span,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            CompileError::Type { span, .. }
            | CompileError::DuplicateDefinition { span, .. }
            | CompileError::Arity { span, .. }
            | CompileError::UndefinedName { span, .. } => span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Type { message, .. }
            | CompileError::DuplicateDefinition { message, .. }
            | CompileError::Arity { message, .. }
            | CompileError::UndefinedName { message, .. } => message,
        }
    }
}

/// The analyzer and the generator disagree. Never caused by user source
/// that passed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("internal: variable '{0}' has no storage")]
    UnboundVariable(String),

    #[error("internal: expression at {}..{} was not annotated", .0.start, .0.end)]
    MissingAnnotation(Span),

    #[error("internal: {0} cannot be compiled")]
    UnsupportedNode(&'static str),

    #[error("internal: type {0} has no runtime representation")]
    NoRuntimeRepresentation(Type),

    #[error("internal: call to unknown function '{0}'")]
    UnresolvedSymbol(String),

    #[error("internal: {0} instruction frames open when one was expected")]
    UnbalancedFrames(usize),
}
