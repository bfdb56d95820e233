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

use super::*;

impl<'src, I: Iterator<Item = SpannedToken>> Parser<'src, I> {
    /// Parse `: type` or `-> type` into a `TypeDef` node.
    ///
    /// Any name is accepted here; whether the type is supported is decided
    /// when the tree is turned into an AST.
    pub(super) fn parse_type_def(&mut self, prefix: Token) -> ParseResult<SyntaxNode> {
        let prefix_kind = match prefix {
            Token::Arrow => NodeKind::Operator,
            _ => NodeKind::Punctuation,
        };
        let prefix = self.expect(prefix, prefix_kind)?;

        let ty = match self.peek_token() {
            Token::Name => self.bump(NodeKind::VariableName),
            Token::None_ => self.bump(NodeKind::None),
            _ => return Err(self.unexpected("a type name")),
        };
        Ok(SyntaxNode::branch(NodeKind::TypeDef, vec![prefix, ty]))
    }
}
