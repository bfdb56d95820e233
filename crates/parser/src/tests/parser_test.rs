use crate::cst::{NodeKind, SyntaxNode};
use crate::lexer::{IndentLexer, Token};

fn parse(source: &str) -> SyntaxNode {
    crate::parse(source).expect("parse failed").root
}

fn kinds(node: &SyntaxNode) -> Vec<NodeKind> {
    node.children.iter().map(|c| c.kind).collect()
}

#[test]
fn test_simple_assignment() {
    let root = parse("x = 42\n");
    assert_eq!(root.kind, NodeKind::Script);
    assert_eq!(root.children.len(), 1);
    let stmt = &root.children[0];
    assert_eq!(stmt.kind, NodeKind::AssignStatement);
    assert_eq!(
        kinds(stmt),
        vec![NodeKind::VariableName, NodeKind::AssignOp, NodeKind::Number]
    );
}

#[test]
fn test_typed_definition() {
    let src = "x: int = 5\n";
    let root = parse(src);
    let stmt = &root.children[0];
    assert_eq!(
        kinds(stmt),
        vec![
            NodeKind::VariableName,
            NodeKind::TypeDef,
            NodeKind::AssignOp,
            NodeKind::Number
        ]
    );
    let type_def = &stmt.children[1];
    assert_eq!(kinds(type_def), vec![NodeKind::Punctuation, NodeKind::VariableName]);
    assert_eq!(type_def.children[1].text(src), "int");
}

#[test]
fn test_function_def() {
    let src = "def foo(x: int, y: int) -> int:\n    return x + y\n";
    let root = parse(src);
    let func = &root.children[0];
    assert_eq!(func.kind, NodeKind::FunctionDefinition);
    assert_eq!(
        kinds(func),
        vec![
            NodeKind::Keyword,
            NodeKind::VariableName,
            NodeKind::ParamList,
            NodeKind::TypeDef,
            NodeKind::Body
        ]
    );
    assert_eq!(func.children[1].text(src), "foo");

    let body = &func.children[4];
    assert_eq!(kinds(body), vec![NodeKind::Punctuation, NodeKind::ReturnStatement]);
    let ret = &body.children[1];
    assert_eq!(ret.children[1].kind, NodeKind::BinaryExpression);
}

#[test]
fn test_if_elif_else_is_flat() {
    let src = "\
if x > 0:
    pass
elif x < 0:
    pass
else:
    pass
";
    let root = parse(src);
    assert_eq!(root.children.len(), 1);
    assert_eq!(
        kinds(&root.children[0]),
        vec![
            NodeKind::Keyword,
            NodeKind::BinaryExpression,
            NodeKind::Body,
            NodeKind::Keyword,
            NodeKind::BinaryExpression,
            NodeKind::Body,
            NodeKind::Keyword,
            NodeKind::Body
        ]
    );
}

#[test]
fn test_while_loop() {
    let src = "\
while True:
    break
";
    let root = parse(src);
    let stmt = &root.children[0];
    assert_eq!(stmt.kind, NodeKind::WhileStatement);
    let body = &stmt.children[2];
    assert_eq!(body.children[1].kind, NodeKind::BreakStatement);
}

#[test]
fn test_binary_precedence() {
    // 1 + 2 * 3  should parse as 1 + (2 * 3)
    let src = "1 + 2 * 3\n";
    let root = parse(src);
    let stmt = &root.children[0];
    assert_eq!(stmt.kind, NodeKind::ExpressionStatement);
    let expr = &stmt.children[0];
    assert_eq!(expr.kind, NodeKind::BinaryExpression);
    assert_eq!(expr.children[1].text(src), "+");
    assert_eq!(expr.children[2].kind, NodeKind::BinaryExpression);
    assert_eq!(expr.children[2].children[1].text(src), "*");
}

#[test]
fn test_is_not_is_one_operator() {
    let src = "x is not None\n";
    let root = parse(src);
    let expr = &root.children[0].children[0];
    assert_eq!(
        kinds(expr),
        vec![NodeKind::VariableName, NodeKind::Operator, NodeKind::None]
    );
    assert_eq!(expr.children[1].text(src), "is not");
}

#[test]
fn test_call_expression() {
    let src = "max(1, 2)\n";
    let root = parse(src);
    let call = &root.children[0].children[0];
    assert_eq!(call.kind, NodeKind::CallExpression);
    let args = &call.children[1];
    assert_eq!(args.kind, NodeKind::ArgList);
    // ( 1 , 2 )
    assert_eq!(args.children.len(), 5);
}

#[test]
fn test_class_def() {
    let src = "\
class Foo(Base):
    x: int = 0
";
    let root = parse(src);
    let class = &root.children[0];
    assert_eq!(class.kind, NodeKind::ClassDefinition);
    assert_eq!(
        kinds(class),
        vec![
            NodeKind::Keyword,
            NodeKind::VariableName,
            NodeKind::ArgList,
            NodeKind::Body
        ]
    );
}

#[test]
fn test_nested_indent() {
    let src = "\
def foo() -> int:
    if True:
        return 1
    return 0
";
    let root = parse(src);
    let body = &root.children[0].children[4];
    // `:` + if + return
    assert_eq!(body.children.len(), 3);
}

#[test]
fn test_comments_and_blank_lines() {
    let src = "\
# leading comment

x = 1  # trailing

y = 2
";
    let root = parse(src);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_newline_inside_parens() {
    let root = parse("max(1,\n    2)\n");
    assert_eq!(root.children.len(), 1);
}

#[test]
fn test_indent_tokens() {
    let src = "if x:\n    pass\ny\n";
    let tokens: Vec<Token> = IndentLexer::new(src).map(|(t, _)| t).collect();
    assert_eq!(
        tokens,
        vec![
            Token::If,
            Token::Name,
            Token::Colon,
            Token::Newline,
            Token::Indent,
            Token::Pass,
            Token::Newline,
            Token::Dedent,
            Token::Name,
            Token::Newline,
            Token::Eof
        ]
    );
}

#[test]
fn test_bad_dedent() {
    let src = "if x:\n    pass\n  pass\n";
    let err = crate::parse(src).unwrap_err();
    assert!(err.message.contains("unindent"), "{}", err.message);
}

#[test]
fn test_missing_block() {
    let err = crate::parse("while True:\npass\n").unwrap_err();
    assert_eq!(err.message, "expected an indented block");
}
