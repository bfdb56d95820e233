use ast::expr::{ExprKind, Literal};
use ast::op::{BinOp, UnaryOp};
use ast::stmt::Stmt;
use ast::types::Type;
use ast::{Def, Program};

use crate::{parse_program, SyntaxError};

fn build(source: &str) -> Program {
    parse_program(source).expect("build failed")
}

fn build_err(source: &str) -> SyntaxError {
    match parse_program(source) {
        Ok(program) => panic!("expected a syntax error, got {:?}", program),
        Err(err) => err,
    }
}

#[test]
fn test_var_def() {
    let p = build("x: int = 5\nflag: bool = True\nnothing: None = None\n");
    assert_eq!(p.defs.len(), 3);
    assert!(p.stmts.is_empty());
    match &p.defs[0].node {
        Def::Var(var) => {
            assert_eq!(var.name, "x");
            assert_eq!(var.ty.node, Type::Int);
            assert_eq!(var.init.node, Literal::Int(5));
        }
        other => panic!("expected VarDef, got {:?}", other),
    }
    match &p.defs[1].node {
        Def::Var(var) => assert_eq!(var.init.node, Literal::Bool(true)),
        other => panic!("expected VarDef, got {:?}", other),
    }
    match &p.defs[2].node {
        Def::Var(var) => {
            assert_eq!(var.ty.node, Type::None);
            assert_eq!(var.init.node, Literal::None);
        }
        other => panic!("expected VarDef, got {:?}", other),
    }
}

#[test]
fn test_negative_initializer_is_folded() {
    let p = build("x: int = -3\n");
    match &p.defs[0].node {
        Def::Var(var) => assert_eq!(var.init.node, Literal::Int(-3)),
        other => panic!("expected VarDef, got {:?}", other),
    }
}

#[test]
fn test_func_def() {
    let src = "\
def add(a: int, b: int) -> int:
    total: int = 0
    total = a + b
    return total
";
    let p = build(src);
    match &p.defs[0].node {
        Def::Func(func) => {
            assert_eq!(func.name, "add");
            assert_eq!(func.ret, Type::Int);
            let names: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["a", "b"]);
            assert_eq!(func.body.defs.len(), 1);
            assert_eq!(func.body.stmts.len(), 2);
            assert!(matches!(&func.body.stmts[1].node, Stmt::Return(_)));
        }
        other => panic!("expected FuncDef, got {:?}", other),
    }
}

#[test]
fn test_missing_return_annotation_means_none() {
    let p = build("def f():\n    pass\n");
    match &p.defs[0].node {
        Def::Func(func) => assert_eq!(func.ret, Type::None),
        other => panic!("expected FuncDef, got {:?}", other),
    }
}

#[test]
fn test_bare_return_is_none_literal() {
    let p = build("def f():\n    return\n");
    match &p.defs[0].node {
        Def::Func(func) => match &func.body.stmts[0].node {
            Stmt::Return(value) => assert!(value.is_none_literal()),
            other => panic!("expected Return, got {:?}", other),
        },
        other => panic!("expected FuncDef, got {:?}", other),
    }
}

#[test]
fn test_elif_chain_nests_in_orelse() {
    let src = "\
if x > 0:
    y = 1
elif x < 0:
    y = 2
else:
    y = 3
";
    let p = build(src);
    assert_eq!(p.stmts.len(), 1);
    match &p.stmts[0].node {
        Stmt::If { body, orelse, .. } => {
            assert_eq!(body.len(), 1);
            assert_eq!(orelse.len(), 1);
            match &orelse[0].node {
                Stmt::If { orelse, .. } => {
                    assert_eq!(orelse.len(), 1);
                    assert!(matches!(&orelse[0].node, Stmt::Assign { .. }));
                }
                other => panic!("expected nested If, got {:?}", other),
            }
            // the elif arm starts at its keyword
            assert_eq!(&src[orelse[0].span.clone()][..4], "elif");
        }
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_if_without_else_has_empty_orelse() {
    let p = build("if True:\n    pass\n");
    match &p.stmts[0].node {
        Stmt::If { orelse, .. } => assert!(orelse.is_empty()),
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_expressions() {
    let p = build("print(-(1 + 2) * 3 is None)\nnot True\n");
    match &p.stmts[0].node {
        Stmt::Expr(expr) => match &expr.kind {
            ExprKind::Call { func, args } => {
                assert_eq!(func, "print");
                assert_eq!(args.len(), 1);
                match &args[0].kind {
                    ExprKind::BinOp { op, left, .. } => {
                        assert_eq!(*op, BinOp::Is);
                        assert!(matches!(left.kind, ExprKind::BinOp { op: BinOp::Mul, .. }));
                    }
                    other => panic!("expected BinOp, got {:?}", other),
                }
            }
            other => panic!("expected Call, got {:?}", other),
        },
        other => panic!("expected Expr, got {:?}", other),
    }
    match &p.stmts[1].node {
        Stmt::Expr(expr) => assert!(matches!(
            expr.kind,
            ExprKind::UnaryOp {
                op: UnaryOp::Not,
                ..
            }
        )),
        other => panic!("expected Expr, got {:?}", other),
    }
}

#[test]
fn test_expressions_start_untyped() {
    let p = build("1 + 2\n");
    match &p.stmts[0].node {
        Stmt::Expr(expr) => assert_eq!(expr.ty, None),
        other => panic!("expected Expr, got {:?}", other),
    }
}

#[test]
fn test_class_is_recorded_apart() {
    let src = "\
class Point:
    x: int = 0
    y: int = 0
print(1)
";
    let p = build(src);
    assert!(p.defs.is_empty());
    assert_eq!(p.classes.len(), 1);
    assert_eq!(p.classes[0].node.name, "Point");
    assert_eq!(p.classes[0].node.fields.len(), 2);
}

#[test]
fn test_declaration_after_statement() {
    let err = build_err("print(1)\nx: int = 1\n");
    assert_eq!(err.message, "Declaration cannot be after Statement");
    assert_eq!(err.text, "x: int = 1");
}

#[test]
fn test_declaration_after_statement_in_function() {
    let err = build_err("def f():\n    pass\n    x: int = 1\n");
    assert_eq!(err.message, "Declaration cannot be after Statement");
}

#[test]
fn test_nested_function_rejected() {
    let err = build_err("def f():\n    def g():\n        pass\n");
    assert_eq!(err.message, "Nested function definition not allowed");
}

#[test]
fn test_var_def_in_if_rejected() {
    let err = build_err("def f():\n    if True:\n        x: int = 1\n");
    assert_eq!(err.message, "Can't have variable declaration here");
}

#[test]
fn test_unsupported_type() {
    let err = build_err("x: str = 1\n");
    assert_eq!(err.message, "Unsupported type");
    assert_eq!(err.text, "str");
}

#[test]
fn test_non_literal_initializer() {
    let err = build_err("x: int = 1 + 2\n");
    assert_eq!(err.message, "Declaration has to be literal");
}

#[test]
fn test_unsupported_operator() {
    let err = build_err("True and False\n");
    assert_eq!(err.message, "and is not supported");
    let err = build_err("x is not None\n");
    assert_eq!(err.message, "is not is not supported");
    let err = build_err("+1\n");
    assert_eq!(err.message, "Unsupported operator");
}

#[test]
fn test_unsupported_statement_and_expression() {
    let err = build_err("while True:\n    break\n");
    assert!(err.message.starts_with("Unsupported statement"), "{}", err.message);
    let err = build_err("print(\"hi\")\n");
    assert_eq!(err.message, "Unsupported expression");
    let err = build_err("p.x\n");
    assert_eq!(err.message, "Unsupported expression");
}

#[test]
fn test_chained_assignment_rejected() {
    let err = build_err("a = b = 1\n");
    assert_eq!(err.message, "Trailing expression");
}

#[test]
fn test_integer_out_of_range() {
    let err = build_err("x: int = 4294967296\n");
    assert_eq!(err.message, "Integer literal out of range");
}

#[test]
fn test_missing_param_annotation() {
    let err = build_err("def f(a):\n    pass\n");
    assert_eq!(err.node, Some(crate::NodeKind::Punctuation));
}

#[test]
fn test_parse_error_surfaces_as_syntax_error() {
    let err = build_err("x = (1\n");
    assert!(err.node.is_none());
    assert!(err.to_string().starts_with("Could not parse"));
}
