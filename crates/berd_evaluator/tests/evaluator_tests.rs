//! Evaluator integration tests.
//!
//! Programs are parsed with the real parser and evaluated against a fresh
//! global scope.

use berd_ast::{ClassDeclarationStatement, Lifetime, LifetimeUnit, Modifiers, NodeKind, Statement};
use berd_diagnostics::DiagnosticCategory;
use berd_evaluator::{EvalError, Evaluator, RuntimeValue, Scope};

/// Helper: parse and evaluate, returning the value and the evaluator.
fn run_with(source: &str, scope: &Scope<'_>) -> (Result<RuntimeValue, EvalError>, Evaluator) {
    let program = berd_parser::parse(source).unwrap_or_else(|err| panic!("parse failed: {err}"));
    let mut evaluator = Evaluator::new();
    let value = evaluator.evaluate_program(&program, scope);
    (value, evaluator)
}

/// Helper: the value of a program that must evaluate cleanly.
fn eval(source: &str) -> RuntimeValue {
    let scope = Scope::new();
    let (value, evaluator) = run_with(source, &scope);
    assert!(evaluator.diagnostics().is_empty(), "{source}");
    value.unwrap_or_else(|err| panic!("evaluation of {source:?} failed: {err}"))
}

fn eval_err(source: &str) -> EvalError {
    let scope = Scope::new();
    run_with(source, &scope).0.unwrap_err()
}

fn num(value: f64) -> RuntimeValue {
    RuntimeValue::Number(value)
}

#[test]
fn test_declaration_binds_value() {
    let scope = Scope::new();
    let (value, _) = run_with("const const x = 5!", &scope);
    assert_eq!(value.unwrap(), num(5.0));
    assert_eq!(scope.lookup("x").unwrap(), num(5.0));

    let binding = scope.binding("x").unwrap();
    assert_eq!(binding.modifiers, Modifiers(false, false));
    assert_eq!(binding.lifetime, None);
}

#[test]
fn test_declaration_records_modifiers_and_lifetime() {
    let scope = Scope::new();
    run_with("var const t<20s> = 1!\nvar var u!", &scope).0.unwrap();

    let t = scope.binding("t").unwrap();
    assert_eq!(t.modifiers, Modifiers(true, false));
    assert_eq!(
        t.lifetime,
        Some(Lifetime {
            duration: 20.0,
            unit: LifetimeUnit::Seconds
        })
    );
    assert_eq!(scope.lookup("u").unwrap(), RuntimeValue::Undefined);
}

#[test]
fn test_if_else() {
    assert_eq!(eval("if (1 < 2) { 3! } else { 4! }"), num(3.0));
    assert_eq!(eval("if (2 < 1) { 3! } else { 4! }"), num(4.0));
    assert_eq!(eval("if (0) { 1! } else if (1) { 2! } else { 3! }"), num(2.0));
    assert_eq!(eval("if (0) { 1! }"), RuntimeValue::Null);
}

#[test]
fn test_truthiness_in_if_tests() {
    let cases = [
        ("0", false),
        ("''", false),
        ("u", false),
        ("1", true),
        ("-2", true),
        ("'a'", true),
        ("1 < 2", true),
        ("2 < 1", false),
    ];
    for (test, expected) in cases {
        let source = format!("var var u!\nif ({test}) {{ 1! }} else {{ 0! }}");
        let value = eval(&source);
        assert_eq!(value, num(if expected { 1.0 } else { 0.0 }), "{test}");
    }
    assert!(!RuntimeValue::Null.is_truthy());
}

#[test]
fn test_empty_program_is_null() {
    assert_eq!(eval(""), RuntimeValue::Null);
}

#[test]
fn test_block_value_is_last_statement() {
    assert_eq!(eval("1!\n2!\n3!"), num(3.0));
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("1 + 2 * 3!"), num(7.0));
    assert_eq!(eval("(1 + 2) * 3!"), num(9.0));
    assert_eq!(eval("7 % 4 - 10 / 4!"), num(0.5));
    assert_eq!(eval("2 ^ 3 ^ 2!"), num(64.0));
    assert_eq!(eval("1 / 0!").to_string(), "Infinity");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval("'a' + 1!"), RuntimeValue::string("a1"));
    assert_eq!(eval("1 + 2 + 'x'!"), RuntimeValue::string("3x"));
    assert_eq!(eval("'x' + 1 + 2!"), RuntimeValue::string("x12"));
}

#[test]
fn test_equality_tiers() {
    let cases = [
        ("1 == '1'", RuntimeValue::Boolean(true)),
        ("1 === '1'", RuntimeValue::Boolean(false)),
        ("1 ;= 2", RuntimeValue::Boolean(true)),
        ("'a' ;== 'a'", RuntimeValue::Boolean(false)),
        ("1 ==== 1", RuntimeValue::Null),
        ("1 ;=== 2", RuntimeValue::Null),
    ];
    for (source, expected) in cases {
        assert_eq!(eval(&format!("{source}!")), expected, "{source}");
    }
}

#[test]
fn test_bitwise() {
    assert_eq!(eval("6 & 3!"), num(2.0));
    assert_eq!(eval("6 | 3!"), num(7.0));
    assert_eq!(eval("6 ** 3!"), num(5.0));
    assert_eq!(eval("1 << 4!"), num(16.0));
    assert_eq!(eval("1 <<< 4!"), num(16.0));
    assert_eq!(eval("~5!"), num(-6.0));
}

#[test]
fn test_prefix() {
    assert_eq!(eval("-'3'!"), num(-3.0));
    assert_eq!(eval(";0!"), RuntimeValue::Boolean(true));
    assert_eq!(eval(";'a'!"), RuntimeValue::Boolean(false));
    assert_eq!(eval("var var u!\n-u!"), RuntimeValue::Null);
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    assert_eq!(eval("var var n = 0!\n0 && (n = 5)!\nn!"), num(5.0));
    assert_eq!(eval("1 || 0!"), RuntimeValue::Boolean(true));
    assert_eq!(eval("'a' && ''!"), RuntimeValue::Boolean(false));
}

#[test]
fn test_assignment() {
    assert_eq!(eval("var var x = 1!\nx = x + 2!\nx!"), num(3.0));
    assert_eq!(eval("var var x = 1!\nx = 7!"), num(7.0));
}

#[test]
fn test_combined_assignment_computes() {
    assert_eq!(eval("var var x = 2!\nx ^= 3!\nx!"), num(8.0));
    assert_eq!(eval("var var x = 10!\nx -= 4!\nx!"), num(6.0));
    assert_eq!(eval("var var s = 'a'!\ns += 'b'!\ns!"), RuntimeValue::string("ab"));
}

#[test]
fn test_blocks_share_the_enclosing_scope() {
    let scope = Scope::new();
    let (value, _) = run_with("if (1) { const const inner = 2! }", &scope);
    assert_eq!(value.unwrap(), num(2.0));
    assert_eq!(scope.lookup("inner").unwrap(), num(2.0));
}

#[test]
fn test_redeclaration_fails() {
    assert_eq!(
        eval_err("const const x = 1!\nvar var x = 2!"),
        EvalError::AlreadyDeclared {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_unresolved_symbol_fails() {
    assert_eq!(
        eval_err("y!"),
        EvalError::Unresolved {
            name: "y".to_string()
        }
    );
    assert_eq!(
        eval_err("y = 1!"),
        EvalError::Unresolved {
            name: "y".to_string()
        }
    );
}

#[test]
fn test_under_construction_nodes_yield_null() {
    let cases = [
        ("function f(a) => a!", NodeKind::FunctionDeclarationStatement),
        ("when (1) { 2! }", NodeKind::WhenStatement),
        ("var var x = 1!\n++x!", NodeKind::StateExpression),
        ("var var x = 1!\nprevious x!", NodeKind::StateExpression),
        ("print(1, 2)!", NodeKind::CallExpression),
    ];
    for (source, kind) in cases {
        let scope = Scope::new();
        let (value, evaluator) = run_with(source, &scope);
        assert_eq!(value.unwrap(), RuntimeValue::Null, "{source}");

        let diagnostics = evaluator.diagnostics().diagnostics();
        assert_eq!(diagnostics.len(), 1, "{source}");
        assert_eq!(diagnostics[0].code, 9001);
        assert_eq!(diagnostics[0].category, DiagnosticCategory::Message);
        assert_eq!(
            diagnostics[0].message_text,
            format!("This AST node type ({}) is under construction.", kind.name())
        );
    }
}

#[test]
fn test_evaluation_continues_after_under_construction() {
    let scope = Scope::new();
    let (value, evaluator) = run_with("function f() => 1!\nconst const y = 2!\ny!", &scope);
    assert_eq!(value.unwrap(), num(2.0));
    assert_eq!(evaluator.diagnostics().len(), 1);
}

#[test]
fn test_member_assignment_runs_value_only() {
    let scope = Scope::new();
    let (value, evaluator) = run_with("var var n = 0!\nvar var o = 1!\no.x = (n = 4)!", &scope);
    assert_eq!(value.unwrap(), RuntimeValue::Null);
    assert_eq!(scope.lookup("n").unwrap(), num(4.0));
    assert_eq!(evaluator.diagnostics().len(), 1);
}

#[test]
fn test_unregistered_kinds_are_errors() {
    assert_eq!(
        eval_err("var var o = 1!\no.x!"),
        EvalError::Unhandled {
            kind: NodeKind::MemberExpression
        }
    );

    let scope = Scope::new();
    let mut evaluator = Evaluator::new();
    let statement = Statement::ClassDeclaration(ClassDeclarationStatement {});
    assert!(!evaluator.is_registered(NodeKind::ClassDeclarationStatement));
    assert_eq!(
        evaluator.evaluate(&statement, &scope),
        Err(EvalError::Unhandled {
            kind: NodeKind::ClassDeclarationStatement
        })
    );
}

#[test]
fn test_sentinels_are_under_construction() {
    let scope = Scope::new();
    let mut evaluator = Evaluator::new();
    assert_eq!(
        evaluator.evaluate(&Statement::EndOfFile, &scope),
        Ok(RuntimeValue::Null)
    );
    assert_eq!(
        evaluator.take_diagnostics().diagnostics()[0].message_text,
        "This AST node type (EOFStatement) is under construction."
    );
    assert!(evaluator.diagnostics().is_empty());
}

#[test]
fn test_independent_evaluators() {
    let mut first = Evaluator::new();
    first.register(NodeKind::NumberExpression, |_, _, _| Ok(RuntimeValue::Null));
    let scope = Scope::new();
    let program = berd_parser::parse("5!").unwrap();
    assert_eq!(first.evaluate_program(&program, &scope), Ok(RuntimeValue::Null));
    assert_eq!(Evaluator::new().evaluate_program(&program, &scope), Ok(num(5.0)));
}

// ============================================================================
// Scope chain
// ============================================================================

#[test]
fn test_scope_chain_lookup_and_assign() {
    let global = Scope::new();
    global
        .declare("x", num(1.0), Modifiers::default(), None)
        .unwrap();
    let child = global.child();

    assert_eq!(child.lookup("x").unwrap(), num(1.0));
    assert!(!child.has_own("x"));

    child.assign("x", num(2.0)).unwrap();
    assert_eq!(global.lookup("x").unwrap(), num(2.0));
    assert!(!child.has_own("x"));
}

#[test]
fn test_scope_shadowing() {
    let global = Scope::new();
    global
        .declare("x", num(1.0), Modifiers::default(), None)
        .unwrap();
    let child = global.child();
    child
        .declare("x", num(10.0), Modifiers::default(), None)
        .unwrap();

    assert_eq!(child.lookup("x").unwrap(), num(10.0));
    assert_eq!(global.lookup("x").unwrap(), num(1.0));
    assert!(child.declare("x", num(3.0), Modifiers::default(), None).is_err());
}

#[test]
fn test_scope_miss() {
    let global = Scope::new();
    let child = global.child();
    assert!(child.resolve("missing").is_none());
    assert_eq!(
        child.lookup("missing"),
        Err(EvalError::Unresolved {
            name: "missing".to_string()
        })
    );
}

#[test]
fn test_evaluate_in_child_scope_writes_through() {
    let global = Scope::new();
    global
        .declare("x", num(1.0), Modifiers(true, true), None)
        .unwrap();
    let child = global.child();
    let (value, _) = run_with("x += 1!\nconst const local = x!", &child);
    assert_eq!(value.unwrap(), num(2.0));
    assert_eq!(global.lookup("x").unwrap(), num(2.0));
    assert!(global.resolve("local").is_none());
}
