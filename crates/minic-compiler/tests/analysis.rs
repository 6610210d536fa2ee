//! End-to-end tests: JSON tree (as an external parser would emit it) → AST →
//! semantic analysis → symbol table and diagnostics.

use minic_common::{DiagnosticKind, Position};
use minic_compiler::ast::{AstPrinter, BinaryOp, Expr, FunctionDef, Program, Stmt, TypeName, VarDecl};
use minic_compiler::semantic::{self, Analysis, Type, Value};

/// Parse a JSON program and analyze it.
fn analyze_json(json: &str) -> Analysis {
    let program: Program = serde_json::from_str(json).expect("invalid program JSON");
    semantic::analyze(&program)
}

fn value_of(analysis: &Analysis, scope: &str, name: &str) -> Option<Value> {
    let id = analysis
        .symbols()
        .find_scope(scope)
        .unwrap_or_else(|| panic!("no scope named {}", scope));
    analysis.symbols().scope(id).get(name).and_then(|s| s.value)
}

const SAMPLE: &str = r#"
{
  "function": {
    "return_type": "int",
    "name": "main",
    "params": [
      { "type": "int", "name": "n", "span": { "start": { "line": 1, "column": 14 } } }
    ],
    "body": [
      {
        "node": "Declaration",
        "type": "int",
        "vars": [
          {
            "name": "x",
            "init": {
              "node": "BinaryOp",
              "op": "PLUS",
              "left": { "node": "Number", "value": 2 },
              "right": {
                "node": "BinaryOp",
                "op": "*",
                "left": { "node": "Number", "value": 3 },
                "right": { "node": "Number", "value": 4 }
              }
            },
            "span": { "start": { "line": 2, "column": 9 } }
          },
          { "name": "y" }
        ]
      },
      { "node": "Assignment", "target": "y", "value": { "node": "Variable", "name": "x" } },
      { "node": "ExprStmt", "expr": { "node": "Boolean", "value": true } },
      { "node": "ReturnStmt", "value": { "node": "Variable", "name": "y" } }
    ]
  }
}
"#;

#[test]
fn json_program_analyzes_cleanly() {
    let analysis = analyze_json(SAMPLE);
    assert!(
        !analysis.has_errors(),
        "unexpected errors: {:?}",
        analysis.diagnostics()
    );
    assert_eq!(value_of(&analysis, "function_main_1", "x"), Some(Value::Int(14)));
    assert_eq!(value_of(&analysis, "function_main_1", "y"), Some(Value::Int(14)));
    assert_eq!(value_of(&analysis, "function_main_1", "n"), Some(Value::Int(0)));

    // `y` had no initializer.
    let warnings: Vec<_> = analysis.warnings().map(|w| w.message.as_str()).collect();
    assert_eq!(warnings, ["Variable 'y' declared but not initialized"]);
}

#[test]
fn json_positions_reach_the_symbol_table() {
    let analysis = analyze_json(SAMPLE);
    let id = analysis.symbols().find_scope("function_main_1").unwrap();
    let scope = analysis.symbols().scope(id);
    assert_eq!(scope.get("n").unwrap().declared_at, Position::new(1, 14));
    assert_eq!(scope.get("x").unwrap().declared_at.line, 2);
    assert_eq!(scope.get("y").unwrap().declared_at, Position::UNKNOWN);
}

#[test]
fn json_round_trips_through_printer() {
    let program: Program = serde_json::from_str(SAMPLE).unwrap();
    let dump = AstPrinter::print(&program);
    assert!(dump.starts_with("Program\n  FunctionDef: int main\n"));
    assert!(dump.contains("BinaryOp: times"));
    assert_eq!(
        program.to_string(),
        "int main(int n) { int x = (2 + (3 * 4)), y; y = x; true; return y; }"
    );
}

#[test]
fn errors_are_collected_in_one_pass() {
    let analysis = analyze_json(
        r#"
        {
          "function": {
            "return_type": "bool",
            "name": "check",
            "params": [
              { "type": "bool", "name": "p" },
              { "type": "int", "name": "p" }
            ],
            "body": [
              { "node": "Declaration", "type": "int", "vars": [
                { "name": "a", "init": { "node": "Boolean", "value": false } },
                { "name": "a" }
              ]},
              { "node": "Assignment", "target": "zz", "value": { "node": "Number", "value": 1 } },
              { "node": "ExprStmt", "expr": {
                "node": "BinaryOp", "op": "DIVIDE",
                "left": { "node": "Number", "value": 9 },
                "right": { "node": "Number", "value": 0 }
              }}
            ]
          }
        }
        "#,
    );

    let kinds: Vec<_> = analysis.errors().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::StructuralDuplicate,
            DiagnosticKind::TypeMismatch,
            DiagnosticKind::StructuralDuplicate,
            DiagnosticKind::UnknownIdentifier,
            DiagnosticKind::ArithmeticFault,
            DiagnosticKind::MissingReturn,
        ]
    );
    assert!(!analysis.summary().passed());
}

#[test]
fn shadowed_global_resolves_to_local() {
    // The language has no global declarations, so seed the table directly.
    let mut table = semantic::SymbolTable::new();
    table.declare("x", Type::Int, Position::UNKNOWN).unwrap();
    table.enter_scope("function_main");
    table
        .declare_with_value("x", Type::Bool, Some(Value::Bool(true)), Position::UNKNOWN)
        .unwrap();
    assert_eq!(table.get_type("x"), Some(Type::Bool));
    assert_eq!(table.get_value("x"), Some(Value::Bool(true)));
}

#[test]
fn uninitialized_value_propagates_as_unknown() {
    let program = Program::new(FunctionDef::new(
        TypeName::Int,
        "main",
        vec![],
        vec![
            Stmt::declaration(
                TypeName::Int,
                vec![
                    VarDecl::new("a", None),
                    VarDecl::new(
                        "b",
                        Some(Expr::binary(Expr::variable("a"), BinaryOp::Minus, Expr::number(1))),
                    ),
                ],
            ),
            Stmt::ret(Some(Expr::variable("b"))),
        ],
    ));
    let analysis = semantic::analyze(&program);
    assert!(!analysis.has_errors());
    assert_eq!(value_of(&analysis, "function_main_1", "b"), None);
    assert_eq!(
        analysis
            .diagnostics()
            .count(DiagnosticKind::UninitializedUse),
        1
    );
}

#[test]
fn symbol_table_snapshot_serializes() {
    let analysis = analyze_json(SAMPLE);
    let json = serde_json::to_value(analysis.symbols()).unwrap();
    let scopes = json["scopes"].as_array().unwrap();
    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes[0]["name"], "global");
    assert_eq!(scopes[0]["children"][0], 1);
    assert_eq!(scopes[1]["parent"], 0);
    assert_eq!(scopes[1]["symbols"]["x"]["value"], 14);
    assert_eq!(scopes[1]["symbols"]["x"]["ty"], "int");
    assert!(scopes[1]["symbols"]["y"]["initialized"].as_bool().unwrap());
}

#[test]
fn bundled_demo_checks_with_warnings_only() {
    let analysis = analyze_json(include_str!("../../../demos/uninitialized.json"));
    assert!(!analysis.has_errors(), "unexpected: {:?}", analysis.diagnostics());

    let warnings: Vec<_> = analysis.warnings().map(|w| w.kind).collect();
    assert_eq!(
        warnings,
        [
            DiagnosticKind::UninitializedDeclaration,
            DiagnosticKind::UninitializedUse,
        ]
    );
    assert_eq!(value_of(&analysis, "function_main_1", "step"), Some(Value::Int(5)));
    // step * limit, where limit holds the parameter default 0.
    assert_eq!(value_of(&analysis, "function_main_1", "total"), Some(Value::Int(0)));
}
