use arbor::ast::Program;
use arbor::{CompilationContext, ErrorCode, GeneratorOptions, compile, compile_with, parse};
use pretty_assertions::assert_eq;

fn error_code(src: &str) -> ErrorCode {
    match compile(src) {
        Ok(java) => panic!("expected a compile error, got:\n{}", java),
        Err(e) => e.code(),
    }
}

fn body(src: &str) -> Vec<String> {
    let java = compile(src).unwrap_or_else(|e| panic!("compile failed: {}", e));
    java.lines()
        .skip(5)
        .take_while(|line| *line != "    }")
        .map(|line| line.to_string())
        .collect()
}

#[test]
fn generates_complete_class() {
    let src = r#"
        t: rbt;
        t.insert(4);
        t.insert(2);
        e: exp;
        r: int = e.calculate(6 * (3 + 4));
        found: bool = t.includes(4);
        if (found && r > 10) {
            t.remove(2);
        } else {
            t.visualize();
        }
        for i in 0 to 5 {
            t.insert(i * 2);
        }
        iterate t inorder;
    "#;
    let expected = "\
import java.util.*;
import java.io.IOException;

public class Main {
    public static void main(String[] args) throws IOException {
        Tree<Integer> t = new RBT<>();
        t.insert(4);
        t.insert(2);
        EXP<Integer> e = new EXP<>();
        int r = (int) e.calculate(\"6 * (3 + 4)\");
        boolean found = t.includes(4);
        if (found && r > 10) {
            t.remove(2);
        } else {
            t.visualize();
        }
        for (int i = 0; i < 5; i++) {
            t.insert(i * 2);
        }
        t.inorder();
    }
}
";
    assert_eq!(compile(src).unwrap(), expected);
}

#[test]
fn empty_program_is_just_the_wrapper() {
    let java = compile("// nothing here\n").unwrap();
    assert_eq!(java.lines().count(), 7);
    assert!(java.ends_with("    }\n}\n"));
}

#[test]
fn integer_declaration_with_initializer() {
    assert_eq!(body("x: int = 2 + 3;"), vec!["        int x = 2 + 3;"]);
}

#[test]
fn inserts_stay_in_source_order() {
    assert_eq!(
        body("t: rbt; t.insert(4); t.insert(2);"),
        vec![
            "        Tree<Integer> t = new RBT<>();",
            "        t.insert(4);",
            "        t.insert(2);",
        ]
    );
}

#[test]
fn for_range_is_half_open() {
    assert_eq!(
        body("for i in 0 to 5 { }"),
        vec!["        for (int i = 0; i < 5; i++) {", "        }"]
    );
}

#[test]
fn every_tree_kind_and_primitive_declaration() {
    assert_eq!(
        body("a: avl; b: bst; c: rbt; e: exp; n: int; f: bool = !false; k: const = 7;"),
        vec![
            "        Tree<Integer> a = new AVL<>();",
            "        Tree<Integer> b = new BST<>();",
            "        Tree<Integer> c = new RBT<>();",
            "        EXP<Integer> e = new EXP<>();",
            "        int n;",
            "        boolean f = !false;",
            "        final int k = 7;",
        ]
    );
}

#[test]
fn constants_read_as_int() {
    assert_eq!(
        body("k: const = 4; x: int = (k + 1) * 2;"),
        vec!["        final int k = 4;", "        int x = (k + 1) * 2;"]
    );
}

#[test]
fn nested_blocks_indent_one_level_each() {
    let src = "t: bst; b: bool = true; for i in 1 to 3 { if (b) { t.insert(i); } }";
    assert_eq!(
        body(src),
        vec![
            "        Tree<Integer> t = new BST<>();",
            "        boolean b = true;",
            "        for (int i = 1; i < 3; i++) {",
            "            if (b) {",
            "                t.insert(i);",
            "            }",
            "        }",
        ]
    );
}

#[test]
fn tree_merge_and_traversals() {
    assert_eq!(
        body("t: rbt; u: avl; t.add(u); t.sub(u); iterate u preorder; iterate t postorder;"),
        vec![
            "        Tree<Integer> t = new RBT<>();",
            "        Tree<Integer> u = new AVL<>();",
            "        t.add(u);",
            "        t.sub(u);",
            "        u.preorder();",
            "        t.postorder();",
        ]
    );
}

#[test]
fn query_results_assign_to_matching_types() {
    assert_eq!(
        body("t: rbt; h: int; h = t.height(); d: int = t.depth(h); b: bool; b = t.includes(d);"),
        vec![
            "        Tree<Integer> t = new RBT<>();",
            "        int h;",
            "        h = t.height();",
            "        int d = t.depth(h);",
            "        boolean b;",
            "        b = t.includes(d);",
        ]
    );
}

#[test]
fn custom_class_name() {
    let mut ctx = CompilationContext::new();
    let options = GeneratorOptions {
        class_name: "Forest".to_string(),
    };
    let java = compile_with("x: int = 1;", &mut ctx, &options).unwrap();
    assert!(java.contains("public class Forest {"));
}

#[test]
fn redeclaration_is_rejected() {
    assert_eq!(error_code("x: int; x: bool;"), ErrorCode::AlreadyDeclared);
    assert_eq!(error_code("t: rbt; t: avl;"), ErrorCode::AlreadyDeclared);
}

#[test]
fn undeclared_names_everywhere() {
    assert_eq!(error_code("y = 3;"), ErrorCode::UndeclaredVariable);
    assert_eq!(error_code("x: int = z + 1;"), ErrorCode::UndeclaredVariable);
    assert_eq!(error_code("t.insert(1);"), ErrorCode::UndeclaredVariable);
    assert_eq!(error_code("t: rbt; t.insert(q);"), ErrorCode::UndeclaredVariable);
    assert_eq!(error_code("iterate t inorder;"), ErrorCode::UndeclaredVariable);
    assert_eq!(error_code("if (flag) { }"), ErrorCode::UndeclaredVariable);
}

#[test]
fn use_before_assignment() {
    assert_eq!(error_code("x: int; y: int = x;"), ErrorCode::UseBeforeAssignment);
    assert_eq!(error_code("b: bool; if (b) { }"), ErrorCode::UseBeforeAssignment);
}

#[test]
fn self_reference_in_initializer_is_use_before_assignment() {
    // the use is reduced before the declaration that names it
    assert_eq!(error_code("x: int = x + 1;"), ErrorCode::UseBeforeAssignment);
    assert_eq!(error_code("x: int; x = x + 1;"), ErrorCode::UseBeforeAssignment);
}

#[test]
fn reassignment_after_first_value_is_fine() {
    assert_eq!(
        body("x: int; x = 1; x = x + 1;"),
        vec!["        int x;", "        x = 1;", "        x = x + 1;"]
    );
}

#[test]
fn branch_assignment_does_not_cover_later_uses() {
    let src = "x: int; b: bool = true; if (b) { x = 1; } y: int = x;";
    assert_eq!(error_code(src), ErrorCode::UseBeforeAssignment);

    let inside = "x: int; b: bool = true; if (b) { x = 1; y: int = x; }";
    assert!(compile(inside).is_ok());
}

#[test]
fn loop_variable_is_scoped_to_its_loop() {
    assert_eq!(
        error_code("for i in 0 to 2 { } x: int = i;"),
        ErrorCode::UseBeforeAssignment
    );
    assert!(compile("for i in 0 to 2 { } for i in 0 to 3 { }").is_ok());
    assert_eq!(
        error_code("for i in 0 to 2 { for i in 0 to 3 { } }"),
        ErrorCode::AlreadyDeclared
    );
    assert_eq!(error_code("i: int = 0; for i in 0 to 2 { }"), ErrorCode::AlreadyDeclared);
}

#[test]
fn block_declared_variable_is_not_assignable_after_its_block() {
    assert_eq!(
        error_code("b: bool = true; if (b) { x: int; } x = 5;"),
        ErrorCode::UndeclaredVariable
    );
    assert_eq!(
        error_code("for j in 0 to 2 { x: int = j; } x = 1;"),
        ErrorCode::UndeclaredVariable
    );
    assert_eq!(
        error_code("b: bool = true; if (b) { t: rbt; } t.insert(1);"),
        ErrorCode::UndeclaredVariable
    );
    assert_eq!(
        body("b: bool = true; if (b) { x: int; x = 5; }"),
        vec![
            "        boolean b = true;",
            "        if (b) {",
            "            int x;",
            "            x = 5;",
            "        }",
        ]
    );
}

#[test]
fn loop_variable_is_not_assignable_after_its_loop() {
    assert_eq!(error_code("for i in 0 to 3 { } i = 7;"), ErrorCode::UndeclaredVariable);
    assert_eq!(
        error_code("for i in 0 to 3 { } for j in 0 to 2 { i = j; }"),
        ErrorCode::UndeclaredVariable
    );
    // a later loop takes the name over, assignments inside it are fine
    assert!(compile("for i in 0 to 3 { } for i in 0 to 2 { i = i + 1; }").is_ok());
}

#[test]
fn java_reserved_names_are_rejected() {
    assert_eq!(error_code("args: int = 1;"), ErrorCode::ReservedName);
    assert_eq!(error_code("new: int = 1;"), ErrorCode::ReservedName);
    assert_eq!(error_code("class: bool = true;"), ErrorCode::ReservedName);
    assert_eq!(error_code("return: rbt;"), ErrorCode::ReservedName);
    assert_eq!(error_code("for while in 0 to 2 { }"), ErrorCode::ReservedName);
    assert!(compile("newer: int = 1; classes: bool = true; arg: int = 2;").is_ok());
}

#[test]
fn calls_must_fit_the_receiver() {
    assert_eq!(error_code("x: int = 1; x.includes(3);"), ErrorCode::InvalidCallForType);
    assert_eq!(error_code("t: rbt; t.calculate(1);"), ErrorCode::InvalidCallForType);
    assert_eq!(error_code("e: exp; e.insert(1);"), ErrorCode::InvalidCallForType);
    assert_eq!(error_code("t: rbt; t.height(3);"), ErrorCode::InvalidCallForType);
    assert_eq!(error_code("t: rbt; t.insert();"), ErrorCode::InvalidCallForType);
}

#[test]
fn call_arguments_are_typed() {
    assert_eq!(error_code("t: rbt; t.insert(true);"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("t: rbt; t.add(3);"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("t: rbt; n: int = 1; t.add(n);"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("t: rbt; e: exp; t.sub(e);"), ErrorCode::TypeMismatch);
}

#[test]
fn non_bool_condition_fails_before_generation() {
    assert_eq!(error_code("n: int = 1; if (n) { }"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("b: bool = true; for i in 0 to b { }"), ErrorCode::TypeMismatch);
}

#[test]
fn expression_operand_types() {
    assert_eq!(error_code("x: int = 1 + true;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("b: bool = 1 && true;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("b: bool = 1 == true;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("b: bool = true < false;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("b: bool = !3;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("t: rbt; x: int = t + 1;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("x: int = true;"), ErrorCode::TypeMismatch);
}

#[test]
fn late_declaration_with_wrong_type_is_type_mismatch() {
    // y is unresolved when `y + 1` is reduced, its declared type is checked afterwards
    assert_eq!(
        error_code("b: bool = y + 1 > 2; y: bool = true;"),
        ErrorCode::TypeMismatch
    );
    assert_eq!(
        error_code("b: bool = x == 1; x: int = 2;"),
        ErrorCode::UseBeforeAssignment
    );
}

#[test]
fn assignment_targets_and_values() {
    assert_eq!(error_code("t: rbt; t = 3;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("k: const = 4; k = 5;"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("t: rbt; b: bool = t.height();"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("t: rbt; x: int = t.insert(1);"), ErrorCode::TypeMismatch);
    assert_eq!(error_code("e: exp; b: bool = e.calculate(1);"), ErrorCode::TypeMismatch);
}

#[test]
fn only_ordered_trees_iterate() {
    assert_eq!(error_code("e: exp; iterate e inorder;"), ErrorCode::InvalidTraversalTarget);
    assert_eq!(error_code("n: int = 1; iterate n inorder;"), ErrorCode::InvalidTraversalTarget);
}

#[test]
fn lexical_and_grammar_errors() {
    assert_eq!(error_code("x: int = 99999999999;"), ErrorCode::MalformedToken);
    assert_eq!(error_code("x: int = 1 @ 2;"), ErrorCode::MalformedToken);
    assert_eq!(error_code("x: int = ;"), ErrorCode::UnexpectedToken);
    assert_eq!(error_code("x int;"), ErrorCode::UnexpectedToken);
    assert_eq!(error_code("if b { }"), ErrorCode::UnexpectedToken);
}

#[test]
fn deferred_pass_reports_every_bad_use() {
    let mut ctx = CompilationContext::new();
    let err = parse("a: int = b + c;", &mut ctx).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UndeclaredVariable);
    assert_eq!(err.span().start, 9);
    assert_eq!(ctx.diagnostics().len(), 2);
}

#[test]
fn context_reset_allows_reuse() {
    let mut ctx = CompilationContext::new();
    let options = GeneratorOptions::default();
    compile_with("x: int = 1;", &mut ctx, &options).unwrap();
    assert_eq!(
        compile_with("x: int = 1;", &mut ctx, &options).unwrap_err().code(),
        ErrorCode::AlreadyDeclared
    );
    ctx.reset();
    assert!(compile_with("x: int = 1;", &mut ctx, &options).is_ok());
}

#[test]
fn full_grammar_program_survives_clone_and_drop() {
    let src = r#"
        t: rbt; u: bst; e: exp; n: int = 3; b: bool = !(n < 2) || false; k: const = 1;
        n = e.calculate(n * 2);
        t.insert(n % 4); t.remove(k); t.add(u); t.sub(u); t.visualize();
        c: bool = t.includes(1);
        if (c == b) { } else { iterate t preorder; }
        h: int = t.height();
        for i in 0 to h { n = t.depth(i); }
    "#;
    let mut ctx = CompilationContext::new();
    let program: Program = parse(src, &mut ctx).unwrap();
    let copy = program.clone();
    assert_eq!(program, copy);
    drop(program);
    assert_eq!(copy.statements.len(), 16);
}
