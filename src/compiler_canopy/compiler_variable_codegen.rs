//java code for declarations and assignments,
//an initializing assignment is folded into the declaration line

use super::compiler_call_codegen::codegen_call;
use super::compiler_context::Compiler;
use super::compiler_math_codegen::codegen_expression;
use crate::ast::{AssignedValue, Assignment, CallKind, Declaration, VarType};
use std::fmt;

fn tree_constructor(var_type: VarType) -> Option<(&'static str, &'static str)> {
    match var_type {
        VarType::RedBlackTree => Some(("Tree<Integer>", "RBT")),
        VarType::AvlTree => Some(("Tree<Integer>", "AVL")),
        VarType::BinarySearchTree => Some(("Tree<Integer>", "BST")),
        VarType::ExpressionTree => Some(("EXP<Integer>", "EXP")),
        _ => None,
    }
}

fn java_type(var_type: VarType) -> &'static str {
    match var_type {
        VarType::Bool => "boolean",
        VarType::Constant => "final int",
        _ => "int",
    }
}

// calculate yields a double, it only ever reaches int targets
pub fn codegen_value(value: &AssignedValue) -> String {
    match value {
        AssignedValue::Expression(expr) => codegen_expression(expr),
        AssignedValue::Call(call) if call.kind == CallKind::Calculate => {
            format!("(int) {}", codegen_call(call))
        }
        AssignedValue::Call(call) => codegen_call(call),
    }
}

pub fn codegen_declaration(c: &mut Compiler, decl: &Declaration) -> fmt::Result {
    let name = &decl.name.name;
    if let Some((interface, class)) = tree_constructor(decl.var_type) {
        return c.line(&format!("{} {} = new {}<>();", interface, name, class));
    }
    let java_type = java_type(decl.var_type);
    match &decl.assignment {
        Some(assignment) => c.line(&format!(
            "{} {} = {};",
            java_type,
            name,
            codegen_value(&assignment.value)
        )),
        None => c.line(&format!("{} {};", java_type, name)),
    }
}

pub fn codegen_assignment(c: &mut Compiler, assignment: &Assignment) -> fmt::Result {
    c.line(&format!(
        "{} = {};",
        assignment.target.name,
        codegen_value(&assignment.value)
    ))
}
