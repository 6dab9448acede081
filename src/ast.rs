//AST (abstract syntax tree) is what the semantic actions build during the parse
//every node owns its children, the Program is the root of the tree

use crate::lexer_tokenizer::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Int,
    Bool,
    Constant,
    RedBlackTree,
    AvlTree,
    BinarySearchTree,
    ExpressionTree,
}

impl VarType {
    // Type a variable of this kind has when read inside an expression
    pub fn value_type(self) -> VarType {
        match self {
            VarType::Constant => VarType::Int,
            other => other,
        }
    }

    pub fn is_primitive(self) -> bool {
        matches!(self, VarType::Int | VarType::Bool | VarType::Constant)
    }

    pub fn is_ordered_tree(self) -> bool {
        matches!(
            self,
            VarType::RedBlackTree | VarType::AvlTree | VarType::BinarySearchTree
        )
    }

    pub fn is_tree(self) -> bool {
        self.is_ordered_tree() || self == VarType::ExpressionTree
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarType::Int => "int",
            VarType::Bool => "bool",
            VarType::Constant => "const",
            VarType::RedBlackTree => "rbt",
            VarType::AvlTree => "avl",
            VarType::BinarySearchTree => "bst",
            VarType::ExpressionTree => "exp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Int(i32),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Constant(Constant),
    Parenthesized(Box<Expression>),
    Variable(Identifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Logical,
    Equality,
    Ordering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOperator {
    pub fn class(self) -> OperatorClass {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Mod => OperatorClass::Arithmetic,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
            BinaryOperator::Equal | BinaryOperator::NotEqual => OperatorClass::Equality,
            BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => OperatorClass::Ordering,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Not(Box<Expression>),
    Factor(Factor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Insert,
    Remove,
    Includes,
    Height,
    Depth,
    Calculate,
    Visualize,
    Add,
    Sub,
}

impl CallKind {
    pub fn method_name(self) -> &'static str {
        match self {
            CallKind::Insert => "insert",
            CallKind::Remove => "remove",
            CallKind::Includes => "includes",
            CallKind::Height => "height",
            CallKind::Depth => "depth",
            CallKind::Calculate => "calculate",
            CallKind::Visualize => "visualize",
            CallKind::Add => "add",
            CallKind::Sub => "sub",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub receiver: Identifier,
    pub kind: CallKind,
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignedValue {
    Expression(Expression),
    Call(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: AssignedValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: Identifier,
    pub var_type: VarType,
    pub assignment: Option<Assignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfKind {
    If,
    IfElse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

impl IfStatement {
    pub fn kind(&self) -> IfKind {
        if self.else_block.is_some() {
            IfKind::IfElse
        } else {
            IfKind::If
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpression {
    pub start: Expression,
    pub end: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub variable: Identifier,
    pub range: RangeExpression,
    pub block: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Inorder,
    Preorder,
    Postorder,
}

impl TraversalOrder {
    pub fn method_name(self) -> &'static str {
        match self {
            TraversalOrder::Inorder => "inorder",
            TraversalOrder::Preorder => "preorder",
            TraversalOrder::Postorder => "postorder",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterateStatement {
    pub target: Identifier,
    pub order: TraversalOrder,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(IfStatement),
    For(ForStatement),
    FunctionCall(FunctionCall),
    Declaration(Declaration),
    Assignment(Assignment),
    Iterate(IterateStatement),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}
