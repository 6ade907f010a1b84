//! Abstract Syntax Tree definitions for Maple.

use crate::error::Span;
use crate::semantic::PrimitiveType;

/// The root of the AST - one compilation unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    /// Namespace opened by a leading `init`
    pub fn namespace(&self) -> Option<&str> {
        match self.nodes.first() {
            Some(Node::NamespaceInit { namespace }) => Some(namespace),
            _ => None,
        }
    }

    /// Libraries imported by this unit, in source order
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::LibraryImport { module, .. } => Some(module.as_str()),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionNode> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Function(function) => Some(function),
            _ => None,
        })
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Fixed-count loop without a loop variable
    Run { count: String, body: Vec<Node> },
    Declare(DeclareNode),
    Set(SetNode),
    Output { name: String, index: Option<String> },
    If(ConditionalNode),
    Elif(ConditionalNode),
    Else { body: Vec<Node> },
    /// Closes an `if` chain
    End,
    Loop(LoopNode),
    /// Closes a `loop`
    Roll,
    SaveState { name: String },
    RestoreState { name: String },
    Function(FunctionNode),
    Return { value: Option<String> },
    Call(CallNode),
    Expression(ExpressionNode),
    /// `lib @module`; `span` covers the library name
    LibraryImport { module: String, span: Span },
    NamespaceInit { namespace: String },
    QualifiedCall { module: String, call: CallNode },
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareNode {
    pub ty: PrimitiveType,
    pub name: String,
    pub init: Initializer,
    pub is_constant: bool,
}

/// Right-hand side of a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Initializer {
    /// Literal or name, as written
    Value(String),
    Call(CallNode),
    Array { size: usize, values: Vec<String> },
}

/// Assignment
#[derive(Debug, Clone, PartialEq)]
pub struct SetNode {
    pub target: String,
    pub target_index: Option<String>,
    pub value: SetValue,
}

/// Source of an assigned value
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// Literal or name, as written
    Plain(String),
    /// Element of an array's literal initializer, copied at compile time
    Copied {
        array: String,
        index: usize,
        literal: String,
    },
    /// Runtime read of an array element
    Indexed { array: String, index: String },
}

/// `if`/`elif` header and body
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalNode {
    pub condition: Condition,
    pub body: Vec<Node>,
}

/// Comparison between two raw operands
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: String,
    pub op: Comparison,
    pub right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
    Equal,
    GreaterEqual,
    LessEqual,
    NotEqual,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::Equal => "==",
            Comparison::GreaterEqual => ">=",
            Comparison::LessEqual => "<=",
            Comparison::NotEqual => "!=",
        }
    }
}

/// Counted loop `loop var [start..]end`
#[derive(Debug, Clone, PartialEq)]
pub struct LoopNode {
    pub variable: String,
    pub start: String,
    pub end: String,
    pub body: Vec<Node>,
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub return_type: PrimitiveType,
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<(String, PrimitiveType)>,
    pub body: Vec<Node>,
}

/// Function call `name : args :`
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub function: String,
    pub args: Vec<String>,
}

/// `add a b [=> dest]` and friends
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionNode {
    pub op: Arithmetic,
    pub left: String,
    pub right: String,
    /// Assign here instead of updating `left` in place
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Arithmetic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arithmetic::Add => "+",
            Arithmetic::Sub => "-",
            Arithmetic::Mul => "*",
            Arithmetic::Div => "/",
            Arithmetic::Mod => "%",
        }
    }
}
