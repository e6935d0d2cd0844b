//! NodeKind - the discriminant carried by every AST node.

use std::fmt;

/// The discriminant of an AST node.
///
/// The numeric value is stable within a build and is what dispatch tables key
/// on; it is never written into serialized trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeKind {
    // Statements
    ExpressionStatement = 1,
    BlockStatement,
    VariableDeclarationStatement,
    FunctionDeclarationStatement,
    ReturnStatement,
    IfStatement,
    WhenStatement,
    ClassDeclarationStatement,
    DeleteStatement,
    ReverseStatement,
    ImportStatement,
    ExportStatement,

    // Expressions
    AssignmentExpression,
    PrefixExpression,
    StateExpression,
    BinaryExpression,
    NumberExpression,
    StringExpression,
    SymbolExpression,
    ObjectDeclarationExpression,
    ArrayDeclarationExpression,
    MemberExpression,
    CallExpression,

    // Sentinels
    EofStatement,
    EndOfBlockStatement,

    // Ambiguity placeholders
    BranchingStatement,
    BranchingExpression,
}

impl NodeKind {
    /// The human-readable variant name.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::VariableDeclarationStatement => "VariableDeclarationStatement",
            NodeKind::FunctionDeclarationStatement => "FunctionDeclarationStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::WhenStatement => "WhenStatement",
            NodeKind::ClassDeclarationStatement => "ClassDeclarationStatement",
            NodeKind::DeleteStatement => "DeleteStatement",
            NodeKind::ReverseStatement => "ReverseStatement",
            NodeKind::ImportStatement => "ImportStatement",
            NodeKind::ExportStatement => "ExportStatement",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::PrefixExpression => "PrefixExpression",
            NodeKind::StateExpression => "StateExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::NumberExpression => "NumberExpression",
            NodeKind::StringExpression => "StringExpression",
            NodeKind::SymbolExpression => "SymbolExpression",
            NodeKind::ObjectDeclarationExpression => "ObjectDeclarationExpression",
            NodeKind::ArrayDeclarationExpression => "ArrayDeclarationExpression",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::EofStatement => "EOFStatement",
            NodeKind::EndOfBlockStatement => "EndOfBlockStatement",
            NodeKind::BranchingStatement => "BranchingStatement",
            NodeKind::BranchingExpression => "BranchingExpression",
        }
    }

    /// The raw numeric discriminant.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
