//! AST node definitions.
//!
//! The tree is a closed, tagged union: [`Statement`] and [`Expression`] name
//! every variant, and each variant owns a plain struct holding exactly the
//! fields relevant to its grammar role. Children are owned by their parent;
//! nothing is shared and nothing is mutated after the parser returns a node.

use crate::node_kind::NodeKind;
use crate::token::Token;
use serde::Serialize;

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kindName")]
pub enum Statement {
    #[serde(rename = "ExpressionStatement")]
    Expression(ExpressionStatement),
    #[serde(rename = "BlockStatement")]
    Block(BlockStatement),
    #[serde(rename = "VariableDeclarationStatement")]
    VariableDeclaration(VariableDeclarationStatement),
    #[serde(rename = "FunctionDeclarationStatement")]
    FunctionDeclaration(FunctionDeclarationStatement),
    #[serde(rename = "ReturnStatement")]
    Return(ReturnStatement),
    #[serde(rename = "IfStatement")]
    If(IfStatement),
    #[serde(rename = "WhenStatement")]
    When(WhenStatement),
    #[serde(rename = "ClassDeclarationStatement")]
    ClassDeclaration(ClassDeclarationStatement),
    #[serde(rename = "DeleteStatement")]
    Delete(DeleteStatement),
    #[serde(rename = "ReverseStatement")]
    Reverse(ReverseStatement),
    #[serde(rename = "ImportStatement")]
    Import(ImportStatement),
    #[serde(rename = "ExportStatement")]
    Export(ExportStatement),
    #[serde(rename = "BranchingStatement")]
    Branching(BranchingStatement),
    /// Sentinel: the input is exhausted.
    #[serde(rename = "EOFStatement")]
    EndOfFile,
    /// Sentinel: the enclosing block has no more statements.
    #[serde(rename = "EndOfBlockStatement")]
    EndOfBlock,
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Expression(_) => NodeKind::ExpressionStatement,
            Statement::Block(_) => NodeKind::BlockStatement,
            Statement::VariableDeclaration(_) => NodeKind::VariableDeclarationStatement,
            Statement::FunctionDeclaration(_) => NodeKind::FunctionDeclarationStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::When(_) => NodeKind::WhenStatement,
            Statement::ClassDeclaration(_) => NodeKind::ClassDeclarationStatement,
            Statement::Delete(_) => NodeKind::DeleteStatement,
            Statement::Reverse(_) => NodeKind::ReverseStatement,
            Statement::Import(_) => NodeKind::ImportStatement,
            Statement::Export(_) => NodeKind::ExportStatement,
            Statement::Branching(_) => NodeKind::BranchingStatement,
            Statement::EndOfFile => NodeKind::EofStatement,
            Statement::EndOfBlock => NodeKind::EndOfBlockStatement,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this is one of the two structural sentinels.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Statement::EndOfFile | Statement::EndOfBlock)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
}

/// The two independent mutability axes of a declaration, written as two
/// leading `const`/`var` keywords: `[can_reassign, can_mutate]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers(pub bool, pub bool);

impl Modifiers {
    /// Set by a leading `var`: the name may be bound to another value.
    pub fn can_reassign(self) -> bool {
        self.0
    }

    /// Set by a second `var`: the value itself may be changed in place.
    pub fn can_mutate(self) -> bool {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifetimeUnit {
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "lines")]
    Lines,
}

/// How long a binding lives: `<5>` (lines) or `<20s>` (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lifetime {
    pub duration: f64,
    pub unit: LifetimeUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarationStatement {
    pub identifier: String,
    pub modifiers: Modifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<Lifetime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclarationStatement {
    pub identifier: Token,
    pub parameters: Vec<FunctionParameter>,
    pub is_async: bool,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionParameter {
    pub identifier: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<Lifetime>,
}

/// A function body is either a block or a single expression statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kindName")]
pub enum FunctionBody {
    #[serde(rename = "BlockStatement")]
    Block(BlockStatement),
    #[serde(rename = "ExpressionStatement")]
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: BlockStatement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<ElseBranch>,
}

/// The `else` part of an if statement: another if statement or a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kindName")]
pub enum ElseBranch {
    #[serde(rename = "IfStatement")]
    If(Box<IfStatement>),
    #[serde(rename = "BlockStatement")]
    Block(BlockStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhenStatement {
    pub test: Expression,
    pub consequent: BlockStatement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassDeclarationStatement {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteStatement {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReverseStatement {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportStatement {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportStatement {}

/// Several candidate parses of one ambiguous statement. Nothing selects
/// among them yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BranchingStatement {
    pub branches: Vec<Vec<Statement>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kindName")]
pub enum Expression {
    #[serde(rename = "AssignmentExpression")]
    Assignment(AssignmentExpression),
    #[serde(rename = "PrefixExpression")]
    Prefix(PrefixExpression),
    #[serde(rename = "StateExpression")]
    State(StateExpression),
    #[serde(rename = "BinaryExpression")]
    Binary(BinaryExpression),
    #[serde(rename = "NumberExpression")]
    Number(NumberExpression),
    #[serde(rename = "StringExpression")]
    String(StringExpression),
    #[serde(rename = "SymbolExpression")]
    Symbol(SymbolExpression),
    #[serde(rename = "ObjectDeclarationExpression")]
    ObjectDeclaration(ObjectDeclarationExpression),
    #[serde(rename = "ArrayDeclarationExpression")]
    ArrayDeclaration(ArrayDeclarationExpression),
    #[serde(rename = "MemberExpression")]
    Member(MemberExpression),
    #[serde(rename = "CallExpression")]
    Call(CallExpression),
    #[serde(rename = "BranchingExpression")]
    Branching(BranchingExpression),
}

impl Expression {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Assignment(_) => NodeKind::AssignmentExpression,
            Expression::Prefix(_) => NodeKind::PrefixExpression,
            Expression::State(_) => NodeKind::StateExpression,
            Expression::Binary(_) => NodeKind::BinaryExpression,
            Expression::Number(_) => NodeKind::NumberExpression,
            Expression::String(_) => NodeKind::StringExpression,
            Expression::Symbol(_) => NodeKind::SymbolExpression,
            Expression::ObjectDeclaration(_) => NodeKind::ObjectDeclarationExpression,
            Expression::ArrayDeclaration(_) => NodeKind::ArrayDeclarationExpression,
            Expression::Member(_) => NodeKind::MemberExpression,
            Expression::Call(_) => NodeKind::CallExpression,
            Expression::Branching(_) => NodeKind::BranchingExpression,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    /// A number literal.
    pub fn number(value: f64) -> Self {
        Expression::Number(NumberExpression { value })
    }

    /// A string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::String(StringExpression { value: value.into() })
    }

    /// A reference to a name.
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Expression::Symbol(SymbolExpression { symbol: symbol.into() })
    }
}

/// The only expressions that name a storage location: the target of an
/// assignment and the argument of a state expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kindName")]
pub enum Reference {
    #[serde(rename = "SymbolExpression")]
    Symbol(SymbolExpression),
    #[serde(rename = "MemberExpression")]
    Member(MemberExpression),
}

impl Reference {
    pub fn kind(&self) -> NodeKind {
        match self {
            Reference::Symbol(_) => NodeKind::SymbolExpression,
            Reference::Member(_) => NodeKind::MemberExpression,
        }
    }

    pub fn into_expression(self) -> Expression {
        match self {
            Reference::Symbol(symbol) => Expression::Symbol(symbol),
            Reference::Member(member) => Expression::Member(member),
        }
    }
}

impl TryFrom<Expression> for Reference {
    type Error = Expression;

    /// Narrow an expression to a reference, handing the expression back
    /// untouched when it is neither a symbol nor a member access.
    fn try_from(expression: Expression) -> Result<Self, Self::Error> {
        match expression {
            Expression::Symbol(symbol) => Ok(Reference::Symbol(symbol)),
            Expression::Member(member) => Ok(Reference::Member(member)),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentExpression {
    pub assignee: Box<Reference>,
    pub assigned_value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixExpression {
    pub prefix: Token,
    pub right: Box<Expression>,
}

/// `++x`, `--x`, `previous x`, `next x` or `current x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateExpression {
    pub operator: Token,
    pub argument: Box<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberExpression {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringExpression {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolExpression {
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectDeclarationExpression {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: Box<Expression>,
    pub value: Box<Expression>,
    /// `{value}`
    pub shorthand: bool,
    /// `{[name]: value}`
    pub computed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArrayDeclarationExpression {
    pub elements: Vec<Expression>,
}

/// `object.property` (`computed == false`) or `object[property]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BranchingExpression {
    pub branches: Vec<Expression>,
}

// ============================================================================
// Borrowed view
// ============================================================================

/// A borrowed reference to any node, statement or expression. Dispatch tables
/// take this so one table can cover the whole tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Statement(&'a Statement),
    Expression(&'a Expression),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Statement(statement) => statement.kind(),
            Node::Expression(expression) => expression.kind(),
        }
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_kind::TokenKind;
    use berd_core::text::TextSpan;

    #[test]
    fn test_serialized_tree_names_variants() {
        let statement = Statement::VariableDeclaration(VariableDeclarationStatement {
            identifier: "x".to_string(),
            modifiers: Modifiers(false, true),
            value: Some(Expression::number(5.0)),
            lifetime: None,
        });
        let json: serde_json::Value = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["kindName"], "VariableDeclarationStatement");
        assert_eq!(json["modifiers"], serde_json::json!([false, true]));
        assert_eq!(json["value"]["kindName"], "NumberExpression");
        assert!(json.get("lifetime").is_none());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_sentinels_serialize_as_bare_tags() {
        let json = serde_json::to_string(&Statement::EndOfBlock).unwrap();
        assert_eq!(json, r#"{"kindName":"EndOfBlockStatement"}"#);
        assert!(Statement::EndOfFile.is_sentinel());
        assert_eq!(Statement::EndOfFile.kind_name(), "EOFStatement");
    }

    #[test]
    fn test_reference_narrowing() {
        assert!(Reference::try_from(Expression::symbol("a")).is_ok());
        let rejected = Reference::try_from(Expression::number(1.0)).unwrap_err();
        assert_eq!(rejected.kind(), NodeKind::NumberExpression);
    }

    #[test]
    fn test_binary_operator_token_is_serialized() {
        let expression = Expression::Binary(BinaryExpression {
            left: Box::new(Expression::number(1.0)),
            operator: Token::new(TokenKind::Add, "+", TextSpan::empty(2), 1),
            right: Box::new(Expression::number(2.0)),
        });
        let json: serde_json::Value = serde_json::to_value(&expression).unwrap();
        assert_eq!(json["operator"]["type"], "Add");
        assert_eq!(Node::from(&expression).kind(), NodeKind::BinaryExpression);
    }
}
