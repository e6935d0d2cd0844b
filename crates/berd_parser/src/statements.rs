//! Statement handlers.

use crate::error::ParseError;
use crate::parser::{Parser, END_OF_LINE};
use crate::precedence::BindingPower;
use berd_ast::{
    BlockStatement, ElseBranch, ExpressionStatement, FunctionBody, FunctionDeclarationStatement,
    FunctionParameter, IfStatement, Lifetime, LifetimeUnit, Modifiers, ReturnStatement, Statement,
    TokenKind, VariableDeclarationStatement, WhenStatement,
};
use log::debug;

const MODIFIERS: &[&str] = &["const", "var"];

impl Parser {
    /// Parse statements until the end of the input.
    pub fn parse_program(&mut self) -> Result<BlockStatement, ParseError> {
        let mut body = Vec::new();
        loop {
            match self.parse_statement()? {
                Statement::EndOfFile => break,
                Statement::EndOfBlock => {
                    return Err(ParseError::UnexpectedCloseBrace {
                        token: self.current().clone(),
                    })
                }
                statement => body.push(statement),
            }
        }
        debug!(target: "parser", "parsed {} top-level statements", body.len());
        Ok(BlockStatement { body })
    }

    /// Parse one statement. A close brace yields the end-of-block sentinel
    /// without consuming it; anything without a statement handler is an
    /// expression statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.skip_ignorable();
        if let Some(handler) = self.lookups().get_stmt(self.current()) {
            return handler(self);
        }

        if self.current().kind == TokenKind::CloseCurly {
            return Ok(Statement::EndOfBlock);
        }

        self.parse_expression_statement().map(Statement::Expression)
    }

    pub fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParseError> {
        let expression = self.parse_expression(BindingPower::DefaultBp)?;
        self.expect(END_OF_LINE)?;
        Ok(ExpressionStatement { expression })
    }

    pub fn parse_block_statement(&mut self) -> Result<BlockStatement, ParseError> {
        self.expect(&[TokenKind::OpenCurly])?;
        let mut body = Vec::new();
        loop {
            match self.parse_statement()? {
                Statement::EndOfBlock | Statement::EndOfFile => break,
                statement => body.push(statement),
            }
        }
        self.expect(&[TokenKind::CloseCurly])?;
        Ok(BlockStatement { body })
    }

    pub(crate) fn parse_end_of_file_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(&[TokenKind::EndOfFile])?;
        Ok(Statement::EndOfFile)
    }

    /// `const|var const|var name [<lifetime>] [= value]!`
    pub(crate) fn parse_variable_declaration_statement(&mut self) -> Result<Statement, ParseError> {
        let can_reassign = self.expect_identifier(MODIFIERS)?.value == "var";
        let can_mutate = self.expect_identifier(MODIFIERS)?.value == "var";

        let identifier = self.expect(&[TokenKind::Identifier])?.value;
        let lifetime = self.parse_optional_lifetime()?;

        let value = if self.check(&[TokenKind::EqualSign]) {
            self.expect(&[TokenKind::EqualSign])?;
            Some(self.parse_expression(BindingPower::DefaultBp)?)
        } else {
            None
        };
        self.expect(END_OF_LINE)?;

        Ok(Statement::VariableDeclaration(VariableDeclarationStatement {
            identifier,
            modifiers: Modifiers(can_reassign, can_mutate),
            value,
            lifetime,
        }))
    }

    /// `<N>` lines, `<Ns>` seconds or `<Infinity>`, when present.
    fn parse_optional_lifetime(&mut self) -> Result<Option<Lifetime>, ParseError> {
        if !self.check(&[TokenKind::Smaller]) {
            return Ok(None);
        }
        self.expect(&[TokenKind::Smaller])?;

        let duration = if self.check_identifier(&["Infinity"]) {
            self.expect_identifier(&["Infinity"])?;
            f64::INFINITY
        } else {
            let token = self.expect(&[TokenKind::Number])?;
            token
                .value
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber { token })?
        };

        let unit = if self.check_identifier(&["s"]) {
            self.expect_identifier(&["s"])?;
            LifetimeUnit::Seconds
        } else {
            LifetimeUnit::Lines
        };
        self.expect(&[TokenKind::Greater])?;

        Ok(Some(Lifetime { duration, unit }))
    }

    /// `[async] function name(a, b) => body`
    pub(crate) fn parse_function_declaration_statement(&mut self) -> Result<Statement, ParseError> {
        let is_async = self.check_identifier(&["async"]);
        if is_async {
            self.expect_identifier(&["async"])?;
        }

        self.expect_identifier(&["function"])?;
        let identifier = self.expect(&[TokenKind::Identifier])?;
        self.expect(&[TokenKind::OpenParen])?;
        let parameters = self.parse_function_parameters()?;
        self.expect(&[TokenKind::CloseParen])?;

        self.expect(&[TokenKind::Arrow])?;

        let body = if self.check(&[TokenKind::OpenCurly]) {
            FunctionBody::Block(self.parse_block_statement()?)
        } else {
            FunctionBody::Expression(self.parse_expression_statement()?)
        };

        Ok(Statement::FunctionDeclaration(FunctionDeclarationStatement {
            identifier,
            parameters,
            is_async,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<FunctionParameter>, ParseError> {
        let mut parameters = Vec::new();
        loop {
            self.skip_ignorable();
            if self.current().kind == TokenKind::CloseParen {
                break;
            }
            if !parameters.is_empty() {
                self.expect(&[TokenKind::Comma])?;
            }
            let identifier = self.expect(&[TokenKind::Identifier])?;
            let lifetime = self.parse_optional_lifetime()?;
            parameters.push(FunctionParameter {
                identifier,
                lifetime,
            });
        }
        Ok(parameters)
    }

    pub(crate) fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_identifier(&["return"])?;
        let argument = self.parse_expression(BindingPower::DefaultBp)?;
        self.expect(END_OF_LINE)?;
        Ok(Statement::Return(ReturnStatement { argument }))
    }

    pub(crate) fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        self.parse_if().map(Statement::If)
    }

    /// `if (test) { .. } [else if .. | else { .. }]`
    fn parse_if(&mut self) -> Result<IfStatement, ParseError> {
        self.expect_identifier(&["if"])?;
        self.expect(&[TokenKind::OpenParen])?;
        let test = self.parse_expression(BindingPower::DefaultBp)?;
        self.expect(&[TokenKind::CloseParen])?;

        let consequent = self.parse_block_statement()?;

        let alternate = if self.check_identifier(&["else"]) {
            self.expect_identifier(&["else"])?;
            if self.check_identifier(&["if"]) {
                Some(ElseBranch::If(Box::new(self.parse_if()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block_statement()?))
            }
        } else {
            None
        };

        Ok(IfStatement {
            test,
            consequent,
            alternate,
        })
    }

    pub(crate) fn parse_when_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_identifier(&["when"])?;
        self.expect(&[TokenKind::OpenParen])?;
        let test = self.parse_expression(BindingPower::DefaultBp)?;
        self.expect(&[TokenKind::CloseParen])?;

        let consequent = self.parse_block_statement()?;

        Ok(Statement::When(WhenStatement { test, consequent }))
    }
}
