//! berd_driver: Runs a berd program from source text to a value.
//!
//! [`Program`] owns the source and drives the stages in order: tokenize,
//! parse, optionally dump the AST, evaluate against a fresh global scope.
//! Each stage runs to completion before the next starts, and the first fatal
//! error stops the run.

use berd_ast::{to_pretty_json, BlockStatement, Token};
use berd_core::text::TextSpan;
use berd_diagnostics::{Diagnostic, DiagnosticCollection};
use berd_evaluator::{EvalError, Evaluator, RuntimeValue, Scope};
use berd_options::RunOptions;
use berd_parser::{ParseError, Parser};
use berd_scanner::{ScanError, Scanner};
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl DriverError {
    /// Where in the source the error points, for stage errors that know.
    pub fn span(&self) -> Option<TextSpan> {
        match self {
            DriverError::Scan(err) => Some(err.span()),
            DriverError::Parse(err) => Some(err.span()),
            DriverError::Read { .. } | DriverError::Write { .. } | DriverError::Eval(_) => None,
        }
    }

    /// Whether the error comes from the file system rather than the program.
    pub fn is_io(&self) -> bool {
        matches!(self, DriverError::Read { .. } | DriverError::Write { .. })
    }

    /// The error as a diagnostic, for stage errors.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            DriverError::Scan(err) => Some(err.to_diagnostic()),
            DriverError::Parse(err) => Some(err.to_diagnostic()),
            DriverError::Eval(err) => Some(err.to_diagnostic()),
            DriverError::Read { .. } | DriverError::Write { .. } => None,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// The token sequence, when `printTokens` is set.
    pub tokens: Option<Vec<Token>>,
    /// The pretty AST JSON, when `printAst` or `astOutput` is set.
    pub ast_json: Option<String>,
    /// The program value, when evaluation ran.
    pub value: Option<RuntimeValue>,
    /// Non-fatal diagnostics of every stage, in stage order.
    pub diagnostics: DiagnosticCollection,
}

/// One source file (or in-memory source) to run.
#[derive(Debug, Clone)]
pub struct Program {
    path: Option<PathBuf>,
    source: String,
}

impl Program {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "driver", "read {} ({} bytes)", path.display(), source.len());
        Ok(Self {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            path: None,
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The name diagnostics are reported under.
    pub fn name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<source>".to_string(),
        }
    }

    /// Tokenize the source. Scanner warnings go to `diagnostics`.
    pub fn tokenize(&self, diagnostics: &mut DiagnosticCollection) -> Result<Vec<Token>, DriverError> {
        let mut scanner = Scanner::new(&self.source);
        let tokens = scanner.tokenize()?;
        self.collect(diagnostics, scanner.take_diagnostics());
        Ok(tokens)
    }

    /// Tokenize and parse the source.
    pub fn parse(&self, diagnostics: &mut DiagnosticCollection) -> Result<BlockStatement, DriverError> {
        let tokens = self.tokenize(diagnostics)?;
        Ok(Parser::new(tokens).parse_program()?)
    }

    /// Run every stage `options` asks for.
    pub fn run(&self, options: &RunOptions) -> Result<RunOutcome, DriverError> {
        let mut outcome = RunOutcome::default();

        let tokens = self.tokenize(&mut outcome.diagnostics)?;
        debug!(target: "driver", "{} tokens", tokens.len());
        if options.print_tokens {
            outcome.tokens = Some(tokens.clone());
        }

        let program = Parser::new(tokens).parse_program()?;

        if options.print_ast || options.ast_output.is_some() {
            let json = to_pretty_json(&program);
            if let Some(path) = &options.ast_output {
                std::fs::write(path, &json).map_err(|source| DriverError::Write {
                    path: path.clone(),
                    source,
                })?;
                info!(target: "driver", "wrote AST to {}", path.display());
            }
            outcome.ast_json = Some(json);
        }

        if options.evaluate {
            let scope = Scope::new();
            let mut evaluator = Evaluator::new();
            let value = evaluator.evaluate_program(&program, &scope)?;
            self.collect(&mut outcome.diagnostics, evaluator.take_diagnostics());
            outcome.value = Some(value);
        }

        Ok(outcome)
    }

    fn collect(&self, into: &mut DiagnosticCollection, found: DiagnosticCollection) {
        for diagnostic in found.into_diagnostics() {
            into.add(match &self.path {
                Some(_) => diagnostic.in_file(self.name()),
                None => diagnostic,
            });
        }
    }
}
