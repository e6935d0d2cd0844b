//! Lexical scope chain.

use crate::error::EvalError;
use crate::value::RuntimeValue;
use berd_ast::{Lifetime, Modifiers};
use indexmap::IndexMap;
use log::debug;
use std::cell::RefCell;

/// A variable slot. Modifiers and lifetime are recorded as declared; they
/// are not enforced yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: RuntimeValue,
    pub modifiers: Modifiers,
    pub lifetime: Option<Lifetime>,
}

/// One level of the scope chain.
///
/// A child borrows its parent for its whole life and only ever writes into
/// the scope that owns a name. Bindings keep declaration order.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    bindings: RefCell<IndexMap<String, Binding>>,
}

impl Scope<'static> {
    /// A global scope with no parent.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'p> Scope<'p> {
    /// A nested scope whose lookups fall back to `self`.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            parent: Some(self),
            bindings: RefCell::default(),
        }
    }

    pub fn parent(&self) -> Option<&'p Scope<'p>> {
        self.parent
    }

    /// Bind `name` in this scope. A name may be declared once per scope;
    /// shadowing an outer binding is allowed.
    pub fn declare(
        &self,
        name: &str,
        value: RuntimeValue,
        modifiers: Modifiers,
        lifetime: Option<Lifetime>,
    ) -> Result<RuntimeValue, EvalError> {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(name) {
            return Err(EvalError::AlreadyDeclared {
                name: name.to_string(),
            });
        }
        debug!(target: "evaluator", "declare {} = {}", name, value);
        bindings.insert(
            name.to_string(),
            Binding {
                value: value.clone(),
                modifiers,
                lifetime,
            },
        );
        Ok(value)
    }

    /// Overwrite `name` in the nearest scope that owns it.
    pub fn assign(&self, name: &str, value: RuntimeValue) -> Result<RuntimeValue, EvalError> {
        let owner = self.resolve_or_fail(name)?;
        let mut bindings = owner.bindings.borrow_mut();
        if let Some(binding) = bindings.get_mut(name) {
            binding.value = value.clone();
        }
        Ok(value)
    }

    /// The value of `name` in the nearest scope that owns it.
    pub fn lookup(&self, name: &str) -> Result<RuntimeValue, EvalError> {
        self.binding(name).map(|binding| binding.value)
    }

    /// A copy of the binding of `name` in the nearest scope that owns it.
    pub fn binding(&self, name: &str) -> Result<Binding, EvalError> {
        let owner = self.resolve_or_fail(name)?;
        let bindings = owner.bindings.borrow();
        bindings.get(name).cloned().ok_or_else(|| EvalError::Unresolved {
            name: name.to_string(),
        })
    }

    /// The nearest scope, starting at `self`, that owns `name`.
    pub fn resolve(&self, name: &str) -> Option<&Scope<'p>> {
        let mut scope = self;
        loop {
            if scope.bindings.borrow().contains_key(name) {
                return Some(scope);
            }
            scope = scope.parent?;
        }
    }

    /// Whether this scope itself binds `name`.
    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Names bound in this scope, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.bindings.borrow().keys().cloned().collect()
    }

    fn resolve_or_fail(&self, name: &str) -> Result<&Scope<'p>, EvalError> {
        self.resolve(name).ok_or_else(|| EvalError::Unresolved {
            name: name.to_string(),
        })
    }
}
