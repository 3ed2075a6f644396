use std::collections::HashMap;

use log::trace;

use crate::{
    errors::errors::ErrorImpl,
    types::{
        method::Method,
        variable::{Variable, VariableLookup},
    },
};

/// One lexical block's variables.
pub type Scope = HashMap<String, Variable>;

/// Where the innermost scope sits relative to the global scope and the current method.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ScopeState {
    Global,
    Block,
    MethodBody,
}

/// A stack of scopes plus the bookkeeping of the method body currently being verified.
///
/// The bottom scope is the global scope, at depth 1. It is never popped.
#[derive(Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    current_method: Option<Method>,
    method_depth: Option<usize>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        ScopeManager {
            scopes: vec![Scope::new()],
            current_method: None,
            method_depth: None,
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::new());
        trace!("entered scope, depth {}", self.depth());
    }

    pub fn exit_scope(&mut self) -> Result<(), ErrorImpl> {
        if self.scopes.len() <= 1 {
            return Err(ErrorImpl::NoScopeToExit);
        }
        self.scopes.pop();
        trace!("exited scope, depth {}", self.depth());

        if self.method_depth.is_some_and(|depth| self.depth() < depth) {
            self.exit_method();
        }
        Ok(())
    }

    fn exit_method(&mut self) {
        self.current_method = None;
        self.method_depth = None;
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_global_scope(&self) -> bool {
        self.depth() == 1
    }

    pub fn is_inside_method(&self) -> bool {
        self.current_method.is_some()
    }

    pub fn current_method(&self) -> Option<&Method> {
        self.current_method.as_ref()
    }

    /// Depth of the current method's own scope.
    pub fn method_depth(&self) -> Option<usize> {
        self.method_depth
    }

    pub fn state(&self) -> ScopeState {
        match self.method_depth {
            _ if self.is_global_scope() => ScopeState::Global,
            Some(depth) if self.depth() >= depth => ScopeState::MethodBody,
            _ => ScopeState::Block,
        }
    }

    /// Declares into the innermost scope. Shadowing an outer declaration is allowed.
    pub fn declare_variable(&mut self, variable: Variable) -> Result<(), ErrorImpl> {
        let top = self.scopes.len() - 1;
        let current = &mut self.scopes[top];

        if current.contains_key(variable.name()) {
            return Err(ErrorImpl::VariableAlreadyDeclared {
                name: variable.name().to_string(),
            });
        }
        current.insert(variable.name().to_string(), variable);
        Ok(())
    }

    pub fn lookup_variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }

    /// Starts verifying `method`, whose scope must already be entered.
    ///
    /// Every parameter is declared into that scope, initialized with its type's default value.
    pub fn enter_method(&mut self, method: &Method) -> Result<(), ErrorImpl> {
        self.current_method = Some(method.clone());
        self.method_depth = Some(self.depth());

        for parameter in method.parameters() {
            let mut parameter = parameter.clone();
            parameter.initialize_default();
            self.declare_variable(parameter)?;
        }
        Ok(())
    }

    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    /// An independent copy of the global scope, for restoring after a method body.
    pub fn snapshot_global_scope(&self) -> Scope {
        self.global_scope().clone()
    }

    pub fn set_global_scope(&mut self, scope: Scope) {
        self.scopes[0] = scope;
    }
}

impl VariableLookup for ScopeManager {
    /// Searches from the innermost scope outward.
    fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}
