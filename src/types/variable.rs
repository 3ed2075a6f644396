use std::collections::HashMap;

use crate::errors::errors::ErrorImpl;

use super::types::{is_name_like, validate_variable_name, VariableType};

/// Anything variables can be looked up in by name: a single scope or the whole scope stack.
pub trait VariableLookup {
    fn lookup_variable(&self, name: &str) -> Option<&Variable>;
}

impl VariableLookup for HashMap<String, Variable> {
    fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.get(name)
    }
}

/// A declared variable or method parameter.
///
/// The value is kept as the raw literal text it was last assigned; it is only ever
/// validated against the grammar of `var_type`, never evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    var_type: VariableType,
    is_final: bool,
    value: Option<String>,
}

impl Variable {
    pub fn new(name: &str, var_type: VariableType, is_final: bool) -> Result<Self, ErrorImpl> {
        validate_variable_name(name)?;

        Ok(Variable {
            name: name.to_string(),
            var_type,
            is_final,
            value: None,
        })
    }

    /// Builds a variable from its type keyword, as written in a declaration or parameter list.
    pub fn from_tokens(name: &str, type_token: &str, is_final: bool) -> Result<Self, ErrorImpl> {
        validate_variable_name(name)?;
        let var_type = VariableType::parse(type_token)?;

        Ok(Variable {
            name: name.to_string(),
            var_type,
            is_final,
            value: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn var_type(&self) -> VariableType {
        self.var_type
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Gives the variable its first value.
    pub fn initialize(&mut self, literal: &str) -> Result<(), ErrorImpl> {
        if self.is_final && self.is_initialized() {
            return Err(ErrorImpl::FinalReassignment {
                name: self.name.clone(),
            });
        }
        self.var_type.validate_value(literal)?;
        self.value = Some(literal.to_string());
        Ok(())
    }

    /// Replaces the value; the previous value is kept when the new one is rejected.
    pub fn change_value(&mut self, literal: &str) -> Result<(), ErrorImpl> {
        if self.is_final {
            return Err(ErrorImpl::FinalReassignment {
                name: self.name.clone(),
            });
        }
        self.var_type.validate_value(literal)?;
        self.value = Some(literal.to_string());
        Ok(())
    }

    /// Marks a parameter as initialized with its type's default literal.
    pub fn initialize_default(&mut self) {
        self.value = Some(self.var_type.default_value().to_string());
    }
}

/// Resolves the right-hand side `raw` of a declaration, assignment or call argument
/// destined for a `target` slot.
///
/// A name of a visible variable is replaced by that variable's current value, after
/// checking that it is initialized and that its type widens to `target`. Any other
/// name-shaped text is an undeclared variable. Literals are returned unchanged; the
/// caller validates them against `target`.
pub fn resolve_value(
    target: VariableType,
    raw: &str,
    scope: &impl VariableLookup,
) -> Result<String, ErrorImpl> {
    match scope.lookup_variable(raw) {
        Some(source) => {
            let value = source
                .value()
                .ok_or_else(|| ErrorImpl::VariableNotInitialized {
                    name: raw.to_string(),
                })?;
            if !target.is_assignable_from(source.var_type()) {
                return Err(ErrorImpl::IncompatibleTypes {
                    expected: target.to_string(),
                    received: source.var_type().to_string(),
                });
            }
            Ok(value.to_string())
        }
        None if is_name_like(raw) => Err(ErrorImpl::VariableNotDeclared {
            name: raw.to_string(),
        }),
        None => Ok(raw.to_string()),
    }
}
