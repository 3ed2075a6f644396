use crate::{classifier::extract::MethodHeader, errors::errors::ErrorImpl};

use super::{
    types::validate_method_name,
    variable::{resolve_value, Variable, VariableLookup},
};

/// A declared `void` method: its name and ordered parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    parameters: Vec<Variable>,
}

impl Method {
    pub fn new(name: &str, parameters: Vec<Variable>) -> Result<Self, ErrorImpl> {
        validate_method_name(name)?;

        Ok(Method {
            name: name.to_string(),
            parameters,
        })
    }

    pub fn from_header(header: &MethodHeader) -> Result<Self, ErrorImpl> {
        let parameters = header
            .parameters
            .iter()
            .map(|parameter| {
                Variable::from_tokens(&parameter.name, &parameter.type_token, parameter.is_final)
            })
            .collect::<Result<Vec<Variable>, ErrorImpl>>()?;

        Method::new(&header.name, parameters)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Variable] {
        &self.parameters
    }

    /// Checks the raw arguments of a call site against the parameter list.
    pub fn check_arguments(
        &self,
        arguments: &[String],
        scope: &impl VariableLookup,
    ) -> Result<(), ErrorImpl> {
        if arguments.len() != self.parameters.len() {
            return Err(ErrorImpl::ArgumentCount {
                expected: self.parameters.len(),
                received: arguments.len(),
            });
        }

        for (argument, parameter) in arguments.iter().zip(self.parameters.iter()) {
            let value = resolve_value(parameter.var_type(), argument, scope)?;
            parameter.var_type().validate_value(&value)?;
        }

        Ok(())
    }
}
