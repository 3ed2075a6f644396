use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The broad failure categories a verification run can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Structure,
    Name,
    Type,
    Value,
    Io,
}

impl ErrorKind {
    /// Verification failures exit with 1, I/O failures with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Io => 2,
            _ => 1,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}Error", self)
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MissingTerminator => "MissingTerminator",
            ErrorImpl::InvalidLineFormat => "InvalidLineFormat",
            ErrorImpl::InvalidMethodDeclaration => "InvalidMethodDeclaration",
            ErrorImpl::InvalidParameters => "InvalidParameters",
            ErrorImpl::InvalidAssignment => "InvalidAssignment",
            ErrorImpl::InvalidCondition => "InvalidCondition",
            ErrorImpl::UnclosedScope => "UnclosedScope",
            ErrorImpl::NoScopeToExit => "NoScopeToExit",
            ErrorImpl::MethodAlreadyDeclared { .. } => "MethodAlreadyDeclared",
            ErrorImpl::NestedMethod => "NestedMethod",
            ErrorImpl::ConditionInGlobalScope => "ConditionInGlobalScope",
            ErrorImpl::StatementInGlobalScope => "StatementInGlobalScope",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::InvalidName { .. } => "InvalidName",
            ErrorImpl::ReservedName { .. } => "ReservedName",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::MethodNotDeclared { .. } => "MethodNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::IncompatibleTypes { .. } => "IncompatibleTypes",
            ErrorImpl::InvalidConditionOperand { .. } => "InvalidConditionOperand",
            ErrorImpl::InvalidValue { .. } => "InvalidValue",
            ErrorImpl::FinalNotInitialized { .. } => "FinalNotInitialized",
            ErrorImpl::FinalReassignment { .. } => "FinalReassignment",
            ErrorImpl::VariableNotInitialized { .. } => "VariableNotInitialized",
            ErrorImpl::ArgumentCount { .. } => "ArgumentCount",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::MissingTerminator => ErrorTip::Suggestion(String::from(
                "Every line must end with `;`, `{` or `}`",
            )),
            ErrorImpl::InvalidMethodDeclaration => ErrorTip::Suggestion(String::from(
                "Methods are declared as `void name(type param, ...) {`",
            )),
            ErrorImpl::UnclosedScope => {
                ErrorTip::Suggestion(String::from("Did you miss a closing `}`?"))
            }
            ErrorImpl::ConditionInGlobalScope | ErrorImpl::StatementInGlobalScope => {
                ErrorTip::Suggestion(String::from("Move this statement into a method body"))
            }
            ErrorImpl::MissingReturn { method } => ErrorTip::Suggestion(format!(
                "The last statement of `{}` must be `return;`",
                method
            )),
            ErrorImpl::ReservedName { name } => {
                ErrorTip::Suggestion(format!("`{}` is a reserved word", name))
            }
            ErrorImpl::IncompatibleTypes { expected, received } => ErrorTip::Suggestion(format!(
                "Only int -> double and int/double -> boolean widen implicitly, found {} -> {}",
                received, expected
            )),
            ErrorImpl::FinalNotInitialized { name } => ErrorTip::Suggestion(format!(
                "Give `{}` a value where it is declared",
                name
            )),
            ErrorImpl::ArgumentCount { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.0 == 0 {
            write!(f, "{}: {}", self.kind(), self.internal_error)
        } else {
            write!(
                f,
                "{}: {} (line {})",
                self.kind(),
                self.internal_error,
                self.position.0
            )
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("invalid line - missing ; or {{ or }}")]
    MissingTerminator,
    #[error("invalid line format")]
    InvalidLineFormat,
    #[error("invalid method declaration")]
    InvalidMethodDeclaration,
    #[error("invalid parameters")]
    InvalidParameters,
    #[error("invalid assignment expression")]
    InvalidAssignment,
    #[error("invalid condition")]
    InvalidCondition,

    // Structure
    #[error("there is a scope that was not closed")]
    UnclosedScope,
    #[error("no scope to exit")]
    NoScopeToExit,
    #[error("method {name:?} already exists")]
    MethodAlreadyDeclared { name: String },
    #[error("nested methods are not allowed")]
    NestedMethod,
    #[error("if and while statements cannot be declared in global scope")]
    ConditionInGlobalScope,
    #[error("invalid statement in global scope")]
    StatementInGlobalScope,
    #[error("method {method:?} has no return statement")]
    MissingReturn { method: String },

    // Name
    #[error("invalid name {name:?}")]
    InvalidName { name: String },
    #[error("invalid name {name:?}, name is a keyword")]
    ReservedName { name: String },
    #[error("variable {name:?} already declared in this scope")]
    VariableAlreadyDeclared { name: String },
    #[error("variable {name:?} not declared")]
    VariableNotDeclared { name: String },
    #[error("trying to call method {name:?} that does not exist")]
    MethodNotDeclared { name: String },

    // Type
    #[error("invalid variable type {type_:?}")]
    UnknownType { type_: String },
    #[error("trying to assign incompatible types: expected {expected}, received {received}")]
    IncompatibleTypes { expected: String, received: String },
    #[error("variable {name:?} of type {type_} cannot be used as a condition")]
    InvalidConditionOperand { name: String, type_: String },

    // Value
    #[error("invalid {type_} value {value:?}")]
    InvalidValue { type_: String, value: String },
    #[error("final variable {name:?} must be initialized")]
    FinalNotInitialized { name: String },
    #[error("final variable {name:?} cannot be assigned a new value")]
    FinalReassignment { name: String },
    #[error("variable {name:?} is not initialized")]
    VariableNotInitialized { name: String },
    #[error("invalid number of parameters: expected {expected}, received {received}")]
    ArgumentCount { expected: usize, received: usize },

    #[error("{message}")]
    Io { message: String },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::MissingTerminator
            | ErrorImpl::InvalidLineFormat
            | ErrorImpl::InvalidMethodDeclaration
            | ErrorImpl::InvalidParameters
            | ErrorImpl::InvalidAssignment
            | ErrorImpl::InvalidCondition => ErrorKind::Syntax,
            ErrorImpl::UnclosedScope
            | ErrorImpl::NoScopeToExit
            | ErrorImpl::MethodAlreadyDeclared { .. }
            | ErrorImpl::NestedMethod
            | ErrorImpl::ConditionInGlobalScope
            | ErrorImpl::StatementInGlobalScope
            | ErrorImpl::MissingReturn { .. } => ErrorKind::Structure,
            ErrorImpl::InvalidName { .. }
            | ErrorImpl::ReservedName { .. }
            | ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::MethodNotDeclared { .. } => ErrorKind::Name,
            ErrorImpl::UnknownType { .. }
            | ErrorImpl::IncompatibleTypes { .. }
            | ErrorImpl::InvalidConditionOperand { .. } => ErrorKind::Type,
            ErrorImpl::InvalidValue { .. }
            | ErrorImpl::FinalNotInitialized { .. }
            | ErrorImpl::FinalReassignment { .. }
            | ErrorImpl::VariableNotInitialized { .. }
            | ErrorImpl::ArgumentCount { .. } => ErrorKind::Value,
            ErrorImpl::Io { .. } => ErrorKind::Io,
        }
    }

    /// Attaches a source position, turning the failure into a reportable [`Error`].
    pub fn at(self, position: Position) -> Error {
        Error::new(self, position)
    }
}

impl From<std::io::Error> for ErrorImpl {
    fn from(error: std::io::Error) -> Self {
        ErrorImpl::Io {
            message: error.to_string(),
        }
    }
}
