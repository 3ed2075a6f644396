use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::{errors::errors::ErrorImpl, MK_ANCHORED};

lazy_static! {
    pub static ref TYPE_LOOKUP: HashMap<&'static str, VariableType> = {
        let mut map = HashMap::new();
        map.insert("int", VariableType::Int);
        map.insert("double", VariableType::Double);
        map.insert("boolean", VariableType::Boolean);
        map.insert("char", VariableType::Char);
        map.insert("String", VariableType::String);
        map
    };

    pub static ref RESERVED_WORDS: HashSet<&'static str> = {
        let mut set: HashSet<&'static str> = TYPE_LOOKUP.keys().copied().collect();
        set.extend(["if", "while", "return", "void", "final", "true", "false"]);
        set
    };

    static ref VARIABLE_NAME: Regex = MK_ANCHORED!(r"[A-Za-z][A-Za-z0-9_]*|_[A-Za-z0-9][A-Za-z0-9_]*");
    static ref METHOD_NAME: Regex = MK_ANCHORED!(r"[A-Za-z][A-Za-z0-9_]*");
    static ref NAME_LIKE: Regex = MK_ANCHORED!(r"[A-Za-z_][A-Za-z0-9_]*");

    static ref INT_VALUE: Regex = MK_ANCHORED!(r"[+-]?[0-9]+");
    static ref DOUBLE_VALUE: Regex = MK_ANCHORED!(r"[+-]?([0-9]+|\.[0-9]+|[0-9]+\.|[0-9]+\.[0-9]+)");
    static ref BOOLEAN_WORD: Regex = MK_ANCHORED!(r"true|false");
    static ref CHAR_VALUE: Regex = MK_ANCHORED!(r"'.'");
    static ref STRING_VALUE: Regex = MK_ANCHORED!(r#""[^,'"\\]*""#);
}

/// The primitive types a variable or parameter can be declared with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VariableType {
    Int,
    Double,
    Boolean,
    Char,
    String,
}

impl VariableType {
    pub fn parse(token: &str) -> Result<Self, ErrorImpl> {
        TYPE_LOOKUP
            .get(token)
            .copied()
            .ok_or_else(|| ErrorImpl::UnknownType {
                type_: token.to_string(),
            })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            VariableType::Int => "int",
            VariableType::Double => "double",
            VariableType::Boolean => "boolean",
            VariableType::Char => "char",
            VariableType::String => "String",
        }
    }

    /// Whether a value of `source` may be stored in a variable of this type.
    ///
    /// Widening is one-directional: int -> double, int/double -> boolean.
    pub fn is_assignable_from(&self, source: VariableType) -> bool {
        *self == source
            || matches!(
                (self, source),
                (VariableType::Double, VariableType::Int)
                    | (VariableType::Boolean, VariableType::Int)
                    | (VariableType::Boolean, VariableType::Double)
            )
    }

    pub fn is_value_valid(&self, literal: &str) -> bool {
        match self {
            VariableType::Int => INT_VALUE.is_match(literal),
            VariableType::Double => DOUBLE_VALUE.is_match(literal),
            VariableType::Boolean => {
                BOOLEAN_WORD.is_match(literal) || DOUBLE_VALUE.is_match(literal)
            }
            VariableType::Char => CHAR_VALUE.is_match(literal),
            VariableType::String => STRING_VALUE.is_match(literal),
        }
    }

    pub fn validate_value(&self, literal: &str) -> Result<(), ErrorImpl> {
        if self.is_value_valid(literal) {
            Ok(())
        } else {
            Err(ErrorImpl::InvalidValue {
                type_: self.keyword().to_string(),
                value: literal.to_string(),
            })
        }
    }

    /// The literal a parameter holds while its method body is verified.
    pub fn default_value(&self) -> &'static str {
        match self {
            VariableType::Int | VariableType::Double | VariableType::Boolean => "0",
            VariableType::Char => "'\0'",
            VariableType::String => "\"\"",
        }
    }

    /// Types a variable must have to stand alone in an `if`/`while` condition.
    pub fn is_condition_operand(&self) -> bool {
        matches!(
            self,
            VariableType::Boolean | VariableType::Int | VariableType::Double
        )
    }
}

impl Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

pub fn is_assignable(target: VariableType, source: VariableType) -> bool {
    target.is_assignable_from(source)
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(name)
}

/// True for text that can only be read as a variable reference, never as a literal.
pub fn is_name_like(text: &str) -> bool {
    NAME_LIKE.is_match(text) && !BOOLEAN_WORD.is_match(text)
}

fn validate_name(name: &str, pattern: &Regex) -> Result<(), ErrorImpl> {
    if is_reserved(name) {
        return Err(ErrorImpl::ReservedName {
            name: name.to_string(),
        });
    }
    if name.is_empty() || !pattern.is_match(name) {
        return Err(ErrorImpl::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_variable_name(name: &str) -> Result<(), ErrorImpl> {
    validate_name(name, &VARIABLE_NAME)
}

pub fn validate_method_name(name: &str) -> Result<(), ErrorImpl> {
    validate_name(name, &METHOD_NAME)
}
