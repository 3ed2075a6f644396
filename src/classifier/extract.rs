//! Pure text extraction for classified lines.
//!
//! Nothing here knows about scopes or types: each function only cuts a line into
//! the pieces the verifier needs (names, type tokens, raw literal values) and
//! rejects shapes that cannot be cut.

use crate::errors::errors::ErrorImpl;

use super::patterns::FINAL_PREFIX;

/// One `name` or `name = value` piece of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationLine {
    pub is_final: bool,
    pub type_token: String,
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub is_final: bool,
    pub type_token: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodHeader {
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallLine {
    pub name: String,
    pub arguments: Vec<String>,
}

fn strip_semicolon(line: &str) -> &str {
    let line = line.trim();
    line.strip_suffix(';').unwrap_or(line).trim()
}

/// Text between the first `(` and the closing parenthesis at `close_at`.
fn between<'a>(line: &'a str, close_at: Option<usize>) -> Result<&'a str, ErrorImpl> {
    let start = line.find('(').ok_or(ErrorImpl::InvalidLineFormat)?;
    let end = close_at.ok_or(ErrorImpl::InvalidLineFormat)?;
    if end <= start {
        return Err(ErrorImpl::InvalidLineFormat);
    }
    Ok(&line[start + 1..end])
}

pub fn extract_declaration(line: &str) -> Result<DeclarationLine, ErrorImpl> {
    let mut rest = line.trim();
    let is_final = match FINAL_PREFIX.find(rest) {
        Some(prefix) => {
            rest = &rest[prefix.end()..];
            true
        }
        None => false,
    };

    let type_token = rest
        .split_whitespace()
        .next()
        .ok_or(ErrorImpl::InvalidLineFormat)?
        .to_string();
    let body = strip_semicolon(&rest[type_token.len()..]);

    let mut clauses = vec![];
    for clause in body.split(',') {
        let parts: Vec<&str> = clause.split('=').collect();
        match parts.as_slice() {
            [name] => clauses.push(Clause {
                name: name.trim().to_string(),
                value: None,
            }),
            [name, value] => clauses.push(Clause {
                name: name.trim().to_string(),
                value: Some(value.trim().to_string()),
            }),
            _ => return Err(ErrorImpl::InvalidLineFormat),
        }
    }

    Ok(DeclarationLine {
        is_final,
        type_token,
        clauses,
    })
}

/// Splits `a = 1, b = c;` into `(name, raw value)` pairs.
pub fn extract_assignments(line: &str) -> Result<Vec<(String, String)>, ErrorImpl> {
    strip_semicolon(line)
        .split(',')
        .map(|assignment| {
            let parts: Vec<&str> = assignment.split('=').collect();
            match parts.as_slice() {
                [name, value] => Ok((name.trim().to_string(), value.trim().to_string())),
                _ => Err(ErrorImpl::InvalidAssignment),
            }
        })
        .collect()
}

pub fn extract_method_header(line: &str) -> Result<MethodHeader, ErrorImpl> {
    let signature = line
        .trim()
        .strip_prefix("void")
        .ok_or(ErrorImpl::InvalidMethodDeclaration)?;
    let name = signature
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let parameter_list = between(line, line.find(')'))?.trim();
    if parameter_list.is_empty() {
        return Ok(MethodHeader {
            name,
            parameters: vec![],
        });
    }

    let mut parameters = vec![];
    for parameter in parameter_list.split(',') {
        let words: Vec<&str> = parameter.split_whitespace().collect();
        let parameter = match words.as_slice() {
            ["final", type_token, name] => ParameterDecl {
                is_final: true,
                type_token: type_token.to_string(),
                name: name.to_string(),
            },
            [type_token, name] => ParameterDecl {
                is_final: false,
                type_token: type_token.to_string(),
                name: name.to_string(),
            },
            _ => return Err(ErrorImpl::InvalidParameters),
        };
        parameters.push(parameter);
    }

    Ok(MethodHeader { name, parameters })
}

pub fn extract_call(line: &str) -> Result<CallLine, ErrorImpl> {
    let name = line
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let argument_list = between(line, line.rfind(')'))?.trim();

    let arguments = if argument_list.is_empty() {
        vec![]
    } else {
        argument_list
            .split(',')
            .map(|argument| argument.trim().to_string())
            .collect()
    };

    Ok(CallLine { name, arguments })
}

/// The atomic operands of an `if`/`while` header, split on `||` then `&&`.
pub fn extract_condition(line: &str) -> Result<Vec<String>, ErrorImpl> {
    let condition = between(line, line.rfind(')'))?;

    let mut operands = vec![];
    for clause in condition.split("||") {
        for operand in clause.split("&&") {
            let operand = operand.trim();
            if operand.is_empty() {
                return Err(ErrorImpl::InvalidCondition);
            }
            operands.push(operand.to_string());
        }
    }

    Ok(operands)
}
