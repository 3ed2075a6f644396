use std::{collections::HashMap, rc::Rc};

use log::{debug, trace};

use crate::{
    classifier::{
        classifier::{brace_balance, classify, enters_scope, exits_scope, LineKind},
        extract::{
            extract_assignments, extract_call, extract_condition, extract_declaration,
            extract_method_header,
        },
    },
    config::Config,
    errors::errors::{Error, ErrorImpl},
    scope::scope_manager::ScopeManager,
    types::{
        method::Method,
        types::{is_name_like, VariableType},
        variable::{resolve_value, Variable, VariableLookup},
    },
    Position,
};

use super::source::{LineSource, SourceLine, SourceLines};

/// Everything one verification run accumulates: the scope stack (which also tracks the
/// method being verified) and the registry of declared methods.
#[derive(Debug, Default)]
pub struct VerificationState {
    pub scopes: ScopeManager,
    pub methods: HashMap<String, Method>,
}

/// Verifies a source in three sequential reads:
///
/// 0. brace balance over the whole file,
/// 1. the global scan: every line is classified, methods are registered and global
///    variables declared,
/// 2. the method scan: every method body is checked against the globals and the
///    method registry built in pass 1.
///
/// The first failure ends the run.
pub struct Verifier<S: LineSource> {
    source: S,
    config: Config,
    file: Rc<String>,
}

impl<S: LineSource> Verifier<S> {
    pub fn new(source: S, config: Config) -> Self {
        let file = Rc::new(source.name());
        Verifier {
            source,
            config,
            file,
        }
    }

    /// Runs every pass on fresh state. Re-running on an unchanged source gives the same result.
    pub fn verify(&self) -> Result<VerificationState, Error> {
        debug!("verifying {}", self.file);
        self.check_brace_balance()?;

        let mut state = VerificationState::default();
        self.global_scan(&mut state)?;
        self.method_scan(&mut state)?;

        debug!("{} verified, {} methods", self.file, state.methods.len());
        Ok(state)
    }

    fn position(&self, line: usize) -> Position {
        Position(line as u32, Rc::clone(&self.file))
    }

    fn lines(&self) -> Result<SourceLines<S::Reader>, Error> {
        let reader = self
            .source
            .open()
            .map_err(|error| ErrorImpl::from(error).at(Position::null()))?;
        Ok(SourceLines::new(reader, &self.config.comment_marker))
    }

    fn advance(&self, lines: &mut SourceLines<S::Reader>) -> Result<Option<SourceLine>, Error> {
        match lines.next() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(error)) => Err(ErrorImpl::from(error).at(self.position(lines.line_number()))),
            None => Ok(None),
        }
    }

    fn check_brace_balance(&self) -> Result<(), Error> {
        let mut lines = self.lines()?;
        let mut balance = 0;

        while let Some(line) = self.advance(&mut lines)? {
            balance += brace_balance(&line.text);
        }

        if balance != 0 {
            return Err(ErrorImpl::UnclosedScope.at(self.position(lines.line_number())));
        }
        Ok(())
    }

    fn global_scan(&self, state: &mut VerificationState) -> Result<(), Error> {
        debug!("pass 1: global scan of {}", self.file);
        let mut lines = self.lines()?;

        while let Some(line) = self.advance(&mut lines)? {
            self.global_line(state, &line.text)
                .map_err(|error| error.at(self.position(line.number)))?;
        }

        if !state.scopes.is_global_scope() {
            return Err(ErrorImpl::UnclosedScope.at(self.position(lines.line_number())));
        }
        Ok(())
    }

    fn global_line(&self, state: &mut VerificationState, line: &str) -> Result<(), ErrorImpl> {
        let kind = track_and_classify(&mut state.scopes, line)?;
        trace!("pass 1, depth {}: {} `{}`", state.scopes.depth(), kind, line);

        match kind {
            // The condition's own scope is already pushed.
            LineKind::Condition if state.scopes.depth() == 2 => {
                Err(ErrorImpl::ConditionInGlobalScope)
            }
            LineKind::MethodCall | LineKind::Return if state.scopes.is_global_scope() => {
                Err(ErrorImpl::StatementInGlobalScope)
            }
            LineKind::MethodDeclaration => register_method(state, line),
            LineKind::VariableDeclaration if state.scopes.is_global_scope() => {
                declare_variables(&mut state.scopes, line)
            }
            LineKind::VariableAssignment if state.scopes.is_global_scope() => {
                assign_variables(&mut state.scopes, line)
            }
            _ => Ok(()),
        }
    }

    fn method_scan(&self, state: &mut VerificationState) -> Result<(), Error> {
        debug!("pass 2: method scan of {}", self.file);
        let mut lines = self.lines()?;

        while let Some(line) = self.advance(&mut lines)? {
            let at = self.position(line.number);
            let kind = track_and_classify(&mut state.scopes, &line.text)
                .map_err(|error| error.at(at.clone()))?;

            if kind == LineKind::MethodDeclaration {
                let method = extract_method_header(&line.text)
                    .and_then(|header| Method::from_header(&header))
                    .and_then(|method| {
                        state.scopes.enter_method(&method)?;
                        Ok(method)
                    })
                    .map_err(|error| error.at(at))?;
                self.scan_method(state, &mut lines, &method)?;
            }
        }
        Ok(())
    }

    /// Verifies one method body, consuming lines until the method's scope is popped.
    fn scan_method(
        &self,
        state: &mut VerificationState,
        lines: &mut SourceLines<S::Reader>,
        method: &Method,
    ) -> Result<(), Error> {
        debug!("entering method {}", method.name());
        let globals = state.scopes.snapshot_global_scope();

        // Kinds of the last two lines; the older one precedes the closing brace.
        let mut previous: Option<LineKind> = None;
        let mut before_previous: Option<LineKind> = None;

        while state.scopes.is_inside_method() {
            let Some(line) = self.advance(lines)? else {
                break;
            };
            let kind = self
                .method_line(state, &line.text)
                .map_err(|error| error.at(self.position(line.number)))?;

            before_previous = previous;
            previous = Some(kind);
        }

        if before_previous != Some(LineKind::Return) {
            return Err(ErrorImpl::MissingReturn {
                method: method.name().to_string(),
            }
            .at(self.position(lines.line_number())));
        }

        state.scopes.set_global_scope(globals);
        debug!("left method {}", method.name());
        Ok(())
    }

    fn method_line(&self, state: &mut VerificationState, line: &str) -> Result<LineKind, ErrorImpl> {
        let kind = track_and_classify(&mut state.scopes, line)?;
        trace!(
            "pass 2, {:?} at depth {}: {} `{}`",
            state.scopes.state(),
            state.scopes.depth(),
            kind,
            line
        );

        match kind {
            LineKind::MethodDeclaration => return Err(ErrorImpl::NestedMethod),
            LineKind::Condition => check_condition(&state.scopes, line)?,
            LineKind::MethodCall => check_call(state, line)?,
            LineKind::VariableDeclaration => declare_variables(&mut state.scopes, line)?,
            LineKind::VariableAssignment => assign_variables(&mut state.scopes, line)?,
            LineKind::Return | LineKind::ScopeEnd => {}
        }
        Ok(kind)
    }
}

/// Adjusts the scope stack for the line, then classifies it.
fn track_and_classify(scopes: &mut ScopeManager, line: &str) -> Result<LineKind, ErrorImpl> {
    if enters_scope(line) {
        scopes.enter_scope();
    }
    if exits_scope(line) {
        scopes.exit_scope()?;
    }
    classify(line)
}

fn register_method(state: &mut VerificationState, line: &str) -> Result<(), ErrorImpl> {
    let method = Method::from_header(&extract_method_header(line)?)?;

    if state.methods.contains_key(method.name()) {
        return Err(ErrorImpl::MethodAlreadyDeclared {
            name: method.name().to_string(),
        });
    }
    debug!(
        "registered method {} ({} parameters)",
        method.name(),
        method.parameters().len()
    );
    state.methods.insert(method.name().to_string(), method);
    Ok(())
}

/// Every clause is resolved against the scope as it was before the line, then all are declared.
fn declare_variables(scopes: &mut ScopeManager, line: &str) -> Result<(), ErrorImpl> {
    let declaration = extract_declaration(line)?;
    let var_type = VariableType::parse(&declaration.type_token)?;

    let mut variables = vec![];
    for clause in &declaration.clauses {
        let mut variable = Variable::new(&clause.name, var_type, declaration.is_final)?;
        match &clause.value {
            Some(raw) => {
                let value = resolve_value(var_type, raw, &*scopes)?;
                variable.initialize(&value)?;
            }
            None if declaration.is_final => {
                return Err(ErrorImpl::FinalNotInitialized {
                    name: clause.name.clone(),
                })
            }
            None => {}
        }
        variables.push(variable);
    }

    for variable in variables {
        scopes.declare_variable(variable)?;
    }
    Ok(())
}

fn assign_variables(scopes: &mut ScopeManager, line: &str) -> Result<(), ErrorImpl> {
    for (name, raw) in extract_assignments(line)? {
        let target = scopes
            .lookup_variable(&name)
            .ok_or_else(|| ErrorImpl::VariableNotDeclared { name: name.clone() })?;
        if target.is_final() {
            return Err(ErrorImpl::FinalReassignment { name });
        }

        let value = resolve_value(target.var_type(), &raw, &*scopes)?;
        scopes
            .lookup_variable_mut(&name)
            .ok_or_else(|| ErrorImpl::VariableNotDeclared { name: name.clone() })?
            .change_value(&value)?;
    }
    Ok(())
}

fn check_call(state: &VerificationState, line: &str) -> Result<(), ErrorImpl> {
    let call = extract_call(line)?;
    let method = state
        .methods
        .get(&call.name)
        .ok_or_else(|| ErrorImpl::MethodNotDeclared {
            name: call.name.clone(),
        })?;

    method.check_arguments(&call.arguments, &state.scopes)
}

/// Each operand is a boolean-compatible literal or an initialized boolean/int/double variable.
fn check_condition(scopes: &ScopeManager, line: &str) -> Result<(), ErrorImpl> {
    for operand in extract_condition(line)? {
        match scopes.lookup_variable(&operand) {
            Some(variable) => {
                if !variable.is_initialized() {
                    return Err(ErrorImpl::VariableNotInitialized { name: operand });
                }
                if !variable.var_type().is_condition_operand() {
                    return Err(ErrorImpl::InvalidConditionOperand {
                        name: operand,
                        type_: variable.var_type().to_string(),
                    });
                }
            }
            None if is_name_like(&operand) => {
                return Err(ErrorImpl::VariableNotDeclared { name: operand })
            }
            None => VariableType::Boolean.validate_value(&operand)?,
        }
    }
    Ok(())
}
