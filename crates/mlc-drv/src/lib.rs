//! Compiler driver (spec §6.1, SPEC_FULL.md §8).
//!
//! Reads the entirety of standard input as one program's source, runs
//! lex → parse → infer → rename → codegen → interpret in sequence, and
//! prints the single result value to stdout (integers in decimal,
//! booleans as their `1`/`0` encoding — spec §6.4). The pipeline is
//! fatal on first error (spec §7): whichever stage fails reports one
//! diagnostic line on stderr and the process exits non-zero.

use mlc_sem::{InferenceResult, Type};
use mlc_util::diagnostic::Diagnostic;
use mlc_util::span::Span;
use mlc_vm::{Interpreter, Value};
use tracing::debug;

/// Words of scratch memory given to the interpreter for every run. The
/// source language has no arrays/allocation (spec §9 Non-goals) — this
/// only needs to hold the handful of stack slots a program's nested
/// closure calls spill during evaluation (`mlc-cg`'s calling convention).
pub const MEMORY_WORDS: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("lex error: {0}")]
    Lex(#[from] mlc_lex::LexError),
    #[error("parse error: {0}")]
    Parse(#[from] mlc_par::ParseError),
    #[error("type error: {0}")]
    Type(#[from] mlc_sem::Error),
    #[error("runtime error: {0}")]
    Runtime(#[from] mlc_vm::RuntimeError),
    #[error("top-level expression has function type `{0}`; only int/bool results can be printed")]
    UnprintableResult(Type),
}

impl DriverError {
    /// The source location to report, where the failing stage tracks one.
    /// `mlc-sem`/`mlc-vm` errors (spec §7) carry no span, so those fall
    /// back to [`Span::DUMMY`].
    fn span(&self) -> Span {
        match self {
            DriverError::Lex(e) => e.span(),
            DriverError::Parse(e) => e.position,
            DriverError::Type(_) | DriverError::Runtime(_) | DriverError::UnprintableResult(_) => {
                Span::DUMMY
            }
        }
    }

    /// The one-line diagnostic the driver prints on stderr (spec §6.1).
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.span())
    }
}

/// Run the full pipeline over `source`, returning the value the program
/// evaluates to.
pub fn compile_and_run(source: &str) -> Result<Value, DriverError> {
    debug!("lexing");
    let tokens = mlc_lex::Lexer::new(source).tokenize()?;

    debug!("parsing");
    let ast = mlc_par::Parser::new(tokens).parse()?;

    debug!("inferring types");
    let InferenceResult { ty, .. } = mlc_sem::infer(&ast)?;
    if matches!(ty, Type::Arrow(..)) {
        return Err(DriverError::UnprintableResult(ty));
    }

    debug!("renaming");
    let renamed = mlc_rn::rename(ast);

    debug!("generating code");
    let (program, result_reg) = mlc_cg::generate(&renamed);

    debug!("interpreting");
    let mut vm = Interpreter::new(MEMORY_WORDS);
    vm.run(&program)?;
    Ok(vm.register(result_reg)?)
}

/// Render a result value the way spec §6.4 requires: integers in
/// decimal, booleans as `1`/`0`. The interpreter itself is untyped (every
/// register holds a plain `i64`), so both print identically; the
/// well-typedness check above is what guarantees the value is one of the
/// two printable shapes in the first place.
pub fn format_result(value: Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => (b as i64).to_string(),
        Value::Closure { .. } => unreachable!("type checker rejects function-typed results"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_well_typed_program_to_completion() {
        let v = compile_and_run("1 + 2 * 3").unwrap();
        assert_eq!(format_result(v), "7");
    }

    #[test]
    fn rejects_a_function_typed_top_level_result() {
        let err = compile_and_run("fn x : int => x + 1").unwrap_err();
        assert!(matches!(err, DriverError::UnprintableResult(_)));
    }

    #[test]
    fn surfaces_a_lex_error() {
        let err = compile_and_run("1 @ 2").unwrap_err();
        assert!(matches!(err, DriverError::Lex(_)));
    }

    #[test]
    fn surfaces_a_type_error() {
        let err = compile_and_run("1 + true").unwrap_err();
        assert!(matches!(err, DriverError::Type(_)));
    }

    #[test]
    fn surfaces_a_runtime_division_by_zero() {
        let err = compile_and_run("1 / 0").unwrap_err();
        assert!(matches!(err, DriverError::Runtime(_)));
    }
}
