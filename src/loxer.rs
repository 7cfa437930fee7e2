use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{
	LoxError,
	error::SyntaxError,
	interpreter::{Interpreter, print::PrintHandler},
	parser::Parser,
	resolver::Resolver,
	scanner::Scanner,
};

/// Loxer is an interpreter session: one global environment that every
/// [`Loxer::run`] executes against, plus the channel `print` writes to.
pub struct Loxer {
	interpreter: Interpreter,
}

impl Default for Loxer {
	fn default() -> Self { Self::new(PrintHandler::Stdout) }
}

impl Loxer {
	pub fn new(output: PrintHandler) -> Self { Self { interpreter: Interpreter::new(output) } }

	/// A session whose `print` output is captured, see [`Loxer::take_output`].
	pub fn buffered() -> Self { Self::new(PrintHandler::buffer()) }

	/// Output captured so far by a buffered session.
	pub fn take_output(&mut self) -> String { self.interpreter.take_output() }

	/// Run a whole source file.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoxError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		self.run(&source)
	}

	/// Run the REPL prompt until end of input. Errors are reported and the
	/// session carries on with the same globals.
	pub fn run_prompt(&mut self) {
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited rlox repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			if let Err(LoxError::InternalError(e)) = self.run(input.trim_end()) {
				eprintln!("{e:#}");
			}
		}
	}

	/// Scan, parse, resolve and interpret one unit of source.
	///
	/// Static errors stop the pipeline before the next stage; every diagnostic
	/// is written to stderr as it is found and also returned.
	#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
	pub fn run(&mut self, source: &str) -> Result<(), LoxError> {
		let (tokens, scan_errors) = Scanner::new(source).scan_tokens()?;
		let (statements, parse_errors) = Parser::new(tokens).parse()?;
		let syntax_errors: Vec<SyntaxError> =
			scan_errors.into_iter().map(SyntaxError::from).chain(parse_errors.into_iter().map(SyntaxError::from)).collect();
		if !syntax_errors.is_empty() {
			report(&syntax_errors);
			return Err(LoxError::SyntaxErrors(syntax_errors));
		}

		let resolve_errors = Resolver::new().with_globals(self.interpreter.global_names()).resolve(&statements);
		if !resolve_errors.is_empty() {
			report(&resolve_errors);
			return Err(LoxError::ResolveErrors(resolve_errors));
		}

		self.interpreter.interpret(&statements).map_err(|e| {
			tracing::debug!(line = e.line(), "runtime error");
			eprintln!("{e}");
			e.into()
		})
	}
}

fn report<E: std::fmt::Display>(errors: &[E]) {
	for error in errors {
		eprintln!("{error}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stages_gate_each_other() {
		let mut loxer = Loxer::buffered();
		assert!(matches!(loxer.run("print 1; print ;"), Err(LoxError::SyntaxErrors(e)) if e.len() == 1));
		assert_eq!(loxer.take_output(), "");

		assert!(matches!(loxer.run("print 1; return 2;"), Err(LoxError::ResolveErrors(e)) if e.len() == 1));
		assert_eq!(loxer.take_output(), "");

		assert!(matches!(loxer.run("print 1; print -nil; print 3;"), Err(LoxError::RuntimeError(_))));
		assert_eq!(loxer.take_output(), "1\n");
	}

	#[test]
	fn scan_and_parse_errors_are_reported_together() {
		let mut loxer = Loxer::buffered();
		let Err(LoxError::SyntaxErrors(errors)) = loxer.run("var a = @;\nprint (1;") else {
			panic!("expected syntax errors");
		};
		let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
		assert_eq!(messages, [
			"[line 1] error: Unexpected character '@'.",
			"[line 1] error at ';': Expect expression.",
			"[line 2] error at ';': Expect ')' after expression.",
		]);
	}

	#[test]
	fn session_keeps_globals_after_errors() {
		let mut loxer = Loxer::buffered();
		loxer.run("var count = 1;").unwrap();
		assert!(loxer.run("count = count + nil;").is_err());
		assert!(loxer.run("print count").is_err());
		loxer.run("count = count + 1; print count;").unwrap();
		assert_eq!(loxer.take_output(), "2\n");
	}

	#[test]
	fn globals_from_earlier_runs_can_be_redeclared() {
		let mut loxer = Loxer::buffered();
		loxer.run("var a = 1;").unwrap();
		loxer.run("var a = a + 1; print a;").unwrap();
		assert!(matches!(loxer.run("var b = b;"), Err(LoxError::ResolveErrors(_))));
		assert_eq!(loxer.take_output(), "2\n");
	}

	#[test]
	fn missing_file_is_an_internal_error() {
		let error = Loxer::buffered().run_file("/definitely/not/here.lox").unwrap_err();
		assert!(matches!(error, LoxError::InternalError(_)));
		assert_eq!(error.exit_code(), 74);
	}
}
