//! Static variable resolution.
//!
//! One walk over the statement trees, mirroring the frames the interpreter
//! will create: every block and every function body pushes a scope. Each
//! variable use is bound to the scope that declares it, and the number of
//! scopes between the use and that declaration is written into the node. A name
//! found in no local scope is left for the global frame at runtime.
//!
//! Declaring a name marks it "not ready" until its initializer is resolved,
//! which is how `var a = a;` gets caught. A global that is already bound stays
//! ready when redeclared, so `var a = a + 1;` reads the earlier value.

use std::collections::HashMap;

use crate::{
	error::{
		Location,
		resolver::{ResolveError, ResolveErrorType},
	},
	parser::expression::{Depth, Expression},
	scanner::Token,
	statement::{Function, Statement},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum FunctionKind {
	None,
	Function,
}

/// Name to "ready" flag.
type Scope = HashMap<String, bool>;

pub(crate) struct Resolver {
	/// Local scopes, innermost last. Empty at top level.
	scopes:           Vec<Scope>,
	/// Top-level names, tracked only to reject self-referencing initializers;
	/// globals are never given a distance.
	globals:          Scope,
	current_function: FunctionKind,
	errors:           Vec<ResolveError>,
}

impl Resolver {
	pub fn new() -> Self {
		Self { scopes: vec![], globals: Scope::new(), current_function: FunctionKind::None, errors: vec![] }
	}

	/// Treat `names` as globals bound by earlier runs of the same session.
	pub fn with_globals(mut self, names: impl IntoIterator<Item = String>) -> Self {
		self.globals.extend(names.into_iter().map(|name| (name, true)));
		self
	}

	/// Resolve a whole program, returning every error found.
	pub fn resolve(mut self, statements: &[Statement]) -> Vec<ResolveError> {
		self.resolve_statements(statements);
		tracing::debug!(errors = self.errors.len(), "resolved program");
		self.errors
	}

	fn resolve_statements(&mut self, statements: &[Statement]) {
		for statement in statements {
			self.resolve_statement(statement);
		}
	}

	fn resolve_statement(&mut self, statement: &Statement) {
		match statement {
			Statement::Expression(expression) | Statement::Print(expression) => self.resolve_expression(expression),
			Statement::VarDeclaration { name_token, initializer } => {
				self.declare(name_token);
				if let Some(initializer) = initializer {
					self.resolve_expression(initializer);
				}
				self.define(name_token);
			}
			Statement::Block(statements) => {
				self.scopes.push(Scope::new());
				self.resolve_statements(statements);
				self.scopes.pop();
			}
			Statement::If { condition, then_branch, else_branch } => {
				self.resolve_expression(condition);
				self.resolve_statement(then_branch);
				if let Some(else_branch) = else_branch {
					self.resolve_statement(else_branch);
				}
			}
			Statement::While { condition, body } => {
				self.resolve_expression(condition);
				self.resolve_statement(body);
			}
			Statement::FunDecl(function) => {
				// Defined before the body so the function can call itself.
				self.declare(&function.name_token);
				self.define(&function.name_token);
				self.resolve_function(function);
			}
			Statement::Return { keyword, value } => {
				if self.current_function == FunctionKind::None {
					self.error(keyword, ResolveErrorType::ReturnOutsideFunction);
				}
				if let Some(value) = value {
					self.resolve_expression(value);
				}
			}
		}
	}

	fn resolve_function(&mut self, function: &Function) {
		let enclosing = std::mem::replace(&mut self.current_function, FunctionKind::Function);
		self.scopes.push(Scope::new());
		for parameter in &function.parameters {
			self.declare(parameter);
			self.define(parameter);
		}
		self.resolve_statements(&function.body);
		self.scopes.pop();
		self.current_function = enclosing;
	}

	fn resolve_expression(&mut self, expression: &Expression) {
		match expression {
			Expression::Literal(_) => {}
			Expression::Grouping(inner) => self.resolve_expression(inner),
			Expression::Unary { right, .. } => self.resolve_expression(right),
			Expression::Binary { left, right, .. } | Expression::Logical { left, right, .. } => {
				self.resolve_expression(left);
				self.resolve_expression(right);
			}
			Expression::Variable { name, depth } => {
				if self.innermost().get(&name.lexeme) == Some(&false) {
					let r#type = match self.scopes.is_empty() {
						true => ResolveErrorType::ReadGlobalInOwnInitializer,
						false => ResolveErrorType::ReadInOwnInitializer,
					};
					self.error(name, r#type);
				}
				self.resolve_local(name, depth);
			}
			Expression::Assign { name, value, depth } => {
				self.resolve_expression(value);
				self.resolve_local(name, depth);
			}
			Expression::Call { callee, arguments, .. } => {
				self.resolve_expression(callee);
				for argument in arguments {
					self.resolve_expression(argument);
				}
			}
		}
	}

	/// Bind `name` to the nearest local scope declaring it, if any.
	fn resolve_local(&mut self, name: &Token, depth: &Depth) {
		if let Some(distance) = self.scopes.iter().rev().position(|scope| scope.contains_key(&name.lexeme)) {
			tracing::trace!(name = %name.lexeme, line = name.line, distance, "resolved local");
			depth.set(distance);
		}
	}

	fn declare(&mut self, name: &Token) {
		if self.scopes.is_empty() {
			self.globals.entry(name.lexeme.clone()).or_insert(false);
			return;
		}
		if self.innermost().contains_key(&name.lexeme) {
			self.error(name, ResolveErrorType::AlreadyDeclared);
		}
		self.innermost_mut().insert(name.lexeme.clone(), false);
	}

	fn define(&mut self, name: &Token) { self.innermost_mut().insert(name.lexeme.clone(), true); }

	/// The scope declarations currently land in.
	fn innermost(&self) -> &Scope { self.scopes.last().unwrap_or(&self.globals) }

	fn innermost_mut(&mut self) -> &mut Scope {
		match self.scopes.last_mut() {
			Some(scope) => scope,
			None => &mut self.globals,
		}
	}

	fn error(&mut self, token: &Token, r#type: ResolveErrorType) {
		let error = ResolveError::new(token.line, Location::of(token), r#type);
		tracing::debug!(line = token.line, "resolve error: {error}");
		self.errors.push(error);
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{parser::Parser, scanner::Scanner};

	fn parse(input: &str) -> Vec<Statement> {
		let (tokens, _) = Scanner::new(input).scan_tokens().unwrap();
		let (statements, errors) = Parser::new(tokens).parse().unwrap();
		assert!(errors.is_empty(), "{errors:?}");
		statements
	}

	fn errors(input: &str) -> Vec<std::string::String> {
		Resolver::new().resolve(&parse(input)).iter().map(|e| e.to_string()).collect()
	}

	/// Depths of every variable use in the printed expressions, in order.
	fn print_depths(statements: &[Statement], depths: &mut Vec<Option<usize>>) {
		for statement in statements {
			match statement {
				Statement::Print(Expression::Variable { depth, .. }) => depths.push(depth.get()),
				Statement::Block(inner) => print_depths(inner, depths),
				Statement::FunDecl(function) => print_depths(&function.body, depths),
				_ => {}
			}
		}
	}

	fn depths(input: &str) -> Vec<Option<usize>> {
		let statements = parse(input);
		assert!(Resolver::new().resolve(&statements).is_empty());
		let mut depths = vec![];
		print_depths(&statements, &mut depths);
		depths
	}

	#[test]
	fn globals_stay_unresolved() {
		assert_eq!(depths("var a = 1; print a; { print a; }"), [None, None]);
	}

	#[test]
	fn locals_get_their_distance() {
		assert_eq!(depths("{ var a = 1; print a; { print a; { var a = 2; print a; } } }"), [Some(0), Some(1), Some(0)]);
	}

	#[test]
	fn function_bodies_count_the_parameter_scope() {
		assert_eq!(depths("fun f(x) { print x; { print x; } }"), [Some(0), Some(1)]);
		assert_eq!(depths("{ var a = 1; fun f() { print a; } }"), [Some(1)]);
	}

	#[test]
	fn own_initializer_is_an_error() {
		assert_eq!(errors("var a = a;"), ["[line 1] error at 'a': Can't read global variable in its own initializer."]);
		assert_eq!(errors("{ var b = b; }"), [
			"[line 1] error at 'b': Can't read local variable in its own initializer."
		]);
		assert!(errors("var a = 1; { var a = a + 1; }").len() == 1);
	}

	#[test]
	fn redeclared_global_reads_the_earlier_binding() {
		assert!(errors("var a = 1; var a = a + 1;").is_empty());
		assert!(errors("var a; { var b = 1; } var a = a;").is_empty());

		let statements = parse("var total = total + 1;");
		assert_eq!(Resolver::new().resolve(&statements).len(), 1);
		assert!(Resolver::new().with_globals(["total".to_string()]).resolve(&statements).is_empty());
	}

	#[test]
	fn shadowing_an_outer_name_is_fine() {
		assert!(errors("var a = 1; { var b = a; { var a = b; print a; } }").is_empty());
	}

	#[test]
	fn duplicate_locals_are_errors() {
		assert_eq!(errors("{ var a = 1; var a = 2; }"), ["[line 1] error at 'a': Already a variable with this name in this scope."]);
		assert_eq!(errors("fun f(a, a) {}").len(), 1);
		assert!(errors("var a = 1; var a = 2;").is_empty());
	}

	#[test]
	fn return_outside_function() {
		assert_eq!(errors("return 1;"), ["[line 1] error at 'return': Can't return from top-level code."]);
		assert!(errors("fun f() { { return 1; } }").is_empty());
	}

	#[test]
	fn resolution_continues_after_errors() {
		assert_eq!(errors("return;\n{ var a = a; }\nreturn;").len(), 3);
	}

	#[test]
	fn recursive_functions_resolve() {
		assert!(errors("{ fun f(n) { if (n > 0) f(n - 1); } f(3); }").is_empty());
	}
}
