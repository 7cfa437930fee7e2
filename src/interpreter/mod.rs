//! Lox tree-walking interpreter.
//!
//! The interpreter walks the resolved statement trees, evaluating each
//! expression against the current environment frame and carrying out the side
//! effects of statements.
//!
//! `return` is not an error: executing a statement yields a [`Completion`],
//! and blocks, `if` and `while` hand a `Return` completion straight up until
//! the function call that owns it turns it into the call's value.
//!
//! Calls recurse on the host stack, so very deep Lox recursion overflows it.

pub(crate) mod callable;
pub(crate) mod print;
pub(crate) mod value;

use std::rc::Rc;

use callable::Callable;
use print::PrintHandler;
use value::Value;

use crate::{
	environment::Environment,
	error::interpreter::{RuntimeError, RuntimeErrorType},
	parser::expression::{Depth, Expression, LiteralValue},
	scanner::{Token, TokenType},
	statement::Statement,
	utils::RcCell,
};

/// How a statement finished.
#[derive(Debug)]
pub(crate) enum Completion {
	Normal,
	/// A `return` is unwinding to the enclosing call.
	Return(Value),
}

/// Interpreter that executes Lox statements.
pub(crate) struct Interpreter {
	/// The root frame, alive for the whole session.
	globals:     RcCell<Environment>,
	/// The frame the current statement runs in.
	environment: RcCell<Environment>,
	output:      PrintHandler,
}

impl Interpreter {
	pub fn new(output: PrintHandler) -> Self {
		let globals = RcCell::new(Environment::new());
		globals.borrow_mut().define("clock", Value::Callable(Rc::new(Callable::clock())));
		Self { environment: globals.clone(), globals, output }
	}

	pub fn take_output(&mut self) -> String { self.output.take_output() }

	/// Every name currently bound in the global frame.
	pub fn global_names(&self) -> Vec<String> { self.globals.borrow().names().cloned().collect() }

	/// Execute top-level statements, stopping at the first runtime error.
	pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
		for statement in statements {
			self.execute(statement)?;
		}
		Ok(())
	}

	fn execute(&mut self, statement: &Statement) -> Result<Completion, RuntimeError> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Print(expression) => {
				let value = self.evaluate(expression)?;
				self.output.println(&value.to_string());
			}
			Statement::VarDeclaration { name_token, initializer } => {
				let value = match initializer {
					Some(initializer) => self.evaluate(initializer)?,
					None => Value::Nil,
				};
				self.environment.borrow_mut().define(name_token.lexeme.clone(), value);
			}
			Statement::Block(statements) => {
				let environment = Environment::with_enclosing(self.environment.clone());
				return self.execute_block(statements, environment.into());
			}
			Statement::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition)?.is_truthy() {
					return self.execute(then_branch);
				} else if let Some(else_branch) = else_branch {
					return self.execute(else_branch);
				}
			}
			Statement::While { condition, body } => {
				while self.evaluate(condition)?.is_truthy() {
					if let Completion::Return(value) = self.execute(body)? {
						return Ok(Completion::Return(value));
					}
				}
			}
			Statement::FunDecl(function) => {
				let callable = Rc::new(Callable::new_lox(Rc::clone(function), self.environment.clone()));
				self.environment.borrow_mut().define(function.name_token.lexeme.clone(), Value::Callable(callable));
			}
			Statement::Return { value, .. } => {
				let value = match value {
					Some(value) => self.evaluate(value)?,
					None => Value::Nil,
				};
				return Ok(Completion::Return(value));
			}
		}
		Ok(Completion::Normal)
	}

	/// Run `statements` in `environment`, then put the previous frame back
	/// whether they finished, returned or failed.
	pub(crate) fn execute_block(
		&mut self,
		statements: &[Statement],
		environment: RcCell<Environment>,
	) -> Result<Completion, RuntimeError> {
		let previous = std::mem::replace(&mut self.environment, environment);
		let result = self.execute_all(statements);
		self.environment = previous;
		result
	}

	fn execute_all(&mut self, statements: &[Statement]) -> Result<Completion, RuntimeError> {
		for statement in statements {
			if let Completion::Return(value) = self.execute(statement)? {
				return Ok(Completion::Return(value));
			}
		}
		Ok(Completion::Normal)
	}

	/// Evaluate the given expression and return its value.
	fn evaluate(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
		Ok(match expr {
			Expression::Literal(literal) => match literal {
				LiteralValue::Nil => Value::Nil,
				LiteralValue::Boolean(b) => Value::Boolean(*b),
				LiteralValue::Number(n) => Value::Number(*n),
				LiteralValue::String(s) => Value::String(Rc::clone(s)),
			},
			Expression::Grouping(inner) => self.evaluate(inner)?,
			Expression::Unary { operator, right } => {
				let right = self.evaluate(right)?;
				match (operator.r#type, right) {
					(TokenType::Minus, Value::Number(n)) => Value::Number(-n),
					(TokenType::Minus, _) => {
						return Err(RuntimeError::new(operator.line, RuntimeErrorType::OperandMustBeNumber));
					}
					(TokenType::Bang, value) => Value::Boolean(!value.is_truthy()),
					(other, _) => {
						return Err(RuntimeError::new(
							operator.line,
							RuntimeErrorType::InvalidOperator(format!("{other:?}")),
						));
					}
				}
			}
			Expression::Binary { left, operator, right } => {
				let left = self.evaluate(left)?;
				let right = self.evaluate(right)?;
				left.binary_op(operator.r#type, &right).map_err(|e| RuntimeError::new(operator.line, e))?
			}
			Expression::Logical { left, operator, right } => {
				let left = self.evaluate(left)?;
				match operator.r#type {
					TokenType::Or if left.is_truthy() => left,
					TokenType::And if !left.is_truthy() => left,
					TokenType::Or | TokenType::And => self.evaluate(right)?,
					other => {
						return Err(RuntimeError::new(
							operator.line,
							RuntimeErrorType::InvalidOperator(format!("{other:?}")),
						));
					}
				}
			}
			Expression::Variable { name, depth } => self.look_up(name, depth)?,
			Expression::Assign { name, value, depth } => {
				let value = self.evaluate(value)?;
				match depth.get() {
					Some(distance) => Environment::assign_at(&self.environment, distance, name, value.clone()),
					None => self.globals.borrow_mut().assign(name, value.clone())?,
				}
				value
			}
			Expression::Call { callee, paren, arguments } => {
				let callee = self.evaluate(callee)?;
				let arguments = arguments.iter().map(|argument| self.evaluate(argument)).collect::<Result<Vec<_>, _>>()?;

				let Value::Callable(function) = callee else {
					return Err(RuntimeError::new(paren.line, RuntimeErrorType::NotCallable));
				};
				if arguments.len() != function.arity() {
					return Err(RuntimeError::new(
						paren.line,
						RuntimeErrorType::ArityMismatch { expected: function.arity(), got: arguments.len() },
					));
				}
				tracing::trace!(function = function.name(), line = paren.line, "call");
				function.call(self, arguments)?
			}
		})
	}

	/// Resolved names are read from their exact frame, the rest from globals.
	fn look_up(&self, name: &Token, depth: &Depth) -> Result<Value, RuntimeError> {
		match depth.get() {
			Some(distance) => Environment::get_at(&self.environment, distance, name),
			None => self.globals.borrow().get(name),
		}
	}
}

// Top-level functions capture the global frame, which holds them in turn.
impl Drop for Interpreter {
	fn drop(&mut self) {
		let bindings = self.globals.borrow_mut().take_bindings();
		drop(bindings);
	}
}
