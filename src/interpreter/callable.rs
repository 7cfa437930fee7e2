use std::{
	fmt::{Debug, Display},
	rc::Rc,
	time::{SystemTime, UNIX_EPOCH},
};

use crate::{
	environment::Environment,
	error::interpreter::RuntimeError,
	interpreter::{Completion, Interpreter, value::Value},
	statement::Function,
	utils::RcCell,
};

type NativeFunction = fn(&[Value]) -> Value;

/// Anything a call expression can invoke.
pub(crate) enum Callable {
	Native { name: &'static str, arity: usize, function: NativeFunction },
	Lox(LoxFunction),
}

/// A function declared in Lox source, together with the frame it was
/// declared in.
pub(crate) struct LoxFunction {
	declaration: Rc<Function>,
	/// Fixed at declaration; every call runs in a fresh child of this frame.
	closure:     RcCell<Environment>,
}

impl Callable {
	pub fn new_lox(declaration: Rc<Function>, closure: RcCell<Environment>) -> Self {
		Self::Lox(LoxFunction { declaration, closure })
	}

	/// The built-in `clock()`: seconds since the Unix epoch.
	pub fn clock() -> Self {
		Self::Native {
			name:     "clock",
			arity:    0,
			function: |_| {
				let seconds = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or_default();
				Value::Number(seconds)
			},
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Native { name, .. } => *name,
			Self::Lox(function) => function.declaration.name_token.lexeme.as_str(),
		}
	}

	pub fn arity(&self) -> usize {
		match self {
			Self::Native { arity, .. } => *arity,
			Self::Lox(function) => function.declaration.parameters.len(),
		}
	}

	/// Invoke with arguments whose count already matches [`Self::arity`].
	pub fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
		match self {
			Self::Native { function, .. } => Ok(function(&arguments)),
			Self::Lox(function) => function.call(interpreter, arguments),
		}
	}
}

impl LoxFunction {
	fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
		let mut environment = Environment::with_enclosing(self.closure.clone());
		for (parameter, argument) in self.declaration.parameters.iter().zip(arguments) {
			environment.define(parameter.lexeme.clone(), argument);
		}
		match interpreter.execute_block(&self.declaration.body, environment.into())? {
			Completion::Return(value) => Ok(value),
			Completion::Normal => Ok(Value::Nil),
		}
	}
}

impl Display for Callable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Native { .. } => write!(f, "<native fn>"),
			Self::Lox(_) => write!(f, "<fn {}>", self.name()),
		}
	}
}

// The closure may hold this very function, so only the name is printed.
impl Debug for Callable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Native { name, arity, .. } => {
				f.debug_struct("Native").field("name", name).field("arity", arity).finish()
			}
			Self::Lox(function) => f.debug_tuple("Lox").field(&function.declaration.name_token.lexeme).finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_is_a_nullary_native() {
		let clock = Callable::clock();
		assert_eq!(clock.arity(), 0);
		assert_eq!(clock.name(), "clock");
		assert_eq!(clock.to_string(), "<native fn>");
		match (clock_value(&clock), clock_value(&clock)) {
			(Value::Number(first), Value::Number(second)) => assert!(first > 0.0 && second >= first),
			other => panic!("expected numbers, got {other:?}"),
		}
	}

	fn clock_value(clock: &Callable) -> Value {
		let Callable::Native { function, .. } = clock else { panic!("clock is native") };
		function(&[])
	}
}
