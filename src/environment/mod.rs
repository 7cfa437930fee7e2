//! Lexical environment frames.
//!
//! A frame maps names to values and links to the frame that encloses it. The
//! link is set once, at creation, and always points at a frame that already
//! exists, so frames form a tree and never a cycle. Frames are shared through
//! [`RcCell`]: a frame lives as long as the block running in it or any closure
//! that captured it.

use std::collections::HashMap;

use crate::{
	error::interpreter::{RuntimeError, RuntimeErrorType},
	interpreter::value::Value,
	scanner::Token,
	utils::RcCell,
};

/// One frame of bindings.
#[derive(Default, Debug)]
pub(crate) struct Environment {
	values:    HashMap<String, Value>,
	enclosing: Option<RcCell<Environment>>,
}

impl Environment {
	/// The global frame.
	pub fn new() -> Self { Self::default() }

	/// A child frame of `enclosing`.
	pub fn with_enclosing(enclosing: RcCell<Environment>) -> Self {
		Self { values: HashMap::new(), enclosing: Some(enclosing) }
	}

	/// A variable statement doesn’t just define a new variable, it can also be
	/// used to redefine an existing variable.
	pub fn define(&mut self, name: impl Into<String>, value: Value) { self.values.insert(name.into(), value); }

	/// Names bound directly in this frame.
	pub fn names(&self) -> impl Iterator<Item = &String> { self.values.keys() }

	/// Remove every binding of this frame, handing them to the caller.
	pub fn take_bindings(&mut self) -> HashMap<String, Value> { std::mem::take(&mut self.values) }

	/// Look a name up by walking outward through the enclosing frames.
	pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
		if let Some(value) = self.values.get(&name.lexeme) {
			return Ok(value.clone());
		}
		match &self.enclosing {
			Some(enclosing) => enclosing.borrow().get(name),
			None => Err(undefined(name)),
		}
	}

	/// Assign a value to an existing variable, searching outward.
	pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
		if let Some(slot) = self.values.get_mut(&name.lexeme) {
			*slot = value;
			return Ok(());
		}
		match &self.enclosing {
			Some(enclosing) => enclosing.borrow_mut().assign(name, value),
			None => Err(undefined(name)),
		}
	}

	/// Read `name` from the frame exactly `distance` links out from `this`.
	///
	/// The resolver guarantees the binding is there; a miss means it computed
	/// the distance wrongly and is reported as an undefined variable.
	pub fn get_at(this: &RcCell<Environment>, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
		let frame = Self::ancestor(this, distance);
		let frame = frame.borrow();
		frame.values.get(&name.lexeme).cloned().ok_or_else(|| undefined(name))
	}

	/// Write `name` in the frame exactly `distance` links out from `this`.
	pub fn assign_at(this: &RcCell<Environment>, distance: usize, name: &Token, value: Value) {
		Self::ancestor(this, distance).borrow_mut().values.insert(name.lexeme.clone(), value);
	}

	fn ancestor(this: &RcCell<Environment>, distance: usize) -> RcCell<Environment> {
		let mut frame = this.clone();
		for _ in 0..distance {
			let enclosing = frame.borrow().enclosing.clone();
			match enclosing {
				Some(enclosing) => frame = enclosing,
				None => break,
			}
		}
		frame
	}
}

fn undefined(name: &Token) -> RuntimeError {
	RuntimeError::new(name.line, RuntimeErrorType::UndefinedVariable(name.lexeme.clone()))
}
