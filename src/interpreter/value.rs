use std::{fmt::Display, rc::Rc};

use Value::*;

use super::callable;
use crate::{error::interpreter::RuntimeErrorType, scanner::TokenType};

/// Value represents a runtime value in Lox.
#[derive(Debug, Clone)]
pub(crate) enum Value {
	Nil,
	Boolean(bool),
	Number(f64),
	String(Rc<str>),
	/// Functions compare by identity.
	Callable(Rc<callable::Callable>),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Boolean(b) => write!(f, "{b}"),
			Number(n) if n.is_nan() => write!(f, "NaN"),
			Number(n) if n.is_infinite() => write!(f, "{}Infinity", if n.is_sign_negative() { "-" } else { "" }),
			// Integral values print without a fractional part.
			Number(n) => write!(f, "{n}"),
			String(s) => write!(f, "{s}"),
			Callable(callable) => write!(f, "{callable}"),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Nil, Nil) => true,
			(Boolean(l), Boolean(r)) => l == r,
			(Number(l), Number(r)) => l == r,
			(String(l), String(r)) => l == r,
			(Callable(l), Callable(r)) => Rc::ptr_eq(l, r),
			_ => false,
		}
	}
}

impl Value {
	/// `nil` and `false` are falsey, everything else is truthy.
	pub fn is_truthy(&self) -> bool { !matches!(self, Nil | Boolean(false)) }

	/// Performs a binary operation between two values.
	pub fn binary_op(&self, op: TokenType, right: &Self) -> Result<Value, RuntimeErrorType> {
		use TokenType::*;

		Ok(match op {
			Plus => self.plus(right)?,
			Minus => self.arithmetic(right, |l, r| l - r)?,
			Star => self.arithmetic(right, |l, r| l * r)?,
			Slash => self.arithmetic(right, |l, r| l / r)?,
			Greater => self.compare(right, |l, r| l > r)?,
			GreaterEqual => self.compare(right, |l, r| l >= r)?,
			Less => self.compare(right, |l, r| l < r)?,
			LessEqual => self.compare(right, |l, r| l <= r)?,
			EqualEqual => Boolean(self == right),
			BangEqual => Boolean(self != right),
			other => return Err(RuntimeErrorType::InvalidOperator(format!("{other:?}"))),
		})
	}

	/// Adds two numbers or concatenates two strings.
	fn plus(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (self, other) {
			(Number(l), Number(r)) => Ok(Number(l + r)),
			(String(l), String(r)) => Ok(String(format!("{l}{r}").into())),
			_ => Err(RuntimeErrorType::OperandsMustBeNumbersOrStrings),
		}
	}

	fn arithmetic(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Result<Value, RuntimeErrorType> {
		let (l, r) = self.numbers(other)?;
		Ok(Number(op(l, r)))
	}

	fn compare(&self, other: &Self, op: impl Fn(f64, f64) -> bool) -> Result<Value, RuntimeErrorType> {
		let (l, r) = self.numbers(other)?;
		Ok(Boolean(op(l, r)))
	}

	fn numbers(&self, other: &Self) -> Result<(f64, f64), RuntimeErrorType> {
		match (self, other) {
			(Number(l), Number(r)) => Ok((*l, *r)),
			_ => Err(RuntimeErrorType::OperandsMustBeNumbers),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn string(s: &str) -> Value { String(s.into()) }

	#[test]
	fn truthiness() {
		assert!(!Nil.is_truthy());
		assert!(!Boolean(false).is_truthy());
		assert!(Boolean(true).is_truthy());
		assert!(Number(0.0).is_truthy());
		assert!(string("").is_truthy());
	}

	#[test]
	fn display() {
		assert_eq!(Number(7.0).to_string(), "7");
		assert_eq!(Number(-0.5).to_string(), "-0.5");
		assert_eq!(Number(2.5).to_string(), "2.5");
		assert_eq!(string("lox").to_string(), "lox");
		assert_eq!(Boolean(true).to_string(), "true");
		assert_eq!(Nil.to_string(), "nil");
	}

	#[test]
	fn equality_never_crosses_types() {
		assert_eq!(Nil, Nil);
		assert_ne!(Nil, Boolean(false));
		assert_ne!(Number(0.0), Boolean(false));
		assert_ne!(string("1"), Number(1.0));
		assert_eq!(string("a"), string("a"));
		assert_eq!(Number(1.0).binary_op(TokenType::EqualEqual, &string("1")), Ok(Boolean(false)));
		assert_eq!(Nil.binary_op(TokenType::BangEqual, &Number(1.0)), Ok(Boolean(true)));
	}

	#[test]
	fn plus_is_overloaded() {
		assert_eq!(Number(1.0).binary_op(TokenType::Plus, &Number(2.0)), Ok(Number(3.0)));
		assert_eq!(string("ab").binary_op(TokenType::Plus, &string("cd")), Ok(string("abcd")));
		assert_eq!(
			string("a").binary_op(TokenType::Plus, &Number(1.0)),
			Err(RuntimeErrorType::OperandsMustBeNumbersOrStrings)
		);
	}

	#[test]
	fn arithmetic_and_comparison_need_numbers() {
		assert_eq!(Number(6.0).binary_op(TokenType::Slash, &Number(4.0)), Ok(Number(1.5)));
		assert_eq!(Number(1.0).binary_op(TokenType::LessEqual, &Number(1.0)), Ok(Boolean(true)));
		assert_eq!(string("a").binary_op(TokenType::Less, &string("b")), Err(RuntimeErrorType::OperandsMustBeNumbers));
		assert_eq!(Nil.binary_op(TokenType::Minus, &Number(1.0)), Err(RuntimeErrorType::OperandsMustBeNumbers));
	}

	#[test]
	fn division_by_zero_follows_ieee() {
		assert_eq!(Number(1.0).binary_op(TokenType::Slash, &Number(0.0)), Ok(Number(f64::INFINITY)));
		assert_eq!(Number(f64::INFINITY).to_string(), "Infinity");
		assert_eq!(Number(f64::NEG_INFINITY).to_string(), "-Infinity");
		assert_eq!(Number(f64::NAN).to_string(), "NaN");
		assert_eq!(Number(-0.0).to_string(), "-0");
	}
}
