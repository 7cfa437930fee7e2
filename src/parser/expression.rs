//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 *
//! (45.67)` as nested nodes.

use std::{cell::Cell, rc::Rc};

use Expression::*;

use crate::scanner::{Literal as TokenLiteral, Token, TokenType};

/// Expression AST nodes
#[derive(Debug)]
pub(crate) enum Expression {
	Literal(LiteralValue),
	Grouping(Box<Expression>),
	Unary { operator: Token, right: Box<Expression> },
	Binary { left: Box<Expression>, operator: Token, right: Box<Expression> },
	/// Short-circuiting `and` / `or`.
	Logical { left: Box<Expression>, operator: Token, right: Box<Expression> },
	Variable { name: Token, depth: Depth },
	Assign { name: Token, value: Box<Expression>, depth: Depth },
	/// `paren` is the closing parenthesis, kept for error lines.
	Call { callee: Box<Expression>, paren: Token, arguments: Vec<Expression> },
}

/// Resolution distance written by the resolver: how many frames out from the
/// current one the binding lives. `None` means a global.
#[derive(Debug, Default)]
pub(crate) struct Depth(Cell<Option<usize>>);

impl Depth {
	pub fn get(&self) -> Option<usize> { self.0.get() }

	pub fn set(&self, distance: usize) { self.0.set(Some(distance)) }
}

impl Expression {
	pub fn unary(operator: Token, right: Box<Self>) -> Box<Self> { Box::new(Unary { operator, right }) }

	pub fn binary(left: Box<Self>, operator: Token, right: Box<Self>) -> Box<Self> {
		Box::new(Binary { left, operator, right })
	}

	pub fn logical(left: Box<Self>, operator: Token, right: Box<Self>) -> Box<Self> {
		Box::new(Logical { left, operator, right })
	}

	pub fn grouping(expr: Box<Self>) -> Box<Self> { Box::new(Grouping(expr)) }

	pub fn variable(name: Token) -> Box<Self> { Box::new(Variable { name, depth: Depth::default() }) }

	pub fn assign(name: Token, value: Box<Self>) -> Box<Self> { Box::new(Assign { name, value, depth: Depth::default() }) }

	pub fn call(callee: Box<Self>, paren: Token, arguments: Vec<Self>) -> Box<Self> {
		Box::new(Call { callee, paren, arguments })
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LiteralValue {
	Number(f64),
	String(Rc<str>),
	Boolean(bool),
	Nil,
}

impl TryFrom<Token> for Expression {
	type Error = anyhow::Error;

	fn try_from(token: Token) -> Result<Self, Self::Error> {
		Ok(match (token.r#type, token.literal) {
			(TokenType::Number, Some(TokenLiteral::Number(n))) => Literal(LiteralValue::Number(n)),
			(TokenType::String, Some(TokenLiteral::String(s))) => Literal(LiteralValue::String(s)),
			(TokenType::True, _) => Literal(LiteralValue::Boolean(true)),
			(TokenType::False, _) => Literal(LiteralValue::Boolean(false)),
			(TokenType::Nil, _) => Literal(LiteralValue::Nil),
			(kind, literal) => anyhow::bail!("Cannot convert {kind:?} token ({literal:?}) to a literal expression"),
		})
	}
}

impl std::fmt::Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal(lit) => write!(f, "{lit}"),
			Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Grouping(expression) => write!(f, "(group {expression})"),
			Variable { name, .. } => write!(f, "{}", name.lexeme),
			Assign { name, value, .. } => write!(f, "(= {} {value})", name.lexeme),
			Logical { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Call { callee, arguments, .. } => {
				write!(f, "(call {callee}")?;
				for argument in arguments {
					write!(f, " {argument}")?;
				}
				write!(f, ")")
			}
		}
	}
}

impl std::fmt::Display for LiteralValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LiteralValue::Number(n) => write!(f, "{n}"),
			LiteralValue::String(s) => write!(f, "\"{s}\""),
			LiteralValue::Boolean(b) => write!(f, "{b}"),
			LiteralValue::Nil => write!(f, "nil"),
		}
	}
}
