//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `while` loop is always a statement.
//!
//! `for` has no node of its own: the parser desugars it into a block holding
//! the initializer and a `While`.

use std::rc::Rc;

use crate::{parser::expression::Expression, scanner::Token};

/// A statement in the programming language.
#[derive(Debug)]
pub(crate) enum Statement {
	/// An expression used as a statement.
	Expression(Expression),
	/// A print statement.
	Print(Expression),
	/// A variable declaration statement.
	VarDeclaration {
		/// The token of the variable being declared.
		name_token:  Token,
		/// An optional initializer expression.
		initializer: Option<Expression>,
	},
	/// A block of statements.
	Block(Vec<Statement>),
	If {
		condition:   Expression,
		then_branch: Box<Statement>,
		else_branch: Option<Box<Statement>>,
	},
	While {
		condition: Expression,
		body:      Box<Statement>,
	},
	/// Shared with every function value created from it.
	FunDecl(Rc<Function>),
	/// A return statement, `keyword` kept for error lines.
	Return {
		keyword: Token,
		value:   Option<Expression>,
	},
}

#[derive(Debug)]
pub(crate) struct Function {
	pub name_token: Token,
	pub parameters: Vec<Token>,
	pub body:       Vec<Statement>,
}
