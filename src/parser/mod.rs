//! The `Scanner` use `Lexical grammar`, implement `alphabet` as `Characters`,
//! `string` as `Lexme` or `Token`
//! The `Parser` use `Syntactic grammar`, implement `alphabet` as `Tokens`,
//! `string` as `Expression`
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|=|Right
//! Or|or|Left
//! And|and|Left
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! Term|+ -|Left
//! Factor|* /|Left
//! Unary|! -|Right
//! Call|()|Left
//!
//! Grammar:
//!
//! ``` BNF
//! program        → declaration* EOF ;
//! declaration    → funDecl | varDecl | statement ;
//! funDecl        → "fun" IDENTIFIER "(" parameters? ")" block ;
//! parameters     → IDENTIFIER ( "," IDENTIFIER )* ;
//! varDecl        → "var" IDENTIFIER ( "=" expression )? ";" ;
//! statement      → exprStmt | forStmt | ifStmt | printStmt | returnStmt | whileStmt | block ;
//! forStmt        → "for" "(" ( varDecl | exprStmt | ";" ) expression? ";" expression? ")" statement ;
//! ifStmt         → "if" "(" expression ")" statement ( "else" statement )? ;
//! returnStmt     → "return" expression? ";" ;
//! block          → "{" declaration* "}" ;
//! expression     → assignment ;
//! assignment     → IDENTIFIER "=" assignment | logic_or ;
//! logic_or       → logic_and ( "or" logic_and )* ;
//! logic_and      → equality ( "and" equality )* ;
//! equality       → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//! term           → factor ( ( "-" | "+" ) factor )* ;
//! factor         → unary ( ( "/" | "*" ) unary )* ;
//! unary          → ( "!" | "-" ) unary | call ;
//! call           → primary ( "(" arguments? ")" )* ;
//! arguments      → expression ( "," expression )* ;
//! primary        → NUMBER | STRING | "true" | "false" | "nil" | IDENTIFIER | "(" expression ")" ;
//! ```
//!
//! On a grammar violation the parser records the error, then discards tokens
//! until a statement boundary (panic-mode recovery) and carries on, so a single
//! run surfaces every independent syntax error.

pub(crate) mod expression;

use std::{convert::TryInto, iter::Peekable, rc::Rc, vec::IntoIter};

use TokenType::*;
use anyhow::anyhow;

use crate::{
	LoxError,
	error::{
		Location,
		parser::{ParseError, ParseErrorType, ParserError},
	},
	parser::expression::{Expression, LiteralValue},
	scanner::{Token, TokenType},
	statement::{Function, Statement},
};

/// Upper bound on parameters and call arguments.
const MAX_ARGUMENTS: usize = 255;

pub(crate) struct Parser {
	/// The tokens to parse, ending with `Eof`.
	tokens: Peekable<IntoIter<Token>>,
	errors: Vec<ParseError>,
}

impl Parser {
	pub fn new(tokens: Vec<Token>) -> Self { Self { tokens: tokens.into_iter().peekable(), errors: vec![] } }

	/// Parse the whole token stream. Statements that failed to parse are
	/// dropped; their errors are returned alongside the rest.
	pub fn parse(mut self) -> Result<(Vec<Statement>, Vec<ParseError>), LoxError> {
		let mut statements = Vec::new();
		while !self.is_at_end()? {
			match self.declaration() {
				Ok(statement) => statements.push(statement),
				Err(ParserError::ParseError(_)) => self.synchronize()?,
				Err(ParserError::InternalError(e)) => return Err(e.into()),
			}
		}
		tracing::debug!(statements = statements.len(), errors = self.errors.len(), "parsed program");
		Ok((statements, self.errors))
	}

	fn declaration(&mut self) -> Result<Statement, ParserError> {
		match self.peek()?.r#type {
			Fun => {
				self.advance()?;
				self.function()
			}
			Var => {
				self.advance()?;
				self.var_declaration()
			}
			_ => self.statement(),
		}
	}

	fn function(&mut self) -> Result<Statement, ParserError> {
		let name_token = self.consume(Identifier, "function name")?;
		self.consume(LeftParen, "'(' after function name")?;
		let mut parameters = Vec::new();
		if !self.check(RightParen)? {
			loop {
				if parameters.len() >= MAX_ARGUMENTS {
					self.error_at_current(ParseErrorType::TooManyParameters)?;
				}
				parameters.push(self.consume(Identifier, "parameter name")?);
				if !matches!(self.peek()?.r#type, Comma) {
					break;
				}
				self.advance()?;
			}
		}
		self.consume(RightParen, "')' after parameters")?;
		self.consume(LeftBrace, "'{' before function body")?;
		let body = self.block()?;
		Ok(Statement::FunDecl(Rc::new(Function { name_token, parameters, body })))
	}

	fn var_declaration(&mut self) -> Result<Statement, ParserError> {
		let name_token = self.consume(Identifier, "variable name")?;
		let initializer = if matches!(self.peek()?.r#type, Equal) {
			self.advance()?;
			Some(*self.expression()?)
		} else {
			None
		};
		self.consume(Semicolon, "';' after variable declaration")?;
		Ok(Statement::VarDeclaration { name_token, initializer })
	}

	fn statement(&mut self) -> Result<Statement, ParserError> {
		match self.peek()?.r#type {
			For => {
				self.advance()?;
				self.for_statement()
			}
			If => {
				self.advance()?;
				self.if_statement()
			}
			Print => {
				self.advance()?;
				let value = self.expression()?;
				self.consume(Semicolon, "';' after value")?;
				Ok(Statement::Print(*value))
			}
			Return => {
				let keyword = self.advance()?;
				let value = if self.check(Semicolon)? { None } else { Some(*self.expression()?) };
				self.consume(Semicolon, "';' after return value")?;
				Ok(Statement::Return { keyword, value })
			}
			While => {
				self.advance()?;
				self.consume(LeftParen, "'(' after 'while'")?;
				let condition = self.expression()?;
				self.consume(RightParen, "')' after condition")?;
				let body = self.statement()?;
				Ok(Statement::While { condition: *condition, body: Box::new(body) })
			}
			LeftBrace => {
				self.advance()?;
				Ok(Statement::Block(self.block()?))
			}
			_ => self.expression_statement(),
		}
	}

	/// `for` is sugar: `{ init; while (cond) { body; increment; } }`.
	fn for_statement(&mut self) -> Result<Statement, ParserError> {
		self.consume(LeftParen, "'(' after 'for'")?;
		let initializer = match self.peek()?.r#type {
			Semicolon => {
				self.advance()?;
				None
			}
			Var => {
				self.advance()?;
				Some(self.var_declaration()?)
			}
			_ => Some(self.expression_statement()?),
		};

		let condition = if self.check(Semicolon)? { None } else { Some(*self.expression()?) };
		self.consume(Semicolon, "';' after loop condition")?;

		let increment = if self.check(RightParen)? { None } else { Some(*self.expression()?) };
		self.consume(RightParen, "')' after for clauses")?;

		let mut body = self.statement()?;
		if let Some(increment) = increment {
			body = Statement::Block(vec![body, Statement::Expression(increment)]);
		}
		let condition = condition.unwrap_or(Expression::Literal(LiteralValue::Boolean(true)));
		body = Statement::While { condition, body: Box::new(body) };
		if let Some(initializer) = initializer {
			body = Statement::Block(vec![initializer, body]);
		}
		Ok(body)
	}

	/// The `else` binds to the nearest `if`: this call claims it before
	/// returning to any enclosing `if`.
	fn if_statement(&mut self) -> Result<Statement, ParserError> {
		self.consume(LeftParen, "'(' after 'if'")?;
		let condition = self.expression()?;
		self.consume(RightParen, "')' after if condition")?;

		let then_branch = Box::new(self.statement()?);
		let else_branch = if matches!(self.peek()?.r#type, Else) {
			self.advance()?;
			Some(Box::new(self.statement()?))
		} else {
			None
		};
		Ok(Statement::If { condition: *condition, then_branch, else_branch })
	}

	fn expression_statement(&mut self) -> Result<Statement, ParserError> {
		let expression = self.expression()?;
		self.consume(Semicolon, "';' after expression")?;
		Ok(Statement::Expression(*expression))
	}

	/// The statements of a block, the opening `{` already consumed.
	fn block(&mut self) -> Result<Vec<Statement>, ParserError> {
		let mut statements = Vec::new();
		while !self.check(RightBrace)? && !self.is_at_end()? {
			statements.push(self.declaration()?);
		}
		self.consume(RightBrace, "'}' after block")?;
		Ok(statements)
	}

	fn expression(&mut self) -> Result<Box<Expression>, ParserError> { self.assignment() }

	fn assignment(&mut self) -> Result<Box<Expression>, ParserError> {
		let expression = self.or()?;
		if !matches!(self.peek()?.r#type, Equal) {
			return Ok(expression);
		}

		let equals = self.advance()?;
		let value = self.assignment()?;
		match *expression {
			Expression::Variable { name, .. } => Ok(Expression::assign(name, value)),
			// Reported, but the parser is not confused, so no need to synchronize.
			other => {
				self.error(&equals, ParseErrorType::InvalidAssignmentTarget);
				Ok(Box::new(other))
			}
		}
	}

	fn or(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.and()?;
		while matches!(self.peek()?.r#type, Or) {
			expression = Expression::logical(expression, self.advance()?, self.and()?)
		}
		Ok(expression)
	}

	fn and(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.equality()?;
		while matches!(self.peek()?.r#type, And) {
			expression = Expression::logical(expression, self.advance()?, self.equality()?)
		}
		Ok(expression)
	}

	/// Parse equality expressions.
	fn equality(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.comparison()?;
		while matches!(self.peek()?.r#type, BangEqual | EqualEqual) {
			expression = Expression::binary(expression, self.advance()?, self.comparison()?)
		}
		Ok(expression)
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.term()?;
		while matches!(self.peek()?.r#type, Greater | GreaterEqual | Less | LessEqual) {
			expression = Expression::binary(expression, self.advance()?, self.term()?)
		}
		Ok(expression)
	}

	/// Parse term expressions.
	fn term(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.factor()?;
		while matches!(self.peek()?.r#type, Minus | Plus) {
			expression = Expression::binary(expression, self.advance()?, self.factor()?)
		}
		Ok(expression)
	}

	/// Parse factor expressions.
	fn factor(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.unary()?;
		while matches!(self.peek()?.r#type, Slash | Star) {
			expression = Expression::binary(expression, self.advance()?, self.unary()?)
		}
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> Result<Box<Expression>, ParserError> {
		if matches!(self.peek()?.r#type, Bang | Minus) {
			return Ok(Expression::unary(self.advance()?, self.unary()?));
		}
		self.call()
	}

	fn call(&mut self) -> Result<Box<Expression>, ParserError> {
		let mut expression = self.primary()?;
		while matches!(self.peek()?.r#type, LeftParen) {
			self.advance()?;
			expression = self.finish_call(expression)?;
		}
		Ok(expression)
	}

	fn finish_call(&mut self, callee: Box<Expression>) -> Result<Box<Expression>, ParserError> {
		let mut arguments = Vec::new();
		if !self.check(RightParen)? {
			loop {
				if arguments.len() >= MAX_ARGUMENTS {
					self.error_at_current(ParseErrorType::TooManyArguments)?;
				}
				arguments.push(*self.expression()?);
				if !matches!(self.peek()?.r#type, Comma) {
					break;
				}
				self.advance()?;
			}
		}
		let paren = self.consume(RightParen, "')' after arguments")?;
		Ok(Expression::call(callee, paren, arguments))
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> Result<Box<Expression>, ParserError> {
		match self.peek()?.r#type {
			False | True | Nil | Number | String => {
				let token = self.advance()?;
				Ok(Box::new(token.try_into()?))
			}
			Identifier => Ok(Expression::variable(self.advance()?)),
			LeftParen => {
				self.advance()?; // consume '('
				let expr = self.expression()?;
				self.consume(RightParen, "')' after expression")?;
				Ok(Expression::grouping(expr))
			}
			_ => Err(self.error_at_current(ParseErrorType::ExpectedExpression)?.into()),
		}
	}

	/// Consume a token of the given type or fail with "Expect {what}.".
	fn consume(&mut self, r#type: TokenType, what: &'static str) -> Result<Token, ParserError> {
		if self.check(r#type)? {
			return self.advance();
		}
		Err(self.error_at_current(ParseErrorType::Expected(what))?.into())
	}

	fn check(&mut self, r#type: TokenType) -> Result<bool, ParserError> { Ok(self.peek()?.r#type == r#type) }

	fn is_at_end(&mut self) -> Result<bool, ParserError> { self.check(Eof) }

	/// Advance to the next token. `Eof` is never consumed, so the stream
	/// cannot run dry.
	fn advance(&mut self) -> Result<Token, ParserError> {
		if self.is_at_end()? {
			return Ok(self.peek()?.clone());
		}
		self.tokens.next().ok_or_else(|| anyhow!("Unexpected end of token stream").into())
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Result<&Token, ParserError> {
		self.tokens.peek().ok_or_else(|| anyhow!("Token stream is missing its Eof").into())
	}

	/// Record an error at `token` and hand it back for the caller to raise or
	/// drop.
	fn error(&mut self, token: &Token, r#type: ParseErrorType) -> ParseError {
		let error = ParseError::new(token.line, Location::of(token), r#type);
		tracing::debug!(line = token.line, "parse error: {error}");
		self.errors.push(error.clone());
		error
	}

	fn error_at_current(&mut self, r#type: ParseErrorType) -> Result<ParseError, ParserError> {
		let token = self.peek()?.clone();
		Ok(self.error(&token, r#type))
	}

	/// Discard tokens until just past a `;` or right before a token that
	/// starts a statement.
	fn synchronize(&mut self) -> Result<(), ParserError> {
		let mut previous = self.advance()?;
		while !self.is_at_end()? {
			if previous.r#type == Semicolon || self.peek()?.r#type.starts_statement() {
				return Ok(());
			}
			previous = self.advance()?;
		}
		Ok(())
	}
}
