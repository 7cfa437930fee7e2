use super::{Location, LoxError};

/// Parser related errors
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

impl From<ParserError> for LoxError {
	fn from(error: ParserError) -> Self {
		match error {
			ParserError::InternalError(e) => LoxError::InternalError(e),
			ParserError::ParseError(e) => LoxError::SyntaxErrors(vec![e.into()]),
		}
	}
}

/// A grammar violation, reported at the offending token.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] error{location}: {type}")]
pub struct ParseError {
	line:     usize,
	location: Location,
	r#type:   ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, location: Location, r#type: ParseErrorType) -> Self { Self { line, location, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn error_type(&self) -> &ParseErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	ExpectedExpression,
	/// A required token was missing; holds what was expected and where.
	Expected(&'static str),
	InvalidAssignmentTarget,
	TooManyArguments,
	TooManyParameters,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedExpression => write!(f, "Expect expression."),
			Expected(what) => write!(f, "Expect {what}."),
			InvalidAssignmentTarget => write!(f, "Invalid assignment target."),
			TooManyArguments => write!(f, "Can't have more than 255 arguments."),
			TooManyParameters => write!(f, "Can't have more than 255 parameters."),
		}
	}
}
