use super::Location;

/// A static error found while binding names to scopes.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] error{location}: {type}")]
pub struct ResolveError {
	line:     usize,
	location: Location,
	r#type:   ResolveErrorType,
}

impl ResolveError {
	pub fn new(line: usize, location: Location, r#type: ResolveErrorType) -> Self { Self { line, location, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn error_type(&self) -> &ResolveErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveErrorType {
	ReadInOwnInitializer,
	/// A fresh global read by its own initializer, with no earlier binding to
	/// fall back on.
	ReadGlobalInOwnInitializer,
	AlreadyDeclared,
	ReturnOutsideFunction,
}

impl std::fmt::Display for ResolveErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ResolveErrorType::*;
		match self {
			ReadInOwnInitializer => write!(f, "Can't read local variable in its own initializer."),
			ReadGlobalInOwnInitializer => write!(f, "Can't read global variable in its own initializer."),
			AlreadyDeclared => write!(f, "Already a variable with this name in this scope."),
			ReturnOutsideFunction => write!(f, "Can't return from top-level code."),
		}
	}
}
