/// Errors that can occur during interpretation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{type}\n[line {line}]")]
pub struct RuntimeError {
	line:   usize,
	r#type: RuntimeErrorType,
}

impl RuntimeError {
	pub fn new(line: usize, r#type: RuntimeErrorType) -> Self { Self { line, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn error_type(&self) -> &RuntimeErrorType { &self.r#type }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
	/// Unary `-` applied to a non-number
	#[error("Operand must be a number.")]
	OperandMustBeNumber,
	/// Arithmetic or comparison on non-numbers
	#[error("Operands must be numbers.")]
	OperandsMustBeNumbers,
	/// `+` with mismatched operand types
	#[error("Operands must be two numbers or two strings.")]
	OperandsMustBeNumbersOrStrings,
	#[error("Undefined variable '{0}'.")]
	UndefinedVariable(String),
	/// An operator token the evaluator has no rule for
	#[error("Invalid operator '{0}'.")]
	InvalidOperator(String),
	#[error("Can only call functions.")]
	NotCallable,
	#[error("Expected {expected} arguments but got {got}.")]
	ArityMismatch { expected: usize, got: usize },
}
