use std::{fmt::Display, rc::Rc};

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
	pub r#type:  TokenType,
	/// The raw source text this token was scanned from.
	pub lexeme:  String,
	/// Value of a number or string literal, already converted.
	pub literal: Option<Literal>,
	pub line:    usize,
}

impl Token {
	pub fn new(r#type: TokenType, lexeme: impl Into<String>, literal: Option<Literal>, line: usize) -> Self {
		Self { r#type, lexeme: lexeme.into(), literal, line }
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.literal {
			Some(literal) => write!(f, "{:?} {} {literal}", self.r#type, self.lexeme),
			None => write!(f, "{:?} {}", self.r#type, self.lexeme),
		}
	}
}

/// Literal payload carried by `Number` and `String` tokens.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
	Number(f64),
	String(Rc<str>),
}

impl Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal::Number(n) => write!(f, "{n}"),
			Literal::String(s) => write!(f, "{s}"),
		}
	}
}

/// The different types of tokens in Lox, The copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenType {
	/// New Line Character `\n`.
	NewLine,
	/// Empty Character: ` `, `\r`, `\t`.
	EmptyChar,
	/// Comment `//` or /* ... */
	Comment,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Comma `,`.
	Comma,
	/// Dot `.`.
	Dot,
	/// Minus `-`.
	Minus,
	/// Plus `+`.
	Plus,
	/// Semicolon `;`.
	Semicolon,
	/// Slash `/`.
	Slash,
	/// Asterisk `*`.
	Star,
	/// Bang `!`.
	Bang,
	/// Bang equal `!=`.
	BangEqual,
	/// Equal `=`.
	Equal,
	/// Equal equal `==`.
	EqualEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Identifier, e.g. variable or function name.
	Identifier,
	/// String literal, e.g. `"hello"`.
	String,
	/// Number literal, e.g. `123.45`.
	Number,
	And,
	Class,
	Else,
	False,
	Fun,
	For,
	If,
	Nil,
	Or,
	Print,
	Return,
	Super,
	This,
	True,
	Var,
	While,
	/// End of file/input.
	Eof,
}

impl TokenType {
	pub fn is_ignored(&self) -> bool {
		matches!(self, TokenType::EmptyChar | TokenType::NewLine | TokenType::Comment)
	}

	/// Tokens that begin a declaration or statement, used as recovery points
	/// after a syntax error.
	pub fn starts_statement(&self) -> bool {
		use TokenType::*;
		matches!(self, Class | Fun | Var | For | If | While | Print | Return)
	}

	pub fn keyword_or_identifier(value: &str) -> Self {
		match value {
			"and" => TokenType::And,
			"class" => TokenType::Class,
			"else" => TokenType::Else,
			"false" => TokenType::False,
			"for" => TokenType::For,
			"fun" => TokenType::Fun,
			"if" => TokenType::If,
			"nil" => TokenType::Nil,
			"or" => TokenType::Or,
			"print" => TokenType::Print,
			"return" => TokenType::Return,
			"super" => TokenType::Super,
			"this" => TokenType::This,
			"true" => TokenType::True,
			"var" => TokenType::Var,
			"while" => TokenType::While,
			_ => TokenType::Identifier,
		}
	}
}
