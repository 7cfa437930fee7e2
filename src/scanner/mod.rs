//! Represents a lexical token in the Lox language.
//!
//! Keywords are part of the shape of the language’s grammar, so the parser
//! often has code like, “If the next token is `while` then do . . . ” That
//! means the parser wants to know not just that it has a lexeme for some
//! identifier, but that it has a reserved word, and which keyword it is.
//!
//! There are lexemes for literal values, numbers and strings. Since the scanner
//! has to walk each character in the literal to correctly identify it, it also
//! converts that textual representation into the literal the interpreter uses
//! later.
//!
//! We can’t easily detect a `reserved word` until we’ve reached the end of what
//! might instead be an identifier, this is `maximal munch`.
//!
//! A lexical error never aborts the scan: it is recorded and scanning resumes
//! at the next character, so one run reports every bad character at once.
mod token;

use std::{iter::Peekable, rc::Rc, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub(crate) use token::*;

use crate::{
	LoxError,
	error::scanner::{ScanError, ScanErrorType, ScannerError},
};

/// A scanner for Lox source code
pub(crate) struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points at the character currently being considered
	cursor:      usize,
	/// Tracks what source line `current` is on so we can produce tokens that know
	/// their location.
	line:        usize,
	errors:      Vec<ScanError>,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1, errors: vec![] }
	}

	/// Scan all tokens from the source code.
	///
	/// The token list always ends with `Eof`, even when lexical errors were
	/// found; those are returned alongside it.
	pub fn scan_tokens(mut self) -> Result<(Vec<Token>, Vec<ScanError>), LoxError> {
		let mut tokens = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			match self.scan_token(&mut tokens) {
				Ok(()) => {}
				Err(ScannerError::ScanError(e)) => {
					tracing::debug!(line = e.line(), "scan error: {e}");
					self.errors.push(e);
				}
				Err(ScannerError::InternalError(e)) => return Err(e.into()),
			}
		}
		tokens.push(Token::new(Eof, "", None, self.line));
		tracing::debug!(tokens = tokens.len(), errors = self.errors.len(), "scanned source");
		Ok((tokens, self.errors))
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		let mut literal = None;
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			',' => Comma,
			'.' => Dot,
			'-' => Minus,
			'+' => Plus,
			';' => Semicolon,
			'*' => Star,
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => if self.match_next('/') {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				Comment
			} else if self.match_next('*') {
				self.block_comment()?
			} else { Slash },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => { self.line += 1; NewLine }
			'"' => {
				let value = self.string()?;
				literal = Some(Literal::String(value));
				String
			}
			c if c.is_ascii_digit() => {
				literal = Some(Literal::Number(self.number()?));
				Number
			}
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(ScanError::new(self.line, ScanErrorType::UnexpectedCharacter(next_char)).into()),
		};

		if !r#type.is_ignored() {
			let token = Token::new(r#type, &self.source[self.start..self.cursor], literal, self.line);
			tracing::trace!(%token);
			tokens.push(token);
		}

		Ok(())
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Skip a `/* ... */` comment, the opening `/*` already consumed.
	/// Comments nest: every inner `/*` needs its own `*/`.
	fn block_comment(&mut self) -> Result<TokenType, ScannerError> {
		let mut depth = 1usize;
		while let Some(c) = self.peek() {
			match (c, self.peek_second()) {
				('/', Some('*')) => {
					self.advance();
					self.advance();
					depth += 1;
				}
				('*', Some('/')) => {
					self.advance();
					self.advance();
					depth -= 1;
					if depth == 0 {
						return Ok(Comment);
					}
				}
				('\n', _) => {
					self.line += 1;
					self.advance();
				}
				_ => {
					self.advance();
				}
			}
		}
		Err(ScanError::new(self.line, ScanErrorType::UnterminatedBlockComment).into())
	}

	/// Scan a string literal, which may span lines.
	fn string(&mut self) -> Result<Rc<str>, ScannerError> {
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1
			}
			self.advance();
		}

		self.peek().ok_or_else(|| ScanError::new(self.line, ScanErrorType::UnterminatedString))?;
		self.advance(); // The closing "
		Ok(Rc::from(&self.source[self.start + 1..self.cursor - 1]))
	}

	/// Scan a number literal
	fn number(&mut self) -> Result<f64, ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// A trailing '.' without digits after it is not part of the number.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}

		let s = &self.source[self.start..self.cursor];
		Ok(s.parse().context("Failed to parse number literal")?)
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		TokenType::keyword_or_identifier(&self.source[self.start..self.cursor])
	}
}
