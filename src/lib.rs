//! # How bare text turns into a running program
//!
//! User's source code: `var average = (min + max) / 2;`

//! ## Scanning
//!
//! Also known as `lexing` or `lexical analysis`, takes in the characters and
//! converts them into tokens. Single characters `(`, `,`, `.`, numbers `123`,
//! string literals `"hi!"`, identifiers `min` are all tokens.
//!
//! Whitespaces and comments are ignored. So the tokens are
//! `["var", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";"]`.

//! ## Parsing
//!
//! Where our syntax gets `syntactic`. A `parser` builds a tree structure of
//! tokens -- `parse tree` or `abstract syntax tree` or `AST`. The `parser` also
//! report `syntax errors`.
//!
//! ``` markdown
//! average (Stmt.Var)
//! └── / (Expr.Binary)
//!     ├── + (Expr.Binary)
//!     │   ├── min (Expr.Variable)
//!     │   └── max (Expr.Variable)
//!     └── 2 (Expr.Literal)
//! ```

//! ## Static analysis
//!
//! Where we get name refers to local variables or global or else.
//!
//! Most language first do `binding` or `resolution`. We find out where each
//! name defined and wire them together. The `scope` comes to play -- the region
//! of a certain name can be used to refer to a certain declaration.
//!
//! rlox resolves every local variable here: the number of scopes between a
//! use and its declaration is stored in the tree, so the interpreter jumps
//! straight to the right frame. Reading a local in its own initializer,
//! declaring a name twice in one scope and `return` at top level are reported
//! before anything runs.
//!
//! Everything up to this point is the `front end`, in early days, there are
//! only `front end` and `back end`. The back end is the final architecture
//! where the program will run. Later researchers invented new phases to stuff
//! between the two halves -- `middle end`

//! ## Tree-walking
//!
//! rlox stops after the front end. The interpreter walks the resolved trees
//! directly, evaluating each expression and carrying out each statement in an
//! environment frame.

//! ## Session
//!
//! A [`Loxer`] owns one interpreter. Every call to [`Loxer::run`] goes through
//! all four stages and keeps the global variables of earlier runs, which is
//! what the REPL relies on. Static errors stop a run before anything executes;
//! a runtime error stops it at the failing statement.

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod loxer;
mod parser;
mod resolver;
mod scanner;
mod statement;
mod utils;

use std::sync::Once;

pub use error::{
	Location, LoxError, SyntaxError,
	interpreter::{RuntimeError, RuntimeErrorType},
	parser::{ParseError, ParseErrorType},
	resolver::{ResolveError, ResolveErrorType},
	scanner::{ScanError, ScanErrorType},
};
pub use interpreter::print::PrintHandler;
pub use loxer::Loxer;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber, only when `RUST_LOG` is set.
///
/// Enable with `RUST_LOG=rlox=debug` or `RUST_LOG=rlox=trace`.
pub fn init_tracing() {
	TRACING_INIT.call_once(|| {
		use tracing_subscriber::{EnvFilter, fmt, prelude::*};

		if std::env::var("RUST_LOG").is_ok() {
			tracing_subscriber::registry()
				.with(fmt::layer().with_writer(std::io::stderr).with_target(true))
				.with(EnvFilter::from_default_env())
				.init();
		}
	});
}
