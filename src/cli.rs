use std::{ffi::OsString, path::PathBuf};

use palc::{Parser, Subcommand};

/// Exit code for a command line that names no valid mode, as in `sysexits.h`.
pub const EX_USAGE: u8 = 64;

#[derive(Parser, Debug)]
#[command(name = "rlox", after_long_help = "A tree-walking interpreter for the Lox language.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a Lox script and exit: 65 on a static error, 70 on a runtime error
	File { path: PathBuf },
	/// Read and run one line at a time, keeping globals between lines
	Repl,
}

/// Why the arguments did not produce a [`Cli`].
#[derive(thiserror::Error, Debug)]
pub enum UsageError {
	/// `--help` was asked for; holds the rendered help.
	#[error("{0}")]
	Help(String),
	#[error(transparent)]
	Invalid(palc::Error),
}

impl From<palc::Error> for UsageError {
	fn from(error: palc::Error) -> Self {
		match error.try_into_help() {
			Ok(help) => UsageError::Help(help),
			Err(error) => UsageError::Invalid(error),
		}
	}
}

impl UsageError {
	pub fn exit_code(&self) -> u8 {
		match self {
			UsageError::Help(_) => 0,
			UsageError::Invalid(_) => EX_USAGE,
		}
	}
}

impl Cli {
	/// Parse a full argument list, program name first.
	pub fn from_args<I, T>(args: I) -> Result<Self, UsageError>
	where
		I: IntoIterator<Item = T>,
		T: Into<OsString> + Clone,
	{
		Ok(Self::try_parse_from(args)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn usage_error(args: &[&str]) -> UsageError {
		match Cli::from_args(args) {
			Ok(cli) => panic!("{args:?} parsed as {cli:?}"),
			Err(e) => e,
		}
	}

	#[test]
	fn modes() {
		let cli = Cli::from_args(["rlox", "file", "script.lox"]).unwrap();
		assert!(matches!(cli.mode, Mode::File { path } if path == PathBuf::from("script.lox")));
		assert!(matches!(Cli::from_args(["rlox", "repl"]).unwrap().mode, Mode::Repl));
	}

	#[test]
	fn bad_invocations_are_usage_errors() {
		for args in [vec!["rlox"], vec!["rlox", "bogus"], vec!["rlox", "file"]] {
			let error = usage_error(&args);
			assert!(matches!(error, UsageError::Invalid(_)), "{args:?}");
			assert_eq!(error.exit_code(), 64);
		}
	}

	#[test]
	fn help_is_not_a_failure() {
		let error = usage_error(&["rlox", "--help"]);
		assert_eq!(error.exit_code(), 0);
		assert!(matches!(&error, UsageError::Help(help) if help.contains("repl")));
	}
}
