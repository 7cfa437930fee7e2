//! Where `print` statements write to.

/// Output channel for `print`.
#[derive(Debug, Default)]
pub enum PrintHandler {
	/// Writes each line to stdout.
	#[default]
	Stdout,
	/// Collects lines so embedders and tests can read them back.
	Buffer(String),
}

impl PrintHandler {
	pub fn buffer() -> Self { PrintHandler::Buffer(String::new()) }

	/// Print a line (with newline).
	pub fn println(&mut self, msg: &str) {
		match self {
			PrintHandler::Stdout => println!("{msg}"),
			PrintHandler::Buffer(buffer) => {
				buffer.push_str(msg);
				buffer.push('\n');
			}
		}
	}

	/// Drain captured output. Always empty for stdout.
	pub fn take_output(&mut self) -> String {
		match self {
			PrintHandler::Stdout => String::new(),
			PrintHandler::Buffer(buffer) => std::mem::take(buffer),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn buffer_collects_lines() {
		let mut handler = PrintHandler::buffer();
		handler.println("1");
		handler.println("two");
		assert_eq!(handler.take_output(), "1\ntwo\n");
		assert_eq!(handler.take_output(), "");
	}

	#[test]
	fn stdout_captures_nothing() {
		let mut handler = PrintHandler::default();
		assert_eq!(handler.take_output(), "");
	}
}
