use std::process::ExitCode;

use rlox::cli::*;

fn main() -> ExitCode {
	rlox::init_tracing();
	let cli = match Cli::from_args(std::env::args_os()) {
		Ok(cli) => cli,
		Err(UsageError::Help(help)) => {
			print!("{help}");
			return ExitCode::SUCCESS;
		}
		Err(e) => {
			eprintln!("{e}");
			return ExitCode::from(e.exit_code());
		}
	};
	let mut loxer = rlox::Loxer::default();

	match cli.mode {
		Mode::File { path } => match loxer.run_file(&path) {
			Ok(()) => ExitCode::SUCCESS,
			Err(e) => {
				if let rlox::LoxError::InternalError(e) = &e {
					eprintln!("Failed run file: {e:#}");
				}
				ExitCode::from(e.exit_code())
			}
		},
		Mode::Repl => {
			loxer.run_prompt();
			ExitCode::SUCCESS
		}
	}
}
