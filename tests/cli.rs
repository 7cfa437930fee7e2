use std::{path::PathBuf, process::Command};

fn rlox(args: &[&str]) -> (Option<i32>, String, String) {
	let output = Command::new(env!("CARGO_BIN_EXE_rlox")).args(args).env_remove("RUST_LOG").output().unwrap();
	(
		output.status.code(),
		String::from_utf8_lossy(&output.stdout).into_owned(),
		String::from_utf8_lossy(&output.stderr).into_owned(),
	)
}

fn fixture(name: &str) -> String {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(name).display().to_string()
}

#[test]
fn usage_errors_exit_64() {
	for args in [vec![], vec!["bogus"], vec!["file"]] {
		let (code, stdout, stderr) = rlox(&args);
		assert_eq!(code, Some(64), "{args:?}");
		assert!(stdout.is_empty());
		assert!(!stderr.is_empty());
	}
}

#[test]
fn file_mode_exit_codes() {
	let (code, stdout, _) = rlox(&["file", &fixture("test.lox")]);
	assert_eq!(code, Some(0));
	assert!(stdout.starts_with("Hello, lox!\n"));

	let (code, stdout, stderr) = rlox(&["file", &fixture("runtime_error.lox")]);
	assert_eq!(code, Some(70));
	assert_eq!(stdout, "before\n");
	assert_eq!(stderr, "Operands must be two numbers or two strings.\n[line 2]\n");

	let (code, _, _) = rlox(&["file", &fixture("missing.lox")]);
	assert_eq!(code, Some(74));
}
