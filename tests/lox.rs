use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rlox::{LoxError, Loxer, RuntimeErrorType};

/// Run `source` in a fresh buffered session and return what it printed.
fn run(source: &str) -> (Result<(), LoxError>, String) {
	let mut loxer = Loxer::buffered();
	let result = loxer.run(source);
	(result, loxer.take_output())
}

fn output(source: &str) -> String {
	let (result, output) = run(source);
	if let Err(e) = result {
		panic!("{source:?} failed: {e}");
	}
	output
}

#[test]
fn test_lox_file() {
	let mut loxer = Loxer::buffered();
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("test.lox");
	loxer.run_file(&path).unwrap();
	assert_eq!(
		loxer.take_output(),
		"Hello, lox!\n0\n1\n1\n2\n3\n5\n8\n13\n15\n<fn makeAdder>\n55\n13.75\ninner\nlox\nfallback\nfalse\ntrue\ntrue\n"
	);
}

#[test]
fn precedence() {
	assert_eq!(output("print 1 + 2 * 3; print (1 + 2) * 3; print -2 * -3 - 1;"), "7\n9\n5\n");
	assert_eq!(output("print 10 - 4 - 3; print 2 < 3 == true;"), "3\ntrue\n");
}

#[test]
fn truthiness() {
	assert_eq!(output("print !nil; print !0; print !\"\"; print !false;"), "true\nfalse\nfalse\ntrue\n");
}

#[test]
fn closures_share_the_captured_frame() {
	let source = "
		fun makeCounter() {
			var i = 0;
			fun inc() { i = i + 1; return i; }
			return inc;
		}
		var c = makeCounter();
		print c();
		print c();
	";
	assert_eq!(output(source), "1\n2\n");
}

#[test]
fn closures_bind_lexically() {
	let source = "
		var a = \"global\";
		{
			fun show() { print a; }
			show();
			var a = \"block\";
			show();
		}
	";
	assert_eq!(output(source), "global\nglobal\n");
}

#[test]
fn self_initializer_is_a_static_error() {
	let (result, printed) = run("print 1; var a = a;");
	let Err(error @ LoxError::ResolveErrors(_)) = result else { panic!("expected a resolve error") };
	assert_eq!(error.exit_code(), 65);
	assert_eq!(error.to_string(), "[line 1] error at 'a': Can't read global variable in its own initializer.");
	assert_eq!(printed, "");
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
	assert_eq!(output("for (var i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");

	let (result, printed) = run("for (var i = 0; i < 3; i = i + 1) {} print i;");
	let Err(LoxError::RuntimeError(error)) = result else { panic!("expected a runtime error") };
	assert_eq!(error.error_type(), &RuntimeErrorType::UndefinedVariable("i".into()));
	assert_eq!(printed, "");
}

#[test]
fn arity_mismatch_reports_the_call_line() {
	let source = "fun add(a, b) {\n  print \"body\";\n  return a + b;\n}\nadd(1);";
	let (result, printed) = run(source);
	let Err(error @ LoxError::RuntimeError(_)) = result else { panic!("expected a runtime error") };
	assert_eq!(error.exit_code(), 70);
	assert_eq!(error.to_string(), "Expected 2 arguments but got 1.\n[line 5]");
	assert_eq!(printed, "");
}

#[test]
fn nested_block_comments() {
	assert_eq!(output("/* a /* b */ c */ print 1;"), "1\n");
}

#[test]
fn runtime_error_keeps_earlier_output() {
	let (result, printed) = run("print \"before\";\nprint \"a\" + 1;\nprint \"after\";");
	let Err(LoxError::RuntimeError(error)) = result else { panic!("expected a runtime error") };
	assert_eq!(error.line(), 2);
	assert_eq!(error.error_type(), &RuntimeErrorType::OperandsMustBeNumbersOrStrings);
	assert_eq!(printed, "before\n");
}

#[test]
fn every_syntax_error_is_reported() {
	let (result, printed) = run("print 1 +;\nvar = 2;\nprint \"ok\";\n\"unterminated");
	let Err(LoxError::SyntaxErrors(errors)) = result else { panic!("expected syntax errors") };
	let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
	assert_eq!(messages, [
		"[line 4] error: Unterminated string.",
		"[line 1] error at ';': Expect expression.",
		"[line 2] error at '=': Expect variable name.",
	]);
	assert_eq!(printed, "");
}

#[test]
fn calling_non_functions() {
	let (result, _) = run("var x = \"not a function\";\nx();");
	let Err(LoxError::RuntimeError(error)) = result else { panic!("expected a runtime error") };
	assert_eq!(error.to_string(), "Can only call functions.\n[line 2]");
}

#[test]
fn recursion_and_early_return() {
	let source = "
		fun find(limit) {
			var i = 0;
			while (true) {
				{ if (i * i > limit) return i; }
				i = i + 1;
			}
		}
		print find(50);
		fun noop() {}
		print noop();
	";
	assert_eq!(output(source), "8\nnil\n");
}

#[test]
fn session_reuses_globals_like_a_prompt() {
	let mut loxer = Loxer::buffered();
	loxer.run("var counter = 0;").unwrap();
	loxer.run("fun bump() { counter = counter + 1; return counter; }").unwrap();
	assert!(loxer.run("bump(;").is_err());
	loxer.run("bump();").unwrap();
	loxer.run("print bump();").unwrap();
	assert_eq!(loxer.take_output(), "2\n");
}

#[test]
fn string_and_number_rendering() {
	assert_eq!(output("print 3.0; print 0.5 + 0.25; print \"a\" + \"b\"; print nil; print clock;"), "3\n0.75\nab\nnil\n<native fn>\n");
	assert_eq!(output("print 1 == \"1\"; print nil == nil; print \"x\" == \"x\";"), "false\ntrue\ntrue\n");
}

#[test]
fn division_by_zero_renders_like_lox() {
	assert_eq!(output("print 1/0; print -1/0; print 0/0; print 0/0 == 0/0; print -0;"), "Infinity\n-Infinity\nNaN\nfalse\n-0\n");
}

#[test]
fn redeclaring_a_global_reads_its_previous_value() {
	assert_eq!(output("var a = 1; var a = a + 1; print a;"), "2\n");
}
