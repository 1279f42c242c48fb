//! End-to-end CLI tests (spec §6.1, §8's six scenarios), driven through
//! the binary's actual stdin/stdout/exit-code contract rather than the
//! library API `tests/` in `src/lib.rs` already cover.

use assert_cmd::Command;
use predicates::prelude::*;

fn mlc() -> Command {
    Command::cargo_bin("mlc").unwrap()
}

fn run(source: &str) -> assert_cmd::assert::Assert {
    mlc().write_stdin(source).assert()
}

#[test]
fn scenario_1_arithmetic() {
    run("1 * 2 - 3").success().stdout("-1\n");
}

#[test]
fn scenario_2_let_binding() {
    run("let v : int <- 21 in v + v end").success().stdout("42\n");
}

#[test]
fn scenario_3_if_then_else() {
    run("if 2 < 3 then 1 else 2 end").success().stdout("1\n");
}

#[test]
fn scenario_4_literal_fn_application() {
    run("(fn v : int => v + 1) 2").success().stdout("3\n");
}

#[test]
fn scenario_5_named_closure_applied_twice() {
    run("let f : int -> int <- (fn x : int => x * x) in f (f 3) end")
        .success()
        .stdout("81\n");
}

#[test]
fn scenario_6_recursive_function() {
    run("let rec f x <- if x < 2 then 1 else x * f (x - 1) end in f 5 end")
        .success()
        .stdout("120\n");
}

#[test]
fn cli_help() {
    mlc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mlc"));
}

#[test]
fn a_syntax_error_exits_non_zero_with_one_stderr_line() {
    run("1 +").failure().stderr(predicate::str::contains("error:"));
}

#[test]
fn a_type_error_exits_non_zero() {
    run("1 + true").failure().stderr(predicate::str::contains("error:"));
}

#[test]
fn division_by_zero_exits_non_zero_at_runtime() {
    run("1 / 0").failure().stderr(predicate::str::contains("error:"));
}

#[test]
fn a_function_typed_top_level_result_is_rejected() {
    run("fn x : int => x + 1")
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn verbose_flag_emits_per_stage_debug_logging() {
    run("1 + 1")
        .success()
        .stdout("2\n");
    mlc()
        .arg("--verbose")
        .write_stdin("1 + 1")
        .assert()
        .success()
        .stdout("2\n")
        .stderr(predicate::str::contains("lexing").or(predicate::str::contains("parsing")));
}
