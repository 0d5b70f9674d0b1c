//! End-to-end CLI tests, driven against the built `cmicro` binary the way
//! the spec's own scenarios are phrased: a source file in, stdout/exit
//! code out.

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn runs_a_for_loop_program() {
    let file = source_file("int main(){ int i; for(i=0;i<3;i=i+1){ print(i); } }");
    Command::cargo_bin("cmicro")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("0 1 2 ");
}

#[test]
fn runs_a_user_function_call() {
    let file = source_file("int f(int x){ return x*x; } int main(){ print(f(5)); }");
    Command::cargo_bin("cmicro").unwrap().arg(file.path()).assert().success().stdout("25 ");
}

#[test]
fn runs_a_do_while_loop() {
    let file = source_file("int main(){ int i; i=0; do { i=i+1; } while(i<3); print(i); }");
    Command::cargo_bin("cmicro").unwrap().arg(file.path()).assert().success().stdout("3 ");
}

#[test]
fn runs_an_if_else_branch() {
    let file = source_file(r#"int main(){ if (1<2) puts("yes"); else puts("no"); }"#);
    Command::cargo_bin("cmicro").unwrap().arg(file.path()).assert().success().stdout("yes\n");
}

#[test]
fn reads_from_stdin_via_getch_and_getnum() {
    let file = source_file("int main(){ putch(getch()); putch(' '); print(getnum()); }");
    Command::cargo_bin("cmicro")
        .unwrap()
        .arg(file.path())
        .write_stdin("Z 42")
        .assert()
        .success()
        .stdout("Z 42 ");
}

#[test]
fn a_division_by_zero_fault_prints_a_message_and_exits_zero() {
    let file = source_file("int main(){ print(1/0); }");
    Command::cargo_bin("cmicro")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("division by zero"));
}

#[test]
fn a_missing_file_exits_one() {
    Command::cargo_bin("cmicro")
        .unwrap()
        .arg("/nonexistent/path/to/source.lc")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn no_arguments_exits_one() {
    Command::cargo_bin("cmicro").unwrap().assert().failure().code(1);
}
