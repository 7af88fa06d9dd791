use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

fn run(home: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("binledger");
    cmd.env("HOME", home.path()).args(args).assert()
}

#[test]
fn help_lists_positionals() {
    let home = TempDir::new().expect("temp home");
    run(&home, &["--help"])
        .success()
        .stdout(contains("<FRAMEWORK>"))
        .stdout(contains("<VERSION>"))
        .stdout(contains("<ROOT>"));
}

#[test]
fn wrong_argument_count_is_rejected_before_any_work() {
    let home = TempDir::new().expect("temp home");
    run(&home, &[]).failure().code(2);
    run(&home, &["flutter"]).failure().code(2);
    run(&home, &["flutter", "1.2.3"]).failure().code(2);
    run(&home, &["flutter", "1.2.3", "app", "extra"])
        .failure()
        .code(2);
    assert!(!home.path().join(".config/binledger").exists());
}

#[test]
fn unknown_framework_is_rejected() {
    let home = TempDir::new().expect("temp home");
    run(&home, &["cordova", "1.0", "."])
        .failure()
        .code(2)
        .stderr(contains("react_native"));
}

#[test]
fn react_native_uses_snake_case_name() {
    let home = TempDir::new().expect("temp home");
    run(&home, &["react-native", "0.72", "."]).failure().code(2);
}
