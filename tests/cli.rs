use assert_cmd::Command;
use predicates::prelude::*;

fn csv2qif() -> Command {
    let mut cmd = Command::cargo_bin("csv2qif").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_exits_zero() {
    csv2qif()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("csv-column-date"));
}

#[test]
fn missing_args_exit_nonzero() {
    csv2qif()
        .arg("only-one.csv")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn converts_with_flags() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let qif = dir.path().join("out.qif");
    std::fs::write(
        &csv,
        "Date,Description,Amount\n05/01/2023,Coffee Shop,$4.50\n06/01/2023,Salary,\"-1,200.00\"\n",
    )
    .unwrap();

    csv2qif()
        .args(["--csv-has-header", "--csv-column-date", "0", "--csv-column-payee", "1"])
        .args(["--csv-column-amount", "2", "--csv-reverse-amount-sign"])
        .args(["--csv-date-format", "DD/MM/YYYY", "--qif-date-format", "MM/DD/YYYY"])
        .arg(&csv)
        .arg(&qif)
        .assert()
        .success()
        .stdout(predicate::str::contains("records written"));

    let out = std::fs::read_to_string(&qif).unwrap();
    assert_eq!(
        out,
        "!Type:Bank\nD01/05/2023\nT-4.50\nPCoffee Shop\n^\nD01/06/2023\nT1,200.00\nPSalary\n^\n"
    );
}

#[test]
fn converts_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let qif = dir.path().join("out.qif");
    let conf = dir.path().join("conf.json");
    std::fs::write(&csv, "2023-01-05,-12.50,rent\n").unwrap();
    std::fs::write(
        &conf,
        r#"{"CsvColumnDate": 0, "CsvColumnAmount": 1, "CsvColumnMemo": 2, "CsvColumnPayee": -1, "QifAccountType": "Cash"}"#,
    )
    .unwrap();

    csv2qif().arg(&csv).arg(&qif).arg(&conf).assert().success();

    let out = std::fs::read_to_string(&qif).unwrap();
    assert_eq!(out, "!Type:Cash\nD2023-01-05\nT-12.50\nMrent\n^\n");
}

#[test]
fn write_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let conf = dir.path().join("saved.json");
    std::fs::write(&csv, "x,1\n").unwrap();

    csv2qif()
        .args(["--csv-column-memo", "0", "--csv-column-amount", "1", "--write-config"])
        .arg(&conf)
        .arg(&csv)
        .arg(dir.path().join("first.qif"))
        .assert()
        .success();

    csv2qif()
        .arg(&csv)
        .arg(dir.path().join("second.qif"))
        .arg(&conf)
        .assert()
        .success();

    let first = std::fs::read_to_string(dir.path().join("first.qif")).unwrap();
    let second = std::fs::read_to_string(dir.path().join("second.qif")).unwrap();
    assert_eq!(first, "!Type:Bank\nT1\nMx\n^\n");
    assert_eq!(first, second);
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    csv2qif()
        .arg(dir.path().join("missing.csv"))
        .arg(dir.path().join("out.qif"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: IO error"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let conf = dir.path().join("conf.json");
    std::fs::write(&csv, "a,b\n").unwrap();
    std::fs::write(&conf, "{ nope").unwrap();

    csv2qif()
        .arg(&csv)
        .arg(dir.path().join("out.qif"))
        .arg(&conf)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not load config"));
}

#[test]
fn ragged_csv_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    std::fs::write(&csv, "a,b,c\nd,e\n").unwrap();

    csv2qif()
        .args(["--csv-column-memo", "0"])
        .arg(&csv)
        .arg(dir.path().join("out.qif"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CSV error"));
}

#[test]
fn latin1_export_is_copied_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let qif = dir.path().join("out.qif");
    std::fs::write(&csv, b"03/2024,Caf\xe9 Paris,4.50\n").unwrap();

    csv2qif()
        .args(["--csv-column-date", "0", "--csv-column-payee", "1", "--csv-column-amount", "2"])
        .args(["--csv-date-format", "MM/YYYY", "--qif-date-format", "YYYY-MM"])
        .arg(&csv)
        .arg(&qif)
        .assert()
        .success();

    let out = std::fs::read(&qif).unwrap();
    assert_eq!(out, b"!Type:Bank\nD2024-03\nT4.50\nPCaf\xe9 Paris\n^\n".to_vec());
}

#[test]
fn camel_case_config_keys() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let qif = dir.path().join("out.qif");
    let conf = dir.path().join("conf.json");
    std::fs::write(&csv, "Memo,Amount\nrent,-800\n").unwrap();
    std::fs::write(
        &conf,
        r#"{"csvHasHeader": true, "csvColumnMemo": 0, "csvColumnAmount": 1}"#,
    )
    .unwrap();

    csv2qif().arg(&csv).arg(&qif).arg(&conf).assert().success();

    let out = std::fs::read_to_string(&qif).unwrap();
    assert_eq!(out, "!Type:Bank\nT-800\nMrent\n^\n");
}

#[test]
fn flags_next_to_config_file_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("in.csv");
    let conf = dir.path().join("conf.json");
    std::fs::write(&csv, "x\n").unwrap();
    std::fs::write(&conf, r#"{"CsvColumnMemo": 0}"#).unwrap();

    csv2qif()
        .args(["--csv-column-date", "-1"])
        .arg(&csv)
        .arg(dir.path().join("out.qif"))
        .arg(&conf)
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring column and format options"));
}
