use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn banker(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("banker").unwrap();
    cmd.env("BANKER_DATA_DIR", dir.path()).env_remove("BANKER_LOG");
    cmd
}

fn seed_checking(dir: &TempDir) {
    banker(dir)
        .args(["account", "create", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: Checking"));

    banker(dir)
        .args(["transaction", "add", "--date", "2024-01-01", "Checking", "1000", "Paycheck"])
        .assert()
        .success();

    banker(dir)
        .args(["transaction", "add", "--date", "2024-01-03", "Checking", "-250.50", "Rent"])
        .assert()
        .success();
}

#[test]
fn init_writes_settings() {
    let dir = TempDir::new().unwrap();

    banker(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized banker"));

    assert!(dir.path().join("config.json").exists());
}

#[test]
fn account_list_shows_balances() {
    let dir = TempDir::new().unwrap();
    seed_checking(&dir);

    banker(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking").and(predicate::str::contains("$749.50")));
}

#[test]
fn duplicate_account_is_rejected() {
    let dir = TempDir::new().unwrap();
    seed_checking(&dir);

    banker(&dir)
        .args(["account", "create", "checking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn transaction_list_shows_running_balance() {
    let dir = TempDir::new().unwrap();
    seed_checking(&dir);

    banker(&dir)
        .args(["transaction", "list", "--account", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paycheck").and(predicate::str::contains("$749.50")));
}

#[test]
fn text_plot_prints_daily_balances() {
    let dir = TempDir::new().unwrap();
    seed_checking(&dir);

    banker(&dir)
        .args(["plot", "--backend", "text", "--account", "Checking"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2024-01-03")
                .and(predicate::str::contains("$1000.00"))
                .and(predicate::str::contains("$749.50")),
        );
}

#[test]
fn plot_without_transactions_reports_nothing_to_plot() {
    let dir = TempDir::new().unwrap();

    banker(&dir)
        .args(["plot", "--backend", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions to plot."));
}

#[cfg(feature = "plotters")]
#[test]
fn svg_plot_writes_file() {
    let dir = TempDir::new().unwrap();
    seed_checking(&dir);
    let out = dir.path().join("balance.svg");

    banker(&dir)
        .args(["plot", "--backend", "svg", "--granularity", "weekly", "--output"])
        .arg(&out)
        .assert()
        .success();

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<title>All accounts</title>"));
}

#[test]
fn backends_lists_every_backend() {
    let dir = TempDir::new().unwrap();

    banker(&dir)
        .arg("backends")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chart")
                .and(predicate::str::contains("svg"))
                .and(predicate::str::contains("text   available")),
        );
}

#[test]
fn disabled_backend_request_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "plot": { "disabled_backends": ["text"] } }"#,
    )
    .unwrap();

    banker(&dir)
        .args(["plot", "--backend", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("disabled"));
}

#[test]
fn csv_import_skips_duplicates() {
    let dir = TempDir::new().unwrap();
    seed_checking(&dir);
    let csv = dir.path().join("bank.csv");
    std::fs::write(
        &csv,
        "Date,Description,Amount\n2024-01-03,Rent,-250.50\n2024-01-05,Coffee,-4.25\n",
    )
    .unwrap();

    banker(&dir)
        .args(["transaction", "import", "--account", "Checking"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Imported 1 transaction(s)")
                .and(predicate::str::contains("Skipped 1 duplicate(s)")),
        );
}
