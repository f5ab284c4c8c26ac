use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    home: TempDir,
}

impl Env {
    /// A fresh HOME with an initialized data directory.
    fn new() -> Self {
        let env = Self {
            home: tempfile::tempdir().unwrap(),
        };
        env.budget()
            .args(["init", "--data-dir"])
            .arg(env.data_dir())
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized budget tracker"));
        env
    }

    fn data_dir(&self) -> PathBuf {
        self.home.path().join("budget-data")
    }

    fn budget(&self) -> Command {
        let mut cmd = Command::cargo_bin("budget").unwrap();
        cmd.env("HOME", self.home.path()).env_remove("BUDGET_LOG");
        cmd
    }

    fn add(&self, args: &[&str]) {
        self.budget().arg("add").args(args).assert().success();
    }

    fn stored(&self) -> Vec<serde_json::Value> {
        let content = std::fs::read_to_string(self.data_dir().join("transactions.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    fn seed_scenario(&self) {
        self.add(&["Salary", "50000", "--type", "income", "--date", "2024-01-01", "--category", "Job"]);
        self.add(&["Salary", "50000", "--type", "income", "--date", "2024-06-01", "--category", "Job"]);
        self.add(&["Rent", "15000", "--date", "2024-06-02", "--category", "Housing"]);
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn init_creates_store_and_settings() {
    let env = Env::new();
    assert!(env.data_dir().join("transactions.json").exists());
    assert!(env.home.path().join(".config/budget-tracker/settings.json").exists());
    assert!(env.stored().is_empty());

    env.budget()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  0"))
        .stdout(predicate::str::contains("Currency:   INR"));
}

#[test]
fn add_defaults_to_expense_and_persists_fields() {
    let env = Env::new();
    env.budget()
        .args(["add", "  Groceries  ", "1250.50", "--date", "2024-06-01", "--category", " "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense: Groceries"));

    let stored = env.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["desc"], "Groceries");
    assert_eq!(stored[0]["type"], "expense");
    assert_eq!(stored[0]["date"], "2024-06-01");
    assert_eq!(stored[0]["amount"], 1250.5);
    assert!(stored[0].get("category").is_none());
}

#[test]
fn add_rejects_bad_input() {
    let env = Env::new();
    env.budget()
        .args(["add", "Coffee", "-5"])
        .assert()
        .failure();
    env.budget()
        .args(["add", "Coffee", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
    env.budget()
        .args(["add", "Coffee", "5", "--date", "06/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
    env.budget()
        .args(["add", "Coffee", "5", "--type", "transfer"])
        .assert()
        .failure();
    assert!(env.stored().is_empty());
}

#[test]
fn add_warns_when_overspent() {
    let env = Env::new();
    env.add(&["Salary", "1000", "--type", "income"]);
    env.budget()
        .args(["add", "Rent", "1500"])
        .assert()
        .success()
        .stderr(predicate::str::contains("overspent by \u{20b9}500"));

    env.budget()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overspending alert"))
        .stdout(predicate::str::contains("-\u{20b9}500"));
}

#[test]
fn list_is_newest_first() {
    let env = Env::new();
    env.seed_scenario();
    let output = env.budget().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let rent = stdout.find("2024-06-02").unwrap();
    let june = stdout.find("2024-06-01").unwrap();
    let january = stdout.find("2024-01-01").unwrap();
    assert!(rent < june && june < january);

    env.budget()
        .args(["list", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 3"));
}

#[test]
fn suggest_recent_values() {
    let env = Env::new();
    env.seed_scenario();
    env.budget()
        .arg("suggest")
        .assert()
        .success()
        .stdout("Rent\nSalary\n");
}

#[test]
fn suggest_by_term_and_type() {
    let env = Env::new();
    env.seed_scenario();
    env.budget()
        .args(["suggest", "SAL"])
        .assert()
        .success()
        .stdout("Salary\n");
    env.budget()
        .args(["suggest", "--type", "income"])
        .assert()
        .success()
        .stdout("Salary\n");
    env.budget()
        .args(["suggest", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching suggestions found"));
}

#[test]
fn suggest_categories_and_scores() {
    let env = Env::new();
    env.seed_scenario();
    env.budget()
        .args(["suggest", "--field", "category"])
        .assert()
        .success()
        .stdout("Housing\nJob\n");
    env.budget()
        .args(["suggest", "o", "--field", "category", "--scores"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Job"))
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("Score"));
}

#[test]
fn suggest_similar_amounts() {
    let env = Env::new();
    env.seed_scenario();
    let output = env
        .budget()
        .args(["suggest", "--amount", "14000"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.find("Rent").unwrap() < stdout.find("Salary").unwrap());
}

#[test]
fn delete_with_yes_removes() {
    let env = Env::new();
    env.seed_scenario();
    let id = env.stored()[2]["id"].as_i64().unwrap();
    env.budget()
        .args(["delete", &id.to_string(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Rent"));
    assert_eq!(env.stored().len(), 2);

    env.budget()
        .args(["delete", &id.to_string(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn delete_declined_keeps_record() {
    let env = Env::new();
    env.seed_scenario();
    let id = env.stored()[0]["id"].as_i64().unwrap();
    env.budget()
        .args(["delete", &id.to_string()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));
    assert_eq!(env.stored().len(), 3);
}

#[test]
fn export_writes_csv() {
    let env = Env::new();
    env.budget()
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transactions to export"));

    env.seed_scenario();
    let out = env.home.path().join("out.csv");
    env.budget()
        .args(["export", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 transactions"));

    let csv = read(&out);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ID,Description,Amount,Date,Type,Category"));
    assert!(lines.next().unwrap().contains(r#""Salary","50,000.00","2024-01-01","income","Job""#));
}

#[test]
fn backup_and_restore_round_trip() {
    let env = Env::new();
    env.seed_scenario();
    env.budget().args(["currency", "usd"]).assert().success();
    let file = env.home.path().join("backup.json");
    env.budget()
        .args(["backup", "--output"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 3"));

    let doc: serde_json::Value = serde_json::from_str(&read(&file)).unwrap();
    assert_eq!(doc["currency"], "USD");
    assert_eq!(doc["chartType"], "doughnut");
    assert_eq!(doc["transactions"].as_array().unwrap().len(), 3);

    let other = Env::new();
    other
        .budget()
        .arg("restore")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 3 transactions"));
    assert_eq!(other.stored(), env.stored());
    other
        .budget()
        .arg("currency")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency: USD"));
}

#[test]
fn restore_rejects_invalid_backup() {
    let env = Env::new();
    env.seed_scenario();
    let file = env.home.path().join("bad.json");
    std::fs::write(&file, r#"{"currency": "INR"}"#).unwrap();
    env.budget()
        .args(["restore", "--yes"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid backup file"));
    assert_eq!(env.stored().len(), 3);
}

#[test]
fn currency_validation() {
    let env = Env::new();
    env.budget()
        .args(["currency", "dollars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid currency code"));
    env.budget()
        .args(["currency", "eur"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency set to EUR"));
}

#[test]
fn chart_uses_saved_kind() {
    let env = Env::new();
    env.seed_scenario();
    env.budget()
        .arg("chart")
        .assert()
        .success()
        .stdout(predicate::str::contains("Share of totals"))
        .stdout(predicate::str::contains("Recovery"));

    env.budget()
        .args(["chart", "--kind", "bar", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default chart set to bar"));

    env.budget()
        .arg("chart")
        .assert()
        .success()
        .stdout(predicate::str::contains("Totals"))
        .stdout(predicate::str::contains("Recovery").not());
}

#[test]
fn suggest_scores_needs_a_term() {
    let env = Env::new();
    env.seed_scenario();
    env.budget().args(["suggest", "--scores"]).assert().failure();
    env.budget()
        .args(["suggest", "  ", "--scores"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scores needs a search term"));
}

#[test]
fn suggest_all_lists_own_and_common_values() {
    let env = Env::new();
    env.seed_scenario();
    let output = env.budget().args(["suggest", "--all"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for heading in [
        "Income Sources",
        "Expense Categories",
        "Recovery Sources",
        "Recent Transactions",
        "Categories",
    ] {
        assert!(stdout.contains(heading), "missing {heading}");
    }
    assert!(stdout.contains("2 times"));
    assert!(stdout.contains("Deposit Refund"));

    let output = env
        .budget()
        .args(["suggest", "--all", "--type", "income"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.find("Salary").unwrap() < stdout.find("Freelance Work").unwrap());
    assert!(!stdout.contains("Recovery Sources"));

    env.budget()
        .args(["suggest", "--all", "--field", "category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("Groceries"));
}
