use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bookkeeper(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookkeeper").unwrap();
    cmd.env("BOOKKEEPER_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn commit(dir: &TempDir, tree: &str) {
    bookkeeper(dir)
        .args(["category", "commit"])
        .write_stdin(tree)
        .assert()
        .success();
}

fn add(dir: &TempDir, amount: &str, category: &str, date: &str) {
    bookkeeper(dir)
        .args(["expense", "add", amount, "-c", category, "-d", date])
        .assert()
        .success();
}

fn first_expense_id(dir: &TempDir) -> String {
    let output = bookkeeper(dir).args(["expense", "list"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find("exp-").expect("an expense id in the listing");
    stdout[start..start + 12].to_string()
}

#[test]
fn init_creates_store() {
    let dir = TempDir::new().unwrap();

    bookkeeper(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("data").join("store.json").exists());
    assert!(dir.path().join("config.json").exists());
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    bookkeeper(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("%d-%m-%Y %H:%M"))
        .stdout(predicate::str::contains("store.json"));
}

#[test]
fn category_commit_and_show() {
    let dir = TempDir::new().unwrap();

    bookkeeper(&dir)
        .args(["category", "commit", "-"])
        .write_stdin("Food\n    Groceries\nRent\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 3 categories."));

    bookkeeper(&dir)
        .args(["category", "show"])
        .assert()
        .success()
        .stdout("Food\n\tGroceries\nRent\n");

    bookkeeper(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout("Food\nGroceries\nRent\n");
}

#[test]
fn category_commit_from_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tree.txt");
    std::fs::write(&file, "Travel\n\tTrains\n").unwrap();

    bookkeeper(&dir)
        .args(["category", "commit"])
        .arg(&file)
        .assert()
        .success();

    bookkeeper(&dir)
        .args(["category", "show"])
        .assert()
        .stdout("Travel\n\tTrains\n");
}

#[test]
fn duplicate_category_rejected() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "A\n\tX\nB\n");

    bookkeeper(&dir)
        .args(["category", "commit"])
        .write_stdin("A\n\tX\nB\n\tX\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"X\" appears more than once"));

    bookkeeper(&dir)
        .args(["category", "show"])
        .assert()
        .stdout("A\n\tX\nB\n");
}

#[test]
fn expense_add_and_list() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "Food\n");
    add(&dir, "12.50", "Food", "01-05-2024 08:30");

    bookkeeper(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("01-05-2024 08:30"))
        .stdout(predicate::str::contains("12.50"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn expense_validation_messages() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "Food\n");

    bookkeeper(&dir)
        .args(["expense", "add", "abc", "-c", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount \"abc\" should be a number"));

    bookkeeper(&dir)
        .args(["expense", "add", "-5", "-c", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("should not be negative"));

    bookkeeper(&dir)
        .args(["expense", "add", "5", "-c", "Travel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"Travel\""));

    bookkeeper(&dir)
        .args(["expense", "add", "5", "-c", "Food", "-d", "2024-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"2024-05-01\""));

    bookkeeper(&dir)
        .args(["expense", "list"])
        .assert()
        .stdout("No expenses recorded.\n");
}

#[test]
fn expense_edit_and_delete() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "Food\nRent\n");
    add(&dir, "10", "Food", "01-05-2024 08:30");
    let id = first_expense_id(&dir);

    bookkeeper(&dir)
        .args(["expense", "edit", &id, "category", "Rent"])
        .assert()
        .success();
    bookkeeper(&dir)
        .args(["expense", "list"])
        .assert()
        .stdout(predicate::str::contains("Rent"));

    bookkeeper(&dir)
        .args(["expense", "delete", &id, "exp-00000000"])
        .assert()
        .failure();

    bookkeeper(&dir)
        .args(["expense", "delete", &id, &id])
        .assert()
        .success()
        .stdout("Deleted 1 expense(s).\n");
}

#[test]
fn removed_category_moves_expenses_to_not_stated() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "A\nB\n\tC\n");
    add(&dir, "1", "A", "01-05-2024 08:30");
    add(&dir, "2", "C", "01-05-2024 09:30");

    bookkeeper(&dir)
        .args(["category", "commit"])
        .write_stdin("A\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 moved to \"Not stated\""))
        .stdout(predicate::str::contains("Removed: C"));

    bookkeeper(&dir)
        .args(["expense", "list"])
        .assert()
        .stdout(predicate::str::contains("Not stated"))
        .stdout(predicate::str::contains("│ C ").not());
}

#[test]
fn budget_set_and_show() {
    let dir = TempDir::new().unwrap();

    bookkeeper(&dir)
        .args(["budget", "set", "--day", "50", "--month", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00"))
        .stdout(predicate::str::contains("900.00"));

    bookkeeper(&dir)
        .args(["budget", "set", "--week", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Week limit \"-1\""));

    bookkeeper(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining"))
        .stdout(predicate::str::contains("Nothing spent this day."));
}

#[test]
fn budget_by_category_for_month() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "Food\n");

    bookkeeper(&dir)
        .args(["expense", "add", "7", "-c", "Food"])
        .assert()
        .success();

    bookkeeper(&dir)
        .args(["budget", "by-category", "--period", "month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("7.00"));

    bookkeeper(&dir)
        .args(["budget", "by-category", "--period", "year"])
        .assert()
        .failure();
}

#[test]
fn audit_lists_changes() {
    let dir = TempDir::new().unwrap();
    commit(&dir, "Food\n");

    bookkeeper(&dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Category"))
        .stdout(predicate::str::contains("(Food)"));
}
