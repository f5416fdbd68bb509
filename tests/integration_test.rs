use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const COURSES: &str = "\
# prerequisites for each course
algorithms: data structures
data structures: discrete math
discrete math: intro to programming
intro to programming
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn prereq() -> Command {
    Command::cargo_bin("prereq").unwrap()
}

#[test]
fn test_sort_courses() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "courses.txt", COURSES);

    prereq()
        .arg("sort")
        .arg(&graph)
        .assert()
        .success()
        .stdout(
            "1:\tintro to programming\n\
             2:\tdiscrete math\n\
             3:\tdata structures\n\
             4:\talgorithms\n",
        )
        .stderr(predicate::str::contains("cycle:").not());
}

#[test]
fn test_sort_reports_cycle_and_keeps_going() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "loop.json", r#"{"a": ["b"], "b": ["a"], "c": ["a"]}"#);

    prereq()
        .arg("sort")
        .arg(&graph)
        .assert()
        .success()
        .stdout("1:\tb\n2:\ta\n3:\tc\n")
        .stderr(predicate::str::contains("cycle: a -> b -> a"));
}

#[test]
fn test_sort_strict_fails_on_cycle() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "loop.json", r#"{"a": ["b"], "b": ["a"]}"#);

    prereq()
        .args(["sort", "--strict"])
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Dependency cycle detected: a -> b -> a",
        ));
}

#[test]
fn test_sort_json_output() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "self.json", r#"{"x": ["x", "y"]}"#);

    let output = prereq()
        .args(["sort", "--json"])
        .arg(&graph)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["order"], serde_json::json!(["y", "x"]));
    assert_eq!(value["cycles"], serde_json::json!([["x", "x"]]));
}

#[test]
fn test_sort_from_stdin() {
    prereq()
        .args(["sort", "-", "--format", "json"])
        .write_stdin(r#"{"deploy": ["build", "test"], "test": ["build"]}"#)
        .assert()
        .success()
        .stdout("1:\tbuild\n2:\ttest\n3:\tdeploy\n");
}

#[test]
fn test_cycles_command() {
    let dir = TempDir::new().unwrap();
    let acyclic = write(&dir, "courses.txt", COURSES);
    let cyclic = write(&dir, "cyclic.txt", "a: b\nb: c\nc: a\nz: z\n");

    prereq()
        .arg("cycles")
        .arg(&acyclic)
        .assert()
        .success()
        .stdout("No cycles found\n");

    prereq()
        .arg("cycles")
        .arg(&cyclic)
        .assert()
        .failure()
        .stdout("a -> b -> c -> a\nz -> z\n")
        .stderr(predicate::str::contains("Found 2 dependency cycle(s)"));
}

#[test]
fn test_check_command() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "courses.txt", COURSES);
    let good = write(
        &dir,
        "good.txt",
        "intro to programming\ndiscrete math\ndata structures\nalgorithms\n",
    );
    let bad = write(
        &dir,
        "bad.txt",
        "discrete math\nintro to programming\ndata structures\nalgorithms\n",
    );

    prereq()
        .arg("check")
        .arg(&graph)
        .arg(&good)
        .assert()
        .success()
        .stdout("Order is valid\n");

    prereq()
        .arg("check")
        .arg(&graph)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "discrete math (position 1) depends on intro to programming (position 2)",
        ))
        .stderr(predicate::str::contains("1 violation(s)"));
}

#[test]
fn test_check_json_output() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "courses.txt", COURSES);
    let bad = write(
        &dir,
        "bad.txt",
        "discrete math\nintro to programming\ndata structures\n",
    );

    let output = prereq()
        .args(["check", "--json"])
        .arg(&graph)
        .arg(&bad)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"kind": "missing", "item": "algorithms"},
            {
                "kind": "misordered",
                "item": "discrete math",
                "prerequisite": "intro to programming",
                "item_position": 1,
                "prerequisite_position": 2
            }
        ])
    );
}

#[test]
fn test_repeated_json_key_keeps_all_prerequisites() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "dup.json", r#"{"a": ["b"], "a": ["c"]}"#);

    prereq()
        .arg("sort")
        .arg(&graph)
        .assert()
        .success()
        .stdout("1:\tb\n2:\tc\n3:\ta\n");
}

#[test]
fn test_second_colon_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "colon.txt", "a: b: c\n");

    prereq()
        .arg("sort")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Line 1: unexpected ':' in prerequisite list",
        ));
}

#[test]
fn test_parse_error_reports_line() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "broken.txt", "a: b\n: c\n");

    prereq()
        .arg("sort")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Line 2: empty item name"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();

    prereq()
        .arg("sort")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}
