//! Integration tests for the mtm CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GOOD_MTM: &str = "\
MT2000 TEST PROGRAM^^^^^^^^3
1^VBE^^^10^V^20^V^1^0^^^^^^^^^^0^^0^0^0^0^0^0
2^HFE^^^100^^500^^1^0^^^^^^^^^^0^^0^1^0^0^0^0
= TEST BIN DATA =
11 PASS AND ALL PASS^GOOD
21 FAIL OR F001 F002^PARAMETRIC
30 FAIL OR OSC BIN OUT^OPEN
= END DC BIN DATA =
";

const BAD_MTM: &str = "\
7^HFE^^^^^^^2
= TEST BIN DATA =
11 PASS AND ALL PASS
12 PASS OR F007
";

const GOOD_SPEC: &str = "\
NO,ITEM,Min,Min_Unit,Max,Max_Unit,Compare_Limit
MT2000 TEST PROGRAM,,,,,,
1,VBE,10,V,20.0,V,True
2,HFE,,,,,
";

/// Helper to get an mtm command isolated from the user's config
fn mtm(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mtm").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("MTM_STORE_DIR")
        .env_remove("MTM_REQUIRED_BIN")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create an initialized project in a temp directory
fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    mtm(tmp.path()).arg("init").assert().success();
    tmp
}

/// Project with good.mtm mapped to P1 and P1's spec imported
fn setup_mapped_project() -> TempDir {
    let tmp = setup_project();
    fs::write(tmp.path().join("good.mtm"), GOOD_MTM).unwrap();
    fs::write(tmp.path().join("p1.csv"), GOOD_SPEC).unwrap();
    mtm(tmp.path())
        .args(["map", "set", "good.mtm", "P1"])
        .assert()
        .success();
    mtm(tmp.path())
        .args(["spec", "import", "P1", "p1.csv"])
        .assert()
        .success();
    tmp
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn test_init_creates_project_and_store() {
    let tmp = TempDir::new().unwrap();
    mtm(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized MTM project"));

    assert!(tmp.path().join(".mtm/config.yaml").exists());
    let mapping = fs::read_to_string(tmp.path().join("paper_specs/mtm_product_map.csv")).unwrap();
    assert_eq!(mapping.trim_end(), "Filename,Product");
}

#[test]
fn test_init_twice_is_reported() {
    let tmp = setup_project();
    mtm(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_clean_file_passes() {
    let tmp = setup_mapped_project();
    mtm(tmp.path())
        .args(["validate", "good.mtm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_reports_violations_and_fails() {
    let tmp = setup_project();
    fs::write(tmp.path().join("bad.mtm"), BAD_MTM).unwrap();

    mtm(tmp.path())
        .args(["validate", "bad.mtm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"))
        .stderr(predicate::str::contains("HFE test NO 7 does not use AR option"))
        .stderr(predicate::str::contains("Multiple PASS bins found (2)"))
        .stderr(predicate::str::contains("No product mapping found"));
}

#[test]
fn test_validate_json_report() {
    let tmp = setup_project();
    fs::write(tmp.path().join("bad.mtm"), BAD_MTM).unwrap();

    let output = mtm(tmp.path())
        .args(["validate", "bad.mtm", "--format", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["files"][0], "bad.mtm");
    let rules: Vec<&str> = report["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["rule"].as_str().unwrap())
        .collect();
    assert_eq!(
        rules,
        vec![
            "branch-fail",
            "hfe-ar",
            "spec-limits",
            "pass-format",
            "single-pass",
            "bin-out",
            "osc"
        ]
    );
}

#[test]
fn test_validate_only_and_skip() {
    let tmp = setup_project();
    fs::write(tmp.path().join("bad.mtm"), BAD_MTM).unwrap();

    mtm(tmp.path())
        .args(["validate", "bad.mtm", "--only", "coverage"])
        .assert()
        .success();

    mtm(tmp.path())
        .args(["validate", "bad.mtm", "--only", "osc", "--only", "coverage", "--skip", "osc"])
        .assert()
        .success();

    mtm(tmp.path())
        .args(["validate", "bad.mtm", "--only", "osc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not contain 'OSC'"));
}

#[test]
fn test_validate_required_bin_flag() {
    let tmp = setup_mapped_project();
    mtm(tmp.path())
        .args(["validate", "good.mtm", "--bin", "12", "--summary"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation Summary"))
        .stderr(predicate::str::contains("Validation failed: 1 problem"));
}

#[test]
fn test_validate_spec_mismatch() {
    let tmp = setup_mapped_project();
    let changed = GOOD_MTM.replace("1^VBE^^^10^", "1^VBE^^^11^");
    fs::write(tmp.path().join("good.mtm"), changed).unwrap();

    mtm(tmp.path())
        .args(["validate", "good.mtm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Min mismatch"));
}

#[test]
fn test_validate_loads_only_products_in_the_run() {
    let tmp = setup_mapped_project();
    fs::write(
        tmp.path().join("paper_specs/mtm_product_map.csv"),
        "Filename,Product\ngood.mtm,P1\nother.mtm,specs/P2.csv\n",
    )
    .unwrap();

    mtm(tmp.path())
        .args(["validate", "good.mtm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_unloadable_spec_is_a_violation() {
    let tmp = setup_mapped_project();
    fs::write(
        tmp.path().join("paper_specs/mtm_product_map.csv"),
        "Filename,Product\ngood.mtm,specs/P2.csv\n",
    )
    .unwrap();

    mtm(tmp.path())
        .args(["validate", "good.mtm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Paper spec for product 'specs/P2.csv' could not be loaded",
        ));
}

#[test]
fn test_validate_walks_directories() {
    let tmp = setup_mapped_project();
    let lot = tmp.path().join("lots/week1");
    fs::create_dir_all(&lot).unwrap();
    fs::rename(tmp.path().join("good.mtm"), lot.join("good.mtm")).unwrap();
    fs::write(lot.join("readme.txt"), "not an mtm file").unwrap();

    mtm(tmp.path())
        .args(["validate", "lots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validating 1 file"));
}

#[test]
fn test_validate_file_without_test_data() {
    let tmp = setup_project();
    fs::write(tmp.path().join("empty.mtm"), "= TEST BIN DATA =\n11 PASS AND ALL PASS\n").unwrap();

    mtm(tmp.path())
        .args(["validate", "empty.mtm", "--only", "coverage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty.mtm: No test data found."));
}

#[test]
fn test_validate_missing_path_fails() {
    let tmp = setup_project();
    mtm(tmp.path())
        .args(["validate", "nope.mtm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input path not found"));
}

#[test]
fn test_validate_export() {
    let tmp = setup_mapped_project();
    mtm(tmp.path())
        .args(["validate", "good.mtm", "--export", "out"])
        .assert()
        .success();

    assert!(tmp.path().join("out/test_plan.csv").exists());
    assert!(tmp.path().join("out/sort_plan.csv").exists());
}

#[test]
fn test_project_config_disables_rules() {
    let tmp = setup_project();
    fs::write(tmp.path().join("bad.mtm"), BAD_MTM).unwrap();
    fs::write(
        tmp.path().join(".mtm/config.yaml"),
        "validation:\n  check_branch_fail: false\n  check_hfe_ar: false\n  check_pass_format: false\n  check_single_pass: false\n  check_bin_out: false\n  check_osc: false\n  check_spec_limits: false\n",
    )
    .unwrap();

    mtm(tmp.path())
        .args(["validate", "bad.mtm"])
        .assert()
        .success();
}

// ============================================================================
// Show / Export
// ============================================================================

#[test]
fn test_show_sort_table_tsv() {
    let tmp = setup_project();
    fs::write(tmp.path().join("good.mtm"), GOOD_MTM).unwrap();

    mtm(tmp.path())
        .args(["show", "good.mtm", "--table", "sort", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Filename\tBin\tResult\tLogic\tCode_0\tCode_1\tItem\n",
        ))
        .stdout(predicate::str::contains("good.mtm\t30\tFAIL\tOR\tOSC\tBIN OUT\tOPEN"));
}

#[test]
fn test_show_test_table_json() {
    let tmp = setup_project();
    fs::write(tmp.path().join("good.mtm"), GOOD_MTM).unwrap();

    let output = mtm(tmp.path())
        .args(["show", "good.mtm", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[1]["ITEM"], "VBE");
    assert_eq!(rows[1]["Sort"], "FAIL");
    assert_eq!(rows[2]["AR"], "AR");
    assert_eq!(rows[0]["Sort"], "");
}

#[test]
fn test_export_latin1() {
    let tmp = setup_project();
    let mut bytes = b"1^V".to_vec();
    bytes.push(0xB5);
    bytes.extend_from_slice(b"A^^^^^^^1\n");
    fs::write(tmp.path().join("micro.mtm"), &bytes).unwrap();

    mtm(tmp.path())
        .args(["export", "micro.mtm", "-o", "out", "--encoding", "latin1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_plan.csv"));

    let written = fs::read(tmp.path().join("out/test_plan.csv")).unwrap();
    assert!(written.windows(3).any(|w| w == [b'V', 0xB5, b'A']));
    let sort = fs::read_to_string(tmp.path().join("out/sort_plan.csv")).unwrap();
    assert_eq!(sort.trim_end(), "Filename,Bin,Result,Logic,Item");
}

// ============================================================================
// Map / Spec
// ============================================================================

#[test]
fn test_map_set_list_remove() {
    let tmp = setup_project();

    mtm(tmp.path())
        .args(["map", "set", "a.mtm", "P1"])
        .assert()
        .success();
    mtm(tmp.path())
        .args(["map", "set", "a.mtm", "P2"])
        .assert()
        .success();

    mtm(tmp.path())
        .args(["map", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout("Filename,Product\na.mtm,P2\n");

    mtm(tmp.path())
        .args(["map", "remove", "a.mtm"])
        .assert()
        .success();
    mtm(tmp.path())
        .args(["map", "remove", "a.mtm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no mapping for 'a.mtm'"));
}

#[test]
fn test_spec_new_import_show_list() {
    let tmp = setup_mapped_project();

    mtm(tmp.path())
        .args(["spec", "new", "P2"])
        .assert()
        .success();
    mtm(tmp.path())
        .args(["spec", "new", "P2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    mtm(tmp.path())
        .args(["spec", "list", "--format", "tsv"])
        .assert()
        .success()
        .stdout("Product\tFiles\nP1\t1\nP2\t0\n");

    let output = mtm(tmp.path())
        .args(["spec", "show", "P1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[1]["NO"], "1");
    assert_eq!(rows[1]["Max"], "20.0");
    assert_eq!(rows[1]["Compare_Limit"], "True");
    assert_eq!(rows[2]["Compare_Limit"], "");
}

#[test]
fn test_store_flag_overrides_location() {
    let tmp = setup_project();
    mtm(tmp.path())
        .args(["--store", "elsewhere", "map", "set", "a.mtm", "P1"])
        .assert()
        .success();

    assert!(tmp.path().join("elsewhere/mtm_product_map.csv").exists());
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    mtm(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mtm"));
}
