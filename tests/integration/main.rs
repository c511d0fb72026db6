//! Integration tests for cachecarry

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const ZERO_ACTION_ID: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    fn cachecarry(workspace: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("cachecarry");
        cmd.current_dir(workspace)
            .arg("--config")
            .arg(workspace.join("no-config.toml"));
        cmd
    }

    fn go_cache(base: &Path) -> PathBuf {
        base.join(".cache").join("go-build")
    }

    fn write_entry(root: &Path, key: [u8; 32], suffix: char, content: &str) -> PathBuf {
        let relative = PathBuf::from(hex::encode([key[0]]))
            .join(format!("{}-{}", hex::encode(key), suffix));
        let path = root.join(&relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        relative
    }

    fn write_plan(workspace: &Path, action_id: &str) {
        let plan = format!(
            r#"[{{"ID": 0, "Mode": "build", "Package": "example.com/hello", "NeedBuild": true, "ActionID": "{}"}}]"#,
            action_id
        );
        fs::write(workspace.join("actiongraph.json"), plan).unwrap();
    }

    fn record(version: &str) -> String {
        format!(
            "{} {} {}",
            version,
            hex::encode([0u8; 32]),
            hex::encode([0x11u8; 32])
        )
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        cachecarry(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("build cache"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        cachecarry(dir.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cachecarry"));
    }

    #[test]
    fn copies_action_and_output() {
        let dir = TempDir::new().unwrap();
        let from = go_cache(&dir.path().join("from"));
        let to = go_cache(&dir.path().join("to"));
        let action = write_entry(&from, [0; 32], 'a', &record("v1"));
        let output = write_entry(&from, [0x11; 32], 'd', "object file");
        write_plan(dir.path(), ZERO_ACTION_ID);

        cachecarry(dir.path())
            .args(["copy", "--from", "from", "--to", "to"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied 2 files"));

        assert!(to.join(action).is_file());
        assert_eq!(fs::read_to_string(to.join(output)).unwrap(), "object file");
    }

    #[test]
    fn missing_entry_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(go_cache(&dir.path().join("from"))).unwrap();
        write_plan(dir.path(), ZERO_ACTION_ID);

        cachecarry(dir.path())
            .args(["copy", "--from", "from", "--to", "to"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied 0 files"))
            .stdout(predicate::str::contains("not found: 1"))
            .stderr(predicate::str::contains("example.com/hello"));
    }

    #[test]
    fn invalid_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("actiongraph.json"), "this is not json").unwrap();

        cachecarry(dir.path())
            .args(["copy", "--from", "from", "--to", "to"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read build plan"));

        assert!(!dir.path().join("to").exists());
    }

    #[test]
    fn same_source_and_destination_is_fatal() {
        let dir = TempDir::new().unwrap();
        let from = go_cache(&dir.path().join("from"));
        let action = write_entry(&from, [0; 32], 'a', &record("v1"));
        write_plan(dir.path(), ZERO_ACTION_ID);

        cachecarry(dir.path())
            .args(["copy", "--from", "from", "--to", "from"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("same cache root"));

        assert_eq!(fs::read_to_string(from.join(action)).unwrap(), record("v1"));
    }

    #[test]
    fn wrong_version_keeps_action_record() {
        let dir = TempDir::new().unwrap();
        let from = go_cache(&dir.path().join("from"));
        let to = go_cache(&dir.path().join("to"));
        let action = write_entry(&from, [0; 32], 'a', &record("v2"));
        write_entry(&from, [0x11; 32], 'd', "object file");
        write_plan(dir.path(), ZERO_ACTION_ID);

        cachecarry(dir.path())
            .args(["copy", "--from", "from", "--to", "to"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no output: 1"));

        assert!(to.join(action).is_file());
        assert!(!to.join("11").exists());
    }

    #[test]
    fn json_report() {
        let dir = TempDir::new().unwrap();
        let from = go_cache(&dir.path().join("from"));
        write_entry(&from, [0; 32], 'a', &record("v1"));
        write_entry(&from, [0x11; 32], 'd', "object file");
        write_plan(dir.path(), ZERO_ACTION_ID);

        let output = cachecarry(dir.path())
            .args(["copy", "--from", "from", "--to", "to", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["processed"], 1);
        assert_eq!(report["copied"], 1);
        assert_eq!(report["stats"]["files"], 2);
    }

    #[test]
    fn explicit_cache_roots() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("Library/Caches/go-build");
        write_entry(&from, [0; 32], 'a', &record("v1"));
        write_entry(&from, [0x11; 32], 'd', "object file");
        let plan = format!(r#"[{{"ActionID": "{}"}}]"#, ZERO_ACTION_ID);
        fs::write(dir.path().join("plan.json"), plan).unwrap();

        cachecarry(dir.path())
            .args([
                "copy",
                "--from-cache",
                "Library/Caches/go-build",
                "--to-cache",
                "seeded",
                "--actiongraph",
                "plan.json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied 2 files"));

        assert!(dir.path().join("seeded/11").is_dir());
    }

    #[test]
    fn locate_shows_output() {
        let dir = TempDir::new().unwrap();
        let from = go_cache(&dir.path().join("from"));
        write_entry(&from, [0; 32], 'a', &record("v1"));

        cachecarry(dir.path())
            .args(["locate", ZERO_ACTION_ID, "--from", "from"])
            .assert()
            .success()
            .stdout(predicate::str::contains(hex::encode([0x11u8; 32])))
            .stdout(predicate::str::contains("missing"));
    }

    #[test]
    fn locate_missing_action_fails() {
        let dir = TempDir::new().unwrap();

        cachecarry(dir.path())
            .args(["locate", ZERO_ACTION_ID, "--from", "from"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No cache entry matched"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        cachecarry(dir.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no-config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        cachecarry(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("tool = \"go\""));
    }
}
