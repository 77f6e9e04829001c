use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const FIXTURE: &str = r#"{
    "metadata": {"title": "Fixture System", "version": "test"},
    "sections": {
        "2c-opening": {
            "id": "2c-opening",
            "title": "2♣ Opening: strong and artificial",
            "content": {
                "overview": "Any 22+ hand",
                "sections": [
                    {"title": "Responses", "type": "table", "data": [
                        {"bid": "2c2d", "description": "Waiting, see Kokish", "cellType": "responder",
                         "links": [{"text": "Kokish", "type": "green", "target": "kokish"}]}
                    ]}
                ]
            }
        }
    },
    "sequences": {},
    "definitions": {
        "kokish": {"id": "kokish", "title": "Kokish Relay", "definition": "2h relay after 2c-2d"}
    }
}"#;

fn bidbook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bidbook").unwrap();
    cmd.env("BIDBOOK_HOME", home)
        .env_remove("BIDBOOK_LOG")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_toc_lists_embedded_sections() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("toc")
        .assert()
        .success()
        .stdout(predicate::str::contains("1c-opening"))
        .stdout(predicate::str::contains("1c-intervention"))
        .stdout(predicate::str::contains("1M-opening"));
}

#[test]
fn test_no_command_shows_toc() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1c-opening"));
}

#[test]
fn test_show_numbers_references() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("show")
        .arg("1c-opening")
        .assert()
        .success()
        .stdout(predicate::str::contains("[section]"))
        .stdout(predicate::str::contains("Walsh[1]"))
        .stdout(predicate::str::contains("Opener Rebids[2]"))
        .stdout(predicate::str::contains("Non support showing responses"));
}

#[test]
fn test_show_section_without_content() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("show")
        .arg("1M-opening")
        .assert()
        .success()
        .stdout(predicate::str::contains("1M opening"))
        .stdout(predicate::str::contains("No content available"));
}

#[test]
fn test_sequence_prints_only_its_panel() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("sequence")
        .arg("1c-1d-rebids")
        .assert()
        .success()
        .stdout(predicate::str::contains("[sequence]"))
        .stdout(predicate::str::contains("Rebids to show balanced hands"))
        .stdout(predicate::str::contains("[section]").not());
}

#[test]
fn test_definition_prints_overlay() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("def")
        .arg("walsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("[definition]"))
        .stdout(predicate::str::contains("Walsh Convention"))
        .stdout(predicate::str::contains("7+ ♦, any strength"));
}

#[test]
fn test_missing_definition_shows_notice() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("definition")
        .arg("no-such-thing")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content Not Available"))
        .stdout(predicate::str::contains("no-such-thing"));
}

#[test]
fn test_search_lists_hits_and_opens_first() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("search")
        .arg("reverse")
        .arg("flannery")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1c-opening)"))
        .stdout(predicate::str::contains("[section]"));
}

#[test]
fn test_search_without_hits() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("search")
        .arg("zzzz")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sections match 'zzzz'"));
}

#[test]
fn test_source_file_is_used() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("doc.json");
    fs::write(&source, FIXTURE).unwrap();

    bidbook(temp_dir.path())
        .arg("--source")
        .arg(&source)
        .arg("show")
        .arg("2c-opening")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kokish[1]"))
        .stderr(predicate::str::contains("embedded").not());
}

#[test]
fn test_missing_source_falls_back_with_warning() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("--source")
        .arg(temp_dir.path().join("absent.json"))
        .arg("toc")
        .assert()
        .success()
        .stdout(predicate::str::contains("1c-opening"))
        .stderr(predicate::str::contains(
            "Loading from embedded data due to network issues.",
        ));
}

#[test]
fn test_export_to_stdout_is_plain_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = bidbook(temp_dir.path())
        .arg("export")
        .arg("-")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["sections"].get("1c-opening").is_some());
    assert_eq!(json["bid_colors"]["opener"], "#d1fae5");
}

#[test]
fn test_export_to_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("out.json");

    bidbook(temp_dir.path())
        .arg("export")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"walsh\""));
}

#[test]
fn test_import_merges_and_writes_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let update = temp_dir.path().join("update.json");
    fs::write(
        &update,
        r#"{"definitions": {"kokish": {"id": "kokish", "title": "Kokish Relay"}}}"#,
    )
    .unwrap();
    let output = temp_dir.path().join("merged.json");

    bidbook(temp_dir.path())
        .arg("import")
        .arg(&update)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data imported successfully!"))
        .stdout(predicate::str::contains("Replaced definitions"));

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(merged["definitions"].get("kokish").is_some());
    // Shallow merge: the imported mapping replaces the embedded one.
    assert!(merged["definitions"].get("walsh").is_none());
    assert!(merged["sections"].get("1c-opening").is_some());
}

#[test]
fn test_import_of_malformed_file_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{ nope").unwrap();

    bidbook(temp_dir.path())
        .arg("import")
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_config_set_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();

    bidbook(temp_dir.path())
        .arg("config")
        .arg("title_limit")
        .arg("20")
        .assert()
        .success()
        .stdout(predicate::str::contains("title_limit set to 20"));

    bidbook(temp_dir.path())
        .arg("config")
        .arg("title_limit")
        .assert()
        .success()
        .stdout(predicate::str::contains("20"));

    bidbook(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("title_limit = 20"))
        .stdout(predicate::str::contains("export_file = uma-ps-system.json"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("config")
        .arg("colour")
        .arg("red")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown config key 'colour'"));
}

#[test]
fn test_configured_source_is_used() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("doc.json");
    fs::write(&source, FIXTURE).unwrap();

    bidbook(temp_dir.path())
        .arg("config")
        .arg("source")
        .arg(source.to_str().unwrap())
        .assert()
        .success();

    bidbook(temp_dir.path())
        .arg("toc")
        .assert()
        .success()
        .stdout(predicate::str::contains("2c-opening"))
        .stdout(predicate::str::contains("1c-opening").not());
}

#[test]
fn test_browse_follows_references() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("browse")
        .write_stdin("show 1c-opening\n2\n1\nesc\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[sequence]"))
        .stdout(predicate::str::contains("Opener rebids over"))
        .stdout(predicate::str::contains("[definition]"))
        .stdout(predicate::str::contains("Walsh Convention"));
}

#[test]
fn test_browse_reports_bad_input_and_continues() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("browse")
        .arg("1c-opening")
        .write_stdin("frobnicate\n99\nhelp\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command 'frobnicate'"))
        .stdout(predicate::str::contains("Reference 99 not found"))
        .stdout(predicate::str::contains("Follow reference [N]"));
}

#[test]
fn test_browse_search_shortcut() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("browse")
        .write_stdin("/walsh\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1c-opening)"));
}

#[cfg(unix)]
#[test]
fn test_edit_round_trips_through_editor() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    let script = temp_dir.path().join("fake-editor.sh");
    fs::write(
        &script,
        "#!/bin/sh\nprintf 'Gerber\\n\\n4c asks for aces' > \"$1\"\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    bidbook(temp_dir.path())
        .env("EDITOR", &script)
        .arg("edit")
        .arg("definition")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content saved successfully!"));
}

#[cfg(unix)]
#[test]
fn test_edit_with_blank_title_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .env("EDITOR", "true")
        .arg("edit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_version() {
    let temp_dir = tempfile::tempdir().unwrap();
    bidbook(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bidbook"));
}
