use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const CONFIG: &str = r"
candidate:
  name: Alex Rivera
  phone: 555.867.5309
  email: alex.rivera@example.com
paths:
  output_dir: /nonexistent/should-not-be-used
qualifications:
  summary: Platform engineer.
  skills:
    - {category: Languages, items: 'Python, Rust'}
  experience:
    - title: Senior Software Engineer
      company: BigTech Inc.
      dates: Mar 2021 - Present
      bullets:
        - text: Led team of 6 engineers
          highlights: [6 engineers]
  certifications:
    - {name: CKA, year: 2022}
";

const APPLICATION: &str = r#"
job:
  title: Staff Engineer
  company: Acme Corp
  location: Remote
  date: May 1, 2026
cover_letter:
  opening: I am writing to apply for the Staff Engineer role.
  sections:
    - title: Technical Leadership
      paragraphs:
        - label: Platform Migration
          text: Led a team of 6 engineers
          highlights: ["6 engineers"]
"#;

fn jobdocs(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jobdocs").unwrap();
    cmd.env("JOBDOCS_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_config(home: &Path, content: &str) {
    fs::create_dir_all(home).unwrap();
    fs::write(home.join("config.yaml"), content).unwrap();
}

#[test]
fn test_generate_fills_from_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path().join("home");
    let out = temp_dir.path().join("out");
    write_config(&home, CONFIG);
    let app = temp_dir.path().join("application.yaml");
    fs::write(&app, APPLICATION).unwrap();

    jobdocs(&home)
        .arg("generate")
        .arg(&app)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Alex_Rivera_Cover_Letter_Staff_Engineer_Acme_Corp.docx",
        ))
        .stdout(predicate::str::contains(
            "Alex_Rivera_Resume_Staff_Engineer_Acme_Corp.docx",
        ));

    let resume = out.join("Alex_Rivera_Resume_Staff_Engineer_Acme_Corp.docx");
    assert!(resume.is_file());

    jobdocs(&home)
        .arg("extract")
        .arg(&resume)
        .arg("--full")
        .assert()
        .success()
        .stdout(predicate::str::contains("Senior Software Engineer"))
        .stdout(predicate::str::contains("Led team of 6 engineers"));
}

#[test]
fn test_generate_without_config_reports_missing_data() {
    let temp_dir = tempfile::tempdir().unwrap();
    let app = temp_dir.path().join("application.yaml");
    fs::write(&app, APPLICATION).unwrap();

    jobdocs(&temp_dir.path().join("empty-home"))
        .arg("generate")
        .arg(&app)
        .arg("-o")
        .arg(temp_dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Missing candidate"));
}

#[test]
fn test_extract_preview_and_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let resume = temp_dir.path().join("resume.txt");
    fs::write(&resume, "x".repeat(600)).unwrap();

    jobdocs(temp_dir.path())
        .arg("extract")
        .arg(&resume)
        .assert()
        .success()
        .stdout(format!("{}...\n", "x".repeat(500)));

    let output = jobdocs(temp_dir.path())
        .arg("extract")
        .arg(&resume)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["characters"], 600);
    assert_eq!(json["truncated"], true);
}

#[test]
fn test_extract_unsupported_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pdf = temp_dir.path().join("resume.pdf");
    fs::write(&pdf, "%PDF").unwrap();

    jobdocs(temp_dir.path())
        .arg("extract")
        .arg(&pdf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: .pdf"));
}

#[test]
fn test_import_file_prints_next_steps() {
    let temp_dir = tempfile::tempdir().unwrap();
    let resume = temp_dir.path().join("resume.md");
    fs::write(&resume, "# Alex Rivera\nEngineer").unwrap();

    jobdocs(temp_dir.path())
        .arg("import")
        .arg(&resume)
        .assert()
        .success()
        .stdout(predicate::str::contains("EXTRACTED TEXT (first 500 characters)"))
        .stdout(predicate::str::contains("# Alex Rivera"))
        .stdout(predicate::str::contains("NEXT STEPS"));
}

#[test]
fn test_import_wizard_saves_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path().join("home");
    // name, four blank contact fields, summary, then blank sections and save
    let script = "Sam Lee\n\n\n\n\nBuilds things.\n\n\n\n\n\ny\n";

    jobdocs(&home)
        .arg("import")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved to:"));

    let saved = fs::read_to_string(home.join("config.yaml")).unwrap();
    assert!(saved.contains("Sam Lee"));
    assert!(saved.contains("Builds things."));
}

#[test]
fn test_profile_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    write_config(home, CONFIG);

    jobdocs(home)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout("No saved profiles.\n");

    jobdocs(home).args(["profile", "save", "work"]).assert().success();
    jobdocs(home)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout("* work\n");

    // declining the overwrite prompt leaves things alone
    jobdocs(home)
        .args(["profile", "save", "work"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    jobdocs(home)
        .args(["profile", "delete", "work", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete active profile 'work'"));

    // start fresh, saving nothing
    jobdocs(home)
        .args(["profile", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active configuration cleared."));
    assert!(!home.join("config.yaml").exists());

    jobdocs(home)
        .args(["profile", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active configuration"));

    jobdocs(home)
        .args(["profile", "switch", "work"])
        .assert()
        .success();
    jobdocs(home)
        .args(["profile", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current profile: work"))
        .stdout(predicate::str::contains("Experience: 1 positions"));

    jobdocs(home)
        .args(["profile", "switch", "missing"])
        .assert()
        .failure()
        .stderr("Error: Profile 'missing' not found\n");
}

#[test]
fn test_switch_offers_to_save_unsaved_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    write_config(home, "candidate:\n  name: Other\n");
    fs::create_dir_all(home.join("profiles")).unwrap();
    fs::write(home.join("profiles/work.yaml"), CONFIG).unwrap();

    jobdocs(home)
        .args(["profile", "switch", "work"])
        .write_stdin("y\nside-project\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved current configuration as 'side-project'."));

    let saved = fs::read_to_string(home.join("profiles/side-project.yaml")).unwrap();
    assert!(saved.contains("Other"));
    assert_eq!(
        fs::read_to_string(home.join("config.yaml")).unwrap(),
        CONFIG
    );
}

#[test]
fn test_export_and_load_profile() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("source");
    let target = temp_dir.path().join("target");
    let exported = temp_dir.path().join("alex.yaml");
    write_config(&source, CONFIG);
    write_config(&target, "paths:\n  output_dir: /keep/me\n");

    jobdocs(&source)
        .arg("export-profile")
        .arg("-o")
        .arg(&exported)
        .assert()
        .success();
    let profile = fs::read_to_string(&exported).unwrap();
    assert!(profile.contains("Alex Rivera"));
    assert!(!profile.contains("output_dir"));

    jobdocs(&target)
        .arg("load-profile")
        .arg(&exported)
        .assert()
        .success();
    let config = fs::read_to_string(target.join("config.yaml")).unwrap();
    assert!(config.contains("Alex Rivera"));
    assert!(config.contains("/keep/me"));
}

#[test]
fn test_status() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    jobdocs(home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active configuration."));

    write_config(home, CONFIG);
    jobdocs(home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current profile: (unsaved)"))
        .stdout(predicate::str::contains("Name: Alex Rivera"))
        .stdout(predicate::str::contains(
            "Output directory: /nonexistent/should-not-be-used",
        ));
}
