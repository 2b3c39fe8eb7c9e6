//! Loading job directories.

use rdjob::ConfigError;
use rdjob::config::load_jobs_from_directory;
use rdjob::translate::TranslateError;
use tempfile::TempDir;

use crate::common::{FULL_JOB_YAML, minimal_job_yaml, write_file};

#[test]
fn test_loads_yaml_files_sorted_by_name() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.yaml", &minimal_job_yaml("second"));
    write_file(dir.path(), "a.yml", &minimal_job_yaml("first"));
    write_file(dir.path(), "c.yaml", FULL_JOB_YAML);

    let jobs = load_jobs_from_directory(dir.path()).unwrap();
    let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "deploy"]);
}

#[test]
fn test_ignores_other_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "job.yaml", &minimal_job_yaml("only"));
    write_file(dir.path(), "README.md", "# jobs");
    write_file(dir.path(), "job.yaml.bak", "not: [valid");

    let jobs = load_jobs_from_directory(dir.path()).unwrap();
    assert_eq!(jobs.len(), 1);
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(load_jobs_from_directory(dir.path()).unwrap().is_empty());
}

#[test]
fn test_not_a_directory() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "job.yaml", &minimal_job_yaml("x"));
    assert!(matches!(
        load_jobs_from_directory(&file),
        Err(ConfigError::InvalidConfig(_))
    ));
}

#[test]
fn test_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "good.yaml", &minimal_job_yaml("good"));
    write_file(dir.path(), "typo.yaml", "name: x\nproject_name: ops\ncomand: []\n");

    match load_jobs_from_directory(dir.path()) {
        Err(ConfigError::YamlFileError { path, .. }) => {
            assert!(path.ends_with("typo.yaml"));
        }
        other => panic!("Expected YamlFileError, got {:?}", other),
    }
}

#[test]
fn test_invalid_job_fails_whole_load() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "good.yaml", &minimal_job_yaml("good"));
    write_file(
        dir.path(),
        "bad.yaml",
        "name: bad\nproject_name: ops\nschedule: \"0 0 12\"\ncommand:\n  - shell_command: echo\n",
    );

    assert!(matches!(
        load_jobs_from_directory(dir.path()),
        Err(ConfigError::Translate(TranslateError::Schedule(_)))
    ));
}
