//! Integration tests for configuration loading and validation

use courier::config::{
    load_config, load_config_or_default, CourierConfig, DuplicateSegmentPolicy,
    ObservationFailurePolicy,
};
use courier::core::convert::Converter;
use courier::domain::ResourceStatus;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("COURIER_APPLICATION_LOG_LEVEL");
    std::env::remove_var("COURIER_MAPPING_STATUS");
    std::env::remove_var("COURIER_MAPPING_CODE_SYSTEM");
    std::env::remove_var("COURIER_PARSER_DUPLICATE_SEGMENTS");
    std::env::remove_var("TEST_COURIER_CODE_SYSTEM");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "warn"

[parser]
duplicate_segments = "reject"

[mapping]
code_system = "urn:oid:2.16.840.1.113883.6.1"
unit_system = "urn:units"
status = "preliminary"
observation_failures = "skip"

[output]
pretty = false

[logging]
local_enabled = true
local_path = "/tmp/courier"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.parser.duplicate_segments, DuplicateSegmentPolicy::Reject);
    assert_eq!(config.mapping.code_system, "urn:oid:2.16.840.1.113883.6.1");
    assert_eq!(config.mapping.status, ResourceStatus::Preliminary);
    assert_eq!(
        config.mapping.observation_failures,
        ObservationFailurePolicy::Skip
    );
    assert!(!config.output.pretty);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution_and_override() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_COURIER_CODE_SYSTEM", "urn:substituted");
    std::env::set_var("COURIER_MAPPING_STATUS", "corrected");

    let temp_file = write_config(
        r#"
# code_system = "${NOT_SET_BUT_COMMENTED}"
[mapping]
code_system = "${TEST_COURIER_CODE_SYSTEM}"
"#,
    );
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.mapping.code_system, "urn:substituted");
    assert_eq!(config.mapping.status, ResourceStatus::Corrected);
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[mapping]\ncode_system = \"${TEST_COURIER_CODE_SYSTEM}\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_COURIER_CODE_SYSTEM"));
    assert_eq!(err.kind(), "ConfigurationError");
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[mapping]\nstatus = \"done\"\n",
        "[mapping]\nobservation_failures = \"ignore\"\n",
        "[mapping]\ncode_system = \"\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let temp_file = write_config(contents);
        assert!(load_config(temp_file.path()).is_err(), "accepted: {contents}");
    }
}

#[test]
fn test_uppercase_log_level_accepted() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[application]\nlog_level = \"INFO\"\n");
    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "INFO");
}

#[test]
fn test_defaults_when_file_missing() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = load_config_or_default(dir.path().join("courier.toml")).unwrap();
    assert_eq!(config, CourierConfig::default());
}

#[test]
fn test_config_drives_mapping() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[mapping]\ncode_system = \"urn:local\"\nstatus = \"amended\"\n");
    let config = load_config(temp_file.path()).unwrap();

    let text = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|202401151030||ORU^R01|MSG001|P|2.5\n\
                PID|1||PAT123||Doe^John||19800101|M\n\
                ORC|RE|ORD1|FIL1||CM\n\
                OBR|1|ORD1|FIL1|1234-5^Glucose|||20240115\n\
                OBX|1|NM|5678-9^Sodium||140|mmol/L|135-145|N|||F";
    let bundle = Converter::new(config).convert_message(text).unwrap().output;
    let json = serde_json::to_value(&bundle).unwrap();

    assert_eq!(json["entry"][0]["resource"]["status"], "amended");
    assert_eq!(
        json["entry"][1]["resource"]["code"]["coding"][0]["system"],
        "urn:local"
    );
}
