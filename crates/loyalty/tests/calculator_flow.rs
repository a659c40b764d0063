//! End-to-end calculator flow over the file-backed store: load, edit,
//! calculate, then reopen as a new session would.

use reward_core::loyalty::*;
use reward_loyalty::{CalculatorSession, MinimumSpendOutcome};
use reward_store::{ConfigStore, FileStore, KeyValueStore};

const KEY: &str = "rewardCalculatorConfig";

fn open(path: &std::path::Path) -> CalculatorSession<FileStore> {
    CalculatorSession::new(ConfigStore::open(FileStore::new(path), KEY))
}

#[test]
fn test_default_schedule_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir.path().join("store.json"));

    session.set_spend(Channel::Online, "1000");
    session.set_spend(Channel::Normal, "500");
    let result = *session.calculate_points().unwrap();
    assert!((result.points_from_online - 26.666_666).abs() < 1e-5);
    assert!((result.points_from_normal - 6.666_666).abs() < 1e-5);
    assert!((result.total_points - 33.33).abs() < 0.01);
    assert!(!result.meets_requirement);

    match session.calculate_minimum_spend().unwrap() {
        MinimumSpendOutcome::Required(minimum) => {
            assert_eq!(minimum.min_online_spend, RequiredSpend::Amount(93750.0));
            assert_eq!(minimum.min_normal_spend, RequiredSpend::Amount(187500.0));
        }
        MinimumSpendOutcome::AlreadyMet => panic!("2500 points are still required"),
    }
}

#[test]
fn test_edits_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut session = open(&path);
    session.toggle_edit();
    session.edit_field(ConfigField::BaseAmount, "100").unwrap();
    session.edit_field(ConfigField::OnlineRate, "5").unwrap();
    session.edit_field(ConfigField::ExistingPoints, "500").unwrap();
    session.toggle_edit();
    drop(session);

    let restored = open(&path);
    assert_eq!(*restored.config(), RewardConfig::new(100.0, 5.0, 2.0, 2500.0, 500.0));
    assert_eq!(restored.points_required(), Some(2000.0));
    assert!(!restored.is_editing());
}

#[test]
fn test_stored_record_uses_camel_case_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut session = open(&path);
    session.toggle_edit();
    session.edit_field(ConfigField::MinimumPoints, "3000").unwrap();

    let raw = FileStore::new(&path).get(KEY).unwrap().unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(record["minimumPoints"], 3000.0);
    assert_eq!(record["baseAmount"], 150.0);
}

#[test]
fn test_corrupt_store_falls_back_to_defaults_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    FileStore::new(&path)
        .set(KEY, r#"{"baseAmount":"lots","onlineRate":4}"#)
        .unwrap();

    let mut session = open(&path);
    assert_eq!(*session.config(), RewardConfig::default());

    session.toggle_edit();
    session.edit_field(ConfigField::NormalRate, "3").unwrap();
    let restored = open(&path);
    assert_eq!(restored.config().normal_rate, FieldValue::Value(3.0));
}

#[test]
fn test_already_met_after_reaching_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir.path().join("store.json"));
    session.toggle_edit();
    session.edit_field(ConfigField::ExistingPoints, "2500").unwrap();

    assert_eq!(session.points_required(), Some(0.0));
    assert_eq!(
        session.calculate_minimum_spend().unwrap(),
        MinimumSpendOutcome::AlreadyMet
    );

    session.set_spend(Channel::Normal, "0");
    assert!(session.calculate_points().unwrap().meets_requirement);
}
