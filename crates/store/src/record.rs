//! Encoding of the persisted configuration record. Values may arrive as JSON
//! numbers or numeric strings; both are accepted on decode, numbers are
//! always written.

use reward_core::loyalty::{ConfigField, RateSchedule};
use reward_core::PersistenceDecodeError;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    base_amount: Option<NumericValue>,
    online_rate: Option<NumericValue>,
    normal_rate: Option<NumericValue>,
    minimum_points: Option<NumericValue>,
    existing_points: Option<NumericValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericValue {
    Number(f64),
    Text(String),
}

pub(crate) fn encode(schedule: &RateSchedule) -> serde_json::Result<String> {
    serde_json::to_string(schedule)
}

pub(crate) fn decode(raw: &str) -> Result<RateSchedule, PersistenceDecodeError> {
    let record: StoredRecord = serde_json::from_str(raw)?;

    let schedule = RateSchedule {
        base_amount: require(ConfigField::BaseAmount, record.base_amount)?,
        online_rate: require(ConfigField::OnlineRate, record.online_rate)?,
        normal_rate: require(ConfigField::NormalRate, record.normal_rate)?,
        minimum_points: require(ConfigField::MinimumPoints, record.minimum_points)?,
        existing_points: require(ConfigField::ExistingPoints, record.existing_points)?,
    };

    if schedule.base_amount <= 0.0 {
        return Err(invalid(
            ConfigField::BaseAmount,
            format!("{} must be greater than zero", schedule.base_amount),
        ));
    }
    Ok(schedule)
}

fn require(
    field: ConfigField,
    value: Option<NumericValue>,
) -> Result<f64, PersistenceDecodeError> {
    let number = match value {
        None => return Err(PersistenceDecodeError::MissingField(field.storage_key())),
        Some(NumericValue::Number(n)) => n,
        Some(NumericValue::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(field, format!("'{text}' is not a number")))?,
    };
    if !number.is_finite() {
        return Err(invalid(field, format!("{number} is not finite")));
    }
    if number < 0.0 {
        return Err(invalid(field, format!("{number} is negative")));
    }
    Ok(number)
}

fn invalid(field: ConfigField, reason: String) -> PersistenceDecodeError {
    PersistenceDecodeError::InvalidField {
        field: field.storage_key(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_schedule() -> RateSchedule {
        RateSchedule {
            base_amount: 150.0,
            online_rate: 4.0,
            normal_rate: 2.0,
            minimum_points: 2500.0,
            existing_points: 0.0,
        }
    }

    #[test]
    fn test_encode_uses_persisted_field_names() {
        let json = encode(&default_schedule()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["baseAmount"], 150.0);
        assert_eq!(value["onlineRate"], 4.0);
        assert_eq!(value["normalRate"], 2.0);
        assert_eq!(value["minimumPoints"], 2500.0);
        assert_eq!(value["existingPoints"], 0.0);
    }

    #[test]
    fn test_decode_accepts_numeric_strings() {
        let raw = r#"{"baseAmount":"100","onlineRate":" 5.5 ","normalRate":1,
                      "minimumPoints":"1000","existingPoints":250}"#;
        let schedule = decode(raw).unwrap();
        assert_eq!(schedule.base_amount, 100.0);
        assert_eq!(schedule.online_rate, 5.5);
        assert_eq!(schedule.normal_rate, 1.0);
        assert_eq!(schedule.minimum_points, 1000.0);
        assert_eq!(schedule.existing_points, 250.0);
    }

    #[test]
    fn test_decode_missing_field() {
        let raw = r#"{"baseAmount":150,"onlineRate":4,"normalRate":2,"minimumPoints":2500}"#;
        assert!(matches!(
            decode(raw),
            Err(PersistenceDecodeError::MissingField("existingPoints"))
        ));
    }

    #[test]
    fn test_decode_null_counts_as_missing() {
        let raw = r#"{"baseAmount":null,"onlineRate":4,"normalRate":2,"minimumPoints":2500,"existingPoints":0}"#;
        assert!(matches!(
            decode(raw),
            Err(PersistenceDecodeError::MissingField("baseAmount"))
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_values() {
        let cases = [
            r#"{"baseAmount":0,"onlineRate":4,"normalRate":2,"minimumPoints":2500,"existingPoints":0}"#,
            r#"{"baseAmount":150,"onlineRate":-4,"normalRate":2,"minimumPoints":2500,"existingPoints":0}"#,
            r#"{"baseAmount":150,"onlineRate":4,"normalRate":"two","minimumPoints":2500,"existingPoints":0}"#,
            r#"{"baseAmount":150,"onlineRate":4,"normalRate":2,"minimumPoints":"","existingPoints":0}"#,
        ];
        for raw in cases {
            assert!(
                matches!(decode(raw), Err(PersistenceDecodeError::InvalidField { .. })),
                "expected invalid field for {raw}"
            );
        }
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(matches!(
            decode("{baseAmount: 150"),
            Err(PersistenceDecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode("[1, 2, 3]"),
            Err(PersistenceDecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode(r#"{"baseAmount":true}"#),
            Err(PersistenceDecodeError::Malformed(_))
        ));
    }
}
