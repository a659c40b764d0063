//! Text rendering of configuration and results. Amounts show two decimals
//! in rupees.

use reward_core::loyalty::*;
use reward_store::{EditOutcome, KeyValueStore};
use reward_loyalty::{CalculatorSession, MinimumSpendOutcome};

pub fn money(amount: f64) -> String {
    format!("Rs. {amount:.2}")
}

fn required_spend(spend: RequiredSpend) -> String {
    match spend {
        RequiredSpend::Amount(amount) => money(amount),
        RequiredSpend::NotApplicable => "N/A (this channel earns no points)".to_string(),
    }
}

pub fn config<S: KeyValueStore>(session: &CalculatorSession<S>) -> String {
    let config = session.config();
    let mode = if session.is_editing() { "editing" } else { "locked" };
    let mut out = format!("Configure Reward Rates [{mode}]\n");
    for field in ConfigField::ALL {
        let value = match config.get(field) {
            FieldValue::Unset => "(empty)".to_string(),
            value => value.to_string(),
        };
        out.push_str(&format!("  {:<40} {value}\n", format!("{}:", field.label())));
    }
    match session.points_required() {
        Some(required) if required == 0.0 => {
            out.push_str("Minimum points requirement already met");
        }
        Some(required) => {
            out.push_str(&format!("Minimum Spend to Achieve {required} Points"));
        }
        None => out.push_str("Points required: enter the minimum and existing points"),
    }
    out
}

pub fn calculation(result: &CalculationResult) -> String {
    let verdict = if result.meets_requirement {
        "(Meets Requirement)"
    } else {
        "(Does Not Meet Requirement)"
    };
    format!(
        "Calculation Result\n  Online Spend: {}\n  Normal Spend: {}\n  \
         Points from Online Spend: {:.2}\n  Points from Normal Spend: {:.2}\n  \
         Total Points: {:.2} {verdict}",
        money(result.online_spend),
        money(result.normal_spend),
        result.points_from_online,
        result.points_from_normal,
        result.total_points,
    )
}

pub fn minimum_spend(outcome: &MinimumSpendOutcome) -> String {
    match outcome {
        MinimumSpendOutcome::AlreadyMet => {
            "You already have enough points; no further spend is required".to_string()
        }
        MinimumSpendOutcome::Required(result) => format!(
            "Total Online Spend Required: {}\nTotal Normal Spend Required: {}",
            required_spend(result.min_online_spend),
            required_spend(result.min_normal_spend),
        ),
    }
}

pub fn edit(field: ConfigField, outcome: &EditOutcome) -> String {
    match outcome {
        EditOutcome::Updated(value) => format!("{field} set to {value}"),
        EditOutcome::Cleared => format!("{field} cleared; enter a value before calculating"),
        EditOutcome::Rejected { raw, reason } => {
            format!("'{raw}' rejected for {field}: {reason}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reward_store::{ConfigStore, MemoryStore};

    #[test]
    fn test_config_lists_every_field_and_target() {
        let mut session = CalculatorSession::new(ConfigStore::open(MemoryStore::new(), "test"));
        let text = config(&session);
        assert!(text.starts_with("Configure Reward Rates [locked]\n"));
        for field in ConfigField::ALL {
            let line = format!("  {:<40} ", format!("{}:", field.label()));
            assert!(text.contains(&line), "missing line for {field:?}");
        }
        assert_eq!(text.lines().count(), ConfigField::ALL.len() + 2);
        assert!(text.ends_with("Minimum Spend to Achieve 2500 Points"));

        session.toggle_edit();
        session.edit_field(ConfigField::ExistingPoints, "").unwrap();
        let text = config(&session);
        assert!(text.contains("(empty)"));
        assert!(text.ends_with("enter the minimum and existing points"));
    }

    #[test]
    fn test_calculation_default_example() {
        let result = CalculationResult {
            online_spend: 1000.0,
            normal_spend: 500.0,
            points_from_online: 26.666_666_666_666_668,
            points_from_normal: 6.666_666_666_666_667,
            total_points: 33.333_333_333_333_336,
            meets_requirement: false,
        };
        let text = calculation(&result);
        assert!(text.contains("Online Spend: Rs. 1000.00"));
        assert!(text.contains("Points from Online Spend: 26.67"));
        assert!(text.contains("Total Points: 33.33 (Does Not Meet Requirement)"));
    }

    #[test]
    fn test_minimum_spend_not_applicable() {
        let outcome = MinimumSpendOutcome::Required(MinimumSpendResult {
            min_online_spend: RequiredSpend::Amount(93750.0),
            min_normal_spend: RequiredSpend::NotApplicable,
        });
        let text = minimum_spend(&outcome);
        assert!(text.contains("Online Spend Required: Rs. 93750.00"));
        assert!(text.contains("Normal Spend Required: N/A"));
    }

    #[test]
    fn test_edit_messages() {
        assert_eq!(
            edit(ConfigField::OnlineRate, &EditOutcome::Updated(5.0)),
            "Reward Points per Base Amount Online set to 5"
        );
        assert!(edit(ConfigField::BaseAmount, &EditOutcome::Cleared).contains("cleared"));
    }
}
