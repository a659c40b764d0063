//! Calculator session: the state a front-end drives between user actions.
//!
//! Holds the configuration store, the edit-mode flag, the current spend
//! entry and the latest results. Each action runs to completion; results
//! are replaced by the next calculation or dropped by [`CalculatorSession::clear`].

use crate::engine::PointsEngine;
use reward_core::loyalty::*;
use reward_core::ConfigError;
use reward_store::{ConfigStore, EditOutcome, KeyValueStore, RawValue};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Configuration is locked; switch to edit mode first")]
    Locked,
}

/// Result of asking for the minimum spend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinimumSpendOutcome {
    /// Existing points already cover the threshold; nothing was calculated.
    AlreadyMet,
    Required(MinimumSpendResult),
}

pub struct CalculatorSession<S> {
    config: ConfigStore<S>,
    engine: PointsEngine,
    editing: bool,
    spend: SpendInput,
    calculation: Option<CalculationResult>,
    minimum_spend: Option<MinimumSpendResult>,
}

impl<S: KeyValueStore> CalculatorSession<S> {
    /// Start a session locked, with empty spend and no results.
    pub fn new(config: ConfigStore<S>) -> Self {
        info!(
            key = config.key(),
            points_required = ?config.current().points_required(),
            "Calculator session started"
        );
        Self {
            config,
            engine: PointsEngine::new(),
            editing: false,
            spend: SpendInput::default(),
            calculation: None,
            minimum_spend: None,
        }
    }

    pub fn config(&self) -> &RewardConfig {
        self.config.current()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Flip between locked and editing. Returns the new state.
    pub fn toggle_edit(&mut self) -> bool {
        self.editing = !self.editing;
        debug!(editing = self.editing, "Edit mode toggled");
        self.editing
    }

    /// Edit one configuration field; only allowed in edit mode.
    pub fn edit_field(
        &mut self,
        field: ConfigField,
        raw: impl Into<RawValue>,
    ) -> Result<EditOutcome, SessionError> {
        if !self.editing {
            return Err(SessionError::Locked);
        }
        Ok(self.config.apply_edit(field, raw))
    }

    /// Record a spend entry. Returns the amount used for calculation.
    pub fn set_spend(&mut self, channel: Channel, raw: &str) -> f64 {
        let amount = parse_spend(raw);
        self.spend.set(channel, amount);
        amount
    }

    pub fn spend(&self) -> &SpendInput {
        &self.spend
    }

    pub fn points_required(&self) -> Option<f64> {
        self.config().points_required()
    }

    /// Existing points already cover the threshold.
    pub fn requirement_met(&self) -> bool {
        self.points_required() == Some(0.0)
    }

    /// Run the forward calculation on the current spend. On failure the
    /// previous result is dropped.
    pub fn calculate_points(&mut self) -> Result<&CalculationResult, ConfigError> {
        self.calculation = None;
        let result = self
            .engine
            .calculate_points(self.config.current(), &self.spend)?;
        Ok(&*self.calculation.insert(result))
    }

    /// Run the inverse calculation unless the requirement is already met.
    pub fn calculate_minimum_spend(&mut self) -> Result<MinimumSpendOutcome, ConfigError> {
        self.minimum_spend = None;
        if self.requirement_met() {
            debug!("Points requirement already met, minimum spend skipped");
            return Ok(MinimumSpendOutcome::AlreadyMet);
        }
        let result = self.engine.calculate_minimum_spend(self.config.current())?;
        self.minimum_spend = Some(result);
        Ok(MinimumSpendOutcome::Required(result))
    }

    pub fn calculation(&self) -> Option<&CalculationResult> {
        self.calculation.as_ref()
    }

    pub fn minimum_spend(&self) -> Option<&MinimumSpendResult> {
        self.minimum_spend.as_ref()
    }

    /// Empty the spend entry and drop both results.
    pub fn clear(&mut self) {
        self.spend = SpendInput::default();
        self.calculation = None;
        self.minimum_spend = None;
        debug!("Spend input and results cleared");
    }

    pub fn reset_config(&mut self) -> RewardConfig {
        self.config.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reward_store::MemoryStore;

    fn session() -> CalculatorSession<MemoryStore> {
        CalculatorSession::new(ConfigStore::open(MemoryStore::new(), "test"))
    }

    #[test]
    fn test_starts_locked_and_empty() {
        let session = session();
        assert!(!session.is_editing());
        assert_eq!(*session.spend(), SpendInput::default());
        assert!(session.calculation().is_none());
        assert!(session.minimum_spend().is_none());
        assert_eq!(session.points_required(), Some(2500.0));
    }

    #[test]
    fn test_edit_requires_edit_mode() {
        let mut session = session();
        assert_eq!(
            session.edit_field(ConfigField::OnlineRate, "6"),
            Err(SessionError::Locked)
        );
        assert_eq!(session.config().online_rate, FieldValue::Value(4.0));

        assert!(session.toggle_edit());
        assert_eq!(
            session.edit_field(ConfigField::OnlineRate, "6"),
            Ok(EditOutcome::Updated(6.0))
        );
        assert!(!session.toggle_edit());
        assert_eq!(session.config().online_rate, FieldValue::Value(6.0));
    }

    #[test]
    fn test_calculate_points_stores_result() {
        let mut session = session();
        assert_eq!(session.set_spend(Channel::Online, "1000"), 1000.0);
        assert_eq!(session.set_spend(Channel::Normal, "-20"), 0.0);

        let total = session.calculate_points().unwrap().total_points;
        assert!((total - 26.666_666).abs() < 1e-5);
        assert_eq!(session.calculation().map(|r| r.normal_spend), Some(0.0));
    }

    #[test]
    fn test_failed_calculation_drops_previous_result() {
        let mut session = session();
        session.set_spend(Channel::Online, "150");
        session.calculate_points().unwrap();

        session.toggle_edit();
        session.edit_field(ConfigField::BaseAmount, "0").unwrap();
        assert_eq!(
            session.calculate_points().map(|r| r.total_points),
            Err(ConfigError::ZeroBaseAmount)
        );
        assert!(session.calculation().is_none());
    }

    #[test]
    fn test_unset_threshold_blocks_calculations() {
        let mut session = session();
        session.toggle_edit();
        session.edit_field(ConfigField::MinimumPoints, "").unwrap();
        assert_eq!(session.points_required(), None);
        assert!(!session.requirement_met());
        assert_eq!(
            session.calculate_minimum_spend(),
            Err(ConfigError::UnsetField(ConfigField::MinimumPoints))
        );
        assert_eq!(
            session.calculate_points().map(|r| r.total_points),
            Err(ConfigError::UnsetField(ConfigField::MinimumPoints))
        );
    }

    #[test]
    fn test_minimum_spend_skipped_when_already_met() {
        let mut session = session();
        session.toggle_edit();
        session.edit_field(ConfigField::ExistingPoints, "2500").unwrap();
        assert!(session.requirement_met());
        assert_eq!(
            session.calculate_minimum_spend(),
            Ok(MinimumSpendOutcome::AlreadyMet)
        );
        assert!(session.minimum_spend().is_none());
    }

    #[test]
    fn test_minimum_spend_both_rates_zero() {
        let mut session = session();
        session.toggle_edit();
        session.edit_field(ConfigField::OnlineRate, 0.0).unwrap();
        session.edit_field(ConfigField::NormalRate, 0.0).unwrap();
        assert_eq!(
            session.calculate_minimum_spend(),
            Err(ConfigError::ZeroRates)
        );
        assert!(session.minimum_spend().is_none());
    }

    #[test]
    fn test_clear_drops_spend_and_results() {
        let mut session = session();
        session.set_spend(Channel::Online, "300");
        session.calculate_points().unwrap();
        session.calculate_minimum_spend().unwrap();

        session.clear();
        assert_eq!(*session.spend(), SpendInput::default());
        assert!(session.calculation().is_none());
        assert!(session.minimum_spend().is_none());
    }

    #[test]
    fn test_reset_config() {
        let mut session = session();
        session.toggle_edit();
        session.edit_field(ConfigField::NormalRate, "9").unwrap();
        assert_eq!(session.reset_config(), RewardConfig::default());
        assert_eq!(*session.config(), RewardConfig::default());
    }
}
