//! Points engine: forward (spend → points) and inverse (points → spend)
//! calculations over a reward schedule.

use reward_core::loyalty::*;
use reward_core::ConfigError;
use tracing::debug;

/// Stateless calculator. Every method is a pure function of its arguments;
/// configuration and spend are passed in, never held.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine;

impl PointsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Points earned for a spend pair.
    ///
    /// Negative or non-finite spend amounts count as zero. Fails when a
    /// configuration field is unset or the base amount is zero.
    pub fn calculate_points(
        &self,
        config: &RewardConfig,
        spend: &SpendInput,
    ) -> Result<CalculationResult, ConfigError> {
        let result = config
            .schedule()
            .and_then(|schedule| self.points_for_schedule(&schedule, spend));
        match &result {
            Ok(r) => {
                metrics::counter!("points.calculations").increment(1);
                debug!(
                    online = r.points_from_online,
                    normal = r.points_from_normal,
                    total = r.total_points,
                    meets = r.meets_requirement,
                    "Points calculated"
                );
            }
            Err(e) => {
                metrics::counter!("points.calculation_errors").increment(1);
                debug!(error = %e, "Points calculation refused");
            }
        }
        result
    }

    pub fn points_for_schedule(
        &self,
        schedule: &RateSchedule,
        spend: &SpendInput,
    ) -> Result<CalculationResult, ConfigError> {
        if schedule.base_amount == 0.0 {
            return Err(ConfigError::ZeroBaseAmount);
        }

        let online_spend = spend.amount(Channel::Online);
        let normal_spend = spend.amount(Channel::Normal);
        let points_from_online = (schedule.online_rate / schedule.base_amount) * online_spend;
        let points_from_normal = (schedule.normal_rate / schedule.base_amount) * normal_spend;
        let total_points = points_from_online + points_from_normal;

        Ok(CalculationResult {
            online_spend,
            normal_spend,
            points_from_online,
            points_from_normal,
            total_points,
            meets_requirement: total_points >= schedule.points_required(),
        })
    }

    /// Minimum spend through each channel alone to cover the points still
    /// required, rounded to cents.
    ///
    /// A channel with a zero rate reports `NotApplicable`. Callers are
    /// expected to check for a zero requirement first and show an
    /// "already met" state instead of calling this.
    pub fn calculate_minimum_spend(
        &self,
        config: &RewardConfig,
    ) -> Result<MinimumSpendResult, ConfigError> {
        let result = config
            .schedule()
            .and_then(|schedule| self.minimum_spend_for_schedule(&schedule));
        match &result {
            Ok(r) => {
                metrics::counter!("points.minimum_spend").increment(1);
                debug!(online = ?r.min_online_spend, normal = ?r.min_normal_spend, "Minimum spend calculated");
            }
            Err(e) => {
                metrics::counter!("points.calculation_errors").increment(1);
                debug!(error = %e, "Minimum spend calculation refused");
            }
        }
        result
    }

    pub fn minimum_spend_for_schedule(
        &self,
        schedule: &RateSchedule,
    ) -> Result<MinimumSpendResult, ConfigError> {
        if schedule.online_rate == 0.0 && schedule.normal_rate == 0.0 {
            return Err(ConfigError::ZeroRates);
        }
        if schedule.base_amount == 0.0 {
            return Err(ConfigError::ZeroBaseAmount);
        }

        let required = schedule.points_required();
        let for_channel = |channel: Channel| {
            let rate = schedule.rate(channel);
            if rate == 0.0 {
                RequiredSpend::NotApplicable
            } else {
                RequiredSpend::Amount(round_to_cents(required / (rate / schedule.base_amount)))
            }
        };

        Ok(MinimumSpendResult {
            min_online_spend: for_channel(Channel::Online),
            min_normal_spend: for_channel(Channel::Normal),
        })
    }
}

/// Round to two decimal places, halves away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
