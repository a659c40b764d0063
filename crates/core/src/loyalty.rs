//! Reward-rate domain types: the editable configuration, spend input, and the
//! records produced by forward and inverse points calculations.
//!
//! Rates are linear: `rate` points are earned per `base_amount` spent through a
//! channel. The "points required" figure is always derived, never stored.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BASE_AMOUNT: f64 = 150.0;
pub const DEFAULT_ONLINE_RATE: f64 = 4.0;
pub const DEFAULT_NORMAL_RATE: f64 = 2.0;
pub const DEFAULT_MINIMUM_POINTS: f64 = 2500.0;
pub const DEFAULT_EXISTING_POINTS: f64 = 0.0;

// ─── Configuration Fields ───────────────────────────────────────────────────

/// The five editable fields of the reward schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ConfigField {
    BaseAmount,
    OnlineRate,
    NormalRate,
    /// Points balance required before redemption is permitted.
    MinimumPoints,
    ExistingPoints,
}

impl ConfigField {
    pub const ALL: [ConfigField; 5] = [
        ConfigField::BaseAmount,
        ConfigField::OnlineRate,
        ConfigField::NormalRate,
        ConfigField::MinimumPoints,
        ConfigField::ExistingPoints,
    ];

    /// Field name inside the persisted record.
    pub fn storage_key(&self) -> &'static str {
        match self {
            ConfigField::BaseAmount => "baseAmount",
            ConfigField::OnlineRate => "onlineRate",
            ConfigField::NormalRate => "normalRate",
            ConfigField::MinimumPoints => "minimumPoints",
            ConfigField::ExistingPoints => "existingPoints",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::BaseAmount => "Base Amount (Rs.)",
            ConfigField::OnlineRate => "Reward Points per Base Amount Online",
            ConfigField::NormalRate => "Reward Points per Base Amount Normally",
            ConfigField::MinimumPoints => "Minimum Reward Points Required",
            ConfigField::ExistingPoints => "Existing Reward Points",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown configuration field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for ConfigField {
    type Err = UnknownField;

    /// Accepts the persisted camelCase name as well as snake/kebab-case and
    /// short aliases (`base`, `online`, `normal`, `minimum`, `existing`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "baseamount" | "base" => Ok(ConfigField::BaseAmount),
            "onlinerate" | "online" => Ok(ConfigField::OnlineRate),
            "normalrate" | "normal" => Ok(ConfigField::NormalRate),
            "minimumpoints" | "minimumpointsthreshold" | "minimum" | "threshold" => {
                Ok(ConfigField::MinimumPoints)
            }
            "existingpoints" | "existing" => Ok(ConfigField::ExistingPoints),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

// ─── Field Values ───────────────────────────────────────────────────────────

/// A configuration field during editing: either cleared by the user
/// (not yet valid, distinct from zero) or holding a validated number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Unset,
    Value(f64),
}

impl FieldValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            FieldValue::Unset => None,
            FieldValue::Value(v) => Some(*v),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Unset)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Value(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unset => Ok(()),
            FieldValue::Value(v) => write!(f, "{v}"),
        }
    }
}

// ─── Reward Configuration ───────────────────────────────────────────────────

/// The reward schedule as held by the configuration store. Fields may be
/// unset while the user is editing; calculations resolve it into a
/// [`RateSchedule`] first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardConfig {
    pub base_amount: FieldValue,
    pub online_rate: FieldValue,
    pub normal_rate: FieldValue,
    pub minimum_points: FieldValue,
    pub existing_points: FieldValue,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BASE_AMOUNT,
            DEFAULT_ONLINE_RATE,
            DEFAULT_NORMAL_RATE,
            DEFAULT_MINIMUM_POINTS,
            DEFAULT_EXISTING_POINTS,
        )
    }
}

impl RewardConfig {
    pub fn new(
        base_amount: f64,
        online_rate: f64,
        normal_rate: f64,
        minimum_points: f64,
        existing_points: f64,
    ) -> Self {
        Self {
            base_amount: FieldValue::Value(base_amount),
            online_rate: FieldValue::Value(online_rate),
            normal_rate: FieldValue::Value(normal_rate),
            minimum_points: FieldValue::Value(minimum_points),
            existing_points: FieldValue::Value(existing_points),
        }
    }

    pub fn get(&self, field: ConfigField) -> FieldValue {
        match field {
            ConfigField::BaseAmount => self.base_amount,
            ConfigField::OnlineRate => self.online_rate,
            ConfigField::NormalRate => self.normal_rate,
            ConfigField::MinimumPoints => self.minimum_points,
            ConfigField::ExistingPoints => self.existing_points,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: FieldValue) {
        let slot = match field {
            ConfigField::BaseAmount => &mut self.base_amount,
            ConfigField::OnlineRate => &mut self.online_rate,
            ConfigField::NormalRate => &mut self.normal_rate,
            ConfigField::MinimumPoints => &mut self.minimum_points,
            ConfigField::ExistingPoints => &mut self.existing_points,
        };
        *slot = value;
    }

    /// Copy with one field replaced.
    pub fn with(mut self, field: ConfigField, value: impl Into<FieldValue>) -> Self {
        self.set(field, value.into());
        self
    }

    /// First field left empty by an in-progress edit, if any.
    pub fn first_unset(&self) -> Option<ConfigField> {
        ConfigField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_unset())
    }

    pub fn is_complete(&self) -> bool {
        self.first_unset().is_none()
    }

    /// Resolve into concrete numbers. Fails on the first unset field.
    pub fn schedule(&self) -> Result<RateSchedule, ConfigError> {
        let resolve = |field: ConfigField| {
            self.get(field)
                .value()
                .ok_or(ConfigError::UnsetField(field))
        };
        Ok(RateSchedule {
            base_amount: resolve(ConfigField::BaseAmount)?,
            online_rate: resolve(ConfigField::OnlineRate)?,
            normal_rate: resolve(ConfigField::NormalRate)?,
            minimum_points: resolve(ConfigField::MinimumPoints)?,
            existing_points: resolve(ConfigField::ExistingPoints)?,
        })
    }

    /// Net point deficit, or `None` while the threshold or balance is unset.
    pub fn points_required(&self) -> Option<f64> {
        let minimum = self.minimum_points.value()?;
        let existing = self.existing_points.value()?;
        Some(points_required(minimum, existing))
    }
}

/// `max(minimum - existing, 0)`.
pub fn points_required(minimum_points: f64, existing_points: f64) -> f64 {
    (minimum_points - existing_points).max(0.0)
}

/// A fully resolved reward schedule, the input of every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSchedule {
    pub base_amount: f64,
    pub online_rate: f64,
    pub normal_rate: f64,
    pub minimum_points: f64,
    pub existing_points: f64,
}

impl RateSchedule {
    pub fn points_required(&self) -> f64 {
        points_required(self.minimum_points, self.existing_points)
    }

    pub fn rate(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Online => self.online_rate,
            Channel::Normal => self.normal_rate,
        }
    }
}

impl From<RateSchedule> for RewardConfig {
    fn from(s: RateSchedule) -> Self {
        RewardConfig::new(
            s.base_amount,
            s.online_rate,
            s.normal_rate,
            s.minimum_points,
            s.existing_points,
        )
    }
}

// ─── Spending ───────────────────────────────────────────────────────────────

/// Spend category, each with its own independent rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Online,
    Normal,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Online, Channel::Normal];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Online => "Online",
            Channel::Normal => "Normal",
        }
    }
}

impl FromStr for Channel {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" | "onlinespend" => Ok(Channel::Online),
            "normal" | "normalspend" | "offline" => Ok(Channel::Normal),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Negative, NaN and infinite amounts count as zero.
pub fn clamp_spend(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Parse a user-entered spend amount; anything non-numeric becomes zero.
pub fn parse_spend(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(clamp_spend).unwrap_or(0.0)
}

/// Per-calculation spend amounts. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendInput {
    pub online_spend: f64,
    pub normal_spend: f64,
}

impl SpendInput {
    pub fn new(online_spend: f64, normal_spend: f64) -> Self {
        Self {
            online_spend,
            normal_spend,
        }
    }

    /// Spend for a channel after clamping.
    pub fn amount(&self, channel: Channel) -> f64 {
        clamp_spend(match channel {
            Channel::Online => self.online_spend,
            Channel::Normal => self.normal_spend,
        })
    }

    pub fn set(&mut self, channel: Channel, amount: f64) {
        match channel {
            Channel::Online => self.online_spend = amount,
            Channel::Normal => self.normal_spend = amount,
        }
    }
}

// ─── Results ────────────────────────────────────────────────────────────────

/// Forward calculation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub online_spend: f64,
    pub normal_spend: f64,
    pub points_from_online: f64,
    pub points_from_normal: f64,
    pub total_points: f64,
    pub meets_requirement: bool,
}

/// Spend needed through one channel, or `NotApplicable` when that
/// channel earns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredSpend {
    Amount(f64),
    NotApplicable,
}

impl RequiredSpend {
    pub fn amount(&self) -> Option<f64> {
        match self {
            RequiredSpend::Amount(v) => Some(*v),
            RequiredSpend::NotApplicable => None,
        }
    }
}

/// Inverse calculation output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumSpendResult {
    pub min_online_spend: RequiredSpend,
    pub min_normal_spend: RequiredSpend,
}

impl MinimumSpendResult {
    pub fn for_channel(&self, channel: Channel) -> RequiredSpend {
        match channel {
            Channel::Online => self.min_online_spend,
            Channel::Normal => self.min_normal_spend,
        }
    }
}
