//! Factory telemetry records.
//!
//! Five record families share one shape: a required calendar `date`, a set of
//! optional measurements, and server-assigned timestamps. [`StatFields`] ties
//! each measurement struct to its [`StatKind`] so services, ports, and
//! handlers can stay generic over the family.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Validation errors for telemetry input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatValidationError {
    /// The `date` field was absent.
    #[error("date is required")]
    MissingDate,
    /// The `date` field was blank once trimmed.
    #[error("date must not be empty")]
    EmptyDate,
}

/// Calendar-day label attached to every telemetry record.
///
/// ## Invariants
/// - Trimmed and non-empty. The format is not otherwise constrained; clients
///   conventionally send `YYYY-MM-DD`.
///
/// # Examples
/// ```
/// use factory_backend::domain::StatDate;
///
/// let date = StatDate::new(" 2024-05-01 ").unwrap();
/// assert_eq!(date.as_ref(), "2024-05-01");
/// assert!(StatDate::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatDate(String);

impl StatDate {
    /// Validate and construct a date label.
    pub fn new(value: impl AsRef<str>) -> Result<Self, StatValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StatValidationError::EmptyDate);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Build a date label from an optional raw value.
    pub fn from_optional(value: Option<&str>) -> Result<Self, StatValidationError> {
        value.map_or(Err(StatValidationError::MissingDate), Self::new)
    }

    /// The UTC calendar day of `instant`, formatted as `YYYY-MM-DD`.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.format("%Y-%m-%d").to_string())
    }
}

impl AsRef<str> for StatDate {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StatDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StatDate {
    type Error = StatValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StatDate> for String {
    fn from(value: StatDate) -> Self {
        value.0
    }
}

/// The five telemetry record families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKind {
    /// Daily production output per product line.
    DailyProduction,
    /// Utility consumption.
    Energy,
    /// Equipment run time and faults.
    Equipment,
    /// Raw material consumption.
    MaterialUsage,
    /// Quality sampling results.
    Quality,
}

impl StatKind {
    /// Every kind, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::DailyProduction,
        Self::Energy,
        Self::Equipment,
        Self::MaterialUsage,
        Self::Quality,
    ];

    /// Path of the collection endpoint returning every record.
    pub const fn list_path(self) -> &'static str {
        match self {
            Self::DailyProduction => "/daily/getdailyProductionStats",
            Self::Energy => "/energy/getenergyStats",
            Self::Equipment => "/equipment/getequipmentStats",
            Self::MaterialUsage => "/material/getmaterialUsageStats",
            Self::Quality => "/quality/getqualityStats",
        }
    }

    /// Path of the endpoint accepting a new record.
    pub const fn record_path(self) -> &'static str {
        match self {
            Self::DailyProduction => "/daily/postdailyProductionStats",
            Self::Energy => "/energy/postenergyStats",
            Self::Equipment => "/equipment/postequipmentStats",
            Self::MaterialUsage => "/material/postmaterialUsageStats",
            Self::Quality => "/quality/postqualityStats",
        }
    }

    /// Short label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DailyProduction => "daily_production",
            Self::Energy => "energy",
            Self::Equipment => "equipment",
            Self::MaterialUsage => "material_usage",
            Self::Quality => "quality",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reads an optional count, accepting whole numbers written as floats
/// (`420.0`). Fractional values are rejected.
fn whole_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(value) = number.as_i64() {
        return Ok(Some(value));
    }
    number
        .as_f64()
        .filter(|value| value.fract() == 0.0)
        .and_then(|value| format!("{value:.0}").parse::<i64>().ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a whole number, found {number}")))
}

/// Measurement set of one telemetry family.
pub trait StatFields:
    Clone + fmt::Debug + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Family this measurement set belongs to.
    const KIND: StatKind;
}

/// Daily production measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProductionFields {
    /// Product line label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Units produced.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub total_output: Option<i64>,
    /// Defective share in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defective_rate: Option<f64>,
    /// Machines in service.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub machine_count: Option<i64>,
    /// Shift label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
}

impl StatFields for DailyProductionFields {
    const KIND: StatKind = StatKind::DailyProduction;
}

/// Energy consumption measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyFields {
    /// Electricity in kWh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity: Option<f64>,
    /// Water in tonnes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
    /// Gas in cubic metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<f64>,
    /// Output area in square metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_output: Option<f64>,
}

impl StatFields for EnergyFields {
    const KIND: StatKind = StatKind::Energy;
}

/// Equipment utilisation measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentFields {
    /// Equipment code such as `EQP-042`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_code: Option<String>,
    /// Hours running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
    /// Hours stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downtime: Option<f64>,
    /// Faults recorded.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub fault_count: Option<i64>,
    /// Utilisation in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilization_rate: Option<f64>,
}

impl StatFields for EquipmentFields {
    const KIND: StatKind = StatKind::Equipment;
}

/// Material consumption measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsageFields {
    /// Material label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_name: Option<String>,
    /// Kilograms consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_amount: Option<f64>,
    /// Kilograms left in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_remaining: Option<f64>,
}

impl StatFields for MaterialUsageFields {
    const KIND: StatKind = StatKind::MaterialUsage;
}

/// Quality sampling measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityFields {
    /// Product line label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Samples inspected.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub sample_count: Option<i64>,
    /// Samples that passed.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub qualified_count: Option<i64>,
    /// Mean thickness in micrometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_thickness: Option<f64>,
    /// Mean porosity in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_porosity: Option<f64>,
    /// Mean tensile strength in MPa.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_strength: Option<f64>,
}

impl StatFields for QualityFields {
    const KIND: StatKind = StatKind::Quality;
}

/// A telemetry record awaiting persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatDraft<F> {
    /// Calendar day of the measurement.
    pub date: StatDate,
    /// Measurements.
    #[serde(flatten)]
    pub fields: F,
}

impl<F: StatFields> StatDraft<F> {
    /// Pair a validated date with a measurement set.
    pub fn new(date: StatDate, fields: F) -> Self {
        Self { date, fields }
    }
}

/// A persisted telemetry record.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRecord<F> {
    /// Storage identifier; never exposed to callers.
    pub id: Uuid,
    /// Calendar day of the measurement.
    pub date: StatDate,
    /// Measurements.
    pub fields: F,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time; equal to `created_at` for immutable records.
    pub updated_at: DateTime<Utc>,
}

impl<F: StatFields> StatRecord<F> {
    /// Stamp a draft with an identifier and insertion time.
    pub fn from_draft(draft: StatDraft<F>, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            date: draft.date,
            fields: draft.fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public projection of the record.
    pub fn to_view(&self) -> StatView<F> {
        StatView {
            date: self.date.clone(),
            fields: self.fields.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Public projection of a telemetry record, without the storage identifier.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use factory_backend::domain::{EnergyFields, StatDate, StatDraft, StatRecord};
/// use uuid::Uuid;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
/// let draft = StatDraft::new(
///     StatDate::new("2024-05-01").unwrap(),
///     EnergyFields { gas: Some(2.5), ..EnergyFields::default() },
/// );
/// let view = StatRecord::from_draft(draft, Uuid::nil(), now).to_view();
/// let json = serde_json::to_value(&view).unwrap();
/// assert_eq!(json["gas"], 2.5);
/// assert!(json.get("id").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatView<F> {
    /// Calendar day of the measurement.
    pub date: StatDate,
    /// Measurements.
    #[serde(flatten)]
    pub fields: F,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
