//! Zone and extra-charge records.

use serde::{Deserialize, Deserializer, Serialize};
use zc_core::{MONEY_DIGITS, SignMode, WEIGHT_DIGITS, ZoneId, fit_number};

/// One weight bracket of a zone: charge `charge_value` applies between
/// `min_weight` and `max_weight`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtraCharge {
    #[serde(deserialize_with = "amount_text")]
    pub min_weight: String,
    #[serde(deserialize_with = "amount_text")]
    pub max_weight: String,
    #[serde(deserialize_with = "amount_text")]
    pub charge_value: String,
}

/// Addresses one of the three inputs of an extra charge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExtraField {
    MinWeight,
    MaxWeight,
    ChargeValue,
}

impl ExtraField {
    pub const ALL: [ExtraField; 3] = [
        ExtraField::MinWeight,
        ExtraField::MaxWeight,
        ExtraField::ChargeValue,
    ];
}

impl ExtraCharge {
    pub fn new(
        min_weight: impl Into<String>,
        max_weight: impl Into<String>,
        charge_value: impl Into<String>,
    ) -> Self {
        Self {
            min_weight: min_weight.into(),
            max_weight: max_weight.into(),
            charge_value: charge_value.into(),
        }
    }

    pub fn field(&self, field: ExtraField) -> &str {
        match field {
            ExtraField::MinWeight => &self.min_weight,
            ExtraField::MaxWeight => &self.max_weight,
            ExtraField::ChargeValue => &self.charge_value,
        }
    }

    pub fn field_mut(&mut self, field: ExtraField) -> &mut String {
        match field {
            ExtraField::MinWeight => &mut self.min_weight,
            ExtraField::MaxWeight => &mut self.max_weight,
            ExtraField::ChargeValue => &mut self.charge_value,
        }
    }

    /// Same bracket with every field rendered through `fit_number`.
    pub fn normalized(&self) -> Self {
        Self {
            min_weight: fit_number(&self.min_weight, WEIGHT_DIGITS, SignMode::Unsigned),
            max_weight: fit_number(&self.max_weight, WEIGHT_DIGITS, SignMode::Unsigned),
            charge_value: fit_number(&self.charge_value, MONEY_DIGITS, SignMode::Signed),
        }
    }
}

/// A selected rate zone with its base charge and weight brackets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub extra: Vec<ExtraCharge>,
}

impl Zone {
    /// Build a selected zone from a catalog entry, filling in `default_value`
    /// when the entry carries no base charge.
    pub fn from_seed(seed: &ZoneSeed, default_value: &str) -> Self {
        let value = seed
            .value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default_value);

        Self {
            id: seed.id,
            name: seed.name.clone(),
            value: fit_number(value, MONEY_DIGITS, SignMode::Unsigned),
            extra: seed
                .extra
                .iter()
                .flatten()
                .map(ExtraCharge::normalized)
                .collect(),
        }
    }
}

/// Entry of the zone list as served by the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneSeed {
    pub id: ZoneId,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "optional_amount_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Vec<ExtraCharge>>,
}

impl ZoneSeed {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ZoneId::new(id),
            name: name.into(),
            value: None,
            extra: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Text(String),
    Number(serde_json::Number),
}

impl AmountRepr {
    fn into_text(self) -> String {
        match self {
            AmountRepr::Text(text) => text,
            AmountRepr::Number(number) => number.to_string(),
        }
    }
}

/// Amounts arrive either as strings or bare JSON numbers.
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    AmountRepr::deserialize(deserializer).map(AmountRepr::into_text)
}

fn optional_amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<AmountRepr>::deserialize(deserializer).map(|v| v.map(AmountRepr::into_text))
}
