//! Storage shape to output payload shape.

use serde::{Deserialize, Serialize};
use zc_core::ZoneId;

use crate::schema::{ExtraCharge, Zone};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtraChargePayload {
    pub charge_value: String,
    pub min_weight: String,
    pub max_weight: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateAreaCharges {
    pub rate_area_id: ZoneId,
    pub base_charge_value: String,
    pub extra_charges: Vec<ExtraChargePayload>,
}

impl From<&ExtraCharge> for ExtraChargePayload {
    fn from(extra: &ExtraCharge) -> Self {
        Self {
            charge_value: extra.charge_value.clone(),
            min_weight: extra.min_weight.clone(),
            max_weight: extra.max_weight.clone(),
        }
    }
}

impl From<&Zone> for RateAreaCharges {
    fn from(zone: &Zone) -> Self {
        Self {
            rate_area_id: zone.id,
            base_charge_value: zone.value.clone(),
            extra_charges: zone.extra.iter().map(ExtraChargePayload::from).collect(),
        }
    }
}

/// Map every selected zone, in order, copying field text verbatim.
pub fn to_payload(zones: &[Zone]) -> Vec<RateAreaCharges> {
    zones.iter().map(RateAreaCharges::from).collect()
}
