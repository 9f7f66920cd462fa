//! zc-form: zone charge records, validation and the output payload.

pub mod adapter;
pub mod field;
pub mod overlap;
pub mod schema;
pub mod validate;

pub use adapter::{ExtraChargePayload, RateAreaCharges, to_payload};
pub use field::{
    FieldKind, FieldValidator, FieldValidators, RuleFailure, ValidateOn, ValidatorNotice,
};
pub use overlap::{WeightRange, find_adjacent_overlap, overlap};
pub use schema::*;
pub use validate::{
    Annotation, AnnotationTarget, FinalReport, Issue, Severity, validate_form, validate_zone,
};

use std::collections::HashSet;
use zc_core::ZoneId;

pub type FormResult<T> = Result<T, FormError>;

#[derive(thiserror::Error, Debug)]
pub enum FormError {
    #[error("Duplicate zone id {id} in zone list")]
    DuplicateZone { id: ZoneId },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the zone list served by the catalog endpoint.
pub fn parse_zone_list(json: &str) -> FormResult<Vec<ZoneSeed>> {
    let seeds: Vec<ZoneSeed> = serde_json::from_str(json)?;
    validate_zone_list(&seeds)?;
    Ok(seeds)
}

pub fn validate_zone_list(seeds: &[ZoneSeed]) -> FormResult<()> {
    let mut ids = HashSet::new();
    for seed in seeds {
        if !ids.insert(seed.id) {
            return Err(FormError::DuplicateZone { id: seed.id });
        }
    }
    Ok(())
}
