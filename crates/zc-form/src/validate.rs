//! Whole-form validation.
//!
//! One pass over the selected zones. Missing, non-numeric and zero fields
//! count as errors and fail the form; overlapping weight ranges only add an
//! advisory annotation to the row.

use core::fmt;
use rust_decimal::Decimal;
use zc_core::{Reading, ZoneId};

use crate::overlap::{WeightRange, find_adjacent_overlap};
use crate::schema::{ExtraField, Zone};

/// What an annotation complains about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issue {
    UnspecifiedBaseCharge,
    UnspecifiedWeight,
    UnspecifiedExtraCharge,
    WeightRangesOverlap,
}

impl Issue {
    pub fn message(self) -> &'static str {
        match self {
            Issue::UnspecifiedBaseCharge => "Specify the base charge",
            Issue::UnspecifiedWeight => "Weight is not specified",
            Issue::UnspecifiedExtraCharge => "Specify the extra charge",
            Issue::WeightRangesOverlap => "Weight ranges overlap",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Issue::WeightRangesOverlap => Severity::Advisory,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Advisory,
}

/// Where in a row the annotation is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTarget {
    BaseCharge,
    Extra { index: usize, field: ExtraField },
    /// The row's content block as a whole.
    Row,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub zone_id: ZoneId,
    pub target: AnnotationTarget,
    pub issue: Issue,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            AnnotationTarget::BaseCharge => write!(f, "zone {} base charge: {}", self.zone_id, self.issue),
            AnnotationTarget::Extra { index, field } => write!(
                f,
                "zone {} extra charge #{} {:?}: {}",
                self.zone_id,
                index + 1,
                field,
                self.issue
            ),
            AnnotationTarget::Row => write!(f, "zone {}: {}", self.zone_id, self.issue),
        }
    }
}

/// Outcome of a final validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalReport {
    /// Number of failing fields across all rows. Overlaps are not counted.
    pub errors: usize,
    pub annotations: Vec<Annotation>,
}

impl FinalReport {
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    pub fn for_zone(&self, zone_id: ZoneId) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.zone_id == zone_id)
    }

    pub fn zone_has_errors(&self, zone_id: ZoneId) -> bool {
        self.for_zone(zone_id)
            .any(|a| a.issue.severity() == Severity::Error)
    }

    pub fn has_overlap(&self, zone_id: ZoneId) -> bool {
        self.for_zone(zone_id)
            .any(|a| a.issue == Issue::WeightRangesOverlap)
    }

    /// Drop a row's markers, as editing any of its inputs does. The error
    /// count is left alone: only a new pass decides pass/fail.
    pub fn clear_zone(&mut self, zone_id: ZoneId) {
        self.annotations.retain(|a| a.zone_id != zone_id);
    }

    fn flag(&mut self, zone_id: ZoneId, target: AnnotationTarget, issue: Issue) {
        if issue.severity() == Severity::Error {
            self.errors += 1;
        }
        self.annotations.push(Annotation {
            zone_id,
            target,
            issue,
        });
    }
}

fn missing_or_zero(raw: &str) -> bool {
    match Reading::of(raw) {
        Reading::Number(value) => value.is_zero(),
        Reading::Empty | Reading::NotANumber => true,
    }
}

fn missing_or_not_positive(raw: &str) -> bool {
    match Reading::of(raw) {
        Reading::Number(value) => value <= Decimal::ZERO,
        Reading::Empty | Reading::NotANumber => true,
    }
}

/// Check every zone; the form passes iff no field failed.
pub fn validate_form(zones: &[Zone]) -> FinalReport {
    let mut report = FinalReport::default();
    for zone in zones {
        validate_zone(zone, &mut report);
    }

    if report.passed() {
        tracing::debug!(zones = zones.len(), "form validation passed");
    } else {
        tracing::warn!(
            zones = zones.len(),
            errors = report.errors,
            "form validation failed"
        );
    }
    report
}

/// Check one row, appending to `report`.
pub fn validate_zone(zone: &Zone, report: &mut FinalReport) {
    report.clear_zone(zone.id);

    if missing_or_zero(&zone.value) {
        report.flag(zone.id, AnnotationTarget::BaseCharge, Issue::UnspecifiedBaseCharge);
    }

    let mut ranges = Vec::with_capacity(zone.extra.len());
    for (index, extra) in zone.extra.iter().enumerate() {
        for field in [ExtraField::MinWeight, ExtraField::MaxWeight] {
            if missing_or_not_positive(extra.field(field)) {
                report.flag(
                    zone.id,
                    AnnotationTarget::Extra { index, field },
                    Issue::UnspecifiedWeight,
                );
            }
        }
        if missing_or_zero(&extra.charge_value) {
            report.flag(
                zone.id,
                AnnotationTarget::Extra {
                    index,
                    field: ExtraField::ChargeValue,
                },
                Issue::UnspecifiedExtraCharge,
            );
        }
        ranges.push(WeightRange::of(extra));
    }

    if let Some((i, j)) = find_adjacent_overlap(&ranges) {
        tracing::debug!(zone = %zone.id, first = i, second = j, "weight ranges overlap");
        report.flag(zone.id, AnnotationTarget::Row, Issue::WeightRangesOverlap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExtraCharge;

    fn zone(value: &str, extra: Vec<ExtraCharge>) -> Zone {
        Zone {
            id: ZoneId::new(1),
            name: "Kazan".to_string(),
            value: value.to_string(),
            extra,
        }
    }

    #[test]
    fn negative_base_charge_is_accepted() {
        assert!(validate_form(&[zone("-5.00", vec![])]).passed());
    }

    #[test]
    fn negative_weight_is_flagged_but_negative_charge_is_not() {
        let report = validate_form(&[zone(
            "10.00",
            vec![ExtraCharge::new("-1.000", "2.000", "-5.00")],
        )]);
        assert_eq!(report.errors, 1);
        assert_eq!(
            report.annotations[0].target,
            AnnotationTarget::Extra {
                index: 0,
                field: ExtraField::MinWeight
            }
        );
    }

    #[test]
    fn single_extra_charge_is_not_overlap_checked() {
        let report = validate_form(&[zone(
            "10.00",
            vec![ExtraCharge::new("1.000", "3.000", "+5.00")],
        )]);
        assert!(report.annotations.is_empty());
    }

    #[test]
    fn clear_zone_keeps_other_rows() {
        let mut other = zone("0.00", vec![]);
        other.id = ZoneId::new(2);
        let mut report = validate_form(&[zone("0.00", vec![]), other]);
        report.clear_zone(ZoneId::new(1));
        assert_eq!(report.annotations.len(), 1);
        assert!(report.zone_has_errors(ZoneId::new(2)));
    }
}
