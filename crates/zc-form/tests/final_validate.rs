use zc_core::ZoneId;
use zc_form::{AnnotationTarget, ExtraCharge, ExtraField, Issue, Zone, validate_form};

fn zone(id: u64, value: &str, extra: Vec<ExtraCharge>) -> Zone {
    Zone {
        id: ZoneId::new(id),
        name: format!("Zone {id}"),
        value: value.to_string(),
        extra,
    }
}

#[test]
fn zero_base_charge_fails() {
    let report = validate_form(&[zone(1, "0.00", vec![])]);
    assert!(!report.passed());
    assert_eq!(report.errors, 1);
    assert_eq!(report.annotations[0].target, AnnotationTarget::BaseCharge);
    assert_eq!(report.annotations[0].issue, Issue::UnspecifiedBaseCharge);
}

#[test]
fn empty_and_garbage_base_charge_fail() {
    for value in ["", "abc", "0"] {
        assert!(!validate_form(&[zone(1, value, vec![])]).passed(), "{value:?}");
    }
}

#[test]
fn plain_base_charge_passes() {
    let report = validate_form(&[zone(1, "320.00", vec![])]);
    assert!(report.passed());
    assert!(report.annotations.is_empty());
}

#[test]
fn empty_form_passes() {
    assert!(validate_form(&[]).passed());
}

#[test]
fn overlap_is_advisory_only() {
    let report = validate_form(&[zone(
        1,
        "320.00",
        vec![
            ExtraCharge::new("1.000", "3.000", "+50.00"),
            ExtraCharge::new("2.000", "4.000", "+70.00"),
        ],
    )]);

    assert!(report.passed());
    assert_eq!(report.errors, 0);
    assert!(report.has_overlap(ZoneId::new(1)));
    assert_eq!(report.annotations.len(), 1);
    assert_eq!(report.annotations[0].target, AnnotationTarget::Row);
}

#[test]
fn every_bad_extra_field_is_counted() {
    let report = validate_form(&[zone(
        7,
        "100.00",
        vec![
            ExtraCharge::new("0.000", "", "0.00"),
            ExtraCharge::new("5.000", "6.000", "+1.00"),
        ],
    )]);

    assert_eq!(report.errors, 3);
    let targets: Vec<_> = report.annotations.iter().map(|a| a.target).collect();
    assert_eq!(
        targets,
        vec![
            AnnotationTarget::Extra { index: 0, field: ExtraField::MinWeight },
            AnnotationTarget::Extra { index: 0, field: ExtraField::MaxWeight },
            AnnotationTarget::Extra { index: 0, field: ExtraField::ChargeValue },
        ]
    );
    assert!(!report.has_overlap(ZoneId::new(7)));
}

#[test]
fn errors_accumulate_across_rows() {
    let report = validate_form(&[
        zone(1, "0.00", vec![]),
        zone(2, "50.00", vec![ExtraCharge::new("1.000", "2.000", "0.00")]),
        zone(3, "10.00", vec![]),
    ]);

    assert_eq!(report.errors, 2);
    assert!(report.zone_has_errors(ZoneId::new(1)));
    assert!(report.zone_has_errors(ZoneId::new(2)));
    assert!(!report.zone_has_errors(ZoneId::new(3)));
}

#[test]
fn overlap_and_errors_combine() {
    let report = validate_form(&[zone(
        1,
        "0.00",
        vec![
            ExtraCharge::new("1.000", "5.000", "+5.00"),
            ExtraCharge::new("2.000", "3.000", "+6.00"),
        ],
    )]);
    assert!(!report.passed());
    assert_eq!(report.errors, 1);
    assert!(report.has_overlap(ZoneId::new(1)));
}

#[test]
fn annotation_text_names_zone_and_issue() {
    let report = validate_form(&[zone(4, "", vec![])]);
    assert_eq!(
        report.annotations[0].to_string(),
        "zone 4 base charge: Specify the base charge"
    );
}

#[test]
fn extreme_weight_bounds_are_flagged_without_panicking() {
    let report = validate_form(&[zone(
        1,
        "320.00",
        vec![
            ExtraCharge::new("0.000", "1.000", "+10.00"),
            ExtraCharge::new(
                "-50000000000000000000000000000",
                "50000000000000000000000000000",
                "+10.00",
            ),
        ],
    )]);
    // zero and negative minimums
    assert_eq!(report.errors, 2);
    assert!(report.has_overlap(ZoneId::new(1)));
}
