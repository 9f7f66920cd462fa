//! Per-input validation.
//!
//! Every tracked input carries exactly one rule. A rule rejects an empty
//! value or a lone decimal point by coercing the text to the canonical zero;
//! anything else is normalized through `fit_number` and accepted.

use serde::{Deserialize, Serialize};
use zc_core::{Emitter, EventKind, MONEY_DIGITS, SignMode, WEIGHT_DIGITS, fit_number, zero_string};

use crate::schema::ExtraField;

pub const INCORRECT_DATA_ENTRY: &str = "Incorrect data entry";

/// The four kinds of numeric inputs in the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    BaseCharge,
    MinWeight,
    MaxWeight,
    ChargeValue,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::BaseCharge,
        FieldKind::MinWeight,
        FieldKind::MaxWeight,
        FieldKind::ChargeValue,
    ];

    pub fn digits(self) -> usize {
        match self {
            FieldKind::BaseCharge | FieldKind::ChargeValue => MONEY_DIGITS,
            FieldKind::MinWeight | FieldKind::MaxWeight => WEIGHT_DIGITS,
        }
    }

    pub fn sign(self) -> SignMode {
        match self {
            FieldKind::ChargeValue => SignMode::Signed,
            _ => SignMode::Unsigned,
        }
    }

    pub fn rule_id(self) -> &'static str {
        match self {
            FieldKind::BaseCharge => "base_charge_value",
            FieldKind::MinWeight => "extra_min_weight",
            FieldKind::MaxWeight => "extra_max_weight",
            FieldKind::ChargeValue => "extra_charge_value",
        }
    }

    pub fn extra_field(self) -> Option<ExtraField> {
        match self {
            FieldKind::BaseCharge => None,
            FieldKind::MinWeight => Some(ExtraField::MinWeight),
            FieldKind::MaxWeight => Some(ExtraField::MaxWeight),
            FieldKind::ChargeValue => Some(ExtraField::ChargeValue),
        }
    }

    /// `fit_number` with this field's digits and sign.
    pub fn normalize(self, text: &str) -> String {
        fit_number(text, self.digits(), self.sign())
    }

    /// Drop characters a keystroke may not introduce: digits and `.` only,
    /// plus `+`/`-` for the signed charge value.
    pub fn sanitize(self, text: &str) -> String {
        let signed = self.sign() == SignMode::Signed;
        text.chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || (signed && matches!(c, '+' | '-')))
            .collect()
    }
}

impl From<ExtraField> for FieldKind {
    fn from(field: ExtraField) -> Self {
        match field {
            ExtraField::MinWeight => FieldKind::MinWeight,
            ExtraField::MaxWeight => FieldKind::MaxWeight,
            ExtraField::ChargeValue => FieldKind::ChargeValue,
        }
    }
}

/// When a field validator runs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidateOn {
    #[default]
    Blur,
    Entry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule_id: &'static str,
    pub message: String,
}

/// Payload of `validator_error` / `validator_success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorNotice {
    pub field: FieldKind,
    pub errors: Vec<RuleFailure>,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub message: String,
    kind: FieldKind,
}

impl Rule {
    pub fn for_field(kind: FieldKind) -> Self {
        Self {
            id: kind.rule_id(),
            message: INCORRECT_DATA_ENTRY.to_string(),
            kind,
        }
    }

    /// Apply the rule to `text` in place; false when it had to coerce.
    pub fn apply(&self, text: &mut String) -> bool {
        if text.is_empty() || text == "." {
            *text = zero_string(self.kind.digits());
            return false;
        }
        *text = self.kind.normalize(text);
        true
    }
}

/// Rule runner for one kind of input.
#[derive(Debug)]
pub struct FieldValidator {
    kind: FieldKind,
    rules: Vec<Rule>,
    validate_on: ValidateOn,
    errors: Vec<RuleFailure>,
    events: Emitter<ValidatorNotice>,
}

impl FieldValidator {
    pub fn new(kind: FieldKind, validate_on: ValidateOn) -> Self {
        Self {
            kind,
            rules: vec![Rule::for_field(kind)],
            validate_on,
            errors: Vec::new(),
            events: Emitter::new(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn validate_on(&self) -> ValidateOn {
        self.validate_on
    }

    pub fn events_mut(&mut self) -> &mut Emitter<ValidatorNotice> {
        &mut self.events
    }

    /// Failures of the most recent run.
    pub fn errors(&self) -> &[RuleFailure] {
        &self.errors
    }

    /// Keystroke hook; validates only in [`ValidateOn::Entry`] mode.
    pub fn on_entry(&mut self, text: &mut String) -> Option<bool> {
        (self.validate_on == ValidateOn::Entry).then(|| self.validate(text))
    }

    /// Blur hook; validates only in [`ValidateOn::Blur`] mode.
    pub fn on_blur(&mut self, text: &mut String) -> Option<bool> {
        (self.validate_on == ValidateOn::Blur).then(|| self.validate(text))
    }

    /// Run every rule against `text`, rewriting it in place.
    pub fn validate(&mut self, text: &mut String) -> bool {
        self.errors.clear();
        for rule in &self.rules {
            if !rule.apply(text) {
                self.errors.push(RuleFailure {
                    rule_id: rule.id,
                    message: rule.message.clone(),
                });
            }
        }

        let notice = ValidatorNotice {
            field: self.kind,
            errors: self.errors.clone(),
        };
        if self.errors.is_empty() {
            self.events.publish(EventKind::ValidatorSuccess, &notice);
            true
        } else {
            tracing::warn!(rule = self.kind.rule_id(), value = %text, "field coerced to zero");
            self.events.publish(EventKind::ValidatorError, &notice);
            false
        }
    }
}

/// One validator per field kind, built once per editor.
#[derive(Debug)]
pub struct FieldValidators {
    validators: Vec<FieldValidator>,
}

impl FieldValidators {
    pub fn new(validate_on: ValidateOn) -> Self {
        Self {
            validators: FieldKind::ALL
                .iter()
                .map(|kind| FieldValidator::new(*kind, validate_on))
                .collect(),
        }
    }

    pub fn get_mut(&mut self, kind: FieldKind) -> &mut FieldValidator {
        let index = match kind {
            FieldKind::BaseCharge => 0,
            FieldKind::MinWeight => 1,
            FieldKind::MaxWeight => 2,
            FieldKind::ChargeValue => 3,
        };
        &mut self.validators[index]
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldValidator> {
        self.validators.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn empty_and_lone_point_coerce_to_zero() {
        let mut v = FieldValidator::new(FieldKind::MinWeight, ValidateOn::Blur);
        let mut text = String::new();
        assert!(!v.validate(&mut text));
        assert_eq!(text, "0.000");

        let mut text = ".".to_string();
        let mut base = FieldValidator::new(FieldKind::BaseCharge, ValidateOn::Blur);
        assert!(!base.validate(&mut text));
        assert_eq!(text, "0.00");
        assert_eq!(base.errors()[0].rule_id, "base_charge_value");
        assert_eq!(base.errors()[0].message, INCORRECT_DATA_ENTRY);
    }

    #[test]
    fn valid_text_is_normalized() {
        let mut v = FieldValidator::new(FieldKind::ChargeValue, ValidateOn::Blur);
        let mut text = "15".to_string();
        assert!(v.validate(&mut text));
        assert_eq!(text, "+15.00");
        assert!(v.errors().is_empty());
    }

    #[test]
    fn trigger_mode_gates_hooks() {
        let mut blur = FieldValidator::new(FieldKind::BaseCharge, ValidateOn::Blur);
        let mut text = "5".to_string();
        assert_eq!(blur.on_entry(&mut text), None);
        assert_eq!(text, "5");
        assert_eq!(blur.on_blur(&mut text), Some(true));
        assert_eq!(text, "5.00");

        let mut entry = FieldValidator::new(FieldKind::BaseCharge, ValidateOn::Entry);
        let mut text = String::new();
        assert_eq!(entry.on_blur(&mut text), None);
        assert_eq!(entry.on_entry(&mut text), Some(false));
    }

    #[test]
    fn failures_and_successes_are_published() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut v = FieldValidator::new(FieldKind::MaxWeight, ValidateOn::Blur);
        let sink = Rc::clone(&log);
        v.events_mut().subscribe(EventKind::ValidatorError, move |n: &ValidatorNotice| {
            sink.borrow_mut().push(format!("error:{}", n.errors[0].rule_id))
        });
        let sink = Rc::clone(&log);
        v.events_mut().subscribe(EventKind::ValidatorSuccess, move |_| {
            sink.borrow_mut().push("ok".to_string())
        });

        v.validate(&mut String::new());
        v.validate(&mut "2".to_string());

        assert_eq!(*log.borrow(), vec!["error:extra_max_weight", "ok"]);
    }

    #[test]
    fn sanitize_keeps_allowed_characters() {
        assert_eq!(FieldKind::BaseCharge.sanitize("3a2.5-"), "32.5");
        assert_eq!(FieldKind::ChargeValue.sanitize("-1x0"), "-10");
        assert_eq!(FieldKind::MinWeight.sanitize("+1,5"), "15");
    }

    #[test]
    fn validators_cover_every_kind() {
        let mut all = FieldValidators::new(ValidateOn::Entry);
        for kind in FieldKind::ALL {
            assert_eq!(all.get_mut(kind).kind(), kind);
        }
        assert!(all.iter_mut().all(|v| v.validate_on() == ValidateOn::Entry));
    }
}
