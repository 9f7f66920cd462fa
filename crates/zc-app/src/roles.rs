//! Clickable elements of the editor.
//!
//! Whoever builds an element fixes its role once; click dispatch matches
//! on the role and never inspects markup.

use zc_core::ZoneId;
use zc_form::{ExtraField, FieldKind};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// A catalog row outside its button; opens the catalog.
    CatalogItem(ZoneId),
    /// Add/remove button of a catalog row.
    CatalogToggle(ZoneId),
    /// Title of a selected row; expands or collapses it.
    AccordionTitle(ZoneId),
    /// Remove button in a selected row's title.
    SelectedToggle(ZoneId),
    AddExtraCharge(ZoneId),
    RemoveExtraCharge { zone: ZoneId, index: usize },
}

impl ElementRole {
    pub fn zone(self) -> ZoneId {
        match self {
            ElementRole::CatalogItem(zone)
            | ElementRole::CatalogToggle(zone)
            | ElementRole::AccordionTitle(zone)
            | ElementRole::SelectedToggle(zone)
            | ElementRole::AddExtraCharge(zone)
            | ElementRole::RemoveExtraCharge { zone, .. } => zone,
        }
    }
}

/// Addresses one numeric input of the selected list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputRef {
    BaseCharge(ZoneId),
    Extra {
        zone: ZoneId,
        index: usize,
        field: ExtraField,
    },
}

impl InputRef {
    /// Build a reference from a field kind; extra-charge kinds need an index.
    pub fn new(zone: ZoneId, kind: FieldKind, index: Option<usize>) -> AppResult<Self> {
        match (kind.extra_field(), index) {
            (None, _) => Ok(InputRef::BaseCharge(zone)),
            (Some(field), Some(index)) => Ok(InputRef::Extra { zone, index, field }),
            (Some(_), None) => Err(AppError::InvalidInput(format!(
                "{} of zone {} needs an extra-charge index",
                kind.rule_id(),
                zone
            ))),
        }
    }

    pub fn zone(self) -> ZoneId {
        match self {
            InputRef::BaseCharge(zone) | InputRef::Extra { zone, .. } => zone,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            InputRef::BaseCharge(_) => FieldKind::BaseCharge,
            InputRef::Extra { field, .. } => field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_inputs_require_index() {
        let zone = ZoneId::new(3);
        assert_eq!(
            InputRef::new(zone, FieldKind::BaseCharge, Some(4)).unwrap(),
            InputRef::BaseCharge(zone)
        );
        let input = InputRef::new(zone, FieldKind::MaxWeight, Some(1)).unwrap();
        assert_eq!(input.kind(), FieldKind::MaxWeight);
        assert_eq!(input.zone(), zone);
        assert!(InputRef::new(zone, FieldKind::ChargeValue, None).is_err());
    }

    #[test]
    fn every_role_knows_its_zone() {
        let zone = ZoneId::new(8);
        assert_eq!(ElementRole::RemoveExtraCharge { zone, index: 2 }.zone(), zone);
        assert_eq!(ElementRole::CatalogItem(zone).zone(), zone);
    }
}
