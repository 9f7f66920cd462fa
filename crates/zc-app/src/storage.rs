//! The selected-zone list.
//!
//! Owned by the editor context and handed out by reference. Structural
//! changes publish [`EventKind::Changed`] with the whole current list.

use zc_core::{Collation, CoreError, CoreResult, Emitter, EventKind, ZoneId};
use zc_form::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Updated,
}

/// Payload of a `changed` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub current: ZoneId,
    pub list: Vec<Zone>,
}

#[derive(Debug, Default)]
pub struct Storage {
    selected: Vec<Zone>,
    collation: Collation,
    events: Emitter<ChangeNotice>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collation(collation: Collation) -> Self {
        Self {
            collation,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> &[Zone] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.position(id).is_some()
    }

    pub fn events_mut(&mut self) -> &mut Emitter<ChangeNotice> {
        &mut self.events
    }

    /// Insert `zone` and re-sort by name. No-op if its id is already selected.
    pub fn select(&mut self, zone: Zone) -> bool {
        if self.contains(zone.id) {
            tracing::debug!(zone = %zone.id, "select ignored: already selected");
            return false;
        }

        let id = zone.id;
        tracing::info!(zone = %id, name = %zone.name, "zone selected");
        self.selected.push(zone);
        let collation = self.collation;
        self.selected
            .sort_by(|a, b| collation.compare(&a.name, &b.name));
        self.notify(ChangeKind::Added, id);
        true
    }

    /// Remove the zone with `id`. No-op if it is not selected.
    pub fn deselect(&mut self, id: ZoneId) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(zone = %id, "deselect ignored: not selected");
            return false;
        };

        self.selected.remove(index);
        tracing::info!(zone = %id, "zone deselected");
        self.notify(ChangeKind::Removed, id);
        true
    }

    /// Select `zone` if absent, deselect it if present.
    pub fn resolve(&mut self, zone: Zone) -> ChangeKind {
        if self.contains(zone.id) {
            self.deselect(zone.id);
            ChangeKind::Removed
        } else {
            self.select(zone);
            ChangeKind::Added
        }
    }

    /// Replace the record with the same id and publish `changed`.
    pub fn change(&mut self, payload: Zone) -> CoreResult<()> {
        let id = payload.id;
        self.replace(payload)?;
        self.notify(ChangeKind::Updated, id);
        Ok(())
    }

    /// Replace the record with the same id without publishing.
    pub fn input(&mut self, payload: Zone) -> CoreResult<()> {
        tracing::trace!(zone = %payload.id, "silent input");
        self.replace(payload)
    }

    pub fn get(&self, id: ZoneId) -> CoreResult<&Zone> {
        self.selected
            .iter()
            .find(|z| z.id == id)
            .ok_or(CoreError::zone_not_found(id))
    }

    /// Live record for in-place edits; writes through it are silent.
    pub fn get_mut(&mut self, id: ZoneId) -> CoreResult<&mut Zone> {
        self.selected
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or(CoreError::zone_not_found(id))
    }

    fn position(&self, id: ZoneId) -> Option<usize> {
        self.selected.iter().position(|z| z.id == id)
    }

    fn replace(&mut self, payload: Zone) -> CoreResult<()> {
        let index = self
            .position(payload.id)
            .ok_or(CoreError::zone_not_found(payload.id))?;
        self.selected[index] = payload;
        Ok(())
    }

    fn notify(&mut self, kind: ChangeKind, current: ZoneId) {
        let notice = ChangeNotice {
            kind,
            current,
            list: self.selected.clone(),
        };
        self.events.publish(EventKind::Changed, &notice);
    }
}
