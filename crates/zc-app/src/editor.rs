//! The editor context.
//!
//! Constructed once per session from the config and the fetched zone list.
//! It owns the storage, the catalog, the field validators and the text of
//! every rendered input, and exposes one method per operator gesture.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use zc_core::{Collation, CoreError, EventKind, SubscriptionId, ZoneId, safe_sum};
use zc_form::{
    ExtraField, FieldKind, FieldValidators, FinalReport, RateAreaCharges, Zone, ZoneSeed,
    to_payload, validate_form,
};

use crate::config::EditorConfig;
use crate::debounce::Debouncer;
use crate::error::AppResult;
use crate::roles::{ElementRole, InputRef};
use crate::search::SearchList;
use crate::storage::{ChangeNotice, Storage};

/// Result of pressing save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub report: FinalReport,
    /// Present only when the form passed and something was selected.
    pub payload: Option<Vec<RateAreaCharges>>,
}

impl SaveOutcome {
    pub fn saved(&self) -> bool {
        self.payload.is_some()
    }
}

#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    storage: Storage,
    catalog: SearchList,
    validators: FieldValidators,
    inputs: HashMap<InputRef, String>,
    focused: Option<InputRef>,
    expanded: Option<ZoneId>,
    report: FinalReport,
    view_stale: Rc<Cell<bool>>,
    search_keyup: Debouncer<String>,
    search_focus: Debouncer<()>,
    search_blur: Debouncer<()>,
}

impl Editor {
    pub fn new(config: EditorConfig, seeds: Vec<ZoneSeed>) -> Self {
        let mut storage = Storage::with_collation(Collation::for_locale(&config.locale));
        let view_stale = Rc::new(Cell::new(false));
        let stale = Rc::clone(&view_stale);
        storage
            .events_mut()
            .subscribe(EventKind::Changed, move |notice: &ChangeNotice| {
                tracing::debug!(
                    kind = ?notice.kind,
                    zone = %notice.current,
                    selected = notice.list.len(),
                    "selected list changed"
                );
                stale.set(true);
            });

        Self {
            validators: FieldValidators::new(config.validate_on),
            search_keyup: Debouncer::new(config.debounce.search_keyup()),
            search_focus: Debouncer::new(config.debounce.search_focus()),
            search_blur: Debouncer::new(config.debounce.search_blur()),
            catalog: SearchList::new(seeds),
            inputs: HashMap::new(),
            focused: None,
            expanded: None,
            report: FinalReport::default(),
            view_stale,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn catalog(&self) -> &SearchList {
        &self.catalog
    }

    /// Annotations of the last save, minus rows edited since.
    pub fn report(&self) -> &FinalReport {
        &self.report
    }

    pub fn expanded(&self) -> Option<ZoneId> {
        self.expanded
    }

    /// Input that took the last keystroke and has not been blurred since.
    pub fn focused(&self) -> Option<InputRef> {
        self.focused
    }

    pub fn is_selected(&self, id: ZoneId) -> bool {
        self.storage.contains(id)
    }

    pub fn can_save(&self) -> bool {
        !self.storage.is_empty()
    }

    /// Listen to structural changes of the selected list.
    pub fn subscribe_changes(
        &mut self,
        handler: impl FnMut(&ChangeNotice) + 'static,
    ) -> SubscriptionId {
        self.storage.events_mut().subscribe(EventKind::Changed, handler)
    }

    pub fn validators_mut(&mut self) -> &mut FieldValidators {
        &mut self.validators
    }

    pub fn click(&mut self, role: ElementRole) -> AppResult<()> {
        match role {
            ElementRole::CatalogItem(_) => self.catalog.open(),
            ElementRole::CatalogToggle(id) => {
                self.catalog.open();
                self.toggle_zone(id)?;
            }
            ElementRole::SelectedToggle(id) => self.toggle_zone(id)?,
            ElementRole::AccordionTitle(id) => {
                self.expanded = if self.expanded == Some(id) {
                    None
                } else {
                    Some(id)
                };
            }
            ElementRole::AddExtraCharge(id) => self.add_extra_charge(id)?,
            ElementRole::RemoveExtraCharge { zone, index } => {
                self.remove_extra_charge(zone, index)?
            }
        }
        self.refresh();
        Ok(())
    }

    fn toggle_zone(&mut self, id: ZoneId) -> AppResult<()> {
        let zone = if self.storage.contains(id) {
            self.storage.get(id)?.clone()
        } else {
            let seed = self
                .catalog
                .find(id)
                .ok_or(CoreError::zone_not_found(id))?;
            Zone::from_seed(seed, &self.config.base_charge_value)
        };
        self.storage.resolve(zone);
        Ok(())
    }

    fn add_extra_charge(&mut self, id: ZoneId) -> AppResult<()> {
        let mut zone = self.storage.get(id)?.clone();
        zone.extra.push(self.config.extra_charge.normalized());
        self.storage.change(zone)?;
        Ok(())
    }

    fn remove_extra_charge(&mut self, id: ZoneId, index: usize) -> AppResult<()> {
        let mut zone = self.storage.get(id)?.clone();
        if index >= zone.extra.len() {
            return Err(CoreError::IndexOob {
                what: "extra charge",
                index,
                len: zone.extra.len(),
            }
            .into());
        }
        zone.extra.remove(index);
        self.storage.change(zone)?;
        Ok(())
    }

    /// Re-render input text from storage after a structural change. Markers
    /// of the previous save go with the old rows.
    fn refresh(&mut self) {
        if !self.view_stale.replace(false) {
            return;
        }

        self.inputs.clear();
        self.focused = None;
        for zone in self.storage.selected() {
            self.inputs.insert(
                InputRef::BaseCharge(zone.id),
                FieldKind::BaseCharge.normalize(&zone.value),
            );
            for (index, extra) in zone.extra.iter().enumerate() {
                for field in ExtraField::ALL {
                    self.inputs.insert(
                        InputRef::Extra {
                            zone: zone.id,
                            index,
                            field,
                        },
                        FieldKind::from(field).normalize(extra.field(field)),
                    );
                }
            }
        }

        if self.expanded.is_some_and(|id| !self.storage.contains(id)) {
            self.expanded = None;
        }
        self.report = FinalReport::default();
    }

    fn ensure_input(&self, input: InputRef) -> AppResult<()> {
        let zone = self.storage.get(input.zone())?;
        match input {
            InputRef::Extra { index, .. } if index >= zone.extra.len() => {
                Err(CoreError::IndexOob {
                    what: "extra charge",
                    index,
                    len: zone.extra.len(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    /// Current text of an input as the operator sees it.
    pub fn input_text(&self, input: InputRef) -> AppResult<&str> {
        self.ensure_input(input)?;
        Ok(self.inputs.get(&input).map(String::as_str).unwrap_or_default())
    }

    /// A keystroke left `text` in `input`.
    pub fn type_text(&mut self, input: InputRef, text: &str) -> AppResult<()> {
        self.ensure_input(input)?;
        let kind = input.kind();

        let mut text = kind.sanitize(text);
        self.validators.get_mut(kind).on_entry(&mut text);
        self.report.clear_zone(input.zone());

        let mut zone = self.storage.get(input.zone())?.clone();
        write_field(&mut zone, input, kind.normalize(&text));
        self.storage.input(zone)?;

        tracing::debug!(?input, text = %text, "keystroke");
        self.inputs.insert(input, text);
        self.focused = Some(input);
        Ok(())
    }

    /// Focus left `input`. Returns the validator verdict when it ran.
    pub fn blur(&mut self, input: InputRef) -> AppResult<Option<bool>> {
        self.ensure_input(input)?;
        if self.focused == Some(input) {
            self.focused = None;
        }
        let kind = input.kind();

        let mut text = self.inputs.get(&input).cloned().unwrap_or_default();
        let verdict = self.validators.get_mut(kind).on_blur(&mut text);
        if verdict.is_some() {
            write_field(self.storage.get_mut(input.zone())?, input, text.clone());
            self.inputs.insert(input, text);
        }
        Ok(verdict)
    }

    /// "Total cost" label of one extra charge: base plus charge value.
    pub fn total_label(&self, zone: ZoneId, index: usize) -> AppResult<String> {
        let base = self.input_text(InputRef::BaseCharge(zone))?;
        let charge = self.input_text(InputRef::Extra {
            zone,
            index,
            field: ExtraField::ChargeValue,
        })?;
        Ok(self.cost_label(&safe_sum(base, charge)))
    }

    fn cost_label(&self, amount: &str) -> String {
        let prefix = if self.config.wide_layout() {
            self.config.total_cost_prefix.as_str()
        } else {
            ""
        };
        format!("{prefix}{amount}{}", self.config.currency_suffix)
    }

    pub fn search_keyup(&mut self, text: &str, now: Instant) {
        self.search_keyup.call(now, text.to_string());
    }

    pub fn search_focus(&mut self, now: Instant) {
        self.search_focus.call(now, ());
    }

    pub fn search_blur(&mut self, now: Instant) {
        self.search_blur.call(now, ());
    }

    /// Fire whatever debounced search work is due.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.search_keyup.poll(now) {
            self.catalog.set_filter(&query);
        }
        if self.search_focus.poll(now).is_some() {
            self.catalog.open();
        }
        if self.search_blur.poll(now).is_some() {
            self.catalog.close();
        }
    }

    /// Validate the whole form and, when it passes, build the payload.
    ///
    /// Pressing save takes focus away from the input being edited, so that
    /// input is blurred first.
    pub fn save(&mut self) -> SaveOutcome {
        if let Some(input) = self.focused {
            if let Err(err) = self.blur(input) {
                tracing::warn!(?input, error = %err, "focused input vanished before save");
                self.focused = None;
            }
        }
        self.refresh();

        if !self.can_save() {
            tracing::warn!("save ignored: no zones selected");
            return SaveOutcome {
                report: FinalReport::default(),
                payload: None,
            };
        }

        let report = validate_form(self.storage.selected());
        self.report = report.clone();

        let payload = report.passed().then(|| to_payload(self.storage.selected()));
        if payload.is_some() {
            tracing::info!(zones = self.storage.len(), "form saved");
        }
        SaveOutcome { report, payload }
    }
}

fn write_field(zone: &mut Zone, input: InputRef, value: String) {
    match input {
        InputRef::BaseCharge(_) => zone.value = value,
        InputRef::Extra { index, field, .. } => {
            if let Some(extra) = zone.extra.get_mut(index) {
                *extra.field_mut(field) = value;
            }
        }
    }
}
