//! Scripted operator sessions.
//!
//! A script is a YAML list of gestures replayed against an [`Editor`] on a
//! virtual clock that only moves on `wait`:
//!
//! ```yaml
//! actions:
//!   - action: toggle
//!     zone: 4
//!   - action: type
//!     zone: 4
//!     field: base_charge
//!     text: "150"
//!   - action: save
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use zc_core::ZoneId;
use zc_form::FieldKind;

use crate::editor::{Editor, SaveOutcome};
use crate::error::{AppError, AppResult};
use crate::roles::{ElementRole, InputRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Catalog add/remove button.
    Toggle { zone: ZoneId },
    /// Remove button of a selected row.
    Remove { zone: ZoneId },
    Expand { zone: ZoneId },
    AddExtra { zone: ZoneId },
    RemoveExtra { zone: ZoneId, index: usize },
    Type {
        zone: ZoneId,
        field: FieldKind,
        #[serde(default)]
        index: Option<usize>,
        text: String,
    },
    Blur {
        zone: ZoneId,
        field: FieldKind,
        #[serde(default)]
        index: Option<usize>,
    },
    Search { text: String },
    SearchFocus,
    SearchBlur,
    Wait { ms: u64 },
    Save,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Replay `script`, returning the outcome of every `save` in order.
pub fn run_script(editor: &mut Editor, script: &Script) -> AppResult<Vec<SaveOutcome>> {
    let mut now = Instant::now();
    let mut outcomes = Vec::new();

    for (step, action) in script.actions.iter().enumerate() {
        tracing::debug!(step, ?action, "script step");
        match action {
            Action::Toggle { zone } => editor.click(ElementRole::CatalogToggle(*zone))?,
            Action::Remove { zone } => editor.click(ElementRole::SelectedToggle(*zone))?,
            Action::Expand { zone } => editor.click(ElementRole::AccordionTitle(*zone))?,
            Action::AddExtra { zone } => editor.click(ElementRole::AddExtraCharge(*zone))?,
            Action::RemoveExtra { zone, index } => editor.click(ElementRole::RemoveExtraCharge {
                zone: *zone,
                index: *index,
            })?,
            Action::Type {
                zone,
                field,
                index,
                text,
            } => editor.type_text(InputRef::new(*zone, *field, *index)?, text)?,
            Action::Blur { zone, field, index } => {
                editor.blur(InputRef::new(*zone, *field, *index)?)?;
            }
            Action::Search { text } => editor.search_keyup(text, now),
            Action::SearchFocus => editor.search_focus(now),
            Action::SearchBlur => editor.search_blur(now),
            Action::Wait { ms } => now += Duration::from_millis(*ms),
            Action::Save => outcomes.push(editor.save()),
        }
        editor.tick(now);
    }

    Ok(outcomes)
}
