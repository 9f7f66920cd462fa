//! The zone catalog with its search filter.

use zc_core::ZoneId;
use zc_form::ZoneSeed;

#[derive(Debug, Clone, Default)]
pub struct SearchList {
    seeds: Vec<ZoneSeed>,
    filter: String,
    open: bool,
}

impl SearchList {
    pub fn new(seeds: Vec<ZoneSeed>) -> Self {
        Self {
            seeds,
            filter: String::new(),
            open: false,
        }
    }

    pub fn seeds(&self) -> &[ZoneSeed] {
        &self.seeds
    }

    pub fn find(&self, id: ZoneId) -> Option<&ZoneSeed> {
        self.seeds.iter().find(|s| s.id == id)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_lowercase();
        tracing::debug!(filter = %self.filter, visible = self.visible().count(), "search filter");
    }

    /// Case-insensitive substring match on the zone name.
    pub fn matches(&self, seed: &ZoneSeed) -> bool {
        self.filter.is_empty() || seed.name.to_lowercase().contains(&self.filter)
    }

    pub fn visible(&self) -> impl Iterator<Item = &ZoneSeed> {
        self.seeds.iter().filter(|s| self.matches(s))
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
