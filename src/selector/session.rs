//! One feat selection dialog
//!
//! A session is opened for a single slot (category + target level) with a
//! fixed candidate list. Criteria changes recompute the view from the full
//! list. The first successful `select` emits exactly one `FeatSelected` on the
//! channel supplied at construction and closes the session.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::config::WizardSettings;
use crate::core::error::{Result, WizardError};
use crate::core::types::{FeatCategory, FeatId, Level};
use crate::feats::criteria::{CriteriaChange, FilterCriteria, SortDirection, SortKey, SortMethod};
use crate::feats::filter::{includes_archetype_feats, view_indices};
use crate::feats::record::FeatRecord;
use crate::feats::skills::Skill;
use crate::host::HostBridge;
use crate::selector::context::{skill_options, FeatEntry, SelectorContext};

/// Emitted once when a feat is picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatSelected {
    pub category: FeatCategory,
    pub feat: FeatRecord,
}

impl FeatSelected {
    pub fn feat_id(&self) -> &FeatId {
        &self.feat.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorState {
    Open,
    Closed,
}

#[derive(Debug)]
pub struct FeatSelector {
    category: FeatCategory,
    actor_name: String,
    target_level: Level,
    candidates: Vec<FeatRecord>,
    by_id: AHashMap<FeatId, usize>,
    criteria: FilterCriteria,
    /// Indices into `candidates`, in display order
    view: Vec<usize>,
    show_prerequisites: bool,
    state: SelectorState,
    events: UnboundedSender<FeatSelected>,
}

impl FeatSelector {
    pub fn new(
        candidates: Vec<FeatRecord>,
        category: FeatCategory,
        actor_name: impl Into<String>,
        target_level: Level,
        settings: &WizardSettings,
        events: UnboundedSender<FeatSelected>,
    ) -> Self {
        let sort = settings.sort_method().unwrap_or_else(|e| {
            tracing::warn!("{}; falling back to {}", e, SortMethod::default());
            SortMethod::default()
        });

        let mut by_id = AHashMap::with_capacity(candidates.len());
        for (index, feat) in candidates.iter().enumerate() {
            by_id.entry(feat.id.clone()).or_insert(index);
        }

        let mut selector = Self {
            category,
            actor_name: actor_name.into(),
            target_level,
            candidates,
            by_id,
            criteria: FilterCriteria::with_sort(sort),
            view: Vec::new(),
            show_prerequisites: settings.show_feat_prerequisites,
            state: SelectorState::Open,
            events,
        };
        selector.recompute();

        tracing::debug!(
            "Opened {} selector for {} with {} candidates",
            category,
            selector.actor_name,
            selector.candidates.len()
        );
        selector
    }

    /// Fetch candidates and preferences from the host and open a session
    pub fn open<H: HostBridge + ?Sized>(
        host: &H,
        character: &str,
        category: FeatCategory,
        target_level: Level,
        events: UnboundedSender<FeatSelected>,
    ) -> Result<Self> {
        let settings = WizardSettings::from_host(host)?;
        let candidates = host.fetch_candidates(character, category, target_level)?;
        Ok(Self::new(
            candidates,
            category,
            character,
            target_level,
            &settings,
            events,
        ))
    }

    pub fn title(&self) -> String {
        format!(
            "{} {} | Level {}",
            self.actor_name,
            self.category.display_name(),
            self.target_level
        )
    }

    pub fn category(&self) -> FeatCategory {
        self.category
    }

    pub fn target_level(&self) -> Level {
        self.target_level
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectorState::Open
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn candidates(&self) -> &[FeatRecord] {
        &self.candidates
    }

    /// The current ordered, filtered view
    pub fn view(&self) -> Vec<&FeatRecord> {
        self.view.iter().map(|&index| &self.candidates[index]).collect()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    fn recompute(&mut self) {
        self.view = view_indices(&self.candidates, &self.criteria, self.category);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(WizardError::SessionClosed(self.category))
        }
    }

    /// Apply one change and recompute
    pub fn apply(&mut self, change: CriteriaChange) -> Result<()> {
        self.ensure_open()?;
        self.criteria.apply(change);
        self.recompute();
        Ok(())
    }

    /// Apply queued changes in order, then recompute once from the final state
    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = CriteriaChange>) -> Result<()> {
        self.ensure_open()?;
        for change in changes {
            self.criteria.apply(change);
        }
        self.recompute();
        Ok(())
    }

    pub fn set_min_level(&mut self, level: Option<Level>) -> Result<()> {
        self.apply(CriteriaChange::MinLevel(level))
    }

    pub fn set_max_level(&mut self, level: Option<Level>) -> Result<()> {
        self.apply(CriteriaChange::MaxLevel(level))
    }

    pub fn set_search(&mut self, text: &str) -> Result<()> {
        self.apply(CriteriaChange::Search(text.to_string()))
    }

    pub fn set_skill(&mut self, skill: Skill, checked: bool) -> Result<()> {
        self.apply(CriteriaChange::Skill { skill, checked })
    }

    pub fn set_sort_key(&mut self, key: SortKey) -> Result<()> {
        self.apply(CriteriaChange::SortKey(key))
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) -> Result<()> {
        self.apply(CriteriaChange::SortDirection(direction))
    }

    pub fn toggle_sort_direction(&mut self) -> Result<()> {
        self.apply(CriteriaChange::ToggleSortDirection)
    }

    pub fn set_include_archetype_feats(&mut self, include: bool) -> Result<()> {
        self.apply(CriteriaChange::IncludeArchetypeFeats(include))
    }

    pub fn set_dedication_search(&mut self, text: &str) -> Result<()> {
        self.apply(CriteriaChange::DedicationSearch(text.to_string()))
    }

    /// Find a candidate by id, ignoring the current filters
    pub fn lookup(&self, id: &FeatId) -> Option<&FeatRecord> {
        self.by_id.get(id).map(|&index| &self.candidates[index])
    }

    /// Pick a feat and close the session
    ///
    /// The id is resolved against the full candidate list, so a feat hidden by
    /// the filters can still be chosen. Unknown ids leave the session open.
    pub fn select(&mut self, id: &FeatId) -> Result<FeatRecord> {
        if !self.is_open() {
            tracing::warn!("Ignoring selection of {} on closed {} selector", id, self.category);
            return Err(WizardError::SessionClosed(self.category));
        }

        let Some(feat) = self.lookup(id).cloned() else {
            tracing::error!("Feat with id {} not found", id);
            return Err(WizardError::FeatNotFound(id.clone()));
        };

        let event = FeatSelected {
            category: self.category,
            feat: feat.clone(),
        };
        if self.events.send(event).is_err() {
            tracing::warn!("Selection receiver for {} selector was dropped", self.category);
        }

        tracing::info!("Selected {} for {} {}", feat.name, self.actor_name, self.category);
        self.state = SelectorState::Closed;
        Ok(feat)
    }

    /// Close without selecting
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("Closed {} selector without a selection", self.category);
        }
        self.state = SelectorState::Closed;
    }

    /// Post a feat to chat using the host's full record
    pub fn send_to_chat<H: HostBridge + ?Sized>(&self, host: &mut H, id: &FeatId) -> Result<()> {
        let Some(feat) = host.resolve_full_record(id)? else {
            tracing::warn!("Cannot send unknown feat {} to chat", id);
            return Err(WizardError::FeatNotFound(id.clone()));
        };
        host.post_feat_to_chat(&feat)
    }

    pub fn context(&self) -> SelectorContext {
        SelectorContext {
            title: self.title(),
            category: self.category,
            feats: self
                .view()
                .into_iter()
                .map(|feat| FeatEntry::from_record(feat, self.show_prerequisites))
                .collect(),
            filters: self.criteria.clone(),
            skills: skill_options(&self.criteria),
            show_dedication_search: includes_archetype_feats(&self.criteria, self.category),
            sort_icon: self.criteria.sort_method().icon_key(),
        }
    }

    pub fn render<H: HostBridge + ?Sized>(&self, host: &H) -> Result<String> {
        host.render_view(&self.context())
    }
}
