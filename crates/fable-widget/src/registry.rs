//! Tab language assignments.
//!
//! [`TabLanguageRegistry`] keeps the tab → language mapping of one widget
//! instance, enforces that a language is shown by at most one tab, and persists
//! every change through a [`KeyValueStore`].
//!
//! Two store slots are used:
//!
//! - `multilingual-widget-{id}` holds the instance's own state
//! - `multilingual-widget-default` holds a snapshot new instances may seed from
//!
//! Persistence failures never fail an operation; they are logged and dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use fable_content::Language;
use fable_store::{KeyValueStore, KeyValueStoreExt};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WidgetError;

/// Prefix of per-instance store keys.
pub const STORAGE_KEY_PREFIX: &str = "multilingual-widget-";

/// Store key of the shared default snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "multilingual-widget-default";

/// Serialized widget state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWidgetState {
    /// Assigned tabs; unassigned tabs are absent.
    ///
    /// Tabs stored as `null` are read back as unassigned.
    #[serde(default, deserialize_with = "deserialize_assigned")]
    pub tab_config: BTreeMap<String, Language>,
    /// Active tab identifier; empty when missing.
    #[serde(default)]
    pub active_tab: String,
    /// Last write, in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    /// Set on the shared default snapshot.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    /// Creation time of the default snapshot, in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

fn deserialize_assigned<'de, D>(deserializer: D) -> Result<BTreeMap<String, Language>, D::Error>
where
    D: Deserializer<'de>,
{
    let config = Option::<BTreeMap<String, Option<Language>>>::deserialize(deserializer)?;
    Ok(config
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(tab, language)| language.map(|language| (tab, language)))
        .collect())
}

/// A language is already shown by another tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConflict {
    /// Requested language.
    pub language: Language,
    /// Tab currently holding it.
    pub tab: String,
}

/// Result of [`TabLanguageRegistry::set_language`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedResult {
    /// Assignment changed and was persisted.
    Applied,
    /// Assignment left untouched.
    Rejected(LanguageConflict),
}

impl AppliedResult {
    /// Whether the assignment was applied.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Tab → language assignments of one widget instance.
pub struct TabLanguageRegistry {
    widget_id: String,
    tabs: Vec<String>,
    store: Arc<dyn KeyValueStore>,
    assignment: BTreeMap<String, Language>,
    active_tab: String,
}

impl TabLanguageRegistry {
    /// Open the registry of widget `widget_id` with the given tabs.
    ///
    /// Restores the persisted slot when it holds valid state. Absent or
    /// malformed data yields all tabs unassigned with the first tab active;
    /// nothing is written until the first change.
    #[must_use]
    pub fn open(widget_id: &str, tabs: Vec<String>, store: Arc<dyn KeyValueStore>) -> Self {
        let mut registry = Self {
            widget_id: widget_id.to_owned(),
            active_tab: tabs.first().cloned().unwrap_or_default(),
            tabs,
            store,
            assignment: BTreeMap::new(),
        };

        let key = registry.storage_key();
        match registry.store.get_json::<PersistedWidgetState>(&key) {
            Ok(Some(state)) => registry.restore(state),
            Ok(None) => tracing::debug!(key, "No persisted widget state"),
            Err(e) => tracing::warn!(key, error = %e, "Ignoring unreadable widget state"),
        }
        registry
    }

    /// Store key of this instance.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.widget_id)
    }

    /// Widget instance identifier.
    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    /// Tab identifiers in display order.
    #[must_use]
    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    /// Active tab identifier.
    #[must_use]
    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    /// Language assigned to `tab`.
    #[must_use]
    pub fn language(&self, tab: &str) -> Option<Language> {
        self.assignment.get(tab).copied()
    }

    /// Assign `language` to `tab`, or clear it with `None`.
    ///
    /// Clearing always succeeds. Assigning a language held by another tab is
    /// rejected and leaves every assignment unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownTab`] if `tab` is not a tab of this widget.
    pub fn set_language(
        &mut self,
        tab: &str,
        language: Option<Language>,
    ) -> Result<AppliedResult, WidgetError> {
        self.require_tab(tab)?;

        match language {
            None => {
                self.assignment.remove(tab);
            }
            Some(language) => {
                if let Some(holder) = self.holder_of(language, tab) {
                    let conflict = LanguageConflict {
                        language,
                        tab: holder.to_owned(),
                    };
                    tracing::warn!(
                        tab,
                        %language,
                        holder = %conflict.tab,
                        "Language already used by another tab"
                    );
                    return Ok(AppliedResult::Rejected(conflict));
                }
                self.assignment.insert(tab.to_owned(), language);
            }
        }

        self.persist();
        Ok(AppliedResult::Applied)
    }

    /// Languages `tab` may switch to, in canonical order.
    ///
    /// Every language except those held by other tabs; the tab's own language
    /// is included.
    #[must_use]
    pub fn available_languages_for(&self, tab: &str) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|&language| self.holder_of(language, tab).is_none())
            .collect()
    }

    /// Make `tab` the active tab and persist.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownTab`] if `tab` is not a tab of this widget.
    pub fn set_active_tab(&mut self, tab: &str) -> Result<(), WidgetError> {
        self.require_tab(tab)?;
        tab.clone_into(&mut self.active_tab);
        self.persist();
        Ok(())
    }

    /// Current state as it would be persisted.
    #[must_use]
    pub fn snapshot(&self) -> PersistedWidgetState {
        PersistedWidgetState {
            tab_config: self.assignment.clone(),
            active_tab: self.active_tab.clone(),
            last_updated: Some(Utc::now().timestamp_millis()),
            is_default: false,
            created_at: None,
        }
    }

    /// Write the current assignment and active tab to the shared default slot.
    pub fn save_as_default(&self) {
        let state = PersistedWidgetState {
            last_updated: None,
            is_default: true,
            created_at: Some(Utc::now().timestamp_millis()),
            ..self.snapshot()
        };
        match self.store.set_json(DEFAULT_STORAGE_KEY, &state) {
            Ok(()) => tracing::info!(widget = %self.widget_id, "Saved default configuration"),
            Err(e) => tracing::warn!(error = %e, "Failed to save default configuration"),
        }
    }

    /// Replace the current state with the shared default snapshot.
    ///
    /// Returns `false`, changing nothing, when no usable snapshot exists.
    pub fn seed_from_default(&mut self) -> bool {
        match self.store.get_json::<PersistedWidgetState>(DEFAULT_STORAGE_KEY) {
            Ok(Some(state)) => {
                self.assignment.clear();
                self.restore(state);
                self.persist();
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable default configuration");
                false
            }
        }
    }

    /// Apply persisted state, dropping tabs this widget does not have.
    fn restore(&mut self, state: PersistedWidgetState) {
        for (tab, language) in state.tab_config {
            if self.tabs.contains(&tab) {
                self.assignment.insert(tab, language);
            } else {
                tracing::debug!(tab, "Dropping assignment of unknown tab");
            }
        }
        if self.tabs.contains(&state.active_tab) {
            self.active_tab = state.active_tab;
        }
    }

    /// Tab other than `except` holding `language`.
    fn holder_of(&self, language: Language, except: &str) -> Option<&str> {
        self.assignment
            .iter()
            .find(|(tab, lang)| tab.as_str() != except && **lang == language)
            .map(|(tab, _)| tab.as_str())
    }

    fn require_tab(&self, tab: &str) -> Result<(), WidgetError> {
        if self.tabs.iter().any(|t| t == tab) {
            Ok(())
        } else {
            Err(WidgetError::UnknownTab(tab.to_owned()))
        }
    }

    fn persist(&self) {
        let key = self.storage_key();
        if let Err(e) = self.store.set_json(&key, &self.snapshot()) {
            tracing::warn!(key, error = %e, "Failed to persist widget state");
        }
    }
}

impl std::fmt::Debug for TabLanguageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabLanguageRegistry")
            .field("widget_id", &self.widget_id)
            .field("tabs", &self.tabs)
            .field("assignment", &self.assignment)
            .field("active_tab", &self.active_tab)
            .finish_non_exhaustive()
    }
}
