//! Related user form use case
//!
//! Headless controller for the create/edit related-user form. It owns the
//! form value and the permission group selection, and routes every remote
//! call through the [`SessionRetryGuard`] so an expired session is recovered
//! without the caller noticing.
//!
//! Every remote call issued here (`find`, `save`, `update`,
//! `list_permission_groups`) may be replayed once by the guard. `find` and
//! the listing are reads; `save` is only replayed when the first attempt was
//! rejected for an expired token, before the API processed it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    domain::{
        DomainError, PermissionGroup, PermissionGroupFilter, PermissionGroupSelection, RecordId,
        RelatedUser, RelatedUserInput, Route,
    },
    ports::{IMessenger, INavigator, IRelatedUserApi},
};

use super::{
    initializer::{InitError, InitStep, LoadState, SequentialInitializer},
    messages::ErrorMessages,
    session_retry::{GuardError, SessionRetryGuard},
};

/// Route shown after a successful submit
pub const DEFAULT_LIST_ROUTE: &str = "main/related-user";

/// Errors returned by form operations
#[derive(Debug, Error)]
pub enum FormError {
    /// The route id is not a valid record id
    #[error(transparent)]
    InvalidId(#[from] DomainError),

    /// A remote call failed after the guard gave up
    #[error(transparent)]
    Remote(#[from] GuardError),

    /// A setup step failed
    #[error(transparent)]
    Init(#[from] InitError),
}

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(RecordId),
}

/// Settings the form takes from configuration
#[derive(Debug, Clone)]
pub struct FormSettings {
    /// Route shown after a successful submit
    pub list_route: Route,
    /// Permission group fields matched by the autocomplete filter
    pub search_fields: Vec<String>,
    pub messages: ErrorMessages,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            list_route: Route::new(DEFAULT_LIST_ROUTE.to_string())
                .unwrap_or_else(|_| Route::entry()),
            search_fields: vec!["name".to_string()],
            messages: ErrorMessages::default(),
        }
    }
}

impl FormSettings {
    /// Builds settings from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        Ok(Self {
            list_route: Route::new(config.routes.list.clone())?,
            search_fields: config.api.search_fields.clone(),
            messages: ErrorMessages::from_config(&config.messages),
        })
    }
}

/// Controller for the related-user form
pub struct RelatedUserForm {
    api: Arc<dyn IRelatedUserApi>,
    guard: SessionRetryGuard,
    messenger: Arc<dyn IMessenger>,
    navigator: Arc<dyn INavigator>,
    initializer: SequentialInitializer,
    settings: FormSettings,

    mode: FormMode,
    record: Option<RelatedUser>,
    value: RelatedUserInput,
    selection: PermissionGroupSelection,
    filtered: Vec<PermissionGroup>,
    input_text: String,
    busy: bool,
}

impl RelatedUserForm {
    /// Creates a form in add mode with default settings
    pub fn new(
        api: Arc<dyn IRelatedUserApi>,
        guard: SessionRetryGuard,
        messenger: Arc<dyn IMessenger>,
        navigator: Arc<dyn INavigator>,
    ) -> Self {
        Self {
            api,
            guard,
            messenger,
            navigator,
            initializer: SequentialInitializer::new(),
            settings: FormSettings::default(),
            mode: FormMode::Add,
            record: None,
            value: RelatedUserInput::default(),
            selection: PermissionGroupSelection::new(),
            filtered: Vec::new(),
            input_text: String::new(),
            busy: false,
        }
    }

    pub fn with_settings(mut self, settings: FormSettings) -> Self {
        self.settings = settings;
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Opens the form for `route_id` (edit) or without one (add), then runs
    /// the setup steps in order.
    ///
    /// A failed record load is reported to the user and returned; the setup
    /// steps are not run in that case.
    pub async fn open(
        &mut self,
        route_id: Option<&str>,
        steps: Vec<InitStep>,
    ) -> Result<(), FormError> {
        self.mode = match route_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => FormMode::Edit(RecordId::new(id.to_string())?),
            None => FormMode::Add,
        };

        if let FormMode::Edit(id) = &self.mode {
            debug!(id = %id, "Loading related user for edit");
            let api = Arc::clone(&self.api);
            let id = id.clone();
            let result = self.guard.execute(|| api.find(&id)).await;
            match result {
                Ok(record) => self.patch(record),
                Err(err) => {
                    self.report_failure(&err).await;
                    return Err(err.into());
                }
            }
        }

        self.initializer.run_sequence(steps).await?;
        Ok(())
    }

    /// Copies a loaded record into the form value and the chip selection
    fn patch(&mut self, record: RelatedUser) {
        self.value = RelatedUserInput::from_record(&record);
        self.selection = PermissionGroupSelection::from_groups(&record.permission_group);
        self.record = Some(record);
    }

    /// Clears the form value, the selection and the autocomplete state
    pub fn reset(&mut self) {
        self.value = RelatedUserInput::default();
        self.selection.clear();
        self.filtered.clear();
        self.input_text.clear();
    }

    // ========================================================================
    // Permission group chips
    // ========================================================================

    /// Adds a chip typed by hand (Enter or comma in the chip input).
    ///
    /// Typed chips carry no id, so they are shown but never submitted.
    pub fn add_typed_permission_group(&mut self, text: &str) {
        let label = text.trim();
        if !label.is_empty() {
            self.selection.push_label(label);
        }
        self.input_text.clear();
    }

    /// Removes the chip with `label`, together with its id
    pub fn remove_permission_group(&mut self, label: &str) {
        if self.selection.remove_label(label).is_some() {
            self.sync_permission_group_ids();
        }
    }

    /// Adds a chip picked from the autocomplete options
    pub fn select_permission_group(&mut self, group: &PermissionGroup) {
        self.selection.push_option(group);
        self.input_text.clear();
        self.sync_permission_group_ids();
    }

    fn sync_permission_group_ids(&mut self) {
        self.value.permission_group_id = self.selection.ids();
    }

    /// Display name for a permission group id shown in the autocomplete input
    pub fn display_permission_group(&self, id: &str) -> Option<String> {
        if id.is_empty() {
            return None;
        }
        let populated = self
            .record
            .as_ref()
            .and_then(|r| r.populated_permission_group.as_ref());
        if let Some(group) = populated.filter(|g| g.id == id) {
            return Some(group.name.clone());
        }
        self.filtered
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.clone())
    }

    /// Updates the autocomplete input text
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Refreshes the autocomplete options for `term`; an empty term is ignored
    pub async fn search_permission_groups(&mut self, term: &str) -> Result<(), FormError> {
        let Some(filter) = PermissionGroupFilter::new(&self.settings.search_fields, term) else {
            return Ok(());
        };

        let api = Arc::clone(&self.api);
        let result = self
            .guard
            .execute(|| api.list_permission_groups(&filter))
            .await;

        match result {
            Ok(groups) => {
                debug!(term, count = groups.len(), "Permission groups filtered");
                self.filtered = groups;
                self.busy = false;
                Ok(())
            }
            Err(err) => {
                self.report_failure(&err).await;
                Err(err.into())
            }
        }
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Saves (add mode) or updates (edit mode) the form value.
    ///
    /// On success the user is sent to the list route and the form is reset.
    /// On failure the message is reported and the form keeps its input.
    pub async fn submit(&mut self) -> Result<RelatedUser, FormError> {
        self.busy = true;

        let api = Arc::clone(&self.api);
        let input = self.value.clone();
        let result = match &self.mode {
            FormMode::Add => self.guard.execute(|| api.save(&input)).await,
            FormMode::Edit(id) => {
                let id = id.clone();
                self.guard.execute(|| api.update(&input, &id)).await
            }
        };

        match result {
            Ok(saved) => {
                info!(mode = ?self.mode, "Related user submitted");
                if let Err(e) = self.navigator.navigate(&self.settings.list_route).await {
                    warn!(
                        error = %e,
                        route = %self.settings.list_route,
                        "Failed to navigate after submit"
                    );
                }
                self.busy = false;
                self.reset();
                Ok(saved)
            }
            Err(err) => {
                self.busy = false;
                self.report_failure(&err).await;
                Err(err.into())
            }
        }
    }

    /// Surfaces a failure the guard did not already report
    async fn report_failure(&self, err: &GuardError) {
        if err.is_refresh_failure() {
            return;
        }
        let message = self.settings.messages.to_message(err.message());
        if let Err(e) = self.messenger.report(&message).await {
            warn!(error = %e, "Failed to report error message");
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_add_mode(&self) -> bool {
        self.mode == FormMode::Add
    }

    pub fn record(&self) -> Option<&RelatedUser> {
        self.record.as_ref()
    }

    pub fn value(&self) -> &RelatedUserInput {
        &self.value
    }

    /// Mutable access to the form fields. Permission group ids are managed
    /// by the chip operations.
    pub fn value_mut(&mut self) -> &mut RelatedUserInput {
        &mut self.value
    }

    pub fn selection(&self) -> &PermissionGroupSelection {
        &self.selection
    }

    pub fn filtered_permission_groups(&self) -> &[PermissionGroup] {
        &self.filtered
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn readiness(&self) -> LoadState {
        self.initializer.state()
    }
}
