//! Component controller
//!
//! [`TableComponent`] owns the data set and sort state, reacts to the
//! `src` attribute by fetching new data, and produces a fresh [`View`]
//! after every state change. It is a cheap-clone handle over shared
//! state, so a host can drive clicks from its UI loop while loads
//! resolve on separate tasks.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use log::debug;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::LoadError;
use crate::model::DataSet;
use crate::model::SortState;
use crate::render::View;
use crate::render::render;
use crate::template::PlaceholderPolicy;
use crate::template::TemplateSet;

/// The attribute whose changes trigger a data load.
pub const ATTR_SRC: &str = "src";

/// How load and parse failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorMode {
    /// Legacy behavior: failures are swallowed, the previous data set
    /// and render stay visible, nothing reaches the caller. Swallowed
    /// failures are still logged at `warn`.
    #[default]
    Silent,
    /// Failures are returned to the caller and recorded on the
    /// component.
    Surface,
}

/// Component behavior knobs.
///
/// # Example
///
/// ```
/// use taotable_lib::component::{ComponentConfig, ErrorMode};
/// use taotable_lib::template::PlaceholderPolicy;
///
/// let config = ComponentConfig::default()
///     .with_error_mode(ErrorMode::Surface)
///     .with_placeholder_policy(PlaceholderPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// How failures are reported.
    pub error_mode: ErrorMode,
    /// What unmapped template markers render as.
    pub placeholder_policy: PlaceholderPolicy,
}

impl ComponentConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Sets the placeholder policy.
    pub fn with_placeholder_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.placeholder_policy = policy;
        self
    }
}

/// Token identifying one issued load.
///
/// Loads may overlap; a completion is applied only while its ticket is
/// still the latest issued, so stale responses can never overwrite the
/// data of a newer load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What became of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched data replaced the data set and reset the sort.
    Applied,
    /// A newer load was issued meanwhile; this response was discarded.
    Stale,
    /// The load failed and was swallowed (silent mode only); the
    /// previous data set is untouched.
    Failed,
}

struct ComponentState {
    data: DataSet,
    sort: SortState,
    attributes: HashMap<String, String>,
    last_error: Option<String>,
}

struct ComponentInner {
    templates: TemplateSet,
    config: ComponentConfig,
    http: reqwest::Client,
    state: Mutex<ComponentState>,
    /// Token of the most recently issued load.
    issued: AtomicU64,
}

/// The sortable-table component.
#[derive(Clone)]
pub struct TableComponent {
    inner: Arc<ComponentInner>,
}

impl TableComponent {
    /// Creates a component with the given templates and default config.
    ///
    /// The component starts with an empty data set and reset sort state.
    pub fn new(templates: TemplateSet) -> Self {
        Self::with_config(templates, ComponentConfig::default())
    }

    /// Creates a component with explicit config.
    pub fn with_config(templates: TemplateSet, config: ComponentConfig) -> Self {
        Self {
            inner: Arc::new(ComponentInner {
                templates,
                config,
                http: reqwest::Client::new(),
                state: Mutex::new(ComponentState {
                    data: DataSet::new(),
                    sort: SortState::Unsorted,
                    attributes: HashMap::new(),
                    last_error: None,
                }),
                issued: AtomicU64::new(0),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ComponentState> {
        self.inner.state.lock().unwrap()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Sets an attribute, reacting to the ones the component observes.
    ///
    /// Setting or changing [`ATTR_SRC`] triggers a load from that
    /// address and returns its outcome. Other attributes are stored but
    /// have no behavior.
    pub async fn set_attribute(&self, name: &str, value: &str) -> Result<Option<LoadOutcome>, Error> {
        self.state()
            .attributes
            .insert(name.to_string(), value.to_string());
        match name {
            ATTR_SRC => Ok(Some(self.load(value).await?)),
            _ => Ok(None),
        }
    }

    /// Stores an attribute without reacting to it.
    ///
    /// Used when attributes are assigned before the component is
    /// attached; [`connected`](Self::connected) picks up a recorded
    /// `src` later.
    pub fn record_attribute(&self, name: &str, value: &str) {
        self.state()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Returns the current value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state().attributes.get(name).cloned()
    }

    /// Drives the initial load, if a `src` attribute was recorded
    /// before the component was attached (see [`factory`]).
    ///
    /// [`factory`]: crate::registry::factory
    pub async fn connected(&self) -> Result<Option<LoadOutcome>, Error> {
        match self.attribute(ATTR_SRC) {
            Some(src) => Ok(Some(self.load(&src).await?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replaces the data set wholesale and resets the sort state.
    ///
    /// Data and sort state are always updated together; the sort
    /// indicator disappears from the next render.
    pub fn set_data(&self, data: DataSet) {
        let mut state = self.state();
        state.data = data;
        state.sort.reset();
    }

    /// Embedded-data mode: parses the element's inner content as a JSON
    /// array and renders immediately.
    ///
    /// A parse failure yields an empty data set; in silent mode it is
    /// not reported further.
    pub fn embed_json(&self, inner: &str) -> Result<View, Error> {
        match DataSet::from_json(inner) {
            Ok(data) => {
                self.set_data(data);
                self.view()
            }
            Err(err) => {
                self.set_data(DataSet::new());
                match self.inner.config.error_mode {
                    ErrorMode::Silent => {
                        warn!("embedded data did not parse, rendering empty: {err}");
                        self.state().last_error = Some(err.to_string());
                        self.view()
                    }
                    ErrorMode::Surface => {
                        self.state().last_error = Some(err.to_string());
                        Err(err.into())
                    }
                }
            }
        }
    }

    /// Loads a new data set from `url`.
    ///
    /// On a 200 response the body is parsed as a JSON array, replaces
    /// the data set and resets the sort. Non-200 responses and bodies
    /// that fail to parse leave the previous data untouched; whether
    /// the failure reaches the caller depends on [`ErrorMode`].
    pub async fn load(&self, url: &str) -> Result<LoadOutcome, Error> {
        let ticket = self.issue_load();
        let result = self.fetch_rows(url).await;
        self.complete_load(ticket, result)
    }

    /// Issues a ticket for a load about to start.
    ///
    /// Exposed so hosts that run their own fetch pipeline can still get
    /// the stale-response protection of [`complete_load`].
    pub fn issue_load(&self) -> LoadTicket {
        LoadTicket(self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Completes a load issued with [`issue_load`].
    ///
    /// If a newer ticket has been issued meanwhile the result is
    /// discarded, successful or not.
    pub fn complete_load(
        &self,
        ticket: LoadTicket,
        result: Result<DataSet, Error>,
    ) -> Result<LoadOutcome, Error> {
        // Freshness check and apply share one critical section: a
        // completion racing in from another task cannot slip between
        // them and get overwritten by this, older, one.
        let mut state = self.state();
        if ticket.0 != self.inner.issued.load(Ordering::SeqCst) {
            debug!("discarding stale load response (token {})", ticket.0);
            return Ok(LoadOutcome::Stale);
        }
        match result {
            Ok(data) => {
                state.data = data;
                state.sort.reset();
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                state.last_error = Some(err.to_string());
                match self.inner.config.error_mode {
                    ErrorMode::Silent => {
                        warn!("load failed, keeping previous data: {err}");
                        Ok(LoadOutcome::Failed)
                    }
                    ErrorMode::Surface => Err(err),
                }
            }
        }
    }

    async fn fetch_rows(&self, url: &str) -> Result<DataSet, Error> {
        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(LoadError::from)?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(LoadError::http(status, url).into());
        }
        let body = response.text().await.map_err(LoadError::from)?;
        Ok(DataSet::from_json(&body)?)
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Applies one header click on `column`: the active column flips
    /// direction, any other column becomes active ascending. Re-sorts
    /// and returns the fresh view.
    pub fn click(&self, column: &str) -> Result<View, Error> {
        let mut state = self.state();
        state.sort.toggle(column);
        let sort = state.sort.clone();
        state.data.sort(&sort);
        self.render_state(&state)
    }

    /// Re-sorts the data under the current sort state.
    pub fn sort_data(&self) {
        let mut state = self.state();
        let sort = state.sort.clone();
        state.data.sort(&sort);
    }

    /// Clears the sort state back to unsorted.
    pub fn reset_sorting(&self) {
        self.state().sort.reset();
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Renders the current state.
    pub fn view(&self) -> Result<View, Error> {
        self.render_state(&self.state())
    }

    /// Returns a copy of the current data set, in display order.
    pub fn data(&self) -> DataSet {
        self.state().data.clone()
    }

    /// Returns the current sort state.
    pub fn sort_state(&self) -> SortState {
        self.state().sort.clone()
    }

    /// Returns and clears the most recent failure, if any.
    ///
    /// In silent mode this is the only way a host can observe that a
    /// load was dropped.
    pub fn take_last_error(&self) -> Option<String> {
        self.state().last_error.take()
    }

    fn render_state(&self, state: &ComponentState) -> Result<View, Error> {
        Ok(render(
            &state.data,
            &state.sort,
            &self.inner.templates,
            self.inner.config.placeholder_policy,
        )?)
    }
}

impl std::fmt::Debug for TableComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("TableComponent")
            .field("rows", &state.data.len())
            .field("sort", &state.sort)
            .field("attributes", &state.attributes)
            .finish()
    }
}
