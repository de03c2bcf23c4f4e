use crate::host::{BlockTool, HostApi, SettingsAction, SettingsItem, ToolParams, ToolboxEntry};
use crate::state::{BlockState, RenderState};
use crate::view::{self, Element};
use crate::{BackendResponse, Fetcher, LinkData, LinkDataPatch, LinkFetcher, LinkToolError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Minimum time the loading indicator stays visible once a fetch settles,
/// so a fast backend still produces perceptible feedback.
pub const LOADER_MIN_VISIBLE: Duration = Duration::from_millis(500);

const TOOLBOX_ICON: &str = r##"<svg width="13" height="14" viewBox="0 0 13 14"><path d="M8.567 13.629c.728.464 1.581.65 2.41.558l-.873.873A3.722 3.722 0 1 1 4.84 9.794L6.694 7.94a3.722 3.722 0 0 1 5.256-.008L10.484 9.4a5.209 5.209 0 0 1-.017.016 1.625 1.625 0 0 0-2.29.009l-1.854 1.854a1.626 1.626 0 0 0 2.244 2.35z"/></svg>"##;

const PENCIL_ICON: &str = r##"<svg width="13" height="14" viewBox="0 0 13 14"><path d="M10.545 1.455l1 1a1.556 1.556 0 0 1 0 2.201L4.659 11.54 1 12l.459-3.659 6.885-6.886a1.556 1.556 0 0 1 2.201 0z"/></svg>"##;

/// The link preview block: data model, two-state render controller and
/// fetch coordinator behind the host's [`BlockTool`] contract.
pub struct LinkPreviewBlock {
    data: LinkData,
    state: RenderState,
    // Cancellable timer for the loader: set when a fetch settles, dropped
    // when a new attempt starts or the user toggles back to the input.
    loader_deadline: Option<Instant>,
    input_text: String,
    read_only: bool,
    api: HostApi,
    fetcher: Arc<dyn LinkFetcher>,
}

impl LinkPreviewBlock {
    pub fn new(params: ToolParams) -> Self {
        let fetcher = Arc::new(Fetcher::new_with_config(params.config));
        Self::new_with_fetcher(params.data, params.api, params.read_only, fetcher)
    }

    pub fn new_with_fetcher(
        data: LinkData,
        api: HostApi,
        read_only: bool,
        fetcher: Arc<dyn LinkFetcher>,
    ) -> Self {
        let state = RenderState::for_data(&data);
        let input_text = data.link.clone();
        Self {
            data,
            state,
            loader_deadline: None,
            input_text,
            read_only,
            api,
            fetcher,
        }
    }

    /// Observed render state. The loader reads as cleared once its minimum
    /// visible window has passed; nothing else ages out.
    pub fn state(&self) -> RenderState {
        let mut state = self.state;
        if let Some(deadline) = self.loader_deadline {
            if Instant::now() >= deadline {
                state.finish_loading();
            }
        }
        state
    }

    /// Resolves once the loader's minimum visible window has elapsed.
    /// Hosts re-render after awaiting this to drop the indicator.
    pub async fn loader_idle(&self) {
        if let Some(deadline) = self.loader_deadline {
            tokio::time::sleep_until(deadline).await;
        }
    }

    pub fn data(&self) -> &LinkData {
        &self.data
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Mirrors keystrokes in the URL input.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// User submitted a URL from the input (enter, paste or button).
    pub async fn submit(&mut self, url: &str) {
        self.set_input_text(url);
        self.fetch_link_data(url.to_string()).await;
    }

    /// Fetch coordinator. The link is written to the data model before the
    /// request goes out, so a failed fetch keeps the typed text for retry.
    /// There is no cancellation: a superseded response still lands on the
    /// data model, last writer wins.
    ///
    /// Returns as soon as the fetch settles. The loader keeps its minimum
    /// visible window through [`Self::state`] reading the deadline, so the
    /// host can render the outcome and keep interacting right away.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_link_data(&mut self, url: String) {
        if self.read_only {
            return;
        }

        self.state.begin_fetch();
        self.loader_deadline = None;
        self.data.set_data(LinkDataPatch::link(url.clone()));

        match self.fetcher.fetch_meta(&url).await {
            Ok(response) => self.apply_response(url, response),
            Err(e) => self.fail(e),
        }

        // Keep the loader up briefly even when the backend answers fast.
        self.loader_deadline = Some(Instant::now() + LOADER_MIN_VISIBLE);
    }

    fn apply_response(&mut self, url: String, response: BackendResponse) {
        if !response.is_success() {
            self.fail(LinkToolError::Rejected);
            return;
        }
        let Some(meta) = response.meta else {
            // The model keeps its empty meta; the block stays editable.
            self.fail(LinkToolError::MissingMeta);
            return;
        };

        let link = response.link.unwrap_or(url);
        self.data
            .set_data(LinkDataPatch::link(link).with_meta(meta));
        self.state.fetch_succeeded();
        debug!(link = %self.data.link, "Link metadata stored, preview mounted");
    }

    fn fail(&mut self, error: LinkToolError) {
        error.log();
        let message = self.api.i18n.translate(error.user_message());
        self.api.notifier.show(&message);
        self.state.fetch_failed();
    }

    /// Settings toggle. In VIEW, go back to the input without touching the
    /// saved data; in EDIT, re-run the fetch against whatever text currently
    /// sits in the input.
    pub async fn toggle_edit(&mut self) {
        match self.state.state {
            BlockState::View => {
                self.state.show_edit();
                self.loader_deadline = None;
            }
            BlockState::Edit => {
                let url = self.input_text.clone();
                self.fetch_link_data(url).await;
            }
        }
    }

    /// Dispatch entry for [`SettingsItem::action`].
    pub async fn activate_setting(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::ToggleEdit => self.toggle_edit().await,
        }
    }
}

impl BlockTool for LinkPreviewBlock {
    const IS_READ_ONLY_SUPPORTED: bool = true;
    const ENABLE_LINE_BREAKS: bool = true;

    fn render(&self) -> Element {
        view::render(
            &self.state(),
            &self.data,
            &self.input_text,
            &self.api.i18n.translate("Link"),
            self.read_only,
            &self.api.styles,
        )
    }

    fn save(&self) -> LinkData {
        self.data.get_data()
    }

    fn validate(&self, data: &LinkData) -> bool {
        LinkData::validate(data)
    }

    fn render_settings(&self) -> Vec<SettingsItem> {
        vec![SettingsItem {
            icon: PENCIL_ICON,
            name: "edit-url",
            label: self.api.i18n.translate("Edit URL"),
            toggle: true,
            is_active: self.state.state == BlockState::Edit,
            action: SettingsAction::ToggleEdit,
        }]
    }

    fn toolbox() -> ToolboxEntry {
        ToolboxEntry {
            icon: TOOLBOX_ICON,
            title: "Link",
        }
    }
}
