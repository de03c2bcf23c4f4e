use crate::fetcher::FetcherConfig;
use crate::view::Element;
use crate::LinkData;
use std::sync::Arc;
use tracing::info;

/// Non-blocking notification surface supplied by the host editor.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str);
}

/// Fallback notifier for hosts without a notification UI: messages go to the
/// log instead of being swallowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, message: &str) {
        info!(message = %message, "Notification");
    }
}

/// Host i18n hook applied to every user-facing string.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Style class names the host exposes to its tools.
#[derive(Debug, Clone)]
pub struct ApiStyles {
    pub input: String,
    pub loader: String,
    pub button: String,
    pub settings_button: String,
    pub settings_button_active: String,
}

impl Default for ApiStyles {
    fn default() -> Self {
        Self {
            input: "cdx-input".into(),
            loader: "cdx-loader".into(),
            button: "cdx-button".into(),
            settings_button: "cdx-settings-button".into(),
            settings_button_active: "cdx-settings-button--active".into(),
        }
    }
}

/// The slice of the host API the block consumes.
#[derive(Clone)]
pub struct HostApi {
    pub styles: ApiStyles,
    pub notifier: Arc<dyn Notifier>,
    pub i18n: Arc<dyn Translator>,
}

impl Default for HostApi {
    fn default() -> Self {
        Self {
            styles: ApiStyles::default(),
            notifier: Arc::new(LogNotifier),
            i18n: Arc::new(IdentityTranslator),
        }
    }
}

/// Construction payload the host hands to a new block instance.
#[derive(Default)]
pub struct ToolParams {
    pub data: LinkData,
    pub config: FetcherConfig,
    pub api: HostApi,
    pub read_only: bool,
}

/// Toolbox entry the host lists when offering this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolboxEntry {
    pub icon: &'static str,
    pub title: &'static str,
}

/// Action dispatched back to the block when a settings item is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    ToggleEdit,
}

#[derive(Debug, Clone)]
pub struct SettingsItem {
    pub icon: &'static str,
    pub name: &'static str,
    pub label: String,
    pub toggle: bool,
    pub is_active: bool,
    pub action: SettingsAction,
}

/// Capability contract a block tool implements for the host runtime. The
/// host owns the lifecycle; the tool only answers these calls.
pub trait BlockTool {
    const IS_READ_ONLY_SUPPORTED: bool;
    const ENABLE_LINE_BREAKS: bool;

    fn render(&self) -> Element;
    fn save(&self) -> LinkData;
    fn validate(&self, data: &LinkData) -> bool;
    fn render_settings(&self) -> Vec<SettingsItem>;

    fn toolbox() -> ToolboxEntry
    where
        Self: Sized;
}
