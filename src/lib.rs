use async_trait::async_trait;

mod block;
mod data;
mod error;
mod fetcher;
mod host;
#[cfg(feature = "logging")]
mod logging;
mod state;
mod utils;
mod view;

pub use block::{LinkPreviewBlock, LOADER_MIN_VISIBLE};
pub use data::{LinkData, LinkDataPatch, MetaMap};
pub use error::LinkToolError;
pub use fetcher::{BackendResponse, Fetcher, FetcherConfig};
pub use host::{
    ApiStyles, BlockTool, HostApi, IdentityTranslator, LogNotifier, Notifier, SettingsAction,
    SettingsItem, ToolParams, ToolboxEntry, Translator,
};
#[cfg(feature = "logging")]
pub use logging::{setup_logging, LogConfig};
pub use state::{BlockState, RenderState};
pub use utils::host_label;
pub use view::{css, Element};

/// Network collaborator of the block: one request per user-triggered fetch,
/// resolved by the configured backend into structured link metadata.
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    async fn fetch_meta(&self, url: &str) -> Result<BackendResponse, LinkToolError>;
}
