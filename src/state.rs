use crate::LinkData;

/// Which subtree is mounted: the URL input or the rendered preview card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Edit,
    View,
}

/// Renderable state of the block. `loading` and `error` are orthogonal
/// indicators layered over the two-state machine; neither changes which
/// subtree is mounted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub state: BlockState,
    pub loading: bool,
    pub error: bool,
}

impl RenderState {
    /// Initial state for loaded data: straight to VIEW when metadata has
    /// already been fetched, otherwise the input affordance.
    pub fn for_data(data: &LinkData) -> Self {
        let state = if data.has_meta() {
            BlockState::View
        } else {
            BlockState::Edit
        };
        Self {
            state,
            loading: false,
            error: false,
        }
    }

    /// A new fetch attempt clears any previous error before the loader shows.
    pub fn begin_fetch(&mut self) {
        self.error = false;
        self.loading = true;
    }

    /// Successful fetch mounts the preview. The loader is cleared separately
    /// once its minimum visible duration has elapsed.
    pub fn fetch_succeeded(&mut self) {
        self.state = BlockState::View;
    }

    /// Failed fetch keeps the input mounted and flags the error styling.
    pub fn fetch_failed(&mut self) {
        self.state = BlockState::Edit;
        self.error = true;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Explicit toggle back to the input, dropping any leftover loader.
    pub fn show_edit(&mut self) {
        self.state = BlockState::Edit;
        self.loading = false;
    }
}
