use crate::host::ApiStyles;
use crate::state::{BlockState, RenderState};
use crate::utils::host_label;
use crate::LinkData;
use std::collections::BTreeMap;

/// Tool CSS class names. The host injects the actual styling; the render
/// layer only emits the hooks.
pub mod css {
    pub const BASE: &str = "link-tool";
    pub const BASE_LOADING: &str = "link-tool--loading";
    pub const BASE_ERROR: &str = "link-tool--error";
    pub const INPUT_HOLDER: &str = "link-tool__input-holder";
    pub const INPUT_HOLDER_ERROR: &str = "link-tool__input-holder--error";
    pub const INPUT: &str = "link-tool__input";
    pub const PROGRESS: &str = "link-tool__progress";
    pub const PROGRESS_LOADING: &str = "link-tool__progress--loading";
    pub const CONTENT: &str = "link-tool__content";
    pub const CONTENT_RENDERED: &str = "link-tool__content--rendered";
    pub const IMAGE: &str = "link-tool__image";
    pub const TITLE: &str = "link-tool__title";
    pub const DESCRIPTION: &str = "link-tool__description";
    pub const ANCHOR: &str = "link-tool__anchor";
}

/// One node of the rendered subtree. The host materializes this into its
/// display surface; for the block it doubles as the testable render output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<&'static str, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.classes.push(name.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Depth-first lookup by class name.
    pub fn find(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(class))
    }
}

/// Render is a pure function of state + data: the mounted subtree follows
/// `BlockState`, the loading and error indicators ride along as modifier
/// classes on the container.
pub fn render(
    state: &RenderState,
    data: &LinkData,
    input_text: &str,
    placeholder: &str,
    read_only: bool,
    styles: &ApiStyles,
) -> Element {
    let mut root = Element::new("div").class(css::BASE);
    if state.loading {
        root = root.class(css::BASE_LOADING);
    }
    if state.error {
        root = root.class(css::BASE_ERROR);
    }

    match state.state {
        BlockState::Edit => {
            root.child(render_input(state, input_text, placeholder, read_only, styles))
        }
        BlockState::View => root.child(render_preview(data)),
    }
}

fn render_input(
    state: &RenderState,
    input_text: &str,
    placeholder: &str,
    read_only: bool,
    styles: &ApiStyles,
) -> Element {
    let mut holder = Element::new("div").class(css::INPUT_HOLDER);
    if state.error {
        holder = holder.class(css::INPUT_HOLDER_ERROR);
    }

    let mut progress = Element::new("label").class(css::PROGRESS);
    if state.loading {
        progress = progress.class(css::PROGRESS_LOADING);
    }

    let input = Element::new("div")
        .class(styles.input.clone())
        .class(css::INPUT)
        .attr("contenteditable", if read_only { "false" } else { "true" })
        .attr("data-placeholder", placeholder)
        .text(input_text);

    holder.child(progress).child(input)
}

/// Preview card: image, title and description nodes are omitted entirely
/// when the corresponding meta field is absent, never rendered empty.
fn render_preview(data: &LinkData) -> Element {
    let mut content = Element::new("a")
        .class(css::CONTENT)
        .class(css::CONTENT_RENDERED)
        .attr("href", data.link.clone())
        .attr("target", "_blank")
        .attr("rel", "nofollow noindex noreferrer");

    if let Some(image_url) = data.image_url() {
        content = content.child(
            Element::new("div")
                .class(css::IMAGE)
                .attr("style", format!("background-image: url({image_url});")),
        );
    }
    if let Some(title) = data.title() {
        content = content.child(Element::new("p").class(css::TITLE).text(title));
    }
    if let Some(description) = data.description() {
        content = content.child(Element::new("p").class(css::DESCRIPTION).text(description));
    }

    content.child(
        Element::new("span")
            .class(css::ANCHOR)
            .text(host_label(&data.link)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetaMap;
    use serde_json::json;

    fn full_meta() -> MetaMap {
        let mut meta = MetaMap::new();
        meta.insert("title".into(), json!("Example"));
        meta.insert("description".into(), json!("A page"));
        meta.insert("image".into(), json!({ "url": "https://e.com/p.png" }));
        meta
    }

    fn rendered(data: &LinkData) -> Element {
        render(
            &RenderState::for_data(data),
            data,
            &data.link,
            "Link",
            false,
            &ApiStyles::default(),
        )
    }

    #[test]
    fn empty_meta_mounts_the_input_affordance() {
        let root = rendered(&LinkData::default());
        assert!(root.find(css::INPUT).is_some());
        assert!(root.find(css::CONTENT).is_none());
    }

    #[test]
    fn fetched_meta_mounts_the_preview_without_input() {
        let data = LinkData::new("https://example.com/a/b", full_meta());
        let root = rendered(&data);

        assert!(root.find(css::INPUT).is_none());
        let content = root.find(css::CONTENT).unwrap();
        assert_eq!(content.attrs.get("href").map(String::as_str), Some(data.link.as_str()));
        assert_eq!(
            root.find(css::ANCHOR).unwrap().text.as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn absent_meta_fields_are_omitted_not_empty() {
        let mut meta = MetaMap::new();
        meta.insert("title".into(), json!("Only a title"));
        let root = rendered(&LinkData::new("https://e.com", meta));

        assert!(root.find(css::TITLE).is_some());
        assert!(root.find(css::DESCRIPTION).is_none());
        assert!(root.find(css::IMAGE).is_none());
    }

    #[test]
    fn unparseable_link_labels_fall_back_verbatim() {
        let data = LinkData::new("not a url", full_meta());
        let root = rendered(&data);
        assert_eq!(
            root.find(css::ANCHOR).unwrap().text.as_deref(),
            Some("not a url")
        );
    }

    #[test]
    fn error_and_loading_ride_as_modifier_classes() {
        let data = LinkData::default();
        let mut state = RenderState::for_data(&data);
        state.begin_fetch();
        let root = render(&state, &data, "", "Link", false, &ApiStyles::default());
        assert!(root.has_class(css::BASE_LOADING));
        assert!(root.find(css::PROGRESS_LOADING).is_some());

        state.fetch_failed();
        state.finish_loading();
        let root = render(&state, &data, "", "Link", false, &ApiStyles::default());
        assert!(root.has_class(css::BASE_ERROR));
        assert!(root.find(css::INPUT_HOLDER_ERROR).is_some());
        assert!(!root.has_class(css::BASE_LOADING));
    }

    #[test]
    fn read_only_input_is_not_editable() {
        let data = LinkData::default();
        let root = render(
            &RenderState::for_data(&data),
            &data,
            "",
            "Link",
            true,
            &ApiStyles::default(),
        );
        let input = root.find(css::INPUT).unwrap();
        assert_eq!(
            input.attrs.get("contenteditable").map(String::as_str),
            Some("false")
        );
    }

    #[test]
    fn input_placeholder_comes_from_the_caller() {
        let data = LinkData::default();
        let root = render(
            &RenderState::for_data(&data),
            &data,
            "",
            "Lien",
            false,
            &ApiStyles::default(),
        );
        let input = root.find(css::INPUT).unwrap();
        assert_eq!(
            input.attrs.get("data-placeholder").map(String::as_str),
            Some("Lien")
        );
    }
}
