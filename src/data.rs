use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque metadata bag. Whatever the backend returns is stored verbatim;
/// `image.url`, `title` and `description` are the recognized fields.
pub type MetaMap = Map<String, Value>;

/// Persisted block data, round-tripped through the host's document store.
///
/// An empty `meta` map is the "not yet fetched" sentinel: it is populated if
/// and only if a fetch has succeeded for the current `link`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub meta: MetaMap,
}

/// Partial update for [`LinkData::set_data`]. Fields left `None` keep their
/// prior value, so the link set optimistically on fetch start survives the
/// later meta-only update on completion.
#[derive(Debug, Clone, Default)]
pub struct LinkDataPatch {
    pub link: Option<String>,
    pub meta: Option<MetaMap>,
}

impl LinkDataPatch {
    pub fn link(value: impl Into<String>) -> Self {
        Self {
            link: Some(value.into()),
            meta: None,
        }
    }

    pub fn meta(value: MetaMap) -> Self {
        Self {
            link: None,
            meta: Some(value),
        }
    }

    pub fn with_meta(mut self, value: MetaMap) -> Self {
        self.meta = Some(value);
        self
    }
}

impl LinkData {
    pub fn new(link: impl Into<String>, meta: MetaMap) -> Self {
        Self {
            link: link.into(),
            meta,
        }
    }

    /// Merge a partial update over the current values. Never a full replace.
    pub fn set_data(&mut self, patch: LinkDataPatch) {
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(meta) = patch.meta {
            self.meta = meta;
        }
    }

    /// Snapshot handed to the host for persistence.
    pub fn get_data(&self) -> LinkData {
        self.clone()
    }

    /// A block is worth keeping iff the link, trimmed, is non-empty.
    pub fn validate(data: &LinkData) -> bool {
        !data.link.trim().is_empty()
    }

    pub fn has_meta(&self) -> bool {
        !self.meta.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.get("title")?.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.get("description")?.as_str()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.meta.get("image")?.get("url")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta_with_title(title: &str) -> MetaMap {
        let mut meta = MetaMap::new();
        meta.insert("title".into(), json!(title));
        meta
    }

    #[test]
    fn partial_updates_never_clobber_unspecified_fields() {
        let mut data = LinkData::default();
        data.set_data(LinkDataPatch::link("a"));
        data.set_data(LinkDataPatch::meta(meta_with_title("t")));

        assert_eq!(data.link, "a");
        assert_eq!(data.title(), Some("t"));
    }

    #[test]
    fn validate_rejects_blank_links() {
        assert!(!LinkData::validate(&LinkData::new("", MetaMap::new())));
        assert!(!LinkData::validate(&LinkData::new("  ", MetaMap::new())));
        assert!(LinkData::validate(&LinkData::new("x", MetaMap::new())));
    }

    #[test]
    fn empty_meta_is_the_not_fetched_sentinel() {
        let data = LinkData::new("https://e.com", MetaMap::new());
        assert!(!data.has_meta());
        assert!(LinkData::new("https://e.com", meta_with_title("t")).has_meta());
    }

    #[test]
    fn nested_image_url_is_read_from_the_opaque_bag() {
        let mut meta = MetaMap::new();
        meta.insert("image".into(), json!({ "url": "https://e.com/p.png" }));
        let data = LinkData::new("https://e.com", meta);

        assert_eq!(data.image_url(), Some("https://e.com/p.png"));
        assert_eq!(data.title(), None);
    }

    #[test]
    fn unrecognized_meta_fields_round_trip_verbatim() {
        let mut meta = MetaMap::new();
        meta.insert("keywords".into(), json!(["a", "b"]));
        let data = LinkData::new("https://e.com", meta.clone());

        let restored: LinkData =
            serde_json::from_str(&serde_json::to_string(&data.get_data()).unwrap()).unwrap();
        assert_eq!(restored.meta, meta);
    }
}
