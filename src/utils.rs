use url::Url;

/// Display label for the preview anchor: the link's host name, or the raw
/// text verbatim when it does not parse as a URL. Never fails.
pub fn host_label(link: &str) -> String {
    match Url::parse(link) {
        Ok(parsed) => parsed
            .host_str()
            .map(str::to_string)
            .unwrap_or_else(|| link.to_string()),
        Err(_) => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_label() {
        assert_eq!(host_label("https://example.com/a/b"), "example.com");
        assert_eq!(host_label("https://example.com:8080/"), "example.com");
        assert_eq!(host_label("not a url"), "not a url");
        // Parses, but has no host component.
        assert_eq!(host_label("mailto:someone"), "mailto:someone");
    }
}
