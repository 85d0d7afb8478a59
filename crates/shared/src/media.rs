use std::sync::Arc;

/// Turns media-relative paths stored in the database into public URLs.
#[derive(Clone, Debug)]
pub struct MediaUrl(Arc<str>);

impl MediaUrl {
    pub fn new(base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/');
        Self(Arc::from(format!("{base}/")))
    }

    pub fn resolve(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }

        format!("{}{}", self.0, path.trim_start_matches('/'))
    }
}
