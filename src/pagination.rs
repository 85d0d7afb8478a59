use axum::http::Uri;
use foodgram_shared::{Page, PageArgs};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::PaginationConfig;

/// `?page=&limit=` as sent by the client. Both stay raw strings: a bad
/// `page` is a 404, a bad `limit` falls back to the default size and a large
/// one is capped at `max_page_size`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn args(&self, config: &PaginationConfig) -> foodgram_shared::Result<PageArgs> {
        let page = match self.page.as_deref() {
            None | Some("") => 1,
            Some(page) => match page.parse::<u64>() {
                Ok(page) if page >= 1 => page,
                _ => return Err(foodgram_shared::Error::InvalidPage),
            },
        };

        let limit = self
            .limit
            .as_deref()
            .and_then(|limit| limit.parse::<u64>().ok())
            .filter(|limit| *limit > 0)
            .map_or(config.page_size, |limit| limit.min(config.max_page_size));

        Ok(PageArgs::new(page, limit))
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PageResponse<T> {
    /// Links point at `public_url` joined with the request path, keeping the
    /// request query and replacing `page`.
    pub fn new(page: Page<T>, public_url: &str, uri: &Uri) -> Self {
        let base = Url::parse(public_url).and_then(|url| url.join(uri.path()));
        let link = |number: u64| {
            base.as_ref()
                .ok()
                .map(|base| page_link(base, uri.query(), number))
        };

        let current = page.args.page;
        let next = if page.has_next() { link(current + 1) } else { None };
        let previous = if page.has_previous() {
            link(current - 1)
        } else {
            None
        };

        Self {
            count: page.count,
            next,
            previous,
            results: page.results,
        }
    }
}

/// The first page is linked without a `page` parameter.
fn page_link(base: &Url, query: Option<&str>, page: u64) -> String {
    let pairs = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .into_owned()
        .filter(|(key, _)| key != "page")
        .collect::<Vec<_>>();

    let mut url = base.clone();
    url.set_query(None);

    if !pairs.is_empty() || page > 1 {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(pairs);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    url.to_string()
}
