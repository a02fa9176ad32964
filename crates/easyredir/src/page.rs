//! Resource envelope shared by the list endpoints, and the paginator that
//! drains them.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DEFAULT_BASE_URL;
use crate::error::Error;
use crate::options::ListOptions;

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// True when more records exist beyond this page.
    #[serde(default)]
    pub has_more: bool,
}

/// Opaque links to the adjacent pages of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// URL of the next page, carrying its cursor as `starting_after`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// One page of a listing: `{ data, meta, links }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page, in server order.
    pub data: Vec<T>,
    /// Pagination metadata; `has_more` defaults to false when absent.
    #[serde(default)]
    pub meta: Meta,
    /// Links to adjacent pages.
    #[serde(default)]
    pub links: Links,
}

impl<T> Page<T> {
    /// True when the server reports more records after this page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.meta.has_more
    }

    /// Cursor for the page after this one, read from the `next` link.
    #[must_use]
    pub fn next_cursor(&self) -> Option<String> {
        self.links.next.as_deref().and_then(cursor_from_link)
    }
}

/// Extract the `starting_after` parameter from a page link.
///
/// Links may be absolute or server-relative; a relative link is resolved
/// against the production base purely to satisfy the parser, since only the
/// query string is read back.
fn cursor_from_link(link: &str) -> Option<String> {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(DEFAULT_BASE_URL).ok()?.join(link).ok()?
        }
        Err(_) => return None,
    };
    url.query_pairs()
        .find(|(name, _)| name == "starting_after")
        .map(|(_, value)| value.into_owned())
}

/// Drain a multi-page listing into one collection.
///
/// Pages are fetched strictly sequentially: each request derives its options
/// from the caller's base set plus the cursor taken from the immediately
/// preceding page, and the loop ends on the first page without `has_more`.
/// Any page failure aborts the drain; accumulated records are dropped with
/// the returned [`Error::Pagination`].
pub(crate) async fn paginate<T, F, Fut>(
    resource: &'static str,
    options: &ListOptions,
    fetch: F,
) -> Result<Vec<T>, Error>
where
    F: Fn(ListOptions) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0_u32;

    loop {
        let mut page_options = options.clone();
        if let Some(cursor) = cursor.take() {
            page_options = page_options.with_starting_after(cursor);
        }

        let page = fetch(page_options).await.map_err(|err| Error::Pagination {
            resource,
            source: Box::new(err),
        })?;
        pages += 1;

        if page.has_more() {
            match page.next_cursor() {
                Some(next) => cursor = Some(next),
                None => return Err(Error::Cursor(page.links.next)),
            }
        }

        records.extend(page.data);

        if cursor.is_none() {
            break;
        }
    }

    tracing::debug!(resource, pages, records = records.len(), "drained listing");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    fn page(data: Vec<&'static str>, next: Option<&str>) -> Page<&'static str> {
        Page {
            data,
            meta: Meta {
                has_more: next.is_some(),
            },
            links: Links {
                next: next.map(ToString::to_string),
                prev: None,
            },
        }
    }

    #[test]
    fn cursor_from_relative_link() {
        assert_eq!(
            cursor_from_link("/v1/rules?starting_after=abc-def").as_deref(),
            Some("abc-def")
        );
    }

    #[test]
    fn cursor_from_absolute_link_with_extra_parameters() {
        assert_eq!(
            cursor_from_link("https://api.easyredir.com/v1/rules?limit=5&starting_after=abc")
                .as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn cursor_missing_from_link() {
        assert_eq!(cursor_from_link("/v1/rules?ending_before=abc"), None);
        assert_eq!(cursor_from_link("/v1/rules"), None);
    }

    #[tokio::test]
    async fn single_page_returns_items_unmodified() {
        let pages = RefCell::new(VecDeque::from([Ok(page(vec!["a", "b"], None))]));

        let records = paginate("rules", &ListOptions::new(), |_| {
            let next = pages.borrow_mut().pop_front().expect("extra fetch");
            async move { next }
        })
        .await
        .expect("pagination succeeds");

        assert_eq!(records, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn cursor_advances_from_the_preceding_page_only() {
        let pages = RefCell::new(VecDeque::from([
            Ok(page(vec!["a", "b"], Some("/v1/rules?starting_after=b"))),
            Ok(page(vec!["c", "d"], Some("/v1/rules?starting_after=d"))),
            Ok(page(vec!["e"], None)),
        ]));
        let requests = RefCell::new(Vec::new());

        let records = paginate("rules", &ListOptions::new().with_limit(2), |options| {
            requests.borrow_mut().push(options.path_query("/rules"));
            let next = pages.borrow_mut().pop_front().expect("extra fetch");
            async move { next }
        })
        .await
        .expect("pagination succeeds");

        assert_eq!(records, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            *requests.borrow(),
            vec![
                "/rules?limit=2".to_string(),
                "/rules?starting_after=b&limit=2".to_string(),
                "/rules?starting_after=d&limit=2".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn failed_page_aborts_the_drain() {
        let pages = RefCell::new(VecDeque::from([
            Ok(page(vec!["a"], Some("/v1/hosts?starting_after=a"))),
            Err(Error::Status(500)),
        ]));
        let fetches = RefCell::new(0_u32);

        let err = paginate("hosts", &ListOptions::new(), |_| {
            *fetches.borrow_mut() += 1;
            let next = pages.borrow_mut().pop_front().expect("extra fetch");
            async move { next }
        })
        .await
        .expect_err("pagination fails");

        assert_eq!(*fetches.borrow(), 2);
        assert_eq!(err.to_string(), "unable to get a hosts page");
        match err {
            Error::Pagination { resource, source } => {
                assert_eq!(resource, "hosts");
                assert!(matches!(*source, Error::Status(500)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn has_more_without_cursor_is_an_error() {
        let pages = RefCell::new(VecDeque::from([Ok(Page {
            data: vec!["a"],
            meta: Meta { has_more: true },
            links: Links::default(),
        })]));

        let err = paginate("rules", &ListOptions::new(), |_| {
            let next = pages.borrow_mut().pop_front().expect("extra fetch");
            async move { next }
        })
        .await
        .expect_err("pagination fails");

        assert!(matches!(err, Error::Cursor(None)));
    }
}
