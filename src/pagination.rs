//! Pagination utilities for Autotask query responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::AutotaskClient;
use crate::error::{AutotaskError, Result};

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// The `pageDetails` block returned alongside query results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetails {
    /// Number of items on this page.
    #[serde(default)]
    pub count: u32,
    /// Page size that was requested.
    #[serde(default)]
    pub request_count: u32,
    /// URL of the previous page, if any.
    #[serde(default)]
    pub prev_page_url: Option<String>,
    /// URL of the next page, if any.
    #[serde(default)]
    pub next_page_url: Option<String>,
}

/// A page of results from the Autotask API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Paging cursor information (if returned).
    pub page_details: Option<PageDetails>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Build a page from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::MalformedResponse`] if the body has no `items`
    /// key, or a parse error if the items do not match `T`.
    pub fn from_body(mut body: Value) -> Result<Self> {
        let items = body
            .get_mut("items")
            .map(Value::take)
            .ok_or(AutotaskError::MalformedResponse { key: "items" })?;
        let items: Vec<T> = serde_json::from_value(items)?;

        let page_details = match body.get_mut("pageDetails").map(Value::take) {
            None | Some(Value::Null) => None,
            Some(details) => Some(serde_json::from_value(details)?),
        };

        Ok(Self {
            items,
            page_details,
        })
    }
}

impl<T> Page<T> {
    /// Create a new page from items and paging details.
    #[must_use]
    pub fn new(items: Vec<T>, page_details: Option<PageDetails>) -> Self {
        Self {
            items,
            page_details,
        }
    }

    /// The URL of the following page, if the server reported one.
    pub fn next_page_url(&self) -> Option<&str> {
        self.page_details
            .as_ref()
            .and_then(|d| d.next_page_url.as_deref())
    }

    /// Whether there are more pages.
    pub fn has_more(&self) -> bool {
        self.next_page_url().is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_details: self.page_details,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Walks the pages of a query by following `nextPageUrl`.
///
/// The first page is already loaded when the paginator is created.
///
/// # Example
///
/// ```no_run
/// use autotask::{AutotaskClient, Entity, Company};
///
/// # async fn example() -> autotask::Result<()> {
/// let client = AutotaskClient::from_env()?;
/// let mut query = Company::query();
/// query.where_("isActive", "eq", true)?;
///
/// let mut pages = query.paginate(&client).await?;
/// while let Some(page) = pages.next_page(&client).await? {
///     println!("{} companies", page.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Paginator<T> {
    pending: Option<Page<T>>,
    next_url: Option<String>,
    pages_fetched: u32,
}

impl<T: DeserializeOwned> Paginator<T> {
    pub(crate) fn new(first: Page<T>) -> Self {
        Self {
            next_url: first.next_page_url().map(str::to_owned),
            pending: Some(first),
            pages_fetched: 1,
        }
    }

    /// Whether another call to [`Paginator::next_page`] can yield a page.
    pub fn has_next(&self) -> bool {
        self.pending.is_some() || self.next_url.is_some()
    }

    /// Return the next page, fetching it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    pub async fn next_page(&mut self, client: &AutotaskClient) -> Result<Option<Page<T>>> {
        if let Some(page) = self.pending.take() {
            return Ok(Some(page));
        }

        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        if self.pages_fetched >= MAX_PAGES {
            tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
            return Ok(None);
        }

        let response = client.get_url(&url).await?;
        let body: Value = response.json().await.map_err(AutotaskError::HttpError)?;
        let page = Page::from_body(body)?;

        self.pages_fetched += 1;
        self.next_url = page.next_page_url().map(str::to_owned);
        Ok(Some(page))
    }

    /// Fetch every remaining page and collect the items.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn collect_all(mut self, client: &AutotaskClient) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        while let Some(page) = self.next_page(client).await? {
            all_items.extend(page.items);
        }
        Ok(all_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_body() {
        let body = json!({
            "items": [1, 2, 3],
            "pageDetails": {
                "count": 3,
                "requestCount": 3,
                "prevPageUrl": null,
                "nextPageUrl": "https://example.com/next"
            }
        });

        let page: Page<i32> = Page::from_body(body).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.has_more());
        assert_eq!(page.next_page_url(), Some("https://example.com/next"));
    }

    #[test]
    fn test_page_from_body_without_details() {
        let page: Page<i32> = Page::from_body(json!({"items": []})).unwrap();
        assert!(page.is_empty());
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_from_body_missing_items() {
        let err = Page::<i32>::from_body(json!({"item": 1})).unwrap_err();
        assert!(matches!(
            err,
            AutotaskError::MalformedResponse { key: "items" }
        ));
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], None);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
    }

    #[test]
    fn test_paginator_single_page_needs_no_requests() {
        let client = AutotaskClient::new(
            crate::Credentials::new("user", "secret", "code"),
            "http://127.0.0.1:9",
        )
        .unwrap();
        let mut pages = Paginator::new(Page::new(vec![1, 2], None));
        assert!(pages.has_next());

        let first = tokio_test::block_on(pages.next_page(&client)).unwrap();
        assert_eq!(first.map(|p| p.items), Some(vec![1, 2]));
        assert!(!pages.has_next());

        let second = tokio_test::block_on(pages.next_page(&client)).unwrap();
        assert!(second.is_none());
    }
}
