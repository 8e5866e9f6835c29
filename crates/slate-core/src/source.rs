//! Seam to the external issue tracker.
//!
//! The core never fetches on its own; it consumes whatever implements
//! [`IssueSource`]. Errors from the source propagate unmodified — no retries,
//! no suppression, one terminal failure per request.

use crate::model::Issue;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pagination window for a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start_at: u32,
    pub max_results: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start_at: 0,
            max_results: 50,
        }
    }
}

/// One page of search results, in the tracker's own envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(rename = "startAt", default)]
    pub start_at: u32,
    #[serde(rename = "maxResults", default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
}

/// Synchronous search access to the external tracker.
pub trait IssueSource {
    /// Run a search query, optionally restricted to the named fields.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the tracker unmodified.
    fn search(&self, query: &str, fields: Option<&[String]>, page: Page) -> Result<SearchPage>;
}

/// Collect every page of a search, up to `cap` issues.
///
/// # Errors
///
/// Fails on the first page that fails; no partial result is returned.
pub fn search_all(
    source: &dyn IssueSource,
    query: &str,
    fields: Option<&[String]>,
    cap: u32,
) -> Result<Vec<Issue>> {
    let mut issues: Vec<Issue> = Vec::new();
    let mut page = Page::default();

    loop {
        let result = source.search(query, fields, page)?;
        let fetched = result.issues.len();
        debug!(start_at = page.start_at, fetched, total = result.total, "search page");
        issues.extend(result.issues);

        let done = fetched == 0
            || issues.len() as u64 >= u64::from(result.total)
            || issues.len() as u64 >= u64::from(cap);
        if done {
            break;
        }
        page.start_at = page.start_at.saturating_add(u32::try_from(fetched).unwrap_or(u32::MAX));
    }

    issues.truncate(cap as usize);
    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::{IssueSource, Page, SearchPage, search_all};
    use crate::model::Issue;
    use anyhow::{Result, bail};

    struct FakeSource {
        total: u32,
    }

    impl IssueSource for FakeSource {
        fn search(&self, _query: &str, _fields: Option<&[String]>, page: Page) -> Result<SearchPage> {
            let remaining = self.total.saturating_sub(page.start_at);
            let count = remaining.min(page.max_results);
            let issues = (0..count)
                .map(|i| Issue {
                    key: format!("SR-{}", page.start_at + i + 1),
                    ..Issue::default()
                })
                .collect();
            Ok(SearchPage {
                issues,
                start_at: page.start_at,
                max_results: page.max_results,
                total: self.total,
            })
        }
    }

    struct FailingSource;

    impl IssueSource for FailingSource {
        fn search(&self, _q: &str, _f: Option<&[String]>, _p: Page) -> Result<SearchPage> {
            bail!("tracker unavailable")
        }
    }

    #[test]
    fn collects_all_pages() {
        let issues = search_all(&FakeSource { total: 120 }, "project in (SR)", None, 1000)
            .expect("search succeeds");
        assert_eq!(issues.len(), 120);
        assert_eq!(issues[0].key, "SR-1");
        assert_eq!(issues[119].key, "SR-120");
    }

    #[test]
    fn cap_truncates() {
        let issues = search_all(&FakeSource { total: 120 }, "project in (SR)", None, 75)
            .expect("search succeeds");
        assert_eq!(issues.len(), 75);
    }

    #[test]
    fn source_errors_propagate() {
        let err = search_all(&FailingSource, "project in (SR)", None, 10)
            .expect_err("search must fail");
        assert!(err.to_string().contains("tracker unavailable"));
    }
}
