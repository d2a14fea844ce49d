//! Accumulation of bounded-page sources into one logical fetch.

use color_eyre::{eyre::eyre, Result};
use std::future::Future;
use tracing::debug;

/// Fetch every page of a paginated source.
///
/// Calls `fetch_page(page_size, offset)` starting at offset 0 and stops at the
/// first page shorter than `page_size`. When the total is an exact multiple of
/// the page size this means one extra call that returns an empty page.
///
/// Any page failure fails the whole accumulation; no partial result is returned.
pub async fn fetch_all_pages<T, F, Fut>(page_size: usize, mut fetch_page: F) -> Result<Vec<T>>
where
  F: FnMut(usize, usize) -> Fut,
  Fut: Future<Output = Result<Vec<T>>>,
{
  if page_size == 0 {
    return Err(eyre!("Page size must be greater than zero"));
  }

  let mut all = Vec::new();
  let mut offset = 0usize;

  loop {
    let page = fetch_page(page_size, offset).await?;
    let count = page.len();
    all.extend(page);

    debug!(offset, count, total = all.len(), "Fetched page");

    // Short page means this was the last one
    if count < page_size {
      break;
    }
    offset += page_size;
  }

  Ok(all)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  /// Fake paged source over `0..total`, recording each (limit, offset) call.
  struct PagedSource {
    total: usize,
    fail_at_offset: Option<usize>,
    calls: Mutex<Vec<(usize, usize)>>,
  }

  impl PagedSource {
    fn new(total: usize) -> Self {
      Self {
        total,
        fail_at_offset: None,
        calls: Mutex::new(Vec::new()),
      }
    }

    fn failing_at(mut self, offset: usize) -> Self {
      self.fail_at_offset = Some(offset);
      self
    }

    async fn page(&self, limit: usize, offset: usize) -> Result<Vec<usize>> {
      self.calls.lock().unwrap().push((limit, offset));
      if self.fail_at_offset == Some(offset) {
        return Err(eyre!("Brevo API rate limit exceeded"));
      }
      let end = (offset + limit).min(self.total);
      Ok((offset.min(end)..end).collect())
    }

    fn calls(&self) -> Vec<(usize, usize)> {
      self.calls.lock().unwrap().clone()
    }
  }

  #[tokio::test]
  async fn test_short_last_page_stops() {
    let page_size = 50;
    let source = PagedSource::new(page_size * 3 - 7);

    let all = fetch_all_pages(page_size, |limit, offset| source.page(limit, offset))
      .await
      .unwrap();

    assert_eq!(all, (0..page_size * 3 - 7).collect::<Vec<_>>());
    assert_eq!(source.calls(), vec![(50, 0), (50, 50), (50, 100)]);
  }

  #[tokio::test]
  async fn test_exact_multiple_needs_trailing_empty_page() {
    let page_size = 50;
    let source = PagedSource::new(page_size * 2);

    let all = fetch_all_pages(page_size, |limit, offset| source.page(limit, offset))
      .await
      .unwrap();

    assert_eq!(all.len(), 100);
    assert_eq!(source.calls(), vec![(50, 0), (50, 50), (50, 100)]);
  }

  #[tokio::test]
  async fn test_empty_source_single_call() {
    let source = PagedSource::new(0);

    let all = fetch_all_pages(10, |limit, offset| source.page(limit, offset))
      .await
      .unwrap();

    assert!(all.is_empty());
    assert_eq!(source.calls(), vec![(10, 0)]);
  }

  #[tokio::test]
  async fn test_failure_on_later_page_discards_everything() {
    let source = PagedSource::new(25).failing_at(10);

    let err = fetch_all_pages(10, |limit, offset| source.page(limit, offset))
      .await
      .unwrap_err();

    assert!(err.to_string().contains("rate limit"));
    // No retry of the failed page and no further pages
    assert_eq!(source.calls(), vec![(10, 0), (10, 10)]);
  }

  #[tokio::test]
  async fn test_zero_page_size_is_rejected() {
    let source = PagedSource::new(5);

    let result = fetch_all_pages(0, |limit, offset| source.page(limit, offset)).await;

    assert!(result.is_err());
    assert!(source.calls().is_empty());
  }
}
