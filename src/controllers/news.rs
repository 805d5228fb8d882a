//! Controller for the insights feed page.
//!
//! The feed is fetched once per activation; pagination only moves a cursor
//! over the in-memory items, it never re-fetches.

use crate::domain::feed::FeedItem;
use crate::gateway::{FeedReader, GatewayError, GatewayResult};

/// Number of feed items revealed per "show more" step.
pub const PAGE_SIZE: usize = 6;

/// View-state of the feed page.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Loading,
    Loaded(Vec<FeedItem>),
    LoadFailed(GatewayError),
}

/// Holds the fetched feed plus the visibility cursor.
pub struct NewsController<G> {
    gateway: G,
    state: FeedState,
    visible_count: usize,
    latest_refresh: u64,
}

impl<G: FeedReader> NewsController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: FeedState::Loading,
            visible_count: PAGE_SIZE,
            latest_refresh: 0,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Fetches the whole feed and resets the cursor to the first page.
    pub async fn refresh(&mut self) {
        let issued = self.begin_refresh();
        let result = self.gateway.fetch_feed().await;
        self.apply_refresh(issued, result);
    }

    fn begin_refresh(&mut self) -> u64 {
        self.latest_refresh += 1;
        self.latest_refresh
    }

    fn apply_refresh(&mut self, issued: u64, result: GatewayResult<Vec<FeedItem>>) {
        if issued != self.latest_refresh {
            return;
        }
        match result {
            Ok(items) => {
                self.state = FeedState::Loaded(items);
                self.visible_count = PAGE_SIZE;
            }
            Err(e) => {
                log::error!("Failed to load feed: {e}");
                self.state = FeedState::LoadFailed(e);
            }
        }
    }

    /// Reveals one more page, capped at the number of fetched items.
    pub fn show_more(&mut self) {
        if let FeedState::Loaded(items) = &self.state {
            self.visible_count = (self.visible_count + PAGE_SIZE).min(items.len());
        }
    }

    /// Collapses back to the first page.
    pub fn show_less(&mut self) {
        if let FeedState::Loaded(_) = &self.state {
            self.visible_count = PAGE_SIZE;
        }
    }

    /// The currently revealed slice, `items[0..visible_count]`.
    pub fn visible(&self) -> &[FeedItem] {
        match &self.state {
            FeedState::Loaded(items) => &items[..self.visible_count.min(items.len())],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::test::TestGateway;

    fn items(count: usize) -> Vec<FeedItem> {
        (0..count)
            .map(|i| FeedItem {
                id: i as i64,
                title: format!("Item {i}"),
                thumbnail: None,
                description: None,
                price: None,
                rating: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn first_page_is_six_items() {
        let gateway = TestGateway::new(vec![], None, items(14));
        let mut news = NewsController::new(gateway.clone());
        news.refresh().await;
        assert_eq!(news.visible_count(), PAGE_SIZE);
        assert_eq!(news.visible().len(), 6);
        assert_eq!(gateway.calls(), vec!["GET /api/news/"]);
    }

    #[tokio::test]
    async fn show_more_advances_in_pages_and_caps_at_the_end() {
        let gateway = TestGateway::new(vec![], None, items(14));
        let mut news = NewsController::new(gateway);
        news.refresh().await;
        news.show_more();
        assert_eq!(news.visible_count(), 12);
        news.show_more();
        assert_eq!(news.visible_count(), 14); // capped, not 18
        news.show_more();
        assert_eq!(news.visible_count(), 14);
    }

    #[tokio::test]
    async fn show_less_resets_to_the_first_page() {
        let gateway = TestGateway::new(vec![], None, items(14));
        let mut news = NewsController::new(gateway);
        news.refresh().await;
        news.show_more();
        news.show_less();
        assert_eq!(news.visible_count(), PAGE_SIZE);
        assert_eq!(news.visible()[0].title, "Item 0");
    }

    #[tokio::test]
    async fn short_feeds_reveal_everything_without_growing_the_cursor() {
        let gateway = TestGateway::new(vec![], None, items(3));
        let mut news = NewsController::new(gateway);
        news.refresh().await;
        assert_eq!(news.visible().len(), 3);
        news.show_more();
        assert_eq!(news.visible_count(), 3);
    }

    #[tokio::test]
    async fn pagination_never_refetches() {
        let gateway = TestGateway::new(vec![], None, items(14));
        let mut news = NewsController::new(gateway.clone());
        news.refresh().await;
        news.show_more();
        news.show_less();
        news.show_more();
        assert_eq!(gateway.calls(), vec!["GET /api/news/"]);
    }

    #[tokio::test]
    async fn superseded_refresh_response_is_discarded() {
        let gateway = TestGateway::new(vec![], None, vec![]);
        let mut news = NewsController::new(gateway);
        let slow = news.begin_refresh();
        let fast = news.begin_refresh();
        news.apply_refresh(fast, Ok(items(14)));
        news.show_more();
        // the older request's response arrives last; it must neither replace
        // the items nor reset the cursor
        news.apply_refresh(slow, Ok(items(2)));
        assert_eq!(news.visible_count(), 12);
        assert_eq!(news.visible().len(), 12);
    }

    #[tokio::test]
    async fn cursor_is_inert_until_the_feed_loads() {
        let gateway = TestGateway::new(vec![], None, items(14));
        let mut news = NewsController::new(gateway);
        news.show_more();
        news.show_less();
        assert_eq!(news.visible_count(), PAGE_SIZE);
        assert!(news.visible().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_shows_nothing() {
        let gateway = TestGateway::unconfigured();
        let mut news = NewsController::new(gateway);
        news.refresh().await;
        assert_eq!(*news.state(), FeedState::LoadFailed(GatewayError::Config));
        assert!(news.visible().is_empty());
    }
}
