use crate::core::view::{ViewRequest, ViewResult};
use crate::domain::ports::ListingProvider;
use crate::utils::error::Result;
use chrono::NaiveTime;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Identifies one user-initiated search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Tracks the latest search so that a slow, superseded response is dropped
/// instead of overwriting newer results.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
    latest: Mutex<Option<(SearchTicket, ViewResult)>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `result` if `ticket` is still the newest search. Returns whether it was kept.
    pub fn publish(&self, ticket: SearchTicket, result: ViewResult) -> bool {
        let Ok(mut latest) = self.latest.lock() else {
            return false;
        };
        // 在鎖內比對世代，避免與較新的結果交錯
        if !self.is_current(ticket) {
            tracing::debug!("Discarding stale search result {:?}", ticket);
            return false;
        }
        *latest = Some((ticket, result));
        true
    }

    /// Most recently published result, if any.
    pub fn current(&self) -> Option<ViewResult> {
        self.latest
            .lock()
            .ok()
            .and_then(|latest| latest.as_ref().map(|(_, result)| result.clone()))
    }
}

/// Fetches a snapshot from the provider and presents it through a view.
pub struct ListingFinder<P: ListingProvider> {
    provider: P,
    session: SearchSession,
}

impl<P: ListingProvider> ListingFinder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            session: SearchSession::new(),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Returns `Ok(None)` when a newer search started while this one was fetching.
    pub async fn search(&self, request: &ViewRequest, now: NaiveTime) -> Result<Option<ViewResult>> {
        let ticket = self.session.begin();
        tracing::debug!(
            "Search {:?} on {} with {:?}",
            ticket,
            request.view.path(),
            request.criteria
        );

        let listings = self.provider.list_all().await?;
        tracing::info!(
            "📥 Fetched {} listings from {}",
            listings.len(),
            self.provider.source_name()
        );

        let result = request.present(&listings, now);
        tracing::info!(
            "🔍 {} of {} listings match on {}",
            result.listings.len(),
            result.total,
            request.view.path()
        );

        if self.session.publish(ticket, result.clone()) {
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticListings;
    use crate::core::view::View;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_only_latest_ticket_publishes() {
        let session = SearchSession::new();
        let first = session.begin();
        let second = session.begin();
        let result = ViewRequest::new(View::Search).present(&[], noon());

        assert!(!session.publish(first, result.clone()));
        assert!(session.current().is_none());
        assert!(session.publish(second, result));
        assert!(session.current().is_some());
    }

    #[tokio::test]
    async fn test_finder_publishes_result() {
        let finder = ListingFinder::new(StaticListings::new());
        let request = ViewRequest::parse("/restaurants").unwrap();

        let result = finder.search(&request, noon()).await.unwrap().unwrap();
        assert_eq!(result.listings.len(), 3);
        assert_eq!(finder.session().current(), Some(result));
    }
}
