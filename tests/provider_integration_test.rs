use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveTime;
use cityhub::adapters::fixture::sample_listings;
use cityhub::config::toml_config::SourceConfig;
use cityhub::{
    FileListings, HttpListings, Listing, ListingError, ListingFinder, ListingProvider,
    RetryPolicy, ViewRequest,
};
use httpmock::prelude::*;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

fn quick_retry(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(1))
}

#[tokio::test]
async fn test_json_file_provider() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("listings.json");
    tokio::fs::write(&path, serde_json::to_string(&sample_listings())?).await?;

    let provider = FileListings::new(&path)?;
    let listings = provider.list_all().await?;
    assert_eq!(listings, sample_listings());
    Ok(())
}

#[tokio::test]
async fn test_toml_file_provider_skips_malformed_records() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("listings.toml");
    tokio::fs::write(
        &path,
        r#"
[[listings]]
id = "e1"
name = "Tech Innovation Summit"
type = "event"
category = "Technology"
rating = 4.7
price = "Free"
openHours = "9:00 AM - 5:00 PM"

[[listings]]
id = "e2"
name = "Mystery Event"
type = "event"
category = "Unknown"
rating = 4.2
price = "$$$$$"

[[listings]]
id = "x1"
name = "Handy Fixers"
type = "service"
category = "Repair"
rating = 4
price = "$"
"#,
    )
    .await?;

    let provider = FileListings::new(&path)?;
    let listings = provider.list_all().await?;
    let ids: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["e1", "x1"]);
    assert_eq!(listings[1].rating, 4.0);
    Ok(())
}

#[tokio::test]
async fn test_file_is_reloaded_wholesale() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("listings.json");
    let provider = FileListings::new(&path)?;

    tokio::fs::write(&path, serde_json::to_string(&sample_listings()[..2])?).await?;
    assert_eq!(provider.list_all().await?.len(), 2);

    tokio::fs::write(&path, serde_json::to_string(&sample_listings()[..1])?).await?;
    assert_eq!(provider.list_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_http_provider_end_to_end() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/listings");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": "1", "name": "Neon Sushi", "type": "restaurant", "cuisine": "Japanese",
                     "rating": 4.8, "priceRange": "$$$", "openHours": "11:00 AM - 10:00 PM"},
                    {"id": "2", "name": "Cyber Burger", "type": "restaurant", "cuisine": "American",
                     "rating": 4.6, "priceRange": "$$", "openHours": "12:00 PM - 11:00 PM"},
                    {"id": "3", "name": "Broken", "type": "restaurant", "rating": "high"}
                ]));
        })
        .await;

    let provider = SourceConfig::http(server.url("/listings")).build_provider()?;
    let finder = ListingFinder::new(provider);
    let request = ViewRequest::parse("/restaurants?q=cyber")?;

    let result = finder.search(&request, noon()).await?.expect("latest search");
    api_mock.assert_async().await;
    assert_eq!(result.total, 2);
    assert_eq!(result.listings.len(), 1);
    assert_eq!(result.listings[0].name, "Cyber Burger");
    Ok(())
}

#[tokio::test]
async fn test_http_server_errors_are_retried_then_exhausted() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/listings");
            then.status(503);
        })
        .await;

    let provider = HttpListings::new(server.url("/listings"), Duration::from_secs(5), quick_retry(3))?;
    let err = provider.list_all().await.unwrap_err();

    assert!(matches!(err, ListingError::FetchExhaustedError { attempts: 3, .. }));
    assert_eq!(api_mock.hits_async().await, 3);
    Ok(())
}

#[tokio::test]
async fn test_http_client_errors_are_not_retried() -> Result<()> {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/listings");
            then.status(404);
        })
        .await;

    let provider = HttpListings::new(server.url("/listings"), Duration::from_secs(5), quick_retry(3))?;
    let err = provider.list_all().await.unwrap_err();

    assert!(matches!(err, ListingError::HttpError(_)));
    assert_eq!(api_mock.hits_async().await, 1);
    Ok(())
}

/// Sleeps for the next queued delay before returning the fixtures.
struct DelayedListings {
    delays: Mutex<VecDeque<Duration>>,
}

#[async_trait]
impl ListingProvider for DelayedListings {
    async fn list_all(&self) -> cityhub::Result<Vec<Listing>> {
        let delay = self
            .delays
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(sample_listings())
    }

    fn source_name(&self) -> &str {
        "delayed"
    }
}

#[tokio::test]
async fn test_stale_search_is_discarded() -> Result<()> {
    let provider = DelayedListings {
        delays: Mutex::new(VecDeque::from([
            Duration::from_millis(150),
            Duration::from_millis(0),
        ])),
    };
    let finder = ListingFinder::new(provider);
    let slow = ViewRequest::parse("/search?q=sushi")?;
    let fast = ViewRequest::parse("/search?q=cuts")?;

    let slow_search = finder.search(&slow, noon());
    let fast_search = async {
        // 確保慢的查詢先開始
        tokio::time::sleep(Duration::from_millis(30)).await;
        finder.search(&fast, noon()).await
    };
    let (first, second) = tokio::join!(slow_search, fast_search);

    assert!(first?.is_none());
    let second = second?.expect("newest search wins");
    assert_eq!(second.listings[0].name, "Cyber Cuts");
    assert_eq!(finder.session().current(), Some(second));
    Ok(())
}
