use crate::support::{create_test_config, mount_page, page};
use image_harvester::{HarvestError, Harvester};
use std::collections::HashSet;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_scrape_follows_same_site_links_only() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let off_site = format!("{}/b", other_server.uri());

    mount_page(&mock_server, "/", &page(&["/a", &off_site], &[]), 1).await;
    mount_page(&mock_server, "/a", &page(&[], &["/foo.png", "/bar.gif"]), 1).await;

    // Page B lives on a different origin and must never be fetched
    mount_page(&other_server, "/b", &page(&[], &["/other.png"]), 0).await;

    let output = TempDir::new().unwrap();
    let harvester = Harvester::new(create_test_config(&mock_server, &output)).unwrap();

    let found = harvester.scrape(2).await.expect("Scrape failed");

    let expected: HashSet<String> = [format!("{}/foo.png", base_url)].into_iter().collect();
    assert_eq!(found, expected);
    assert_eq!(harvester.discovered_images(), expected);

    assert!(harvester.explored().contains(&format!("{}/", base_url)));
    assert!(harvester.explored().contains(&format!("{}/a", base_url)));
    assert!(!harvester.unexplored().contains(&off_site));
    assert!(harvester.unexplored().is_empty());
}

#[tokio::test]
async fn test_no_page_is_fetched_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // A small graph full of cycles and self-links
    mount_page(&mock_server, "/", &page(&["/", "/a", "/b"], &["/root.png"]), 1).await;
    mount_page(&mock_server, "/a", &page(&["/", "/b", "/a"], &["/a.png"]), 1).await;
    mount_page(
        &mock_server,
        "/b",
        &page(&["/", "/a", &format!("{}/b", base_url)], &["/b.png"]),
        1,
    )
    .await;

    let output = TempDir::new().unwrap();
    let harvester = Harvester::new(create_test_config(&mock_server, &output)).unwrap();

    for _ in 0..5 {
        harvester.scrape(1).await.expect("Scrape failed");
    }

    assert_eq!(harvester.explored().len(), 3);
    assert!(harvester.unexplored().is_empty());
    assert!(harvester.explored().is_disjoint(&harvester.unexplored()));

    // Everything is explored: further calls fetch nothing and find nothing
    let again = harvester.scrape(10).await.expect("Scrape failed");
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_seed_without_trailing_slash_is_fetched_once() {
    let mock_server = MockServer::start().await;
    let seed = mock_server.uri();

    mount_page(&mock_server, "/", &page(&[seed.as_str(), "/a"], &["/home.png"]), 1).await;
    mount_page(&mock_server, "/a", &page(&[seed.as_str()], &["/a.png"]), 1).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, &output);
    config.seed = seed.clone();
    let harvester = Harvester::new(config).unwrap();

    let found = harvester.scrape(10).await.expect("Scrape failed");

    assert_eq!(found.len(), 2);
    assert_eq!(harvester.explored().len(), 2);
    assert!(harvester.explored().contains(&seed));
    assert!(harvester.unexplored().is_empty());
}

#[tokio::test]
async fn test_incremental_scrapes_match_single_scrape() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &page(&["/a", "/b"], &["/1.png", "/2.png"]), 2).await;
    mount_page(&mock_server, "/a", &page(&["/c"], &["/2.png", "/3.jpg"]), 2).await;
    mount_page(&mock_server, "/b", &page(&["/c"], &["/4.png"]), 2).await;
    mount_page(&mock_server, "/c", &page(&["/"], &["/1.png", "/5.png"]), 2).await;

    let output = TempDir::new().unwrap();

    let single = Harvester::new(create_test_config(&mock_server, &output)).unwrap();
    let all_at_once = single.scrape(1000).await.expect("Scrape failed");
    assert_eq!(all_at_once.len(), 5);
    assert_eq!(all_at_once, single.discovered_images());

    let stepwise = Harvester::new(create_test_config(&mock_server, &output)).unwrap();
    let mut union = HashSet::new();
    let mut calls = 0;
    while !stepwise.unexplored().is_empty() {
        let delta = stepwise.scrape(1).await.expect("Scrape failed");
        assert!(union.is_disjoint(&delta), "An image was reported twice");
        union.extend(delta);
        calls += 1;
    }

    assert_eq!(calls, 4);
    assert_eq!(union, stepwise.discovered_images());
    assert_eq!(union, all_at_once);
}

#[tokio::test]
async fn test_page_filter_limits_image_sources_but_not_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &page(&["/gallery/1"], &["/logo.png"]), 1).await;
    mount_page(&mock_server, "/gallery/1", &page(&["/about"], &["/photo.jpg"]), 1).await;
    mount_page(&mock_server, "/about", &page(&[], &["/team.jpg"]), 1).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, &output);
    config.regex_pages = "gallery".to_string();
    let harvester = Harvester::new(config).unwrap();

    let found = harvester.scrape(10).await.expect("Scrape failed");

    let expected: HashSet<String> = [format!("{}/photo.jpg", base_url)].into_iter().collect();
    assert_eq!(found, expected);
    assert_eq!(harvester.explored().len(), 3);
}

#[tokio::test]
async fn test_image_filter_is_substring_match() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &page(&[], &["/uploads/full/a.png", "/uploads/thumb/a.png", "/icons/x.png"]),
        1,
    )
    .await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, &output);
    config.regex_images = "full".to_string();
    let harvester = Harvester::new(config).unwrap();

    let found = harvester.scrape(1).await.expect("Scrape failed");
    let expected: HashSet<String> = [format!("{}/uploads/full/a.png", base_url)]
        .into_iter()
        .collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_scrape_stops_when_frontier_is_empty() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &page(&[], &["/only.png"]), 1).await;

    let output = TempDir::new().unwrap();
    let harvester = Harvester::new(create_test_config(&mock_server, &output)).unwrap();

    let found = harvester.scrape(50).await.expect("Scrape failed");
    assert_eq!(found.len(), 1);
    assert_eq!(harvester.explored().len(), 1);
}

#[tokio::test]
async fn test_failed_page_is_retried_by_next_scrape() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let broken = format!("{}/broken", base_url);

    mount_page(&mock_server, "/", &page(&["/broken"], &["/home.png"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let harvester = Harvester::new(create_test_config(&mock_server, &output)).unwrap();

    let err = harvester.scrape(10).await.unwrap_err();
    assert!(matches!(err, HarvestError::HttpStatus { status: 500, .. }));
    assert_eq!(err.url(), Some(broken.as_str()));

    // Progress made before the failure is kept
    assert!(harvester.explored().contains(&format!("{}/", base_url)));
    assert!(harvester
        .discovered_images()
        .contains(&format!("{}/home.png", base_url)));
    assert!(harvester.unexplored().contains(&broken));
    assert!(!harvester.explored().contains(&broken));

    // Once the page recovers, the next call continues from where it stopped
    mock_server.reset().await;
    mount_page(&mock_server, "/broken", &page(&["/"], &["/fixed.png"]), 1).await;

    let found = harvester.scrape(10).await.expect("Scrape failed");
    let expected: HashSet<String> = [format!("{}/fixed.png", base_url)].into_iter().collect();
    assert_eq!(found, expected);
    assert!(harvester.unexplored().is_empty());
    assert_eq!(harvester.explored().len(), 2);
}

#[tokio::test]
async fn test_concurrent_scrapes_share_one_frontier() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &page(&["/a", "/b", "/c"], &["/0.png"]), 1).await;
    mount_page(&mock_server, "/a", &page(&["/b", "/c"], &["/a.png"]), 1).await;
    mount_page(&mock_server, "/b", &page(&["/a", "/c"], &["/b.png"]), 1).await;
    mount_page(&mock_server, "/c", &page(&["/a", "/b"], &["/c.png", "/0.png"]), 1).await;

    let output = TempDir::new().unwrap();
    let harvester = Harvester::new(create_test_config(&mock_server, &output)).unwrap();

    // Seed first, so both calls have pages to race for
    let seed_images = harvester.scrape(1).await.expect("Scrape failed");

    let (left, right) = tokio::join!(harvester.scrape(10), harvester.scrape(10));
    let left = left.expect("Scrape failed");
    let right = right.expect("Scrape failed");

    assert!(left.is_disjoint(&right));
    assert!(seed_images.is_disjoint(&left) && seed_images.is_disjoint(&right));
    assert_eq!(seed_images.len() + left.len() + right.len(), 4);
    assert_eq!(harvester.explored().len(), 4);
}
