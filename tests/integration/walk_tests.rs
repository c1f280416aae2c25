//! Integration tests for the walker
//!
//! These tests use wiremock to serve a small catalog and run the full walk
//! end-to-end: HTTP loader, classification, extraction and CSV output.

use catalog_walker::config::{parse_config, Config};
use catalog_walker::crawler::walk;
use catalog_walker::output::{ProductRecord, COLUMNS};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, csv_path: &Path) -> Config {
    let toml = format!(
        r#"
[site]
root-url = "{base}/it/prodotti/"
base-url = "{base}"
category-prefix = "{base}/it/c/"

[user-agent]
crawler-name = "TestWalker"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[loader]
settle-delay = 0
settle-timeout = 300
poll-interval = 20
request-timeout = 5

[output]
csv-path = "{csv}"
"#,
        base = base_url,
        csv = csv_path.display()
    );
    parse_config(&toml).expect("test config should be valid")
}

fn root_page(cards: &[(&str, &str)]) -> String {
    let cards: String = cards
        .iter()
        .map(|(title, slug)| {
            format!(
                r#"<div class="tailored-service">
                     <h3 class="h3-service">{}</h3>
                     <a class="service-btn" href="/it/c/{}">Scopri</a>
                   </div>"#,
                title, slug
            )
        })
        .collect();
    format!(
        r#"<html><body>{}<footer><a class="bm_elem-product" href="/it/servizi">Servizi</a></footer></body></html>"#,
        cards
    )
}

fn hub_page(links: &[(&str, &str)]) -> String {
    let links: String = links
        .iter()
        .map(|(title, slug)| format!(r#"<a class="bm_elem-product" href="/it/c/{}">{}</a>"#, slug, title))
        .collect();
    format!("<html><body><nav>{}</nav></body></html>", links)
}

fn listing_page(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(sku, name)| {
            format!(
                r#"<li class="ais-Hits-item">
                     <div class="result-wrapper" data-sku="{sku}">
                       <meta itemprop="url" content="https://shop.test/it/p/{sku}">
                       <img itemprop="image" src="https://img.test/{sku}.jpg">
                       <h2 itemprop="name">{name}</h2>
                       <span data-price="gross">9,90 €</span>
                       <span class="price-label">cad.</span>
                       <span class="result-availability-text">Disponibile</span>
                       <meta itemprop="lowPrice" content="9.90">
                       <meta itemprop="priceCurrency" content="EUR">
                     </div>
                   </li>"#,
                sku = sku,
                name = name
            )
        })
        .collect();
    format!(r#"<html><body><ol class="ais-Hits-list">{}</ol></body></html>"#, items)
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn read_records(csv_path: &Path) -> Vec<ProductRecord> {
    let mut reader = csv::Reader::from_path(csv_path).expect("CSV should exist");
    let headers = reader.headers().expect("CSV should have a header").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), COLUMNS.to_vec());
    reader
        .deserialize()
        .map(|r| r.expect("row should match the schema"))
        .collect()
}

#[tokio::test]
async fn test_full_walk_scenario() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/it/prodotti/", root_page(&[("Bagno", "bagno"), ("Cucina", "cucina")])).await;
    mount_page(&server, "/it/c/bagno", listing_page(&[("B1", "Lavabo"), ("B2", "Bidet")])).await;
    mount_page(&server, "/it/c/cucina", hub_page(&[("Lavelli", "lavelli")])).await;
    mount_page(&server, "/it/c/lavelli", listing_page(&[("C1", "Lavello inox")])).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    let stats = walk(&config).await.expect("walk should complete");

    assert_eq!(stats.l1_found, 2);
    assert_eq!(stats.leaves_scraped, 2);
    assert_eq!(stats.records_emitted, 3);

    let records = read_records(&csv_path);
    assert_eq!(records.len(), 3);

    let bagno: Vec<_> = records.iter().filter(|r| r.level1 == "Bagno").collect();
    assert_eq!(bagno.len(), 2);
    assert!(bagno.iter().all(|r| r.level2.is_empty() && r.level3.is_empty()));
    assert!(bagno.iter().all(|r| r.leaf_url == format!("{}/it/c/bagno", base)));

    let cucina = &records[2];
    assert_eq!(cucina.level1, "Cucina");
    assert_eq!(cucina.level2, "Lavelli");
    assert_eq!(cucina.level3, "");
    assert_eq!(cucina.sku, "C1");
    assert_eq!(cucina.product_name, "Lavello inox");
    assert_eq!(cucina.product_url, "https://shop.test/it/p/C1");
    assert_eq!(cucina.image_url, "https://img.test/C1.jpg");
    assert_eq!(cucina.price_gross, "9,90 €");
    // No net price in this markup
    assert_eq!(cucina.price_net, "");
    assert_eq!(cucina.price_numeric, "9.90");
    assert_eq!(cucina.currency, "EUR");
    assert_eq!(cucina.unit, "cad.");
    assert_eq!(cucina.availability, "Disponibile");
}

#[tokio::test]
async fn test_repeated_runs_accumulate_one_table() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/it/prodotti/", root_page(&[("Bagno", "bagno")])).await;
    mount_page(&server, "/it/c/bagno", listing_page(&[("B1", "Lavabo")])).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    walk(&config).await.unwrap();
    walk(&config).await.unwrap();

    // read_records asserts the header; a second header would fail deserialization
    let records = read_records(&csv_path);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.matches("level1,level2,level3").count(), 1);
}

#[tokio::test]
async fn test_shared_subcategory_scraped_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/it/prodotti/", root_page(&[("Bagno", "bagno"), ("Arredo", "arredo")])).await;
    mount_page(&server, "/it/c/bagno", hub_page(&[("Mobili bagno", "mobili")])).await;
    mount_page(&server, "/it/c/arredo", hub_page(&[("Mobili", "mobili")])).await;

    Mock::given(method("GET"))
        .and(path("/it/c/mobili"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[("M1", "Mobile")])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    let stats = walk(&config).await.unwrap();
    assert_eq!(stats.duplicates_skipped, 1);

    let records = read_records(&csv_path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level1, "Bagno");
    assert_eq!(records[0].level2, "Mobili bagno");

    server.verify().await;
}

#[tokio::test]
async fn test_settle_refetches_until_content_appears() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/it/prodotti/", root_page(&[("Bagno", "bagno")])).await;

    // The first response is still a loading shell
    Mock::given(method("GET"))
        .and(path("/it/c/bagno"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Caricamento...</p>"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, "/it/c/bagno", listing_page(&[("B1", "Lavabo")])).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    let stats = walk(&config).await.unwrap();
    assert_eq!(stats.records_emitted, 1);
    assert_eq!(read_records(&csv_path)[0].product_name, "Lavabo");
}

#[tokio::test]
async fn test_dead_end_refetched_within_ceiling() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/it/prodotti/", root_page(&[("Vuoto", "vuoto")])).await;

    // 300ms ceiling at 20ms intervals
    Mock::given(method("GET"))
        .and(path("/it/c/vuoto"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Nessun prodotto</p>"))
        .expect(2..=16)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    let stats = walk(&config).await.unwrap();
    assert_eq!(stats.branches_abandoned, 1);
    assert_eq!(stats.records_emitted, 0);
    assert!(!csv_path.exists());

    server.verify().await;
}

#[tokio::test]
async fn test_server_error_isolated_to_branch() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/it/prodotti/", root_page(&[("Rotto", "rotto"), ("Bagno", "bagno")])).await;
    Mock::given(method("GET"))
        .and(path("/it/c/rotto"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/it/c/bagno", listing_page(&[("B1", "Lavabo")])).await;

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    let stats = walk(&config).await.unwrap();
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.records_emitted, 1);
    assert_eq!(read_records(&csv_path)[0].level1, "Bagno");
}

#[tokio::test]
async fn test_root_unavailable_fails_walk() {
    let server = MockServer::start().await;
    let base = server.uri();

    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("catalog.csv");
    let config = create_test_config(&base, &csv_path);

    // Nothing mounted: every request is a 404
    assert!(walk(&config).await.is_err());
    assert!(!csv_path.exists());
}
