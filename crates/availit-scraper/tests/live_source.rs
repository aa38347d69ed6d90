//! Integration tests for `HtmlFetcher` and `LiveSource::scrape`.
//!
//! Every test stands up a `wiremock` server in place of the government
//! pages, so no real network traffic is made.

use std::time::Duration;

use availit_core::{ParserConfig, RawHospitalRecord, SourceConfig, DEFAULT_ERROR_MESSAGE};
use availit_scraper::{HtmlFetcher, LiveSource, ScraperError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_UA: &str = "availit-test/1.0";

const REPORT_HTML: &str = r#"<html><body>
<table class="DataGridBody">
  <tr><th>Hospital ID</th><th>Hospital Name</th></tr>
  <tr align="center">
    <td>101</td><td>AIIMS</td><td>15</td><td>4</td><td>2</td><td>9</td><td>3</td>
    <td>1</td><td>7</td><td>011-26588500</td><td>Dr. Mehta</td><td>9810000001</td>
    <td>Ms. Kaur</td><td>06/05/2021 09:00</td>
  </tr>
  <tr align="center"></tr>
</table>
</body></html>"#;

const CARDS_HTML: &str = r#"<html><body>
<div class="gen-card-content">
  <h2 class="heading4">Victoria Hospital</h2>
  <p><a href="/map">Fort Road, Bengaluru</a></p>
  <p><strong>Phone:</strong> 080-26701150</p>
</div>
<div class="gen-card-content">
  <h2 class="heading4">Unlisted Clinic</h2>
  <p>Somewhere</p>
</div>
</body></html>"#;

fn fetcher() -> HtmlFetcher {
    HtmlFetcher::new(5, TEST_UA).expect("failed to build test HtmlFetcher")
}

fn source(key: &str, url: String, parser: ParserConfig, fail_on_empty: bool) -> LiveSource {
    let config = SourceConfig {
        url,
        parser,
        error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        fail_on_empty,
    };
    LiveSource::from_config(key, &config).expect("valid source config")
}

// ---------------------------------------------------------------------------
// HtmlFetcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_html_sends_identifying_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .and(header("user-agent", TEST_UA))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher()
        .fetch_html(&format!("{}/report", server.uri()))
        .await
        .expect("fetch should succeed");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn fetch_html_maps_non_2xx_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = format!("{}/report", server.uri());
    let result = fetcher().fetch_html(&url).await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 503, url: ref u }) if *u == url),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_html_does_not_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = fetcher()
        .fetch_html(&format!("{}/report", server.uri()))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn fetch_html_times_out_on_slow_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(REPORT_HTML)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let fetcher = HtmlFetcher::new(1, TEST_UA).expect("fetcher");
    let started = std::time::Instant::now();
    let result = fetcher
        .fetch_html(&format!("{}/report", server.uri()))
        .await;

    let err = result.expect_err("slow upstream should time out");
    assert!(err.is_timeout(), "expected timeout, got: {err:?}");
    assert!(started.elapsed() < Duration::from_secs(3));
}

// ---------------------------------------------------------------------------
// LiveSource::scrape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scrape_table_source_returns_report_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REPORT_HTML))
        .mount(&server)
        .await;

    let source = source(
        "delhi",
        format!("{}/report", server.uri()),
        ParserConfig::table(),
        false,
    );
    let records = source.scrape(&fetcher()).await.expect("scrape");

    assert_eq!(records.len(), 1);
    match &records[0] {
        RawHospitalRecord::BedAvailability(row) => {
            assert_eq!(row.hospital_id, "101");
            assert_eq!(row.name, "AIIMS");
            assert_eq!(row.last_update, "06/05/2021 09:00");
        }
        other @ RawHospitalRecord::Directory(_) => panic!("unexpected record: {other:?}"),
    }
}

#[tokio::test]
async fn scrape_card_source_drops_cards_without_phone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CARDS_HTML))
        .mount(&server)
        .await;

    let source = source(
        "bangalore",
        format!("{}/hospitals", server.uri()),
        ParserConfig::card(),
        false,
    );
    let records = source.scrape(&fetcher()).await.expect("scrape");

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "Victoria Hospital",
            "address": "Fort Road, Bengaluru",
            "phone": "080-26701150"
        }])
    );
}

#[tokio::test]
async fn scrape_redesigned_page_is_empty_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>new site</body></html>"))
        .mount(&server)
        .await;

    let source = source(
        "delhi",
        format!("{}/report", server.uri()),
        ParserConfig::table(),
        false,
    );
    let records = source.scrape(&fetcher()).await.expect("scrape");
    assert!(records.is_empty());
}

#[tokio::test]
async fn scrape_empty_page_fails_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>new site</body></html>"))
        .mount(&server)
        .await;

    let source = source(
        "delhi",
        format!("{}/report", server.uri()),
        ParserConfig::table(),
        true,
    );
    let result = source.scrape(&fetcher()).await;
    assert!(
        matches!(result, Err(ScraperError::EmptyExtraction { ref source_key, .. }) if source_key == "delhi"),
        "expected EmptyExtraction, got: {result:?}"
    );
}

#[tokio::test]
async fn scrape_propagates_fetch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = source(
        "delhi",
        format!("{}/report", server.uri()),
        ParserConfig::table(),
        false,
    );
    let result = source.scrape(&fetcher()).await;
    assert!(matches!(
        result,
        Err(ScraperError::UnexpectedStatus { status: 404, .. })
    ));
}
