//! Source contract tests
//!
//! Each source is pointed at a `wiremock` server and checked for the exact
//! request it sends and the three-way outcome it produces.

use aggregator_rs::config::SourceConfig;
use aggregator_rs::network::HttpClient;
use aggregator_rs::results::SearchResult;
use aggregator_rs::sources::{
    archpkg::ArchPkg, aur::Aur, mediawiki::MediaWiki, urbandictionary::UrbanDictionary,
    SourceAdapter, SourceError, SourceLoader, SourceOutcome,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::new().unwrap()
}

// ────────────────────────────────────────────────────────────────────────────
// MediaWiki
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mediawiki_opensearch_request_and_zip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "opensearch"))
        .and(query_param("redirects", "resolve"))
        .and(query_param("search", "rust & cargo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "rust & cargo",
            ["Rust (programming language)", "Cargo (package manager)"],
            ["A language", ""],
            [
                "https://en.wikipedia.org/wiki/Rust_(programming_language)",
                "https://en.wikipedia.org/wiki/Cargo_(package_manager)"
            ]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let wiki = MediaWiki::wikipedia("en").with_api_url(format!("{}/w/api.php", server.uri()));
    let outcome = wiki.find(&client(), "rust & cargo").await;

    assert_eq!(
        outcome,
        SourceOutcome::Results(vec![
            SearchResult::new(
                "Rust (programming language)",
                "https://en.wikipedia.org/wiki/Rust_(programming_language)"
            )
            .with_description("A language"),
            SearchResult::new(
                "Cargo (package manager)",
                "https://en.wikipedia.org/wiki/Cargo_(package_manager)"
            )
            .with_description(""),
        ])
    );
}

#[tokio::test]
async fn test_mediawiki_mismatched_lists_fail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "vim",
            ["Vim", "Vi"],
            [""],
            ["https://en.wikipedia.org/wiki/Vim"]
        ])))
        .mount(&server)
        .await;

    let wiki = MediaWiki::wikipedia("en").with_api_url(server.uri());
    let outcome = wiki.find(&client(), "vim").await;

    assert!(matches!(outcome, SourceOutcome::Failure(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_mediawiki_no_matches_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["qqqzx", [], [], []])))
        .mount(&server)
        .await;

    let wiki = MediaWiki::arch_wiki().with_api_url(server.uri());
    assert_eq!(wiki.find(&client(), "qqqzx").await, SourceOutcome::Empty);
}

#[tokio::test]
async fn test_results_without_title_or_absolute_url_are_dropped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("search", "vi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "vi",
            ["", "Vim", "Vi"],
            ["", "", "Screen editor"],
            ["https://en.wikipedia.org/wiki/Blank", "not a url", "https://en.wikipedia.org/wiki/Vi"]
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("search", "x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "x",
            ["", "Vim"],
            ["", ""],
            ["/wiki/relative", "not a url"]
        ])))
        .mount(&server)
        .await;

    let wiki = MediaWiki::wikipedia("en").with_api_url(server.uri());

    assert_eq!(
        wiki.find(&client(), "vi").await,
        SourceOutcome::Results(vec![SearchResult::new(
            "Vi",
            "https://en.wikipedia.org/wiki/Vi"
        )
        .with_description("Screen editor")])
    );
    assert_eq!(wiki.find(&client(), "x").await, SourceOutcome::Empty);
}

// ────────────────────────────────────────────────────────────────────────────
// Package indexes
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_archpkg_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packages/search/json/"))
        .and(query_param("q", "vim"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 2,
            "valid": true,
            "results": [
                {"pkgname": "gvim", "repo": "extra", "arch": "x86_64", "pkgver": "9.1.0", "pkgrel": "2", "pkgdesc": "Vi Improved (GUI)"},
                {"pkgname": "vim", "repo": "extra", "arch": "x86_64", "pkgver": "9.1.0", "pkgrel": "2", "pkgdesc": "Vi Improved"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pkg = ArchPkg::new().with_api_url(format!("{}/packages/search/json/", server.uri()));
    let SourceOutcome::Results(results) = pkg.find(&client(), "vim").await else {
        panic!("expected results");
    };

    assert_eq!(results.len(), 2);
    assert_eq!(results[1].title, "vim");
    assert_eq!(results[1].description(), "Vi Improved -- version 9.1.0-2");
    assert_eq!(results[1].uri, "https://archlinux.org/packages/extra/x86_64/vim");
}

#[tokio::test]
async fn test_aur_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rpc/"))
        .and(query_param("v", "5"))
        .and(query_param("type", "search"))
        .and(query_param("arg", "paru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 5,
            "type": "search",
            "resultcount": 1,
            "results": [
                {"Name": "paru-bin", "PackageBase": "paru-bin", "Version": "2.0.4-1", "Description": "Feature packed AUR helper"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let aur = Aur::new().with_api_url(format!("{}/rpc/", server.uri()));
    assert_eq!(
        aur.find(&client(), "paru").await,
        SourceOutcome::Results(vec![SearchResult::new(
            "paru-bin",
            "https://aur.archlinux.org/packages/paru-bin"
        )
        .with_description("Feature packed AUR helper -- version 2.0.4-1")])
    );
}

#[tokio::test]
async fn test_aur_error_reply_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 5,
            "type": "error",
            "resultcount": 0,
            "results": [],
            "error": "Query arg too small."
        })))
        .mount(&server)
        .await;

    let aur = Aur::new().with_api_url(server.uri());
    assert!(aur.find(&client(), "a").await.is_failure());
}

// ────────────────────────────────────────────────────────────────────────────
// Dictionary
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_urbandictionary_ships_top_definition() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/define"))
        .and(query_param("term", "rtfm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [
                {"word": "RTFM", "definition": "Read the manual.", "permalink": "https://rtfm.urbanup.com/1", "thumbs_up": 40, "thumbs_down": 10},
                {"word": "rtfm", "definition": "A polite request.", "permalink": "https://rtfm.urbanup.com/2", "thumbs_up": 35, "thumbs_down": 5},
                {"word": "RTFM", "definition": "Unhelpful.", "permalink": "https://rtfm.urbanup.com/3", "thumbs_up": 2, "thumbs_down": 30}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ud = UrbanDictionary::new().with_api_url(format!("{}/v0/define", server.uri()));
    assert_eq!(
        ud.find(&client(), "rtfm").await,
        SourceOutcome::Results(vec![SearchResult::new("RTFM", "https://rtfm.urbanup.com/1")
            .with_description("Read the manual.")])
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Transport failures
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let ud = UrbanDictionary::new().with_api_url(server.uri());
    assert_eq!(
        ud.find(&client(), "anything").await,
        SourceOutcome::Failure(SourceError::Status(500))
    );
}

#[tokio::test]
async fn test_garbage_body_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let pkg = ArchPkg::new().with_api_url(server.uri());
    assert!(matches!(
        pkg.find(&client(), "vim").await,
        SourceOutcome::Failure(SourceError::Parse(_))
    ));
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"list": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = SourceConfig {
        api_url: Some(server.uri()),
        timeout: Some(0.2),
        ..SourceConfig::new("ud", "urbandictionary")
    };
    let ud = SourceLoader::create_source(&config, 2.0).unwrap();

    assert!(matches!(
        ud.find(&client(), "slow").await,
        SourceOutcome::Failure(SourceError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_failure() {
    let wiki = MediaWiki::wikipedia("en").with_api_url("http://127.0.0.1:9/api.php");
    assert!(wiki.find(&client(), "vim").await.is_failure());
}
