//! Integration tests for the REPL driven against a mock PokeAPI

use std::sync::Arc;
use std::time::Duration;

use pokedex::cache::Cache;
use pokedex::commands::Session;
use pokedex::data::{ClientConfig, PokeClient};
use pokedex::repl;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_session(server: &MockServer) -> (Session, Arc<Cache>) {
    let cache = Arc::new(Cache::new(Duration::from_secs(30)));
    let config = ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(2),
    };
    let client = PokeClient::new(cache.clone(), &config).expect("Failed to build client");
    (Session::with_rng(client, StdRng::seed_from_u64(3)), cache)
}

async fn run_script(session: &mut Session, script: &str) -> String {
    let mut out = Vec::new();
    repl::run(session, script.as_bytes(), &mut out)
        .await
        .expect("REPL should not fail on in-memory I/O");
    String::from_utf8(out).expect("Output should be UTF-8")
}

#[tokio::test]
async fn repeated_explore_hits_network_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/location-area/canalave-city-area"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"name":"canalave-city-area","pokemon_encounters":[{"pokemon":{"name":"tentacool","url":""}}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (mut session, cache) = create_session(&server);
    let output = run_script(
        &mut session,
        "explore canalave-city-area\nEXPLORE Canalave-City-Area\nexit\n",
    )
    .await;

    assert_eq!(output.matches(" - tentacool").count(), 2);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn failed_fetch_is_printed_and_loop_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let (mut session, cache) = create_session(&server);
    let output = run_script(&mut session, "catch missingno\ncatch missingno\npokedex\n").await;

    assert_eq!(output.matches("Error: unexpected HTTP status 404").count(), 2);
    assert!(output.contains("Pokedex is empty!"));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn blank_lines_are_ignored() {
    let server = MockServer::start().await;
    let (mut session, _cache) = create_session(&server);

    let output = run_script(&mut session, "\n   \nexit\n").await;

    assert_eq!(output.matches(repl::PROMPT).count(), 3);
    assert!(!output.contains("Unknown command"));
}

#[tokio::test]
async fn exit_stops_reading_input() {
    let server = MockServer::start().await;
    let (mut session, _cache) = create_session(&server);

    let output = run_script(&mut session, "exit\nhelp\n").await;

    assert!(output.contains("Goodbye!"));
    assert!(!output.contains("Welcome to the Pokedex!"));
}
