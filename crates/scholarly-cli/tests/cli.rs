//! Integration tests for the scholarly CLI commands.
//!
//! Every run points `--config` at a scratch directory and `--endpoint` at a
//! mock arXiv server, so nothing depends on the machine's own setup.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};
use wiremock::{
  matchers::{method, path, query_param},
  Mock, MockServer, ResponseTemplate,
};

// Helper function to create a clean command instance
fn scholarly() -> Command {
  let mut cmd = Command::cargo_bin("scholarly").unwrap();
  cmd.env_remove("SCHOLARLY_ENDPOINT").env_remove("RUST_LOG");
  cmd
}

// Helper to get a configuration path that does not exist yet
fn temp_config() -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let path = dir.path().join("config.toml");
  (dir, path)
}

fn atom_feed(start: usize, count: usize, total: usize) -> String {
  let entries: String = (start..start + count)
    .map(|i| {
      format!(
        "<entry>\
           <id>http://arxiv.org/abs/2402.{i:05}v2</id>\
           <published>2024-02-01T09:30:00Z</published>\
           <title>Paper number {i}</title>\
           <summary>Abstract {i}</summary>\
           <author><name>Grace Hopper</name></author>\
           <author><name>Alan Turing</name></author>\
         </entry>"
      )
    })
    .collect();
  format!(
    "<feed xmlns=\"http://www.w3.org/2005/Atom\" xmlns:opensearch=\"http://a9.com/-/spec/opensearch/1.1/\">\
       <opensearch:totalResults>{total}</opensearch:totalResults>{entries}</feed>"
  )
}

async fn mount_page(server: &MockServer, search_query: &str, start: usize, body: String) {
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", search_query))
    .and(query_param("start", start.to_string()))
    .respond_with(ResponseTemplate::new(200).set_body_string(body))
    .mount(server)
    .await;
}

fn endpoint(server: &MockServer) -> String { format!("{}/api/query", server.uri()) }

#[test]
fn test_help_lists_commands() {
  scholarly()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("search"))
    .stdout(predicate::str::contains("recent"))
    .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_categories_from_defaults() {
  let (_dir, config) = temp_config();
  scholarly()
    .arg("categories")
    .arg("--config")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("F1  Computer Science"))
    .stdout(predicate::str::contains("F8  Economics"));
}

#[test]
fn test_categories_from_file() {
  let (_dir, config) = temp_config();
  std::fs::write(&config, "categories = [\"cs.AI\", \"hep-th\"]\n").unwrap();
  scholarly()
    .arg("categories")
    .arg("--config")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("F2  hep-th"))
    .stdout(predicate::str::contains("Computer Science").not());
}

#[test]
fn test_invalid_config_fails() {
  let (_dir, config) = temp_config();
  std::fs::write(&config, "page_size = 0\n").unwrap();
  scholarly()
    .arg("categories")
    .arg("--config")
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("page_size must be at least 1"));
}

#[test]
fn test_blank_query_is_rejected() {
  let (_dir, config) = temp_config();
  scholarly()
    .args(["search", "   ", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Search query is empty"));
}

#[test]
fn test_missing_query_with_defaults_is_rejected() {
  let (_dir, config) = temp_config();
  scholarly()
    .args(["search", "--accept-defaults", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Search query is empty"));
}

#[test]
fn test_init_writes_config() {
  let (_dir, config) = temp_config();
  scholarly()
    .args(["init", "--endpoint", "http://localhost:8080/api/query", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote configuration"));

  let written = std::fs::read_to_string(&config).unwrap();
  assert!(written.contains("endpoint = \"http://localhost:8080/api/query\""));
  assert!(written.contains("page_size = 10"));

  // An existing file is only replaced after confirmation
  scholarly()
    .args(["init", "--accept-defaults", "--config"])
    .arg(&config)
    .assert()
    .success();
  let rewritten = std::fs::read_to_string(&config).unwrap();
  assert!(rewritten.contains("export.arxiv.org"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_results() {
  let server = MockServer::start().await;
  mount_page(&server, "all:dark matter", 0, atom_feed(0, 10, 42)).await;
  let (_dir, config) = temp_config();

  scholarly()
    .args(["search", "dark matter", "--endpoint", &endpoint(&server), "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Searching arXiv for: dark matter"))
    .stdout(predicate::str::contains("Paper number 0"))
    .stdout(predicate::str::contains("Grace Hopper, Alan Turing"))
    .stdout(predicate::str::contains("Showing 1-10 of 42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_stops_at_short_page() {
  let server = MockServer::start().await;
  mount_page(&server, "all:dark matter", 0, atom_feed(0, 10, 14)).await;
  mount_page(&server, "all:dark matter", 10, atom_feed(10, 4, 14)).await;
  let (_dir, config) = temp_config();

  let output = scholarly()
    .args(["search", "dark matter", "--pages", "5", "--json", "--endpoint", &endpoint(&server)])
    .arg("--config")
    .arg(&config)
    .output()
    .unwrap();
  assert!(output.status.success());

  let papers: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(papers.len(), 14);
  assert_eq!(papers[13]["title"], "Paper number 13");
  assert_eq!(papers[13]["origin"]["page"], 1);
  assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_recent_detailed() {
  let server = MockServer::start().await;
  mount_page(&server, "all", 20, atom_feed(20, 10, 1000)).await;
  let (_dir, config) = temp_config();

  scholarly()
    .args(["recent", "--page", "2", "--detailed", "--endpoint", &endpoint(&server), "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Most recent arXiv submissions"))
    .stdout(predicate::str::contains("2402.00020v2"))
    .stdout(predicate::str::contains("2024-02-01"))
    .stdout(predicate::str::contains("Showing 21-30 of 1000"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_fails() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;
  let (_dir, config) = temp_config();

  scholarly()
    .args(["recent", "--endpoint", &endpoint(&server), "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("arXiv returned HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_past_last_offset_fails() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;
  let (_dir, config) = temp_config();

  for page in [usize::MAX, usize::MAX / 2] {
    scholarly()
      .args(["recent", "--page", &page.to_string(), "--endpoint", &endpoint(&server), "--config"])
      .arg(&config)
      .assert()
      .code(1)
      .stderr(predicate::str::contains("is out of range"));
  }

  scholarly()
    .args(["search", "lattice", "--page", "3", "--pages", &usize::MAX.to_string(), "--json"])
    .args(["--endpoint", &endpoint(&server), "--config"])
    .arg(&config)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Page 3 is out of range"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_endpoint_env_override() {
  let server = MockServer::start().await;
  mount_page(&server, "all:lattice", 0, atom_feed(0, 3, 3)).await;
  let (_dir, config) = temp_config();

  scholarly()
    .env("SCHOLARLY_ENDPOINT", endpoint(&server))
    .args(["search", "lattice", "--config"])
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Showing 1-3 of 3"));
}
