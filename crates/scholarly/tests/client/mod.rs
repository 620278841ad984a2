use super::*;

#[tokio::test]
async fn test_search_page_is_decoded() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_page(&server, "all:neural networks", 0, atom_feed("neural", 0, 10, 42)).await;

  let client = ArxivClient::new(&mock_config(&server))?;
  let page = client.search("neural networks", 0).await?;

  assert_eq!(page.len(), 10);
  assert_eq!(page.total_results, Some(42));

  let first = &page.entries[0];
  assert_eq!(first.title, "neural result 0");
  assert_eq!(first.authors.len(), 4);
  assert_eq!(first.display_authors(3), "First Author 0, Second Author, Third Author et al.");
  assert_eq!(first.link, "http://arxiv.org/abs/2401.00000v1");
  assert_eq!(first.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2401.00000v1"));
  assert_eq!(first.primary_category.as_deref(), Some("cs.LG"));
  assert!(first.published.is_some());

  let origin = first.origin.as_ref().unwrap();
  assert_eq!(origin.query, SearchQuery::text("neural networks"));
  assert_eq!(origin.page, 0);
  Ok(())
}

#[tokio::test]
async fn test_second_page_uses_offset() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_page(&server, "all:plasma", 10, atom_feed("plasma", 10, 4, 14)).await;

  let client = ArxivClient::new(&mock_config(&server))?;
  let papers = client.fetch_page(&SearchQuery::text("plasma"), 1).await?;

  assert_eq!(papers.len(), 4);
  assert_eq!(papers[0].title, "plasma result 10");
  Ok(())
}

#[tokio::test]
async fn test_recent_feed_request() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("search_query", "all"))
    .and(query_param("sortBy", "submittedDate"))
    .and(query_param("sortOrder", "descending"))
    .and(query_param("max_results", "10"))
    .respond_with(ResponseTemplate::new(200).set_body_string(atom_feed("recent", 0, 10, 1000)))
    .expect(1)
    .mount(&server)
    .await;

  let client = ArxivClient::new(&mock_config(&server))?;
  let page = client.recent(0).await?;
  assert_eq!(page.len(), 10);
  Ok(())
}

#[tokio::test]
async fn test_server_error_is_api_error() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(503).set_body_string("<html>Service Unavailable</html>"))
    .mount(&server)
    .await;

  let client = ArxivClient::new(&mock_config(&server))?;
  match client.search("anything", 0).await {
    Err(ScholarlyError::Api(message)) => assert!(message.contains("503")),
    other => panic!("expected an API error, got {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn test_arxiv_error_feed_message_is_kept() -> TestResult<()> {
  let server = MockServer::start().await;
  let body = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#max_results_must_be_less_than_30000</id>
    <title>Error</title>
    <summary>max_results must be less than 30000</summary>
  </entry>
</feed>"#;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(400).set_body_string(body))
    .mount(&server)
    .await;

  let client = ArxivClient::new(&mock_config(&server))?;
  match client.search("anything", 0).await {
    Err(ScholarlyError::Api(message)) => assert_eq!(message, "max_results must be less than 30000"),
    other => panic!("expected an API error, got {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() -> TestResult<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<feed><entry><title>cut"))
    .mount(&server)
    .await;

  let client = ArxivClient::new(&mock_config(&server))?;
  let result = client.search("anything", 0).await;
  assert!(result.is_err());
  assert!(!result.unwrap_err().is_network());
  Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() -> TestResult<()> {
  let server = MockServer::start().await;
  let config = mock_config(&server);
  drop(server);

  let client = ArxivClient::new(&config)?;
  let error = client.search("anything", 0).await.unwrap_err();
  assert!(error.is_network(), "unexpected error: {error:?}");
  Ok(())
}
