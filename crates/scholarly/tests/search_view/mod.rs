use super::*;

#[tokio::test]
async fn test_ten_then_four_accumulates_fourteen() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_page(&server, "all:graphene", 0, atom_feed("graphene", 0, 10, 14)).await;
  mount_page(&server, "all:graphene", 10, atom_feed("graphene", 10, 4, 14)).await;

  let config = mock_config(&server);
  let client = ArxivClient::new(&config)?;
  let mut view = SearchView::new(&config);

  view.set_input("graphene");
  let request = view.submit()?;
  view.apply(request.execute(&client).await);
  assert_eq!(view.active().len(), 10);
  assert!(view.active().has_more());

  let request = view.on_scroll(9).expect("bottom of the list requests a page");
  view.apply(request.execute(&client).await);

  assert_eq!(view.active().len(), 14);
  assert!(!view.active().has_more());
  assert!(view.on_scroll(13).is_none());
  Ok(())
}

#[tokio::test]
async fn test_recent_feed_is_shown_until_search() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_page(&server, "all", 0, atom_feed("recent", 0, 10, 1000)).await;
  mount_page(&server, "all:Physics", 0, atom_feed("physics", 0, 2, 2)).await;

  let config = mock_config(&server);
  let client = ArxivClient::new(&config)?;
  let mut view = SearchView::new(&config);

  let request = view.start().expect("initial recent page");
  assert_eq!(request.feed, Feed::Recent);
  view.apply(request.execute(&client).await);
  assert!(view.showing_recent());
  assert_eq!(view.active().items()[0].title, "recent result 0");

  let request = view.select_category("Physics")?;
  assert!(!view.showing_recent());
  view.apply(request.execute(&client).await);
  assert_eq!(view.active().len(), 2);
  assert!(!view.active().has_more());

  // The recent feed keeps its papers but is not shown again.
  assert_eq!(view.list(Feed::Recent).len(), 10);
  assert!(view.start().is_none());
  Ok(())
}

#[tokio::test]
async fn test_server_failure_keeps_results() -> TestResult<()> {
  let server = MockServer::start().await;
  mount_page(&server, "all:vortex", 0, atom_feed("vortex", 0, 10, 100)).await;
  Mock::given(method("GET"))
    .and(query_param("start", "10"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let config = mock_config(&server);
  let client = ArxivClient::new(&config)?;
  let mut view = SearchView::new(&config);

  view.set_input("vortex");
  let request = view.submit()?;
  view.apply(request.execute(&client).await);

  let request = view.load_more().expect("second page");
  view.apply(request.execute(&client).await);

  assert_eq!(view.active().len(), 10);
  assert!(view.active().has_more());
  assert!(view.active().last_error().is_some());
  Ok(())
}
