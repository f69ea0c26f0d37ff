use domain::models::Query;
use tests::{catalogue_of, Harness};

#[tokio::test]
async fn service_uses_default_top_k_of_five() {
    let (service, log) = Harness::new().catalogue(catalogue_of(8)).service();
    assert_eq!(service.top_k(), 5);

    let query = Query::parse("denim jackets").unwrap();
    let response = service.recommend(&query).await.unwrap();

    assert_eq!(response.as_str(), "You'll look great.");
    let prompt = &log.chat_messages().unwrap()[1].content;
    assert_eq!(tests::table_rows(prompt).len(), 5);
}

#[tokio::test]
async fn service_propagates_index_errors() {
    let (service, log) = Harness::new()
        .failing_index(|| shared::types::StylistError::InvalidResponse {
            service: "Pinecone",
            reason: "truncated body".to_string(),
        })
        .service();

    let query = Query::parse("loafers").unwrap();
    let err = service.recommend(&query).await.unwrap_err();

    assert!(err.to_string().contains("truncated body"));
    assert_eq!(log.kinds(), ["embed", "search"]);
}
