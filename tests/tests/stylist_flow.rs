use application::composer::NO_MATCHES_RESPONSE;
use domain::message::Role;
use presentation::shell::{ShellOutcome, ShellState, FAILURE_PREFIX, RESULT_HEADING};
use shared::types::StylistError;
use tests::{catalogue_of, product, table_rows, Call, Harness};

#[tokio::test]
async fn non_empty_query_calls_each_service_once_in_order() {
    let (mut shell, log) = Harness::new().catalogue(catalogue_of(3)).shell();

    let outcome = shell.submit("linen trousers").await;

    assert!(outcome.is_success());
    assert_eq!(log.kinds(), ["embed", "search", "complete"]);
    assert_eq!(log.calls()[0], Call::Embed("linen trousers".to_string()));
    assert_eq!(
        log.calls()[1],
        Call::Search {
            dimensions: 3,
            top_k: 5
        }
    );
    assert_eq!(shell.state(), ShellState::Idle);
}

#[tokio::test]
async fn empty_query_makes_no_calls() {
    let (mut shell, log) = Harness::new().catalogue(catalogue_of(3)).shell();

    for input in ["", "   ", "\n\t"] {
        let outcome = shell.submit(input).await;
        assert_eq!(
            outcome,
            ShellOutcome::ValidationError(StylistError::EmptyQuery.to_string())
        );
        assert_eq!(shell.state(), ShellState::Idle);
    }
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn black_shirts_scenario_renders_completion_verbatim() {
    let reply = "Both of these are wardrobe heroes:\n\n| Black Tee | ... |\n\nEnjoy!";
    let (mut shell, log) = Harness::new()
        .vector(vec![0.5, -0.25, 0.125, 1.0])
        .catalogue(vec![
            product("1", "Black Tee", "Shirts", "19.99", "", "http://x/1"),
            product("2", "Comfy Flannel", "Shirts", "34.50", "soft brushed cotton", "http://x/2"),
        ])
        .reply(reply)
        .shell();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = shell
        .run_once("comfortable black shirts", &mut out, &mut err)
        .await
        .unwrap();

    assert_eq!(outcome, ShellOutcome::Recommendation(reply.to_string()));

    let messages = log.chat_messages().expect("chat model was called");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, "You are a fashion stylist.");
    assert_eq!(messages[1].role, Role::User);

    let prompt = &messages[1].content;
    assert!(prompt.contains("\"comfortable black shirts\""));
    assert_eq!(
        table_rows(prompt),
        [
            "| Black Tee | Shirts | 19.99 |  | [Link](http://x/1) |",
            "| Comfy Flannel | Shirts | 34.50 | soft brushed cotton | [Link](http://x/2) |",
        ]
    );

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains(RESULT_HEADING));
    assert!(printed.contains(reply));
}

#[tokio::test]
async fn top_k_override_limits_request_and_table() {
    let (mut shell, log) = Harness::new().catalogue(catalogue_of(10)).top_k(2).shell();

    let outcome = shell.submit("anything in stock").await;

    assert!(outcome.is_success());
    assert!(log.calls().contains(&Call::Search {
        dimensions: 3,
        top_k: 2
    }));
    let prompt = &log.chat_messages().unwrap()[1].content;
    let rows = table_rows(prompt);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("| Item 0 |"));
    assert!(rows[1].starts_with("| Item 1 |"));
}

#[tokio::test]
async fn table_row_count_follows_match_count() {
    for n in 0..=5 {
        let (mut shell, log) = Harness::new().catalogue(catalogue_of(n)).shell();
        shell.submit("scarves").await;
        match log.chat_messages() {
            Some(messages) => assert_eq!(table_rows(&messages[1].content).len(), n),
            None => assert_eq!(n, 0, "chat skipped only when nothing matched"),
        }
    }
}

#[tokio::test]
async fn empty_match_list_short_circuits_the_chat_model() {
    let (mut shell, log) = Harness::new().shell();

    let outcome = shell.submit("neon ballgown").await;

    assert_eq!(
        outcome,
        ShellOutcome::Recommendation(NO_MATCHES_RESPONSE.to_string())
    );
    assert_eq!(log.kinds(), ["embed", "search"]);
}

#[tokio::test]
async fn embedding_failure_stops_the_pipeline_with_a_uniform_notice() {
    let (mut shell, log) = Harness::new()
        .catalogue(catalogue_of(2))
        .failing_embedder()
        .shell();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = shell.run_once("wool coat", &mut out, &mut err).await.unwrap();

    match &outcome {
        ShellOutcome::Failure(message) => {
            assert!(message.starts_with(FAILURE_PREFIX));
            assert!(message.contains("OpenAI API error 503"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(log.kinds(), ["embed"]);
    assert_eq!(shell.state(), ShellState::Idle);
    assert!(out.is_empty());
    assert!(String::from_utf8(err).unwrap().contains(FAILURE_PREFIX));
}

#[tokio::test]
async fn malformed_record_surfaces_as_failure() {
    let (mut shell, log) = Harness::new()
        .failing_index(|| StylistError::MalformedRecord {
            id: "42".to_string(),
            field: "name",
        })
        .shell();

    let outcome = shell.submit("hats").await;

    match outcome {
        ShellOutcome::Failure(message) => assert!(message.contains("`name`")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(log.kinds(), ["embed", "search"]);
}

#[tokio::test]
async fn each_submission_starts_fresh() {
    let (mut shell, log) = Harness::new().catalogue(catalogue_of(1)).shell();

    shell.submit("first").await;
    shell.submit("").await;
    shell.submit("second").await;

    assert_eq!(
        log.kinds(),
        ["embed", "search", "complete", "embed", "search", "complete"]
    );
}
