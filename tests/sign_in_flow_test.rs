use signbridge::models::auth::{RememberedCredentials, SignInRequest};
use signbridge::provider::google::status_codes;
use signbridge::provider::{
    FacebookException, FacebookLoginAdapter, GoogleApiException, GoogleSignInAdapter, FACEBOOK,
    GOOGLE,
};
use signbridge::testing::mock::{
    EnrichmentBehavior, FacebookScript, MockEnrichment, ScriptedFacebookManager,
    ScriptedGoogleClient,
};
use signbridge::testing::TestFixtures;
use signbridge::{
    CredentialVault, FailureKind, GraphProfileClient, ProfileEnrichment, SessionStore,
    SignInOrchestrator, SignInOutcome,
};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const GRAPH_ME_BODY: &str = r#"{
    "id": "1001",
    "name": "Riley Runner",
    "email": "riley@example.com",
    "picture": {"data": {"url": "https://cdn.example.com/riley-large.jpg"}}
}"#;

/// Answer a single HTTP request with `body`, returning the request line
async fn graph_stub(
    status_line: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0u8; 4096];
        let read = socket.read(&mut buffer).await.unwrap();
        let request = String::from_utf8_lossy(&buffer[..read]).to_string();

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request.lines().next().unwrap_or_default().to_string()
    });

    (base_url, handle)
}

fn graph_client(base_url: &str) -> Arc<GraphProfileClient> {
    let http_client = reqwest::Client::builder().no_proxy().build().unwrap();
    Arc::new(GraphProfileClient::with_http_client(base_url, http_client))
}

fn orchestrator_with(
    facebook: Arc<ScriptedFacebookManager>,
    enrichment: Arc<dyn ProfileEnrichment>,
    google: Arc<ScriptedGoogleClient>,
) -> SignInOrchestrator {
    SignInOrchestrator::builder(
        Arc::new(SessionStore::new()),
        Arc::new(CredentialVault::in_memory()),
    )
    .with_adapter(Arc::new(FacebookLoginAdapter::new(facebook, enrichment)))
    .with_adapter(Arc::new(GoogleSignInAdapter::new(google)))
    .build()
}

fn idle_google() -> Arc<ScriptedGoogleClient> {
    Arc::new(ScriptedGoogleClient::new(Ok(TestFixtures::google_account())))
}

#[tokio::test]
async fn test_facebook_sign_in_enriches_through_graph_and_opens_session() {
    let (base_url, request_line) = graph_stub("HTTP/1.1 200 OK", GRAPH_ME_BODY).await;
    let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Succeed(
        TestFixtures::facebook_credential(),
    )));
    let orchestrator = orchestrator_with(manager.clone(), graph_client(&base_url), idle_google());

    let request =
        SignInRequest::new().remember(RememberedCredentials::new("riley@example.com", "pw"));
    let outcome = orchestrator.sign_in(FACEBOOK, request).await;

    let SignInOutcome::Success(success) = &outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(success.email.as_deref(), Some("riley@example.com"));
    assert_eq!(success.display_name.as_deref(), Some("Riley Runner"));
    assert_eq!(
        success.photo_url.as_deref(),
        Some("https://cdn.example.com/riley-large.jpg")
    );

    let line = request_line.await.unwrap();
    assert!(line.starts_with("GET /me?fields="));
    assert!(line.contains("access_token=EAAB-test-access-token"));

    let session = orchestrator.session().current();
    assert_eq!(
        session.token(),
        Some(TestFixtures::facebook_credential().access_token.as_str())
    );
    assert_eq!(session.provider(), Some(FACEBOOK));

    let remembered = orchestrator.remembered_credentials().unwrap();
    assert_eq!(remembered.email, "riley@example.com");

    assert_eq!(manager.registration_count(), 1);
    assert_eq!(
        manager.requested_scopes(),
        vec![vec!["email".to_string(), "public_profile".to_string()]]
    );
}

#[tokio::test]
async fn test_graph_failure_still_signs_in_with_empty_profile() {
    let (base_url, _) = graph_stub("HTTP/1.1 500 Internal Server Error", "{}").await;
    let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Succeed(
        TestFixtures::facebook_credential(),
    )));
    let orchestrator = orchestrator_with(manager, graph_client(&base_url), idle_google());

    let outcome = orchestrator.sign_in(FACEBOOK, SignInRequest::new()).await;

    let SignInOutcome::Success(success) = outcome else {
        panic!("expected degraded success");
    };
    assert_eq!(success.email, None);
    assert_eq!(success.display_name, None);
    assert_eq!(success.photo_url, None);
    assert!(orchestrator.session().is_authenticated());
}

#[tokio::test]
async fn test_every_callback_path_yields_one_outcome() {
    let scripts = vec![
        FacebookScript::Succeed(TestFixtures::facebook_credential()),
        FacebookScript::Cancel,
        FacebookScript::Fail(FacebookException {
            message: "CONNECTION_FAILURE".to_string(),
            error_code: None,
        }),
        FacebookScript::SucceedTwice(TestFixtures::facebook_credential()),
        FacebookScript::CancelThenSucceed(TestFixtures::facebook_credential()),
    ];

    for script in scripts {
        let manager = Arc::new(ScriptedFacebookManager::new(script.clone()));
        let enrichment = Arc::new(MockEnrichment::new(EnrichmentBehavior::Degraded));
        let orchestrator = orchestrator_with(manager, enrichment.clone(), idle_google());

        let outcome = orchestrator.sign_in(FACEBOOK, SignInRequest::new()).await;

        match script {
            FacebookScript::Succeed(_) | FacebookScript::SucceedTwice(_) => {
                assert!(outcome.is_success(), "{script:?}");
                assert_eq!(enrichment.call_count(), 1, "{script:?}");
            }
            FacebookScript::Cancel | FacebookScript::CancelThenSucceed(_) => {
                assert!(outcome.is_cancelled(), "{script:?}");
                assert_eq!(enrichment.call_count(), 0, "{script:?}");
            }
            _ => {
                assert_eq!(outcome.failure_kind(), Some(FailureKind::ProviderError));
                assert_eq!(enrichment.call_count(), 0);
            }
        }
    }
}

#[tokio::test]
async fn test_cancel_leaves_session_untouched() {
    let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Cancel));
    let enrichment = Arc::new(MockEnrichment::new(EnrichmentBehavior::Degraded));
    let orchestrator = orchestrator_with(manager, enrichment, idle_google());
    orchestrator
        .session()
        .update("existing-token", TestFixtures::user_profile());
    let before = orchestrator.session().current();

    let outcome = orchestrator
        .sign_in(
            FACEBOOK,
            SignInRequest::new().remember(RememberedCredentials::new("a@b.com", "pw")),
        )
        .await;

    assert!(outcome.is_cancelled());
    assert_eq!(orchestrator.session().current(), before);
    assert_eq!(orchestrator.remembered_credentials(), None);
}

#[tokio::test]
async fn test_google_user_cancel_is_not_an_error() {
    let google = Arc::new(ScriptedGoogleClient::new(Err(GoogleApiException::new(
        status_codes::SIGN_IN_CANCELLED,
    ))));
    let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Hold));
    let enrichment = Arc::new(MockEnrichment::new(EnrichmentBehavior::Degraded));
    let orchestrator = orchestrator_with(manager, enrichment, google);

    let outcome = orchestrator.sign_in(GOOGLE, SignInRequest::new()).await;

    assert!(outcome.is_cancelled());
    assert_eq!(outcome.user_message(), None);
    assert!(!orchestrator.session().is_authenticated());
}

#[tokio::test]
async fn test_google_sign_in_then_sign_out_with_revoke() {
    let google = idle_google();
    let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Hold));
    let enrichment = Arc::new(MockEnrichment::new(EnrichmentBehavior::Degraded));
    let orchestrator = orchestrator_with(manager, enrichment.clone(), google.clone());

    let outcome = orchestrator.sign_in(GOOGLE, SignInRequest::new()).await;
    assert!(outcome.is_success());
    assert_eq!(enrichment.call_count(), 0);

    let session = orchestrator.session().current();
    assert_eq!(session.token(), Some("google-id-token"));
    assert_eq!(
        session.user().and_then(|u| u.email.as_deref()),
        Some("jordan@example.com")
    );

    orchestrator.sign_out(true).await;

    assert!(!orchestrator.session().is_authenticated());
    assert_eq!(google.sign_out_count(), 1);
    assert_eq!(google.revoke_count(), 1);
}

#[tokio::test]
async fn test_social_password_keys_ignore_case() {
    let manager = Arc::new(ScriptedFacebookManager::new(FacebookScript::Hold));
    let enrichment = Arc::new(MockEnrichment::new(EnrichmentBehavior::Degraded));
    let orchestrator = orchestrator_with(manager, enrichment, idle_google());

    orchestrator.save_social_password("Google", "User@Example.com", "p");

    assert_eq!(
        orchestrator.social_password("google", "user@example.com").as_deref(),
        Some("p")
    );
}

#[tokio::test]
async fn test_disabling_remember_me_purges_credentials() {
    let vault = CredentialVault::in_memory();
    vault.remember_me().save_credentials("a@b.com", "pw").unwrap();

    vault.remember_me().set_enabled(false).unwrap();

    assert!(!vault.remember_me().is_remember_me_enabled());
    assert_eq!(vault.remember_me().get_email(), None);
    assert_eq!(vault.remember_me().get_password(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_update_visible_from_another_task() {
    let session = Arc::new(SessionStore::new());
    session.update("token-1", TestFixtures::user_profile());

    let reader = Arc::clone(&session);
    let seen = tokio::task::spawn_blocking(move || reader.current())
        .await
        .unwrap();
    assert_eq!(seen.token(), Some("token-1"));
    assert_eq!(seen.user(), Some(&TestFixtures::user_profile()));

    session.clear();
    let reader = Arc::clone(&session);
    let cleared = tokio::task::spawn_blocking(move || reader.current())
        .await
        .unwrap();
    assert_eq!(cleared.token(), None);
    assert_eq!(cleared.user(), None);
}
