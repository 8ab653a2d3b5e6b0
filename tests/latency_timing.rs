use mockbase::auth::Credentials;
use mockbase::catalog::types::Payload;
use mockbase::config::MockConfig;
use mockbase::fixture::{invitations_store, INVITATIONS_TABLE};
use mockbase::MockClient;
use std::time::Duration;

fn client_with_default_latency() -> MockClient {
    MockClient::new(MockConfig::default()).with_table(INVITATIONS_TABLE, invitations_store())
}

#[tokio::test(start_paused = true)]
async fn reads_take_the_configured_round_trip() {
    let client = client_with_default_latency();
    let started = tokio::time::Instant::now();
    client
        .from(INVITATIONS_TABLE)
        .select("*")
        .execute()
        .await
        .expect("read");
    assert!(started.elapsed() >= Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn mutations_and_auth_share_the_same_latency() {
    let client = client_with_default_latency();

    let started = tokio::time::Instant::now();
    client
        .from(INVITATIONS_TABLE)
        .insert(Payload::new().set("names", "Late Guest"))
        .await
        .expect("insert");
    assert!(started.elapsed() >= Duration::from_millis(250));

    let started = tokio::time::Instant::now();
    client
        .auth()
        .sign_in_with_password(Credentials {
            email: "host@example.com".into(),
            password: "pw".into(),
        })
        .await
        .expect("sign in");
    assert!(started.elapsed() >= Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn faults_reject_without_waiting_out_the_delay() {
    let client = client_with_default_latency();
    let started = tokio::time::Instant::now();
    client
        .from("guestbook")
        .select("*")
        .execute()
        .await
        .expect_err("unknown table");
    assert!(started.elapsed() < Duration::from_millis(1));
}

#[tokio::test(start_paused = true)]
async fn a_custom_latency_profile_is_honoured() {
    let client = MockClient::new(MockConfig::default().with_latency(Duration::from_millis(40)))
        .with_table(INVITATIONS_TABLE, invitations_store());
    let started = tokio::time::Instant::now();
    client
        .from(INVITATIONS_TABLE)
        .select("*")
        .execute()
        .await
        .expect("read");
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(40));
    assert!(elapsed < Duration::from_millis(250));
}
