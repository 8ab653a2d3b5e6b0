use mockbase::config::MockConfig;
use mockbase::fixture::{invitations_store, INVITATIONS_TABLE};
use mockbase::repository::InvitationRepository;
use mockbase::MockClient;

fn client() -> MockClient {
    MockClient::new(MockConfig::instant()).with_table(INVITATIONS_TABLE, invitations_store())
}

#[tokio::test]
async fn example_guest_list_usage() {
    let client = client();
    let repo = InvitationRepository::new(&client);

    let everyone = repo.list(false).await.expect("list all");
    assert_eq!(everyone.len(), 12);

    let confirmed = repo.list(true).await.expect("list accepted");
    assert_eq!(confirmed.len(), 7);
    assert!(confirmed.iter().all(|invitation| invitation.accepted));
}

#[tokio::test]
async fn example_check_in_flow() {
    let client = client();
    let repo = InvitationRepository::new(&client);

    let guest = repo.find_by_id(2).await.expect("find").expect("guest 2");
    assert!(!guest.ishere);

    let checked_in = repo
        .toggle_here(2)
        .await
        .expect("toggle")
        .expect("guest 2");
    assert!(checked_in.ishere);

    let checked_out = repo
        .toggle_here(2)
        .await
        .expect("toggle")
        .expect("guest 2");
    assert!(!checked_out.ishere);

    assert!(repo.toggle_here(999).await.expect("toggle").is_none());
}

#[tokio::test]
async fn example_rsvp_registration_and_edit() {
    let client = client();
    let repo = InvitationRepository::new(&client);

    let added = repo
        .add("A B", 2, None)
        .await
        .expect("register");
    assert_eq!(added.id, 13);
    assert_eq!(added.participants, 2);
    assert!(!added.view);
    assert!(!added.accepted);
    assert!(added.table.is_none());

    let edited = repo
        .update_details(added.id, "A B", 3, Some("4"))
        .await
        .expect("edit")
        .expect("row");
    assert_eq!(edited.participants, 3);
    assert_eq!(edited.table.as_deref(), Some("4"));

    let viewed = repo
        .mark_viewed(added.id)
        .await
        .expect("mark viewed")
        .expect("row");
    assert!(viewed.view);
}
