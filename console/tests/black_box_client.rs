use console::groups::details::{add_members, change_privilege, load_details, remove_member};
use console::groups::list::{create_group, delete_group, load_member_count};
use console::groups::{GroupDetails, GroupsView, MemberCount, MemberPicker, PrivilegeChange};
use console::{AccessApi, ApiClient, Config, ConsoleError};
use server_http::{AppState, build_router};
use shared_http::api::{CreateGrantRequest, ListGrantsQuery};
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    state: AppState,
    handle: tokio::task::JoinHandle<()>,
    _data_dir: TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let data_dir = TempDir::new().unwrap();
        let state = AppState::open(data_dir.path(), "admin@example.com").unwrap();
        state.bootstrap().await.unwrap();

        // Same router as the binary, bound to an ephemeral port.
        let app = build_router(state.clone(), &shared::config::Config::from_lookup(|_| None));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
            _data_dir: data_dir,
        }
    }

    fn client(&self) -> ApiClient {
        ApiClient::with_config(Config::new(&self.base_url))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_and_session() {
    let server = TestServer::spawn().await;
    let client = server.client();

    assert_eq!(client.check_health().await.unwrap().message, "OK");

    let view = GroupsView::load(&client).await;
    assert!(view.session.is_admin);
    assert!(view.is_empty());
}

#[tokio::test]
async fn group_lifecycle_through_the_console() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let alice = server
        .state
        .identity_service
        .create_identity("alice@example.com".to_string())
        .await
        .unwrap();

    let mut view = GroupsView::load(&client).await;
    view.apply_created(create_group(&client, "engineering").await);
    let group = view.selected_group().cloned().unwrap();

    // Grants: one ordinary, hidden infra grants never show up
    let grant = client
        .create_grant(&CreateGrantRequest {
            user: None,
            group: Some(group.id.clone()),
            resource: "kubernetes.dev".to_string(),
            privilege: "view".to_string(),
        })
        .await
        .unwrap();

    let mut details = GroupDetails::new(group.clone());
    details.apply_load(load_details(&client, &group.id).await);
    assert_eq!(details.grants.loaded().map(Vec::len), Some(1));
    assert!(details.has_no_members());

    // Members via the picker
    let users = client.list_users(None).await.unwrap();
    let mut picker = MemberPicker::new();
    picker.set_query("ALI");
    let candidate = picker.candidates(&users, details.member_list())[0].clone();
    assert_eq!(candidate.id, alice.id);
    picker.select(candidate);

    let added = add_members(&client, &group.id, picker.selected_ids()).await;
    if details.apply_members_added(&group.id, added) {
        picker.clear();
    }
    assert_eq!(details.member_list().len(), 1);
    assert!(!picker.can_add());
    assert_eq!(
        load_member_count(&client, &group.id).await,
        MemberCount::Known(1)
    );

    // Privilege change leaves exactly one grant
    let change = change_privilege(&client, &grant, "edit").await;
    assert!(matches!(change, PrivilegeChange::Replaced { .. }));
    assert!(details.apply_privilege_change(&group.id, change));
    let remote = client
        .list_grants(&ListGrantsQuery::for_group(&group.id))
        .await
        .unwrap();
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].privilege, "edit");
    assert_eq!(details.grants.loaded().unwrap()[0].id, remote[0].id);

    let removed = remove_member(&client, &group.id, &alice.id).await;
    assert!(details.apply_member_removed(&group.id, &alice.id, removed));
    assert!(details.has_no_members());

    // Delete
    let deleted = delete_group(&client, &group.id).await;
    view.apply_deleted(&group.id, deleted);
    assert!(view.is_empty());
    assert!(view.selected.is_none());
}

#[tokio::test]
async fn backend_errors_surface_their_message() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let err = client.delete_group("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.is_not_found());

    let err = client.create_group("").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Api { status: 400, .. }));

    let mut view = GroupsView::load(&client).await;
    view.apply_created(create_group(&client, "dup").await);
    view.apply_created(create_group(&client, "dup").await);
    assert_eq!(view.groups.loaded().map(Vec::len), Some(1));
    assert!(view.notice.is_some());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = ApiClient::with_config(Config::new("http://127.0.0.1:9"));
    let view = GroupsView::load(&client).await;

    assert!(matches!(view.groups, console::groups::Loadable::Failed(_)));
    assert!(!view.session.is_admin);
}
