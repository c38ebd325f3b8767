mod common;

use coowner_client::{dashboard::Dashboard, ClientError, View};

#[tokio::test]
async fn user_dashboard_renders_despite_a_failing_section() {
    let stub = common::spawn().await;
    let token = stub.issue("a@example.com");
    let (client, history) = stub.client(Some(token.as_str()), View::UserDashboard);

    let dashboard = match Dashboard::load(&client).await.unwrap() {
        Dashboard::User(dashboard) => dashboard,
        Dashboard::Admin(_) => panic!("regular user got the admin dashboard"),
    };

    assert_eq!(dashboard.groups.count(), 1);
    assert!(dashboard.bookings.failed());
    assert!(!dashboard.shares.failed());
    assert_eq!(dashboard.outstanding(), 300_000.0);
    // The usage body is cut off mid-stream.
    assert!(dashboard.usage.failed());
    assert!(dashboard.usage.error.as_deref().unwrap().contains("transport error"));
    assert_eq!(client.session().token(), Some(token));
    assert!(history.redirects().is_empty());

    let rendered = dashboard.to_string();
    assert!(rendered.contains("Nguyen Van A"));
    assert!(rendered.contains("Family car"));
    assert!(rendered.contains("Could not load bookings"));
    assert!(rendered.contains("database down"));
    assert!(rendered.contains("300.000 ₫"));
    assert!(rendered.contains("Could not load usage history"));
}

#[tokio::test]
async fn admin_is_sent_to_the_admin_dashboard() {
    let stub = common::spawn().await;
    let token = stub.issue("admin@example.com");
    let (client, history) = stub.client(Some(token.as_str()), View::UserDashboard);

    let dashboard = match Dashboard::load(&client).await.unwrap() {
        Dashboard::Admin(dashboard) => dashboard,
        Dashboard::User(_) => panic!("admin got the user dashboard"),
    };

    assert_eq!(history.redirects(), vec![View::AdminDashboard]);
    assert_eq!(dashboard.users.count(), 2);
    assert_eq!(dashboard.failures(), 1);
    assert!(dashboard.vehicles.failed());
    assert!(dashboard.to_string().contains("1 admin collections failed to load"));
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let stub = common::spawn().await;
    let (client, history) = stub.client(None, View::UserDashboard);

    let err = Dashboard::load(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert_eq!(history.redirects(), vec![View::Login]);
    assert!(stub.state.hits().is_empty());
}

#[tokio::test]
async fn rejected_identity_ends_the_session() {
    let stub = common::spawn().await;
    let (client, history) = stub.client(Some(common::mint_token().as_str()), View::UserDashboard);

    let err = Dashboard::load(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert_eq!(client.session().token(), None);
    assert_eq!(history.redirects(), vec![View::Login]);
}
