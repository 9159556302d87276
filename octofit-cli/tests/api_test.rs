use octofit_cli::api::{ApiClient, ApiError, Resource};
use octofit_cli::config::AppConfig;
use octofit_cli::models::{Activity, LeaderboardEntry, Team, User, UserUpdate};

fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&AppConfig::new(server.url())).unwrap()
}

#[tokio::test]
async fn test_list_bare_array() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/teams/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"_id":"t1","name":"Blue","members":["Ana","Bo"]},
                {"_id":"t2","name":"Gold","members":"Cy, Di"}]"#,
        )
        .create_async()
        .await;

    let teams: Vec<Team> = client_for(&server).list(Resource::Teams).await.unwrap();

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].members, vec!["Ana", "Bo"]);
    assert_eq!(teams[1].members, vec!["Cy", "Di"]);
}

#[tokio::test]
async fn test_list_results_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/leaderboard/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"count":2,"results":[
                {"user_name":"Ana","team":"Blue","total_calories":900},
                {"user_name":"Bo","total_calories":700}]}"#,
        )
        .create_async()
        .await;

    let entries: Vec<LeaderboardEntry> = client_for(&server)
        .list(Resource::Leaderboard)
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].total_calories, Some(900));
    assert_eq!(entries[1].team, None);
}

#[tokio::test]
async fn test_list_numeric_ids_and_loose_numbers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":1,"name":"Ana","email":"a@x.com","team":""},
                       {"_id":"65f0c1","name":"Bo"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/activities/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":3,"user_id":1,"duration":30.0,"distance":"5.5","calories":"300"},
                {"id":4,"duration":null,"calories":"n/a"}]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);

    let users: Vec<User> = client.list(Resource::Users).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id.as_deref(), Some("1"));
    assert_eq!(users[1].id.as_deref(), Some("65f0c1"));

    let activities: Vec<Activity> = client.list(Resource::Activities).await.unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].user_id.as_deref(), Some("1"));
    assert_eq!(activities[0].duration, Some(30));
    assert_eq!(activities[0].distance, Some(5.5));
    assert_eq!(activities[0].calories, Some(300));
    assert_eq!(activities[1].duration, None);
    assert_eq!(activities[1].calories, None);
}

#[tokio::test]
async fn test_list_unexpected_shape_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"nothing here"}"#)
        .create_async()
        .await;

    let users: Vec<User> = client_for(&server).list(Resource::Users).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/activities/")
        .with_status(404)
        .with_body("not here")
        .create_async()
        .await;

    let err = client_for(&server)
        .list::<User>(Resource::Activities)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_list_invalid_json() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/workouts/")
        .with_status(200)
        .with_body("<html>")
        .create_async()
        .await;

    let err = client_for(&server)
        .list::<User>(Resource::Workouts)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_network_error() {
    // Nothing listens on the discard port
    let client = ApiClient::new(&AppConfig::new("http://127.0.0.1:9")).unwrap();
    let err = client.list::<User>(Resource::Users).await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_update_user() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/users/u1/")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "name": "Ana Maria",
            "email": "ana@x.com",
            "team": "Blue"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"_id":"u1","name":"Ana Maria","email":"ana@x.com","team":"Blue"}"#)
        .create_async()
        .await;

    let update = UserUpdate {
        name: "Ana Maria".to_string(),
        email: "ana@x.com".to_string(),
        team: "Blue".to_string(),
    };
    let user = client_for(&server).update_user("u1", &update).await.unwrap();

    mock.assert_async().await;
    assert_eq!(user.display_name(), "Ana Maria");
    assert_eq!(user.team_name(), Some("Blue"));
}

#[tokio::test]
async fn test_update_user_error_carries_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PATCH", "/api/users/u1/")
        .with_status(400)
        .with_body("email: Enter a valid email address.")
        .create_async()
        .await;

    let err = client_for(&server)
        .update_user("u1", &UserUpdate::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert!(err.to_string().contains("Enter a valid email address."));
}
