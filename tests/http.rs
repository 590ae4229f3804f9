//! HttpRepository against a local axum server.
//!
//! Requires the `http` feature.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mockdeck::apps::{placeholder, Comment, PlaceholderService, Post, User};
use mockdeck::{
    Filter, HttpRepository, InMemoryRepository, LatencyProfile, Repository, RepositoryError,
};

type Posts = InMemoryRepository<Post>;

async fn list_posts(State(posts): State<Posts>) -> Json<Vec<Post>> {
    Json(posts.list_all().await.unwrap())
}

async fn get_post(
    State(posts): State<Posts>,
    Path(id): Path<u32>,
) -> Result<Json<Post>, StatusCode> {
    posts
        .get_by_id(id)
        .await
        .unwrap()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_post(
    State(posts): State<Posts>,
    Json(post): Json<Post>,
) -> (StatusCode, Json<Post>) {
    (StatusCode::CREATED, Json(posts.create(post).await.unwrap()))
}

async fn update_post(
    State(posts): State<Posts>,
    Path(id): Path<u32>,
    Json(mut post): Json<Post>,
) -> StatusCode {
    post.id = id;
    if posts.update(post).await.unwrap() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn delete_post(State(posts): State<Posts>, Path(id): Path<u32>) -> StatusCode {
    if posts.delete(id).await.unwrap() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list_comments() -> Json<Vec<Comment>> {
    Json(placeholder::seed_comments())
}

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let posts = InMemoryRepository::with_records(placeholder::seed_posts(), LatencyProfile::none());
    let app = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/comments", get(list_comments))
        .route("/users", get(|| async { "not json" }))
        .route(
            "/users/:id",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .with_state(posts);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn crud_round_trip() {
    let base = start_server().await;
    let posts: HttpRepository<Post> = HttpRepository::new(&base);

    assert_eq!(posts.list_all().await.unwrap().len(), 10);
    let second = posts.get_by_id(2).await.unwrap().unwrap();
    assert_eq!(second.title, "qui est esse");
    assert!(posts.get_by_id(404).await.unwrap().is_none());

    let created = posts
        .create(Post {
            id: 0,
            user_id: 1,
            title: "remote".into(),
            body: "created over http".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 11);

    let mut renamed = created.clone();
    renamed.title = "renamed".into();
    assert!(posts.update(renamed).await.unwrap());
    assert_eq!(posts.get_by_id(11).await.unwrap().unwrap().title, "renamed");

    let mut ghost = created;
    ghost.id = 500;
    assert!(!posts.update(ghost).await.unwrap());

    assert!(posts.delete(11).await.unwrap());
    assert!(!posts.delete(11).await.unwrap());
}

#[tokio::test]
async fn filters_apply_client_side() {
    let base = start_server().await;
    let posts: HttpRepository<Post> = HttpRepository::new(&base);

    let even: &Filter<'_, Post> = &|post: &Post| post.id % 2 == 0;
    let found = posts.list(Some(even)).await.unwrap();
    let ids: Vec<_> = found.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![2, 4, 6, 8, 10]);
}

#[tokio::test]
async fn placeholder_service_reads_remote_data() {
    let base = start_server().await;
    let service = PlaceholderService::remote(&base);

    assert_eq!(service.posts().await.unwrap().len(), 10);
    assert_eq!(service.post(1).await.unwrap().unwrap().user_id, 1);
    assert_eq!(service.post_comments(1).await.unwrap().len(), 5);
}

#[tokio::test]
async fn bad_payloads_and_statuses_are_errors() {
    let base = start_server().await;
    let users: HttpRepository<User> = HttpRepository::new(&base);

    let err = users.list_all().await.unwrap_err();
    assert!(matches!(err, RepositoryError::Decode(_)), "{err:?}");

    let err = users.get_by_id(1).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Remote(_)), "{err:?}");
}
