use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

/// Records are schemaless JSON objects, as on the real service.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub users: BTreeMap<u64, Record>,
    /// Highest user id ever issued; ids of deleted users are never reused.
    pub last_user_id: u64,
    pub posts: Vec<Record>,
    pub comments: Vec<Record>,
    pub todos: Vec<Record>,
}

impl Store {
    /// Three users: `Bret` (id 1) has posts 1..=3 and a mix of todos,
    /// `Antonette` (id 2) has nothing, `Samantha` (id 3) has one post
    /// without comments.
    pub fn seeded() -> Self {
        let users: BTreeMap<u64, Record> = [
            json!({
                "id": 1, "name": "Leanne Graham", "username": "Bret",
                "email": "Sincere@april.biz", "phone": "1-770-736-8031",
                "website": "hildegard.org",
                "address": { "street": "Kulas Light", "city": "Gwenborough" },
                "company": { "name": "Romaguera-Crona" }
            }),
            json!({
                "id": 2, "name": "Ervin Howell", "username": "Antonette",
                "email": "Shanna@melissa.tv", "phone": "010-692-6593",
                "website": "anastasia.net"
            }),
            json!({
                "id": 3, "name": "Clementine Bauch", "username": "Samantha",
                "email": "Nathan@yesenia.net", "phone": "1-463-123-4447",
                "website": "ramiro.info"
            }),
        ]
        .into_iter()
        .map(record)
        .map(|user| (id_of(&user), user))
        .collect();

        let posts = [
            json!({ "userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit" }),
            json!({ "userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore" }),
            json!({ "userId": 1, "id": 3, "title": "ea molestias", "body": "et iusto sed quo" }),
            json!({ "userId": 3, "id": 4, "title": "eum et est", "body": "ullam et saepe" }),
        ]
        .into_iter()
        .map(record)
        .collect();

        let comments = [
            json!({ "postId": 1, "id": 1, "name": "id labore", "email": "Eliseo@gardner.biz", "body": "laudantium" }),
            json!({ "postId": 3, "id": 2, "name": "quo vero", "email": "Jayne_Kuhic@sydney.com", "body": "est natus" }),
            json!({ "postId": 3, "id": 3, "name": "odio adipisci", "email": "Nikita@garfield.biz", "body": "quia molestiae" }),
        ]
        .into_iter()
        .map(record)
        .collect();

        let todos = [
            json!({ "userId": 1, "id": 1, "title": "delectus aut autem", "completed": false }),
            json!({ "userId": 1, "id": 2, "title": "quis ut nam", "completed": true }),
            json!({ "userId": 1, "id": 3, "title": "fugiat veniam minus", "completed": false }),
            json!({ "userId": 3, "id": 4, "title": "et porro tempora", "completed": true }),
        ]
        .into_iter()
        .map(record)
        .collect();

        let last_user_id = users.keys().next_back().copied().unwrap_or_default();

        Self {
            users,
            last_user_id,
            posts,
            comments,
            todos,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/users/{id}/posts", get(user_posts))
        .route("/users/{id}/todos", get(user_todos))
        .route("/posts/{id}/comments", get(post_comments))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type NotFound = (StatusCode, Json<Value>);

fn not_found() -> NotFound {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

fn id_of(record: &Record) -> u64 {
    record.get("id").and_then(Value::as_u64).unwrap_or_default()
}

fn children(records: &[Record], key: &str, parent: u64) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.get(key).and_then(Value::as_u64) == Some(parent))
        .cloned()
        .collect()
}

async fn list_users(
    State(db): State<Db>,
    Query(filter): Query<UserFilter>,
) -> Json<Vec<Record>> {
    let store = db.read().await;
    let users = store
        .users
        .values()
        .filter(|user| match &filter.username {
            Some(name) => user.get("username").and_then(Value::as_str) == Some(name.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    Json(users)
}

async fn create_user(
    State(db): State<Db>,
    Json(mut input): Json<Record>,
) -> (StatusCode, Json<Record>) {
    let mut store = db.write().await;
    let highest = store.users.keys().next_back().copied().unwrap_or_default();
    let id = store.last_user_id.max(highest) + 1;
    store.last_user_id = id;
    input.insert("id".to_string(), json!(id));
    store.users.insert(id, input.clone());
    tracing::info!(id, "user created");
    (StatusCode::CREATED, Json(input))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Record>, NotFound> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or_else(not_found)
}

/// Full replace; the path id wins over any id in the body.
async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(mut input): Json<Record>,
) -> Result<Json<Record>, NotFound> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(not_found)?;
    input.insert("id".to_string(), json!(id));
    *user = input.clone();
    Ok(Json(input))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Value>, NotFound> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| Json(json!({})))
        .ok_or_else(not_found)
}

async fn user_posts(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Record>> {
    Json(children(&db.read().await.posts, "userId", id))
}

async fn user_todos(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Record>> {
    Json(children(&db.read().await.todos, "userId", id))
}

async fn post_comments(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Record>> {
    Json(children(&db.read().await.comments, "postId", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_users_are_keyed_by_id() {
        let store = Store::seeded();
        assert_eq!(store.users.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(store.users[&1]["username"], "Bret");
    }

    #[test]
    fn seeded_store_tracks_last_user_id() {
        assert_eq!(Store::seeded().last_user_id, 3);
    }

    #[test]
    fn children_filters_by_parent_key() {
        let store = Store::seeded();
        let posts = children(&store.posts, "userId", 1);
        assert_eq!(posts.iter().map(id_of).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(children(&store.posts, "userId", 2).is_empty());
    }

    #[test]
    fn non_object_record_is_empty() {
        assert!(record(json!([1, 2])).is_empty());
        assert_eq!(id_of(&Record::new()), 0);
    }

    #[test]
    fn user_filter_username_optional() {
        let filter: UserFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.username.is_none());
    }
}
