//! Stateless HTTP request builder and response parser for the JSONPlaceholder API.
//!
//! # Design
//! `PlaceholderClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller (normally `JsonPlaceholderApi`) executes the round-trip.

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Comment, Post, Todo, User};

/// Synchronous, stateless client for the JSONPlaceholder API.
#[derive(Debug, Clone)]
pub struct PlaceholderClient {
    base_url: String,
}

impl PlaceholderClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, format!("{}/users", self.base_url), user)
    }

    /// Full replace of the user identified by `user.id`.
    pub fn build_update_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        let id = user.id.ok_or(ApiError::MissingId)?;
        self.json_request(HttpMethod::Put, format!("{}/users/{id}", self.base_url), user)
    }

    pub fn build_delete_user(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{}/users/{id}", self.base_url))
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.get(format!("{}/users", self.base_url))
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        self.get(format!("{}/users/{id}", self.base_url))
    }

    /// Filtering happens on the server through the `username` query parameter.
    pub fn build_find_user_by_username(&self, username: &str) -> HttpRequest {
        let encoded: String = form_urlencoded::byte_serialize(username.as_bytes()).collect();
        self.get(format!("{}/users?username={encoded}", self.base_url))
    }

    pub fn build_list_user_posts(&self, user_id: u64) -> HttpRequest {
        self.get(format!("{}/users/{user_id}/posts", self.base_url))
    }

    pub fn build_list_post_comments(&self, post_id: u64) -> HttpRequest {
        self.get(format!("{}/posts/{post_id}/comments", self.base_url))
    }

    pub fn build_list_user_todos(&self, user_id: u64) -> HttpRequest {
        self.get(format!("{}/users/{user_id}/todos", self.base_url))
    }

    /// Any 2xx carrying a user record is accepted; the service answers 201.
    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        if !response.is_success() {
            return Err(status_error(response));
        }
        decode(&response)
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// The status code is the whole result, whatever it is; the body is ignored.
    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<u16, ApiError> {
        Ok(response.status)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// A 404 means the user does not exist and yields `None`.
    pub fn parse_get_user(&self, response: HttpResponse) -> Result<Option<User>, ApiError> {
        if response.status == 404 {
            return Ok(None);
        }
        check_status(&response, 200)?;
        decode(&response).map(Some)
    }

    /// First match of the filtered collection, or `None` when it is empty.
    pub fn parse_find_user_by_username(
        &self,
        response: HttpResponse,
    ) -> Result<Option<User>, ApiError> {
        let users = self.parse_list_users(response)?;
        Ok(users.into_iter().next())
    }

    pub fn parse_list_user_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_list_post_comments(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Comment>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_list_user_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    fn get(&self, path: String) -> HttpRequest {
        self.request(HttpMethod::Get, path)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request(
        &self,
        method: HttpMethod,
        path: String,
        user: &User,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(user).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// The last post by list order, which is what "most recent" means for this API.
pub fn last_post(posts: &[Post]) -> Option<&Post> {
    posts.last()
}

/// Keep only todos that are not completed, preserving order.
pub fn open_tasks(todos: Vec<Todo>) -> Vec<Todo> {
    todos.into_iter().filter(|todo| !todo.completed).collect()
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(status_error(response.clone()))
}

fn status_error(response: HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    tracing::warn!(status = response.status, "unexpected response status");
    ApiError::HttpError {
        status: response.status,
        body: response.body,
    }
}
