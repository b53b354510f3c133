//! Blocking API surface that runs `PlaceholderClient` requests over a `Transport`.
//!
//! # Design
//! Every method is one `build_*` → `execute` → `parse_*` cycle, except
//! `get_comments_for_last_post`, which chains two. The first failing step
//! aborts the chain; nothing is retried.

use std::path::PathBuf;

use crate::client::{self, PlaceholderClient};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::storage;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Comment, Post, Todo, User};

#[derive(Debug, Clone)]
pub struct JsonPlaceholderApi<T = UreqTransport> {
    client: PlaceholderClient,
    transport: T,
    output_dir: PathBuf,
}

impl JsonPlaceholderApi<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl Default for JsonPlaceholderApi<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> JsonPlaceholderApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: PlaceholderClient::new(&config.base_url),
            transport,
            output_dir: config.output_dir,
        }
    }

    pub fn client(&self) -> &PlaceholderClient {
        &self.client
    }

    pub fn create_user(&self, user: &User) -> Result<User, ApiError> {
        let req = self.client.build_create_user(user)?;
        let created = self.client.parse_create_user(self.transport.execute(req)?)?;
        tracing::info!(id = ?created.id, username = ?created.username, "created user");
        Ok(created)
    }

    pub fn update_user(&self, user: &User) -> Result<User, ApiError> {
        let req = self.client.build_update_user(user)?;
        let updated = self.client.parse_update_user(self.transport.execute(req)?)?;
        tracing::info!(id = ?updated.id, "updated user");
        Ok(updated)
    }

    /// Returns the status code the service answered with; only transport
    /// failures are errors.
    pub fn delete_user(&self, id: u64) -> Result<u16, ApiError> {
        let req = self.client.build_delete_user(id);
        let status = self.client.parse_delete_user(self.transport.execute(req)?)?;
        tracing::info!(id, status, "deleted user");
        Ok(status)
    }

    pub fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        let req = self.client.build_list_users();
        self.client.parse_list_users(self.transport.execute(req)?)
    }

    pub fn get_user_by_id(&self, id: u64) -> Result<Option<User>, ApiError> {
        let req = self.client.build_get_user(id);
        self.client.parse_get_user(self.transport.execute(req)?)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let req = self.client.build_find_user_by_username(username);
        let user = self
            .client
            .parse_find_user_by_username(self.transport.execute(req)?)?;
        if user.is_none() {
            tracing::debug!(username, "no user with that username");
        }
        Ok(user)
    }

    pub fn get_user_posts(&self, user_id: u64) -> Result<Vec<Post>, ApiError> {
        let req = self.client.build_list_user_posts(user_id);
        self.client.parse_list_user_posts(self.transport.execute(req)?)
    }

    pub fn get_post_comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        let req = self.client.build_list_post_comments(post_id);
        self.client
            .parse_list_post_comments(self.transport.execute(req)?)
    }

    pub fn get_user_todos(&self, user_id: u64) -> Result<Vec<Todo>, ApiError> {
        let req = self.client.build_list_user_todos(user_id);
        self.client.parse_list_user_todos(self.transport.execute(req)?)
    }

    /// Comments on the user's last post by list order, or an empty `Vec` when
    /// the user has no posts.
    pub fn get_comments_for_last_post(&self, user_id: u64) -> Result<Vec<Comment>, ApiError> {
        let posts = self.get_user_posts(user_id)?;
        let Some(post) = client::last_post(&posts) else {
            tracing::debug!(user_id, "user has no posts");
            return Ok(Vec::new());
        };
        self.get_post_comments(post.id)
    }

    pub fn get_open_tasks_for_user(&self, user_id: u64) -> Result<Vec<Todo>, ApiError> {
        let todos = self.get_user_todos(user_id)?;
        Ok(client::open_tasks(todos))
    }

    /// Write comments to `user-{user_id}-post-{post_id}-comments.json` in the
    /// configured output directory.
    pub fn write_comments_to_file(
        &self,
        comments: &[Comment],
        user_id: u64,
        post_id: u64,
    ) -> Result<PathBuf, ApiError> {
        storage::write_comments(&self.output_dir, comments, user_id, post_id)
    }
}
