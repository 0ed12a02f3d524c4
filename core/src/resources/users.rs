//! Users resource.

use crate::client::{path_segment, PanelClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{find_by, User, UserFields};
use crate::transport::Transport;

impl<T: Transport> PanelClient<T> {
    /// List all users, in panel order.
    pub fn get_users(&self) -> Result<Vec<User>> {
        self.get_list("/users")
    }

    pub fn get_user(&self, user_id: u32) -> Result<User> {
        self.get_one(&format!("/users/{user_id}"))
    }

    /// Fetch the user whose `external_id` is `external_id`.
    pub fn get_user_by_external_id(&self, external_id: &str) -> Result<User> {
        self.get_one(&format!("/users/external/{}", path_segment(external_id)))
    }

    /// Find a user by email by scanning the user list.
    ///
    /// Only the first page the panel returns is searched.
    pub fn find_user_by_email(&self, email: &str) -> Result<User> {
        find_by(self.get_users()?, "email", email, |u| u.email.as_str())
    }

    /// Find a user by username by scanning the user list.
    ///
    /// Only the first page the panel returns is searched.
    pub fn find_user_by_username(&self, username: &str) -> Result<User> {
        find_by(self.get_users()?, "username", username, |u| u.username.as_str())
    }

    pub fn create_user(&self, user: &impl UserFields) -> Result<User> {
        self.send_one(HttpMethod::Post, "/users", &user.to_partial_user())
    }

    /// Replace the writable fields of user `user_id` and return the panel's copy.
    pub fn update_user(&self, user_id: u32, user: &impl UserFields) -> Result<User> {
        self.send_one(HttpMethod::Patch, &format!("/users/{user_id}"), &user.to_partial_user())
    }

    pub fn delete_user(&self, user_id: u32) -> Result<()> {
        self.delete(&format!("/users/{user_id}"))
    }
}
