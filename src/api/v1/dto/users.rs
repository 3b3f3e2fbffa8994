/*
 * Responsibility
 * - Users の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 * - 部分更新リクエストを「送られてきたフィールドだけ」の Map に変換する
 */
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::repos::user_repo::UserRow;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.first_name
            && !(1..=30).contains(&name.chars().count())
        {
            return Err("firstName must be 1-30 chars");
        }
        if let Some(name) = &self.last_name
            && !(1..=30).contains(&name.chars().count())
        {
            return Err("lastName must be 1-30 chars");
        }
        if let Some(email) = &self.email {
            if !(6..=60).contains(&email.chars().count()) {
                return Err("email must be 6-60 chars");
            }
            if !email.contains('@') {
                return Err("email is not valid");
            }
        }

        Ok(())
    }

    /// Fields that were actually sent, keyed by their request names, in a fixed order.
    pub fn into_changes(self) -> Map<String, Value> {
        let mut changes = Map::new();
        if let Some(v) = self.first_name {
            changes.insert("firstName".to_string(), Value::String(v));
        }
        if let Some(v) = self.last_name {
            changes.insert("lastName".to_string(), Value::String(v));
        }
        if let Some(v) = self.email {
            changes.insert("email".to_string(), Value::String(v));
        }
        changes
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_admin: row.is_admin,
        }
    }
}
