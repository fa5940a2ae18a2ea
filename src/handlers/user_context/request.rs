//! User-context query parameters

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UserContextQuery {
    pub user_id: Option<String>,
}
