//! User-context handler implementations

use axum::Json;

use crate::{
    constants::DEFAULT_USER_ID, extractors::AppQuery, models::UserContext,
    services::UserContextService,
};

use super::request::UserContextQuery;

/// Learner context snapshot
pub async fn get_user_context(AppQuery(query): AppQuery<UserContextQuery>) -> Json<UserContext> {
    let user_id = query.user_id.as_deref().unwrap_or(DEFAULT_USER_ID);
    Json(UserContextService::get_context(user_id))
}
