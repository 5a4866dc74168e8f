//! Session entity - the persisted "currently signed in" record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::User;

/// Session document stored under the well-known session key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub user: User,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Open a fresh session for the given user
    pub fn new(user: User) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DEFAULT_AVATAR;
    use crate::value_objects::Snowflake;

    #[test]
    fn test_sessions_have_unique_ids() {
        let user = User::approved(
            Snowflake::new(1),
            "alice".to_string(),
            DEFAULT_AVATAR.to_string(),
        );
        let a = Session::new(user.clone());
        let b = Session::new(user);
        assert_ne!(a.id, b.id);
    }
}
