use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Bakery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntity {
    pub id: String,
    #[serde(default)]
    pub wallet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub role: Role,
    /// The bakery a `BAKERY` user acts for.
    #[serde(default)]
    pub entity: Option<SessionEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(SessionUser {
                id: user_id.into(),
                role: Role::Admin,
                entity: None,
            }),
        }
    }

    pub fn bakery(user_id: impl Into<String>, bakery_id: impl Into<String>) -> Self {
        Self {
            user: Some(SessionUser {
                id: user_id.into(),
                role: Role::Bakery,
                entity: Some(SessionEntity {
                    id: bakery_id.into(),
                    wallet_id: None,
                }),
            }),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    pub fn with_wallet(mut self, wallet_id: impl Into<String>) -> Self {
        if let Some(entity) = self.user.as_mut().and_then(|user| user.entity.as_mut()) {
            entity.wallet_id = Some(wallet_id.into());
        }
        self
    }

    pub fn wallet_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|user| user.entity.as_ref())
            .and_then(|entity| entity.wallet_id.as_deref())
    }

    /// Bakery scope for API calls; only bakery users carry one.
    pub fn bakery_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .filter(|user| user.role == Role::Bakery)
            .and_then(|user| user.entity.as_ref())
            .map(|entity| entity.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_backend_spelling() {
        let user: SessionUser =
            serde_json::from_str(r#"{"id":"u1","role":"BAKERY","entity":{"id":"b7"}}"#).unwrap();
        assert_eq!(user.role, Role::Bakery);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
    }

    #[test]
    fn only_bakery_users_have_a_bakery_scope() {
        assert_eq!(Session::bakery("u1", "b7").bakery_id(), Some("b7"));
        assert_eq!(Session::admin("u2").bakery_id(), None);
        assert_eq!(Session::anonymous().bakery_id(), None);
    }
}
