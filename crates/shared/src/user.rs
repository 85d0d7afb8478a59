use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Deserialize,
)]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// The authenticated caller of a command.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub access_id: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Authors may change their own content, admins anything.
    pub fn can_edit(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.is_admin()
    }
}
