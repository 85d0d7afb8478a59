use foodgram_shared::user::Role;

use crate::repository::{self, FindType};

impl super::Command {
    pub async fn set_role(&self, email: impl Into<String>, role: Role) -> foodgram_shared::Result<i64> {
        let email = email.into();
        let Some(row) = repository::find(&self.read_db, FindType::Email(email.to_owned())).await?
        else {
            foodgram_shared::not_found!("user {email}");
        };

        if row.role.0 != role {
            repository::update(
                &self.write_db,
                repository::UpdateInput {
                    id: row.id,
                    password: None,
                    role: Some(role),
                },
            )
            .await?;
        }

        tracing::info!(user_id = row.id, role = %role, "role changed");

        Ok(row.id)
    }
}
