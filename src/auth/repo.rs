use crate::auth::repo_types::User;
use anyhow::Context;
use sqlx::SqlitePool;
use time::OffsetDateTime;

impl User {
    /// Find a user by email. The oldest account wins if the email was registered twice.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = ?1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Create a new user with an already hashed password.
    pub async fn create(db: &SqlitePool, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .fetch_one(db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn create_then_find() {
        let st = AppState::fake().await;
        let created = User::create(&st.db, "ada@example.com", "hash").await.unwrap();
        let found = User::find_by_email(&st.db, "ada@example.com")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash");
        assert!(User::find_by_email(&st.db, "bob@example.com").await.unwrap().is_none());
    }
}
