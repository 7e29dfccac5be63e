use crate::{
    entities::user,
    errors::{Error, Result},
};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use models::role::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

const BAD_CREDENTIALS: &str = "Email or password is not valid";

/// Credential store: registration, authentication and account management
pub struct UserService;

impl UserService {
    pub async fn register(
        db: &DatabaseConnection,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<user::Model> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Name cannot be empty".to_string()));
        }

        if !email.contains('@') {
            return Err(Error::Validation("Email is not valid".to_string()));
        }

        if password.is_empty() {
            return Err(Error::Validation("Password cannot be empty".to_string()));
        }

        let password_hash = hash(password, DEFAULT_COST)?;

        let now = Utc::now().naive_utc();
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_lowercase()),
            name: Set(name.trim().to_string()),
            password_hash: Set(password_hash),
            is_active: Set(true),
            role: Set(Role::default()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user.insert(db).await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Error::Validation("Email is already registered".to_string())
            }
            _ => Error::Database(err),
        })
    }

    /// Verifies credentials; inactive accounts never authenticate. The
    /// error does not reveal which of the two checks failed.
    pub async fn authenticate(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<user::Model> {
        let account = user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(db)
            .await?
            .ok_or_else(|| Error::Validation(BAD_CREDENTIALS.to_string()))?;

        if !account.is_active || !verify(password, &account.password_hash)? {
            return Err(Error::Validation(BAD_CREDENTIALS.to_string()));
        }

        Ok(account)
    }

    pub async fn get_user(db: &DatabaseConnection, user_id: Uuid) -> Result<user::Model> {
        user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(Error::NotFound("User"))
    }

    pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
        user::Entity::find()
            .order_by_asc(user::Column::Email)
            .all(db)
            .await
            .map_err(Into::into)
    }

    pub async fn delete_user(db: &DatabaseConnection, user_id: Uuid) -> Result<()> {
        let deleted = user::Entity::delete_by_id(user_id).exec(db).await?;

        if deleted.rows_affected == 0 {
            return Err(Error::NotFound("User"));
        }

        Ok(())
    }

    pub async fn change_password(
        db: &DatabaseConnection,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<()> {
        if new_password.is_empty() {
            return Err(Error::Validation("Password cannot be empty".to_string()));
        }

        let account = Self::get_user(db, user_id).await?;

        let mut updated: user::ActiveModel = account.into();
        updated.password_hash = Set(hash(new_password, DEFAULT_COST)?);
        updated.updated_at = Set(Utc::now().naive_utc());
        updated.update(db).await?;

        Ok(())
    }
}
