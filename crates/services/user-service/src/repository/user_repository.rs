//! User repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::error::RepositoryError;
use domain::{User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields of a user about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub phone_no: String,
    pub full_name: String,
    pub password_hash: Vec<u8>,
}

/// Single selector for a user lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    PhoneNo(String),
}

/// Sparse update of one user. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub id: UserId,
    pub phone_no: Option<String>,
    pub full_name: Option<String>,
    pub successful_login_count: Option<i64>,
}

impl UserChanges {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.phone_no.is_none() && self.full_name.is_none() && self.successful_login_count.is_none()
    }
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user and return its id. A taken phone number is a `Conflict`.
    async fn create(&self, user: NewUser) -> Result<UserId, RepositoryError>;

    /// Fetch one user by id or phone number
    async fn get(&self, lookup: UserLookup) -> Result<User, RepositoryError>;

    /// Write the supplied fields of one user
    async fn update(&self, changes: UserChanges) -> Result<(), RepositoryError>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: NewUser) -> Result<UserId, RepositoryError> {
        let active_model = ActiveModel {
            phone_no: Set(user.phone_no),
            full_name: Set(user.full_name),
            password_hash: Set(user.password_hash),
            successful_login_count: Set(0),
            ..Default::default()
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(model.id)
    }

    async fn get(&self, lookup: UserLookup) -> Result<User, RepositoryError> {
        let query = match lookup {
            UserLookup::Id(id) => UserEntity::find_by_id(id),
            UserLookup::PhoneNo(phone_no) => {
                UserEntity::find().filter(user::Column::PhoneNo.eq(phone_no))
            }
        };

        query
            .one(self.db.as_ref())
            .await?
            .map(User::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, changes: UserChanges) -> Result<(), RepositoryError> {
        // Nothing to write, only confirm the row exists
        if changes.is_empty() {
            return self.get(UserLookup::Id(changes.id)).await.map(|_| ());
        }

        let mut query = UserEntity::update_many().filter(user::Column::Id.eq(changes.id));
        if let Some(phone_no) = changes.phone_no {
            query = query.col_expr(user::Column::PhoneNo, Expr::value(phone_no));
        }
        if let Some(full_name) = changes.full_name {
            query = query.col_expr(user::Column::FullName, Expr::value(full_name));
        }
        if let Some(count) = changes.successful_login_count {
            query = query.col_expr(user::Column::SuccessfulLoginCount, Expr::value(count));
        }

        let result = query.exec(self.db.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
