use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::error::DomainError;
use super::model::{Article, NewArticle, NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save<C: ConnectionTrait>(&self, conn: &C, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_login<C: ConnectionTrait>(
        &self,
        conn: &C,
        login: &str,
    ) -> Result<Option<User>, DomainError>;

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<User>, DomainError>;

    async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<User>, DomainError>;
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Stores the article under `slug`; the author must already exist.
    async fn save<C: ConnectionTrait>(
        &self,
        conn: &C,
        article: NewArticle,
        slug: String,
    ) -> Result<Article, DomainError>;

    /// Newest first; equal timestamps fall back to the later insert first.
    async fn find_all_by_order_by_added_at_desc<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<Article>, DomainError>;

    async fn find_by_slug<C: ConnectionTrait>(
        &self,
        conn: &C,
        slug: &str,
    ) -> Result<Option<Article>, DomainError>;
}
