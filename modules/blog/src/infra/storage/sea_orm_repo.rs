use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::model::{Article, NewArticle, NewUser, User};
use crate::domain::repo::{ArticleRepository, UserRepository};

use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::user::{self, Entity as UserEntity};

#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmUserRepository;

impl SeaOrmUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save<C: ConnectionTrait>(&self, conn: &C, new: NewUser) -> Result<User, DomainError> {
        let model = user::ActiveModel {
            id: ActiveValue::NotSet,
            login: ActiveValue::Set(new.login),
            firstname: ActiveValue::Set(new.firstname),
            lastname: ActiveValue::Set(new.lastname),
            description: ActiveValue::Set(new.description),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_by_login<C: ConnectionTrait>(
        &self,
        conn: &C,
        login: &str,
    ) -> Result<Option<User>, DomainError> {
        let row = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(conn)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<User>, DomainError> {
        Ok(UserEntity::find_by_id(id).one(conn).await?.map(Into::into))
    }

    async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<User>, DomainError> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmArticleRepository;

impl SeaOrmArticleRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Join an article row with its author row.
fn to_article(row: article::Model, author: Option<user::Model>) -> Result<Article, DomainError> {
    let author = author.ok_or_else(|| {
        DomainError::Database(DbErr::RecordNotFound(format!(
            "author {} of article {}",
            row.author_id, row.id
        )))
    })?;
    Ok(Article {
        id: row.id,
        title: row.title,
        headline: row.headline,
        content: row.content,
        author: author.into(),
        slug: row.slug,
        added_at: row.added_at,
    })
}

#[async_trait]
impl ArticleRepository for SeaOrmArticleRepository {
    async fn save<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewArticle,
        slug: String,
    ) -> Result<Article, DomainError> {
        let author = UserEntity::find_by_id(new.author_id).one(conn).await?;
        let row = article::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(new.title),
            headline: ActiveValue::Set(new.headline),
            content: ActiveValue::Set(new.content),
            author_id: ActiveValue::Set(new.author_id),
            slug: ActiveValue::Set(slug),
            added_at: ActiveValue::Set(new.added_at),
        }
        .insert(conn)
        .await?;
        to_article(row, author)
    }

    async fn find_all_by_order_by_added_at_desc<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<Article>, DomainError> {
        ArticleEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(article::Column::AddedAt)
            .order_by_desc(article::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(|(row, author)| to_article(row, author))
            .collect()
    }

    async fn find_by_slug<C: ConnectionTrait>(
        &self,
        conn: &C,
        slug: &str,
    ) -> Result<Option<Article>, DomainError> {
        ArticleEntity::find()
            .filter(article::Column::Slug.eq(slug))
            .find_also_related(UserEntity)
            .one(conn)
            .await?
            .map(|(row, author)| to_article(row, author))
            .transpose()
    }
}
