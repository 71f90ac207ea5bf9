use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::model::{Article, RenderedArticle, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub description: Option<String>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            login: u.login,
            firstname: u.firstname,
            lastname: u.lastname,
            description: u.description,
        }
    }
}

/// Stored article as returned by the `/api/article` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: i32,
    pub title: String,
    pub headline: String,
    pub content: String,
    pub author: UserDto,
    pub slug: String,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

impl From<Article> for ArticleDto {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            headline: a.headline,
            content: a.content,
            author: a.author.into(),
            slug: a.slug,
            added_at: a.added_at,
        }
    }
}

/// Article in display form, as returned by the blog pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArticleDto {
    pub slug: String,
    pub title: String,
    pub headline: String,
    pub content: String,
    pub author: UserDto,
    pub added_at: String,
}

impl From<RenderedArticle> for RenderedArticleDto {
    fn from(a: RenderedArticle) -> Self {
        Self {
            slug: a.slug,
            title: a.title,
            headline: a.headline,
            content: a.content,
            author: a.author.into(),
            added_at: a.added_at,
        }
    }
}
