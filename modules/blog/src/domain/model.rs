use time::OffsetDateTime;

use super::format::{format_added_at, slugify};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub description: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(
        login: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub headline: String,
    pub content: String,
    pub author: User,
    pub slug: String,
    pub added_at: OffsetDateTime,
}

/// Article before it is stored. The slug is derived from the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub headline: String,
    pub content: String,
    pub author_id: i32,
    pub added_at: OffsetDateTime,
}

impl NewArticle {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        headline: impl Into<String>,
        content: impl Into<String>,
        author_id: i32,
    ) -> Self {
        Self {
            title: title.into(),
            headline: headline.into(),
            content: content.into(),
            author_id,
            added_at: OffsetDateTime::now_utc(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Article as shown on the blog pages: the timestamp is replaced by its display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArticle {
    pub slug: String,
    pub title: String,
    pub headline: String,
    pub content: String,
    pub author: User,
    pub added_at: String,
}

impl From<Article> for RenderedArticle {
    fn from(a: Article) -> Self {
        Self {
            added_at: format_added_at(a.added_at),
            slug: a.slug,
            title: a.title,
            headline: a.headline,
            content: a.content,
            author: a.author,
        }
    }
}
