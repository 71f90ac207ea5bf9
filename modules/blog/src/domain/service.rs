use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use super::error::DomainError;
use super::model::{Article, NewArticle, NewUser, RenderedArticle, User};
use super::repo::{ArticleRepository, UserRepository};
use crate::config::Banner;

/// Title and banner reported by `/blogProperties`.
#[derive(Debug, Clone)]
pub struct BlogProperties {
    pub title: String,
    pub banner: Banner,
}

impl BlogProperties {
    /// `"<title>, Banner(title=<t>, content=<c>)"`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}, {}", self.title, self.banner)
    }
}

pub struct Service<U: UserRepository, A: ArticleRepository> {
    db: DatabaseConnection,
    users: Arc<U>,
    articles: Arc<A>,
    properties: BlogProperties,
}

impl<U: UserRepository, A: ArticleRepository> Service<U, A> {
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        users: Arc<U>,
        articles: Arc<A>,
        properties: BlogProperties,
    ) -> Self {
        Self {
            db,
            users,
            articles,
            properties,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &BlogProperties {
        &self.properties
    }

    /// # Errors
    /// Returns [`DomainError::Validation`] for a blank login and
    /// [`DomainError::AlreadyExists`] when the login is taken.
    pub async fn add_user(&self, user: NewUser) -> Result<User, DomainError> {
        if user.login.trim().is_empty() {
            return Err(DomainError::validation("login", "must not be empty"));
        }
        if self
            .users
            .find_by_login(&self.db, &user.login)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists("user", user.login));
        }
        let saved = self.users.save(&self.db, user).await?;
        debug!(user.id = saved.id, user.login = %saved.login, "User saved");
        Ok(saved)
    }

    /// # Errors
    /// Returns [`DomainError::UnknownAuthor`], [`DomainError::AlreadyExists`] for a
    /// title whose slug is taken, or a validation error for a blank title.
    pub async fn add_article(&self, article: NewArticle) -> Result<Article, DomainError> {
        if article.title.trim().is_empty() {
            return Err(DomainError::validation("title", "must not be empty"));
        }
        if self
            .users
            .find_by_id(&self.db, article.author_id)
            .await?
            .is_none()
        {
            return Err(DomainError::UnknownAuthor {
                id: article.author_id,
            });
        }

        let slug = article.slug();
        if self
            .articles
            .find_by_slug(&self.db, &slug)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists("article", slug));
        }

        let saved = self.articles.save(&self.db, article, slug).await?;
        debug!(article.id = saved.id, article.slug = %saved.slug, "Article saved");
        Ok(saved)
    }

    /// # Errors
    /// Returns [`DomainError::Database`] on storage failure.
    pub async fn list_articles(&self) -> Result<Vec<Article>, DomainError> {
        self.articles.find_all_by_order_by_added_at_desc(&self.db).await
    }

    /// Articles newest first, in display form. Each one is logged.
    ///
    /// # Errors
    /// Returns [`DomainError::Database`] on storage failure.
    pub async fn list_rendered_articles(&self) -> Result<Vec<RenderedArticle>, DomainError> {
        let rendered: Vec<RenderedArticle> = self
            .list_articles()
            .await?
            .into_iter()
            .map(RenderedArticle::from)
            .collect();
        for article in &rendered {
            info!(
                article.slug = %article.slug,
                article.added_at = %article.added_at,
                author = %article.author.login,
                "-> {}",
                article.title
            );
        }
        Ok(rendered)
    }

    /// # Errors
    /// Returns [`DomainError::ArticleNotFound`] for an unknown slug.
    pub async fn get_article(&self, slug: &str) -> Result<Article, DomainError> {
        self.articles
            .find_by_slug(&self.db, slug)
            .await?
            .ok_or_else(|| DomainError::ArticleNotFound {
                slug: slug.to_owned(),
            })
    }

    /// # Errors
    /// Returns [`DomainError::ArticleNotFound`] for an unknown slug.
    pub async fn get_rendered_article(&self, slug: &str) -> Result<RenderedArticle, DomainError> {
        let rendered = RenderedArticle::from(self.get_article(slug).await?);
        info!(article.slug = %rendered.slug, "-> {}", rendered.title);
        Ok(rendered)
    }

    /// # Errors
    /// Returns [`DomainError::Database`] on storage failure.
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.users.find_all(&self.db).await
    }

    /// # Errors
    /// Returns [`DomainError::UserNotFound`] for an unknown login.
    pub async fn get_user(&self, login: &str) -> Result<User, DomainError> {
        self.users
            .find_by_login(&self.db, login)
            .await?
            .ok_or_else(|| DomainError::UserNotFound {
                login: login.to_owned(),
            })
    }

    /// Insert the demo author and two articles.
    ///
    /// Runs once; a second call fails because the login and slugs are taken.
    ///
    /// # Errors
    /// Returns the first error from [`Self::add_user`] or [`Self::add_article`].
    pub async fn seed(&self) -> Result<(), DomainError> {
        let smaldini = self
            .add_user(NewUser::new("smaldini", "St\u{e9}phane", "Maldini"))
            .await?;
        for title in ["Reactor Bismuth is out", "Reactor Aluminium has landed"] {
            self.add_article(NewArticle::new(
                title,
                "Lorem ipsum",
                "dolor sit amet",
                smaldini.id,
            ))
            .await?;
        }
        info!(author = %smaldini.login, "Blog demo data seeded");
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
