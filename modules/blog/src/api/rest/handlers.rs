use std::sync::Arc;

use axum::extract::Path;
use axum::http::Uri;
use axum::{Extension, Json};
use demo_kit::{ApiResult, Problem};

use crate::api::rest::dto::{ArticleDto, RenderedArticleDto, UserDto};
use crate::api::rest::routes::ConcreteService;

pub(crate) async fn home() -> &'static str {
    "hello kt."
}

/// Blog index: every article, newest first, in display form.
#[tracing::instrument(skip_all)]
pub(crate) async fn list_rendered_articles(
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<Vec<RenderedArticleDto>>> {
    let articles = svc.list_rendered_articles().await?;
    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip_all, fields(article.slug = %slug))]
pub(crate) async fn get_rendered_article(
    Extension(svc): Extension<Arc<ConcreteService>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> ApiResult<Json<RenderedArticleDto>> {
    let article = svc
        .get_rendered_article(&slug)
        .await
        .map_err(|e| Problem::from(e).with_instance(uri.path()))?;
    Ok(Json(article.into()))
}

pub(crate) async fn blog_properties(Extension(svc): Extension<Arc<ConcreteService>>) -> String {
    svc.properties().describe()
}

#[tracing::instrument(skip_all)]
pub(crate) async fn list_articles(
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<Vec<ArticleDto>>> {
    let articles = svc.list_articles().await?;
    Ok(Json(articles.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip_all, fields(article.slug = %slug))]
pub(crate) async fn get_article(
    Extension(svc): Extension<Arc<ConcreteService>>,
    Path(slug): Path<String>,
    uri: Uri,
) -> ApiResult<Json<ArticleDto>> {
    let article = svc
        .get_article(&slug)
        .await
        .map_err(|e| Problem::from(e).with_instance(uri.path()))?;
    Ok(Json(article.into()))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn list_users(
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = svc.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip_all, fields(user.login = %login))]
pub(crate) async fn get_user(
    Extension(svc): Extension<Arc<ConcreteService>>,
    Path(login): Path<String>,
    uri: Uri,
) -> ApiResult<Json<UserDto>> {
    let user = svc
        .get_user(&login)
        .await
        .map_err(|e| Problem::from(e).with_instance(uri.path()))?;
    Ok(Json(user.into()))
}
