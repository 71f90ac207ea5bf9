use std::sync::Arc;

use axum::extract::Path;
use axum::{Extension, Json};
use demo_kit::ApiResult;

use crate::api::rest::dto::CustomerDto;
use crate::api::rest::routes::ConcreteService;

#[tracing::instrument(skip_all)]
pub(crate) async fn list_customers(
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<Vec<CustomerDto>>> {
    let customers = svc.list_customers().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip_all, fields(customer.last_name = %last_name))]
pub(crate) async fn find_by_last_name(
    Extension(svc): Extension<Arc<ConcreteService>>,
    Path(last_name): Path<String>,
) -> ApiResult<Json<Vec<CustomerDto>>> {
    let customers = svc.find_by_last_name(&last_name).await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}
