use actix_web::{web, HttpResponse};
use common::responses::SchoolResponse;

use super::ApiError;
use crate::aggregation::SchoolService;

/// Actix web handler for `GET /api/schools/{id}`.
///
/// Looks the school up, then resolves its students before responding.
///
/// # Returns
/// - `200 OK` with a `SchoolResponse`.
/// - `404 Not Found` with `"School with id {id} not found."`.
pub(crate) async fn process(
    id: web::Path<i64>,
    service: web::Data<SchoolService>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let school = service
        .get_school_by_id(id)
        .await?
        .ok_or(ApiError::SchoolNotFound(id))?;
    let aggregate = service.aggregate(school).await?;
    Ok(HttpResponse::Ok().json(SchoolResponse::from(aggregate)))
}
