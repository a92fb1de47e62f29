use actix_web::{web, HttpResponse};
use log::info;

use super::ApiError;
use crate::aggregation::SchoolService;

/// Actix web handler for `DELETE /api/schools/{id}`.
///
/// Answers `204 No Content` whether or not the school existed. Its students
/// are removed with it.
pub(crate) async fn process(
    id: web::Path<i64>,
    service: web::Data<SchoolService>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    service.delete_school_by_id(id).await?;
    info!("School {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
