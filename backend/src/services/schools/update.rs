use actix_web::{web, HttpResponse};
use common::requests::SchoolRequest;
use common::responses::SchoolResponse;
use log::info;

use super::ApiError;
use crate::aggregation::SchoolService;

/// Actix web handler for `PUT /api/schools/{id}`.
///
/// Replaces name, address and email; the response carries the school's
/// current students. Updating an unknown id is a `404`, never an insert.
pub(crate) async fn process(
    id: web::Path<i64>,
    payload: web::Json<SchoolRequest>,
    service: web::Data<SchoolService>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let school = service
        .update_school(id, payload.into_inner().into())
        .await?
        .ok_or(ApiError::SchoolNotFound(id))?;
    info!("School {} updated", id);
    let aggregate = service.aggregate(school).await?;
    Ok(HttpResponse::Ok().json(SchoolResponse::from(aggregate)))
}
