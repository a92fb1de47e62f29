use actix_web::http::header;
use actix_web::{web, HttpResponse};
use common::requests::SchoolRequest;
use common::responses::SchoolResponse;
use log::info;

use super::{ApiError, API_PATH};
use crate::aggregation::SchoolService;

/// Actix web handler for `POST /api/schools`.
///
/// A freshly created school has no students, so none are fetched.
///
/// # Returns
/// - `201 Created` with the stored `SchoolResponse` and a `Location` header.
/// - `500 Internal Server Error` with `"Unexpected error during school
///   creation."` when storage could not persist the school.
pub(crate) async fn process(
    payload: web::Json<SchoolRequest>,
    service: web::Data<SchoolService>,
) -> Result<HttpResponse, ApiError> {
    let school = service.create_school(payload.into_inner().into()).await?;
    info!("School {} created", school.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{}/{}", API_PATH, school.id)))
        .json(SchoolResponse::from(school)))
}
