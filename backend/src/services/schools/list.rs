//! # School Listing
//!
//! `GET /api/schools[?name=fragment]` never collects the listing in memory.
//! The aggregation stream yields one school at a time, already paired with
//! all of its students, and each one is encoded into its own body chunk. A
//! client that disconnects drops the body stream, which drops the storage
//! queries behind it.
//!
//! The first school is awaited before the response starts, so a storage
//! failure up front still answers `500`. A failure after that can only cut
//! the body short.
//!
//! Two framings are offered, chosen by the most preferred `Accept` entry:
//! - `application/json` (default): `[`, the elements separated by `,`, `]`.
//! - `application/x-ndjson`: one JSON document per line.

use actix_web::http::header::{Accept, ContentType};
use actix_web::web::{self, Bytes};
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use common::requests::SchoolQuery;
use common::responses::SchoolResponse;
use futures_util::{future, stream, Stream, StreamExt};

use super::ApiError;
use crate::aggregation::SchoolService;

const NDJSON: &str = "application/x-ndjson";

/// Actix web handler for `GET /api/schools`.
pub(crate) async fn process(
    req: HttpRequest,
    query: web::Query<SchoolQuery>,
    service: web::Data<SchoolService>,
) -> Result<HttpResponse, ApiError> {
    let mut schools = service.list_schools(query.name_filter()).map(|item| {
        item.map(SchoolResponse::from).map_err(ApiError::from)
    });
    let first = match schools.next().await {
        Some(Err(err)) => return Err(err),
        first => first,
    };
    let schools = stream::iter(first).chain(schools);

    if prefers_ndjson(&req) {
        Ok(HttpResponse::Ok()
            .content_type(NDJSON)
            .streaming(ndjson_lines(schools)))
    } else {
        Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .streaming(json_array(schools)))
    }
}

/// `q=0` entries never win, and an absent or unparsable header means JSON.
fn prefers_ndjson(req: &HttpRequest) -> bool {
    req.get_header::<Accept>()
        .is_some_and(|accept| accept.preference().essence_str() == NDJSON)
}

/// Frames the schools as a single JSON array, one element per chunk.
fn json_array<S>(schools: S) -> impl Stream<Item = Result<Bytes, ApiError>>
where
    S: Stream<Item = Result<SchoolResponse, ApiError>>,
{
    let mut first = true;
    let elements = schools.map(move |school| -> Result<Bytes, ApiError> {
        let school = school?;
        let mut chunk = if first { Vec::new() } else { vec![b','] };
        first = false;
        serde_json::to_writer(&mut chunk, &school)?;
        Ok(Bytes::from(chunk))
    });

    stream::once(future::ready(Ok(Bytes::from_static(b"["))))
        .chain(elements)
        .chain(stream::once(future::ready(Ok(Bytes::from_static(b"]")))))
}

/// Frames the schools as newline-delimited JSON.
fn ndjson_lines<S>(schools: S) -> impl Stream<Item = Result<Bytes, ApiError>>
where
    S: Stream<Item = Result<SchoolResponse, ApiError>>,
{
    schools.map(|school| -> Result<Bytes, ApiError> {
        let mut line = serde_json::to_vec(&school?)?;
        line.push(b'\n');
        Ok(Bytes::from(line))
    })
}
