//! Movie handlers
//!
//! List, create and delete operations over the shared movie store.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, StatusCode};

use super::error::{ApiError, ApiResult};
use crate::http;
use crate::store::{self, MovieStore};

/// Collection path, list only
pub const INDEX_PATH: &str = "/movies";
/// Prefix for create and delete
pub const CHANGE_PREFIX: &str = "/movies/";

pub const INDEX_ALLOW: &str = "GET";
pub const CHANGE_ALLOW: &str = "POST, DELETE";

/// `/movies`: return every record in insertion order
pub async fn index(method: &Method, store: &MovieStore) -> ApiResult {
    if *method != Method::GET {
        return Err(ApiError::MethodNotAllowed { allow: INDEX_ALLOW });
    }

    let movies = store.list().await;
    Ok(http::build_json_response(StatusCode::OK, &movies))
}

/// `/movies/*`: dispatch on method to create or delete
///
/// `path` is the already percent-decoded request path.
pub async fn change<B>(
    req: Request<B>,
    path: &str,
    store: &MovieStore,
    max_body_size: u64,
) -> ApiResult
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    match method {
        Method::POST => create(req, store, max_body_size).await,
        Method::DELETE => delete(path, store).await,
        _ => Err(ApiError::MethodNotAllowed {
            allow: CHANGE_ALLOW,
        }),
    }
}

async fn create<B>(req: Request<B>, store: &MovieStore, max_body_size: u64) -> ApiResult
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body = read_body(req.into_body(), max_body_size).await?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty body"));
    }

    let movie = store::decode_first(&body).map_err(|_| ApiError::BadRequest("invalid JSON"))?;
    let created = store.create(movie).await;
    Ok(http::build_json_response(StatusCode::CREATED, &created))
}

async fn delete(path: &str, store: &MovieStore) -> ApiResult {
    let id = parse_id(path)?;
    match store.delete(id).await {
        Some(_) => Ok(http::build_204_response()),
        None => Err(ApiError::NotFound),
    }
}

/// Parse the id from everything after `/movies/` as a base-10 integer.
///
/// A leading `+` or `-` is accepted; anything else non-numeric is rejected.
pub fn parse_id(path: &str) -> Result<i64, ApiError> {
    let segment = path.strip_prefix(CHANGE_PREFIX).unwrap_or(path);
    segment
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest("invalid ID"))
}

/// Collect the request body, rejecting it once it exceeds `limit` bytes
async fn read_body<B>(body: B, limit: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ApiError::PayloadTooLarge)
        }
        Err(e) => {
            crate::logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(ApiError::BadRequest("invalid JSON"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("/movies/1"), Ok(1));
        assert_eq!(parse_id("/movies/42"), Ok(42));
        assert_eq!(parse_id("/movies/+7"), Ok(7));
        assert_eq!(parse_id("/movies/-3"), Ok(-3));
        assert_eq!(parse_id("/movies/007"), Ok(7));
    }

    #[test]
    fn test_parse_id_rejects_non_integers() {
        let invalid = ApiError::BadRequest("invalid ID");
        assert_eq!(parse_id("/movies/abc"), Err(invalid.clone()));
        assert_eq!(parse_id("/movies/"), Err(invalid.clone()));
        assert_eq!(parse_id("/movies/1.5"), Err(invalid.clone()));
        assert_eq!(parse_id("/movies/1/extra"), Err(invalid.clone()));
        assert_eq!(parse_id("/movies/ 1"), Err(invalid.clone()));
        assert_eq!(parse_id("/movies/99999999999999999999"), Err(invalid));
    }
}
