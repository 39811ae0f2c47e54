//! Bearer-token extraction, keeping handlers free of header parsing.
//!
//! Sessions are token based: every non-public endpoint expects an
//! `Authorization: Bearer <token>` header whose value only the identity
//! provider can interpret.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::{AccessToken, Error};

use super::error::ApiError;

/// Extractor yielding the caller's bearer token.
#[derive(Debug, Clone)]
pub struct BearerAuth(AccessToken);

impl BearerAuth {
    /// Borrow the extracted token.
    pub fn token(&self) -> &AccessToken {
        &self.0
    }
}

fn parse_bearer(req: &HttpRequest) -> Result<BearerAuth, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing authorization header"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::unauthorized("authorization scheme must be Bearer"));
    }
    AccessToken::new(token.trim())
        .map(BearerAuth)
        .map_err(|_| Error::unauthorized("malformed bearer token"))
}

impl FromRequest for BearerAuth {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_bearer(req).map_err(ApiError::from))
    }
}
