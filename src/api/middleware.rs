//! Session extractors.
//!
//! Handlers declare their auth requirement through the argument list:
//! [`AuthUser`] rejects the request with 401 before the handler body runs,
//! [`MaybeUser`] never fails and is used where both cases are meaningful
//! (auth-check, page gates).

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::error::ApiError;
use crate::session::{CurrentUser, Sessions, SESSION_COOKIE};

fn session_user(req: &HttpRequest) -> Option<CurrentUser> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let sessions = req.app_data::<web::Data<Sessions>>()?;
    sessions.get(cookie.value())
}

/// Authenticated identity; extraction fails with 401 when the request
/// carries no valid session cookie.
pub struct AuthUser(pub CurrentUser);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_user(req).map(AuthUser).ok_or(ApiError::Unauthorized))
    }
}

/// Possibly-anonymous identity; extraction never fails.
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequest for MaybeUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(session_user(req))))
    }
}
