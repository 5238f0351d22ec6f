use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::errors::AppError;

/// Header set by the upstream gateway once it has authenticated the caller.
pub const STUDENT_ID_HEADER: &str = "x-student-id";

/// Extractor for the student a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentIdentity(pub String);

impl StudentIdentity {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for StudentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .headers()
            .get(STUDENT_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| StudentIdentity(id.to_string()))
            .ok_or_else(|| AppError::Unauthorized("Missing student identity".to_string()));

        ready(identity)
    }
}
