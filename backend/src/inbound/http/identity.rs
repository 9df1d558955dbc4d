//! Caller identity forwarded by the authentication gateway.
//!
//! The gateway verifies the session and passes the provider's account id and
//! profile fields as request headers. Handlers that act on behalf of a user
//! take an [`AuthenticatedIdentity`]; extraction fails with 401 when the id
//! header is missing or blank.

use actix_web::dev::Payload;
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, ExternalIdentity};

/// Provider account id of the signed-in caller.
pub const AUTH_USER_ID_HEADER: &str = "x-auth-user-id";
/// Caller's display handle.
pub const AUTH_USERNAME_HEADER: &str = "x-auth-username";
/// Caller's given name.
pub const AUTH_FIRST_NAME_HEADER: &str = "x-auth-first-name";
/// Caller's family name.
pub const AUTH_LAST_NAME_HEADER: &str = "x-auth-last-name";
/// Caller's primary email address.
pub const AUTH_EMAIL_HEADER: &str = "x-auth-email";

const SIGN_IN_REQUIRED: &str = "sign in required";

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Read the forwarded identity, if any.
pub(crate) fn identity_from_headers(headers: &HeaderMap) -> Result<ExternalIdentity, Error> {
    let external_id =
        header_text(headers, AUTH_USER_ID_HEADER).ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED))?;
    let identity = ExternalIdentity::new(&external_id).map_err(|err| {
        debug!(error = %err, "rejected forwarded identity");
        Error::unauthorized(SIGN_IN_REQUIRED)
    })?;
    Ok(identity
        .with_username(header_text(headers, AUTH_USERNAME_HEADER))
        .with_names(
            header_text(headers, AUTH_FIRST_NAME_HEADER),
            header_text(headers, AUTH_LAST_NAME_HEADER),
        )
        .with_email(header_text(headers, AUTH_EMAIL_HEADER)))
}

/// Extractor yielding the caller's [`ExternalIdentity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity(ExternalIdentity);

impl AuthenticatedIdentity {
    /// Unwrap the identity for handing to a domain service.
    pub fn into_inner(self) -> ExternalIdentity {
        self.0
    }
}

impl AsRef<ExternalIdentity> for AuthenticatedIdentity {
    fn as_ref(&self) -> &ExternalIdentity {
        &self.0
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(identity_from_headers(req.headers()).map(Self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut req = TestRequest::default();
        for pair in pairs {
            req = req.insert_header(*pair);
        }
        req.to_http_request().headers().clone()
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(AUTH_USER_ID_HEADER, "   ")])]
    #[case(&[(AUTH_USERNAME_HEADER, "ana")])]
    fn missing_or_blank_id_is_unauthorised(#[case] pairs: &[(&'static str, &'static str)]) {
        let err = identity_from_headers(&headers(pairs)).expect_err("no identity");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "sign in required");
    }

    #[test]
    fn profile_headers_flow_into_the_identity() {
        let identity = identity_from_headers(&headers(&[
            (AUTH_USER_ID_HEADER, "user_2abc"),
            (AUTH_USERNAME_HEADER, "ana.p"),
            (AUTH_FIRST_NAME_HEADER, "Ana"),
            (AUTH_LAST_NAME_HEADER, "Popescu"),
            (AUTH_EMAIL_HEADER, ""),
        ]))
        .expect("identity present");

        let profile = identity.profile();
        assert_eq!(identity.external_id().as_str(), "user_2abc");
        assert_eq!(profile.username.as_str(), "ana.p");
        assert_eq!(profile.display_name, "Ana Popescu");
        assert_eq!(profile.email, "");
    }

    #[actix_web::test]
    async fn extractor_rejects_anonymous_requests() {
        let (req, mut payload) = TestRequest::default().to_http_parts();
        let err = AuthenticatedIdentity::from_request(&req, &mut payload)
            .await
            .expect_err("anonymous");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
