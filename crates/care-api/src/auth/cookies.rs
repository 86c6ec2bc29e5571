//! Session cookies

use axum_extra::extract::cookie::Cookie;
use care_common::Role;

/// Cookie carrying a freshly issued session token for `role`
///
/// `HttpOnly`, `Path=/`, and `Max-Age` equal to the token lifetime.
pub fn session_cookie(role: Role, token: String, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build((role.cookie_name(), token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(ttl_seconds))
        .build()
}

/// Removal cookie that makes the client drop its session for `role`
///
/// Empty value, `Max-Age=0` and an expiry in the past, on the same path the
/// session cookie was set with.
pub fn cleared_session_cookie(role: Role) -> Cookie<'static> {
    let mut cookie = Cookie::build((role.cookie_name(), ""))
        .path("/")
        .http_only(true)
        .build();
    cookie.make_removal();
    cookie
}
