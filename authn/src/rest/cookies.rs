// Filmoteka
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Utilities to deal with the session cookie.

use crate::driver::AuthnOptions;
use crate::model::AccessToken;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE: &str = "session";

/// Extracts the session token from the cookies in `jar`, if any.
///
/// A session cookie whose value is not a well-formed token is treated as absent because there is
/// no way it can refer to a valid session.
pub(crate) fn get_session_cookie(jar: &CookieJar) -> Option<AccessToken> {
    jar.get(SESSION_COOKIE).and_then(|cookie| AccessToken::new(cookie.value()).ok())
}

/// Builds the cookie that hands `token` to the client.
pub(crate) fn session_cookie(token: &AccessToken, opts: &AuthnOptions) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.as_str().to_owned()))
        .path("/")
        .max_age(opts.cookie_max_age())
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(opts.cookie_secure)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::{HeaderMap, HeaderValue};
    use std::time::Duration;

    fn jar_with_cookies(values: &[&str]) -> CookieJar {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_get_session_cookie_missing() {
        assert_eq!(None, get_session_cookie(&CookieJar::new()));
        assert_eq!(None, get_session_cookie(&jar_with_cookies(&["theme=dark"])));
    }

    #[test]
    fn test_get_session_cookie_found() {
        let token = AccessToken::generate();
        let value = format!("theme=dark; session={}; lang=en", token.as_str());
        assert_eq!(Some(token), get_session_cookie(&jar_with_cookies(&[value.as_str()])));
    }

    #[test]
    fn test_get_session_cookie_split_across_headers() {
        let token = AccessToken::generate();
        let value = format!("session={}", token.as_str());
        let jar = jar_with_cookies(&["theme=dark", value.as_str(), "lang=en"]);
        assert_eq!(Some(token), get_session_cookie(&jar));
    }

    #[test]
    fn test_get_session_cookie_malformed_token() {
        assert_eq!(None, get_session_cookie(&jar_with_cookies(&["session=short"])));
    }

    #[test]
    fn test_session_cookie_secure() {
        let token = AccessToken::generate();
        let opts = AuthnOptions { session_max_age: Duration::from_secs(3600), cookie_secure: true };
        let cookie = session_cookie(&token, &opts);
        assert_eq!(SESSION_COOKIE, cookie.name());
        assert_eq!(token.as_str(), cookie.value());
        assert_eq!(Some("/"), cookie.path());
        assert_eq!(Some(time::Duration::hours(1)), cookie.max_age());
        assert_eq!(Some(true), cookie.http_only());
        assert_eq!(Some(SameSite::Lax), cookie.same_site());
        assert_eq!(Some(true), cookie.secure());
    }

    #[test]
    fn test_session_cookie_insecure() {
        let token = AccessToken::generate();
        let opts = AuthnOptions { session_max_age: Duration::from_secs(60), cookie_secure: false };
        let cookie = session_cookie(&token, &opts);
        assert_eq!(Some(time::Duration::minutes(1)), cookie.max_age());
        assert_eq!(Some(false), cookie.secure());
        assert!(!cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_session_cookie_huge_max_age() {
        let token = AccessToken::generate();
        let opts =
            AuthnOptions { session_max_age: Duration::from_secs(u64::MAX), cookie_secure: true };
        let cookie = session_cookie(&token, &opts);
        assert_eq!(Some(time::Duration::MAX), cookie.max_age());
    }
}
