//! Refresh token cookie transport
//!
//! The refresh token never appears in a response body; it travels in an
//! `HttpOnly` cookie scoped to the whole site.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use blog_common::AppConfig;

/// Name of the refresh token cookie
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Cookie attributes derived from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    cross_site: bool,
    secure: bool,
    max_age_days: i64,
}

impl CookiePolicy {
    pub fn new(cross_site: bool, production: bool, max_age_days: i64) -> Self {
        Self {
            cross_site,
            // Browsers drop SameSite=None cookies that are not Secure
            secure: cross_site || production,
            max_age_days,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.session.cookie_cross_site,
            config.app.env.is_production(),
            config.session.refresh_token_days,
        )
    }

    fn same_site(&self) -> SameSite {
        if self.cross_site {
            SameSite::None
        } else {
            SameSite::Lax
        }
    }

    /// Cookie carrying a freshly issued refresh token
    pub fn refresh_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((REFRESH_TOKEN_COOKIE, value))
            .http_only(true)
            .path("/")
            .same_site(self.same_site())
            .secure(self.secure)
            .max_age(time::Duration::seconds(self.max_age_days * SECONDS_PER_DAY))
            .build()
    }

    /// Cookie that makes the browser discard the refresh token
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build(REFRESH_TOKEN_COOKIE)
            .http_only(true)
            .path("/")
            .same_site(self.same_site())
            .secure(self.secure)
            .build()
    }
}

/// Read the presented refresh token, if any
pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// Set the refresh token cookie
pub fn set_refresh_token(jar: CookieJar, policy: CookiePolicy, value: String) -> CookieJar {
    jar.add(policy.refresh_cookie(value))
}

/// Clear the refresh token cookie
pub fn clear_refresh_token(jar: CookieJar, policy: CookiePolicy) -> CookieJar {
    jar.remove(policy.removal_cookie())
}
