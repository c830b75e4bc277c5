use axum_extra::extract::cookie::{Cookie, SameSite};
use lemon_config::CookieConfig;
use time::Duration;

fn base(config: &CookieConfig, value: String) -> Cookie<'static> {
    let mut builder = Cookie::build((config.name.clone(), value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax);
    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// Session cookie carrying `token`, living as long as the token itself.
pub fn session_cookie(config: &CookieConfig, token: String, max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = base(config, token);
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie
}

/// Cookie that tells the browser to drop the session.
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base(config, String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = CookieConfig {
            name: "lemon-token".to_string(),
            domain: Some("indiedev.io".to_string()),
            secure: true,
        };
        let cookie = session_cookie(&config, "abc".to_string(), 604_800);

        assert_eq!(cookie.name(), "lemon-token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.domain(), Some("indiedev.io"));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(&CookieConfig::default());
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.domain(), None);
    }
}
