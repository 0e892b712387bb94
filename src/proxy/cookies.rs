use actix_web::cookie::Cookie;
use actix_web::HttpRequest;

pub const SESSION_COOKIE: &str = "session_id";
pub const CSRF_COOKIE: &str = "csrf_token";

/// The only browser cookies that ever cross into backend requests.
pub const FORWARDED_COOKIES: [&str; 2] = [SESSION_COOKIE, CSRF_COOKIE];

/// Allow-listed cookies read off an inbound request.
///
/// Values are opaque and never inspected. Not `Debug`: the values are credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ForwardedCookies {
    pairs: Vec<(&'static str, String)>,
}

impl ForwardedCookies {
    pub fn from_request(req: &HttpRequest) -> Self {
        let pairs = FORWARDED_COOKIES
            .iter()
            .filter_map(|name| req.cookie(name).map(|c| (*name, c.value().to_owned())))
            .collect();
        Self { pairs }
    }

    /// Builds the set from `(name, value)` pairs, keeping allow-listed names only.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs = pairs
            .into_iter()
            .filter_map(|(name, value)| {
                FORWARDED_COOKIES
                    .iter()
                    .find(|allowed| **allowed == name)
                    .map(|allowed| (*allowed, value.to_owned()))
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.get(SESSION_COOKIE)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.get(CSRF_COOKIE)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders a `Cookie` request header, or `None` when nothing is forwarded.
    pub fn header_value(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let rendered = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        Some(rendered)
    }
}

/// An expired, empty cookie that makes the browser drop `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}

pub fn removal_cookies() -> [Cookie<'static>; 2] {
    [removal_cookie(SESSION_COOKIE), removal_cookie(CSRF_COOKIE)]
}
