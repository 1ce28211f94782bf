//! Cross-origin resource sharing policy for browser clients.
//!
//! Any origin is allowed unless an explicit list is configured. Preflight
//! responses are cacheable for an hour.

use std::fmt;

use actix_cors::Cors;

const ALLOWED_METHODS: [&str; 6] = ["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"];
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// An origin that is not `http(s)://host[:port]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CORS origin {origin:?}: expected scheme://host[:port]")]
pub struct InvalidOrigin {
    /// The rejected entry.
    pub origin: String,
}

/// Origins permitted to call the API from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Every origin; responses carry `Access-Control-Allow-Origin: *`.
    #[default]
    Any,
    /// Only the listed origins, echoed back when they match.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated origin list. A blank value or `*` allows
    /// every origin.
    ///
    /// # Errors
    /// Returns [`InvalidOrigin`] for an entry without an `http` or `https`
    /// scheme, with a path, or with nothing after the scheme.
    ///
    /// # Examples
    /// ```
    /// use user_service::middleware::cors::CorsOrigins;
    ///
    /// let origins = CorsOrigins::parse("https://app.example.com, http://localhost:3000")
    ///     .expect("valid origins");
    /// assert_eq!(
    ///     origins,
    ///     CorsOrigins::List(vec![
    ///         "https://app.example.com".to_owned(),
    ///         "http://localhost:3000".to_owned(),
    ///     ])
    /// );
    /// assert_eq!(CorsOrigins::parse("*"), Ok(CorsOrigins::Any));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidOrigin> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Ok(Self::Any);
        }

        trimmed
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(validate_origin)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }
}

impl fmt::Display for CorsOrigins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::List(origins) => f.write_str(&origins.join(",")),
        }
    }
}

fn validate_origin(entry: &str) -> Result<String, InvalidOrigin> {
    let host = entry
        .strip_prefix("https://")
        .or_else(|| entry.strip_prefix("http://"));
    match host {
        Some(rest) if !rest.is_empty() && !rest.contains(['/', ' ']) => Ok(entry.to_owned()),
        _ => Err(InvalidOrigin {
            origin: entry.to_owned(),
        }),
    }
}

/// Build the CORS middleware: `App::new().wrap(cors(&origins))`.
#[must_use]
pub fn cors(origins: &CorsOrigins) -> Cors {
    let policy = Cors::default()
        .allowed_methods(ALLOWED_METHODS)
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    match origins {
        CorsOrigins::Any => policy.allow_any_origin().send_wildcard(),
        CorsOrigins::List(list) => list
            .iter()
            .fold(policy, |policy, origin| policy.allowed_origin(origin)),
    }
}
