//! Wire constants for the Addons.io API.

/// Library name, used in the User-Agent header.
pub const LIBRARY_NAME: &str = "addons-api";

/// Library version.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API root.
pub const BASE_URL: &str = "https://api.addons.io/";

/// API version pinned by this client.
pub const API_VERSION: &str = "2022-12-01";

/// Header carrying the pinned API version.
pub const API_VERSION_HEADER: &str = "X-Addons-Api-Version";

/// Content type sent and accepted on every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Pagination is on by default (currently has no effect on requests).
pub const DEFAULT_AUTO_PAGINATE: bool = true;

/// Environment variables read by [`crate::config::ClientConfig::from_env`].
pub mod env {
    pub const TOKEN: &str = "ADDONS_API_TOKEN";
    pub const BASE_URL: &str = "ADDONS_API_BASE_URL";
    pub const TIMEOUT_SECS: &str = "ADDONS_API_TIMEOUT_SECS";
}

/// User-Agent value, e.g. `addons-api/0.1.0`.
pub fn user_agent() -> String {
    format!("{LIBRARY_NAME}/{LIBRARY_VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("addons-api/"));
        assert!(ua.ends_with(LIBRARY_VERSION));
    }

    #[test]
    fn test_base_url_has_trailing_slash() {
        assert!(BASE_URL.ends_with('/'));
    }
}
