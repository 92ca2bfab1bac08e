//! Build-time configuration.
//!
//! Everything here is resolved once at start-up from `option_env!`, so a
//! deployment picks its backend with e.g.
//! `XBANK_API_BASE_URL=https://bank.example/api trunk build`.

use tracing::Level;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Which generation of the banking API the paths should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStyle {
    Modern,
    Legacy,
}

/// Path table of the banking API, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub register: &'static str,
    pub login: &'static str,
    pub profile: &'static str,
    pub profile_by_email: &'static str,
    pub create_account: &'static str,
    pub account: &'static str,
    pub user_accounts: &'static str,
    pub transfer: &'static str,
    pub payment: &'static str,
    pub deposit: &'static str,
    pub recent_transactions: &'static str,
}

impl Endpoints {
    pub const fn modern() -> Self {
        Self {
            register: "/user/create",
            login: "/user/login",
            profile: "/user/get-profile",
            profile_by_email: "/user/get-profile/email",
            create_account: "/bank-account/create",
            account: "/bank-account/get",
            user_accounts: "/user/get-accounts",
            transfer: "/transactions/transfer",
            payment: "/transactions/payment",
            deposit: "/transactions/deposit",
            recent_transactions: "/transactions/get-recent",
        }
    }

    /// The older deployment only differs in where credentials are posted.
    pub const fn legacy() -> Self {
        Self {
            login: "/login",
            ..Self::modern()
        }
    }

    pub const fn for_style(style: EndpointStyle) -> Self {
        match style {
            EndpointStyle::Modern => Self::modern(),
            EndpointStyle::Legacy => Self::legacy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub endpoints: Endpoints,
    /// Fabricate a local user when the backend cannot be reached at all.
    pub demo_fallback: bool,
    pub log_level: Level,
    pub history_page_size: u32,
    pub preview_page_size: u32,
    pub notice_ttl_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            endpoints: Endpoints::modern(),
            demo_fallback: false,
            log_level: Level::INFO,
            history_page_size: 10,
            preview_page_size: 5,
            notice_ttl_ms: 5_000,
        }
    }
}

impl Config {
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("XBANK_API_BASE_URL"),
            option_env!("XBANK_ENDPOINTS"),
            option_env!("XBANK_DEMO_MODE"),
            option_env!("XBANK_LOG"),
        )
    }

    fn from_vars(
        base_url: Option<&str>,
        endpoints: Option<&str>,
        demo_mode: Option<&str>,
        log: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let api_base_url = base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map_or(defaults.api_base_url, str::to_string);

        let style = match endpoints.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("legacy") => EndpointStyle::Legacy,
            _ => EndpointStyle::Modern,
        };

        let demo_fallback = matches!(
            demo_mode.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
            Some("1" | "true" | "yes" | "on")
        );

        let log_level = log
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            api_base_url,
            endpoints: Endpoints::for_style(style),
            demo_fallback,
            log_level,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_vars(None, None, None, None);
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoints.login, "/user/login");
        assert!(!config.demo_fallback);
    }

    #[test]
    fn legacy_endpoints_only_move_login() {
        let legacy = Endpoints::legacy();
        let modern = Endpoints::modern();
        assert_eq!(legacy.login, "/login");
        assert_eq!(legacy.register, modern.register);
        assert_eq!(legacy.recent_transactions, modern.recent_transactions);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::from_vars(Some("https://bank.example/api/"), None, None, None);
        assert_eq!(config.api_base_url, "https://bank.example/api");
    }

    #[test_case(Some("1") => true)]
    #[test_case(Some("TRUE") => true)]
    #[test_case(Some("0") => false)]
    #[test_case(Some("") => false)]
    #[test_case(None => false)]
    fn demo_mode_switch(value: Option<&str>) -> bool {
        Config::from_vars(None, None, value, None).demo_fallback
    }

    #[test_case(Some("debug") => Level::DEBUG)]
    #[test_case(Some("nonsense") => Level::INFO)]
    fn log_level(value: Option<&str>) -> Level {
        Config::from_vars(None, None, None, value).log_level
    }
}
