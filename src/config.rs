use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LOGO: &str = "https://haxtheweb.org/files/hax%20(1).png";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        bind_addr: get_env_or_default("SITEVIEW_BIND_ADDR", "127.0.0.1:3000"),
        request_timeout: Duration::from_secs(parse_env_or_default(
            "SITEVIEW_REQUEST_TIMEOUT_SECS",
            10,
        )),
        user_agent: get_env_or_default(
            "SITEVIEW_USER_AGENT",
            concat!("siteview/", env!("CARGO_PKG_VERSION")),
        ),
        ui: UiConfig {
            default_logo: get_env_or_default("SITEVIEW_DEFAULT_LOGO", DEFAULT_LOGO),
            header: get_env_or_default("SITEVIEW_HEADER", "Site explorer"),
            button_label: get_env_or_default("SITEVIEW_BUTTON_LABEL", "Analyze"),
        },
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub ui: UiConfig,
}

/// Labels and fallbacks used by the view layer.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub default_logo: String,
    pub header: String,
    pub button_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_logo: DEFAULT_LOGO.to_string(),
            header: "Site explorer".to_string(),
            button_label: "Analyze".to_string(),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or_default(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        log::warn!("ignoring invalid value {raw:?} for {key}, using {default}");
        default
    })
}

#[test]
fn test_parse_or_default() {
    assert_eq!(parse_or_default("X", "30", 10u64), 30);
    assert_eq!(parse_or_default("X", " 5 ", 10u64), 5);
    assert_eq!(parse_or_default("X", "soon", 10u64), 10);
    assert_eq!(parse_or_default("X", "-1", 10u64), 10);
}
