use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use rocket::figment::{providers::Serialized, Figment};
use serde::{Deserialize, Serialize};
use shared::pricing::DEFAULT_CONTACT_URL;

/// Key under which the service settings live in `Rocket.toml` / `ROCKET_LOOKUP`.
pub const CONFIG_KEY: &str = "lookup";

/// Placeholder in [`LookupConfig::upstream_url`] replaced by the registration number.
pub const RC_PLACEHOLDER: &str = "{rc}";

/// Characters escaped so the registration number stays a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub upstream_url: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
    pub timeout_secs: u64,
    /// Credited in every response.
    pub developer: String,
    /// Instance the client page sends lookups to. Empty means the serving instance.
    pub client_base_url: String,
    pub contact_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            upstream_url: "https://vahanx.in/rc-search/{rc}".to_string(),
            user_agent: "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Mobile Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            referer: "https://vahanx.in/rc-search".to_string(),
            timeout_secs: 10,
            developer: "@AKASHHACKER".to_string(),
            client_base_url: String::new(),
            contact_url: DEFAULT_CONTACT_URL.to_string(),
        }
    }
}

impl LookupConfig {
    /// Reads the `lookup` table, falling back to defaults for anything not set.
    pub fn from_figment(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        figment
            .clone()
            .join(Serialized::default(CONFIG_KEY, LookupConfig::default()))
            .extract_inner(CONFIG_KEY)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn upstream_url_for(&self, registration: &str) -> String {
        let segment = utf8_percent_encode(registration, PATH_SEGMENT).to_string();
        self.upstream_url.replace(RC_PLACEHOLDER, &segment)
    }

    /// Base URL the client page calls, without a trailing slash.
    pub fn client_base_url(&self) -> &str {
        self.client_base_url.trim_end_matches('/')
    }
}
