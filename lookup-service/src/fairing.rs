use rocket::{
    fairing::{self, Fairing, Info, Kind},
    Build, Rocket,
};
use shared::pricing::{contact_link, TIERS};

use crate::{
    config::LookupConfig,
    lookup::{HttpSource, Lookup},
};

/// Reads the `lookup` configuration and sets up the upstream client.
pub struct LookupFairing;

impl LookupFairing {
    pub fn fairing() -> Self {
        Self {}
    }
}

#[rocket::async_trait]
impl Fairing for LookupFairing {
    fn info(&self) -> Info {
        Info {
            name: "Lookup",
            kind: Kind::Ignite | Kind::Singleton,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        let config = match LookupConfig::from_figment(rocket.figment()) {
            Ok(config) => config,
            Err(e) => {
                error!("Invalid lookup configuration: {e}");
                return Err(rocket);
            }
        };

        if let Err(e) = contact_link(&config.contact_url, &TIERS[0]) {
            error!("Contact URL '{}' is not usable: {e}", config.contact_url);
            return Err(rocket);
        }

        let source = match HttpSource::new(&config) {
            Ok(source) => source,
            Err(e) => {
                error!("Failed to set up the upstream client: {e}");
                return Err(rocket);
            }
        };

        info!(
            "Looking up vehicles at {} with a {}s timeout.",
            config.upstream_url, config.timeout_secs
        );

        Ok(rocket.manage(Lookup::new(source)).manage(config))
    }
}
