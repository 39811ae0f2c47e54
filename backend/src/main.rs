//! Backend entry-point: configuration, adapter selection, and server
//! bootstrap.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::ports::RecordStore;
use backend::inbound::http::health::HealthState;
use backend::outbound::identity::gotrue::GoTrueIdentityProvider;
use backend::outbound::identity::MemoryIdentityProvider;
use backend::outbound::store::MemoryRecordStore;
use backend::server::{build_http_state, create_server, AppSettings, ServerConfig};

#[cfg(feature = "example-data")]
use backend::domain::Records;
#[cfg(feature = "example-data")]
use backend::example_data::{seed_example_data_on_startup, ExampleDataSettings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let bind_addr: SocketAddr = format!("{}:{}", settings.host(), settings.port())
        .parse()
        .map_err(std::io::Error::other)?;

    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
    let clock = Arc::new(DefaultClock);

    let http_state = match settings.identity_api() {
        Some((url, api_key)) => {
            info!(identity_url = url, "using hosted identity provider");
            let provider =
                GoTrueIdentityProvider::new(url, api_key, settings.identity_timeout())
                    .map_err(std::io::Error::other)?;
            build_http_state(Arc::new(provider), store.clone(), clock)
        }
        None => {
            warn!("no identity provider configured; using in-memory accounts");
            build_http_state(Arc::new(MemoryIdentityProvider::new()), store.clone(), clock)
        }
    };

    #[cfg(feature = "example-data")]
    {
        let seed_settings = ExampleDataSettings::load().map_err(std::io::Error::other)?;
        seed_example_data_on_startup(
            &seed_settings,
            &http_state.identity,
            &Records::new(store.clone()),
        )
        .await
        .map_err(std::io::Error::other)?;
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, http_state, ServerConfig::new(bind_addr))?.await
}
