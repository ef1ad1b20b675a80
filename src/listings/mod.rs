pub mod agents;
pub mod days_on_market;
pub mod loader;
pub mod lookup;
pub mod models;

pub use agents::{AgentRow, PreparedListing, AGENT_COLUMNS};
pub use loader::City;

use tracing::info;

use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::storage::ObjectStore;

/// The agent-listing view for one city at the latest snapshot.
pub struct AgentReport {
    pub snapshot: String,
    pub city: City,
    /// Every listing with a phone number, hyphens stripped (agent lookup
    /// searches these).
    pub with_phone: Vec<PreparedListing>,
    pub agents: Vec<AgentRow>,
}

/// Loads the latest snapshot for `location_name` and ranks its agents.
pub fn build_agent_report(
    store: &dyn ObjectStore,
    cfg: &AppConfig,
    cities: &[City],
    location_name: &str,
) -> Result<AgentReport, ServerError> {
    let city = loader::find_city(cities, location_name)
        .cloned()
        .ok_or_else(|| ServerError::BadRequest(format!("unknown city: {location_name}")))?;

    let (snapshot, snapshot_date) =
        loader::latest_snapshot_date(store, &cfg.listings_bucket, &cfg.listings_prefix)?;

    let key = loader::snapshot_key(&snapshot, &city);
    let listings = loader::load_listings(store, &cfg.listings_bucket, &key)?;
    let total = listings.len();

    let with_phone: Vec<PreparedListing> =
        agents::prepare_listings(snapshot_date, listings, &cfg.listing_link_base)
            .into_iter()
            .filter(|p| p.agent.phone.is_some())
            .collect();

    let ranked = agents::rank_agents(&agents::contactable(&with_phone));

    info!(
        city = %city.city,
        state = %city.state,
        snapshot = %snapshot,
        properties = total,
        agents = ranked.len(),
        "agent report built"
    );

    Ok(AgentReport {
        snapshot,
        city,
        with_phone,
        agents: ranked,
    })
}
