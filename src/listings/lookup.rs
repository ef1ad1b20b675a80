// src/listings/lookup.rs

use crate::listings::agents::PreparedListing;

/// Everything one agent currently has on the market.
#[derive(Debug)]
pub struct AgentLookup<'a> {
    pub phone: String,
    pub listings: Vec<&'a PreparedListing>,
    pub active_listings: usize,
    pub avg_days_on_market: Option<i64>,
    pub avg_price: Option<i64>,
    /// Percentage, two decimals.
    pub fixer_upper_pct: f64,
}

/// Finds listings by agent phone. Matches against the hyphen-stripped phone of
/// every listing that has one, valid or not. `None` when nothing matches.
pub fn lookup_agent<'a>(prepared: &'a [PreparedListing], phone: &str) -> Option<AgentLookup<'a>> {
    let phone = phone.trim().replace('-', "");
    if phone.is_empty() {
        return None;
    }

    let listings: Vec<&PreparedListing> = prepared
        .iter()
        .filter(|p| p.agent.phone.as_deref() == Some(phone.as_str()))
        .collect();
    if listings.is_empty() {
        return None;
    }

    let n = listings.len();
    let fixer_uppers = listings
        .iter()
        .filter(|p| p.listing.fixer_upper_flag == Some(true))
        .count();

    Some(AgentLookup {
        avg_days_on_market: truncated_mean(
            listings.iter().filter_map(|p| p.days_on_market.days().map(|d| d as f64)),
        ),
        avg_price: truncated_mean(listings.iter().filter_map(|p| p.listing.price)),
        fixer_upper_pct: round2(fixer_uppers as f64 / n as f64 * 100.0),
        active_listings: n,
        listings,
        phone,
    })
}

// Mean of the known values, truncated toward zero.
fn truncated_mean(values: impl Iterator<Item = f64>) -> Option<i64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| (sum / count as f64).trunc() as i64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
