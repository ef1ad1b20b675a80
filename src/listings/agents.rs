// src/listings/agents.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::listings::days_on_market::{days_on_market, DaysOnMarket};
use crate::listings::models::Listing;

/// Agent attribution pulled out of a listing, with validity flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFields {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Hyphens removed.
    pub phone: Option<String>,
    pub name_valid: bool,
    pub phone_valid: bool,
    pub profile_url: Option<String>,
}

impl AgentFields {
    pub fn extract(listing: &Listing) -> Self {
        let info = listing.attribution_info.as_ref();
        let name = info.and_then(|i| i.agent_name.clone());
        let (phone, phone_valid) =
            normalize_phone(info.and_then(|i| i.agent_phone_number.as_deref()));

        Self {
            name_valid: name.is_some(),
            name,
            email: info.and_then(|i| i.agent_email.clone()),
            phone,
            phone_valid,
            profile_url: listing.listed_by.as_ref().and_then(|l| l.profile_url.clone()),
        }
    }
}

/// Strips hyphens; valid only when what remains is non-empty decimal digits.
pub fn normalize_phone(raw: Option<&str>) -> (Option<String>, bool) {
    match raw {
        None => (None, false),
        Some(raw) => {
            let phone = raw.replace('-', "");
            let valid = !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit());
            (Some(phone), valid)
        }
    }
}

/// `<base>/<numeric city id>/<zpid>`, when both ids are present.
pub fn listing_link(link_base: &str, listing: &Listing) -> Option<String> {
    let city_id = listing.city_id.as_deref()?;
    let zpid = listing.zpid_norm.as_deref()?;
    Some(format!(
        "{}/{}/{}",
        link_base.trim_end_matches('/'),
        id_suffix(city_id),
        zpid
    ))
}

/// "city_12345" -> "12345"
pub fn id_suffix(id: &str) -> &str {
    id.rsplit('_').next().unwrap_or(id)
}

/// A listing with every derived column computed. Kept in snapshot order,
/// which is the tie-break for ranking.
#[derive(Debug, Clone)]
pub struct PreparedListing {
    pub listing: Listing,
    pub days_on_market: DaysOnMarket,
    pub agent: AgentFields,
    pub listing_link: Option<String>,
}

pub fn prepare_listings(
    snapshot: NaiveDate,
    listings: Vec<Listing>,
    link_base: &str,
) -> Vec<PreparedListing> {
    listings
        .into_iter()
        .map(|listing| PreparedListing {
            days_on_market: days_on_market(snapshot, &listing),
            agent: AgentFields::extract(&listing),
            listing_link: listing_link(link_base, &listing),
            listing,
        })
        .collect()
}

/// Listings an agent can be contacted about: named agent with a
/// digits-only phone number. Everything else is gone for this run.
pub fn contactable(prepared: &[PreparedListing]) -> Vec<&PreparedListing> {
    prepared
        .iter()
        .filter(|p| p.agent.name_valid && p.agent.phone_valid)
        .collect()
}

/// One row per agent: their freshest listing plus how many they hold.
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRow {
    pub agent_first_name: String,
    pub agent_name: String,
    pub agent_phone_number: String,
    pub agent_email: Option<String>,
    pub days_on_zillow: Option<i64>,
    pub total_listings: usize,
    #[serde(rename = "streetAddress")]
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub city_id: Option<String>,
    pub zpid_norm: Option<String>,
    pub listing_link: Option<String>,
    pub agent_profile_url: Option<String>,
}

pub const AGENT_COLUMNS: [&str; 13] = [
    "agent_first_name",
    "agent_name",
    "agent_phone_number",
    "agent_email",
    "days_on_zillow",
    "total_listings",
    "streetAddress",
    "city",
    "state",
    "city_id",
    "zpid_norm",
    "listing_link",
    "agent_profile_url",
];

#[derive(Default)]
struct Group {
    total: usize,
    // (days, index into the input slice); first seen wins ties.
    freshest: Option<(i64, usize)>,
}

/// Groups by phone, keeps each agent's freshest listing, and orders agents by
/// listing count (descending, stable on snapshot order).
///
/// Listings without a known day count still count towards `total_listings`
/// but are never chosen as the representative, so an agent whose listings
/// are all undated does not appear.
pub fn rank_agents(listings: &[&PreparedListing]) -> Vec<AgentRow> {
    let mut groups: HashMap<&str, Group> = HashMap::new();

    for (idx, p) in listings.iter().enumerate() {
        let Some(phone) = p.agent.phone.as_deref() else {
            continue;
        };
        let group = groups.entry(phone).or_default();
        group.total += 1;
        if let Some(days) = p.days_on_market.days() {
            match group.freshest {
                Some((best, _)) if best <= days => {}
                _ => group.freshest = Some((days, idx)),
            }
        }
    }

    let mut rows: Vec<AgentRow> = listings
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| {
            let phone = p.agent.phone.as_deref()?;
            let group = groups.get(phone)?;
            match group.freshest {
                Some((_, best_idx)) if best_idx == idx => Some(agent_row(p, group.total)),
                _ => None,
            }
        })
        .collect();

    // sort_by is stable
    rows.sort_by(|a, b| b.total_listings.cmp(&a.total_listings));
    rows
}

fn agent_row(p: &PreparedListing, total_listings: usize) -> AgentRow {
    let agent_name = p.agent.name.clone().unwrap_or_default();
    AgentRow {
        agent_first_name: agent_name.split(' ').next().unwrap_or_default().to_string(),
        agent_phone_number: p.agent.phone.clone().unwrap_or_default(),
        agent_email: p.agent.email.clone(),
        days_on_zillow: p.days_on_market.days(),
        total_listings,
        street_address: p.listing.street_address.clone(),
        city: p.listing.city.clone(),
        state: p.listing.state.clone(),
        city_id: p.listing.city_id.clone(),
        zpid_norm: p.listing.zpid_norm.clone(),
        listing_link: p.listing_link.clone(),
        agent_profile_url: p.agent.profile_url.clone(),
        agent_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::models::AttributionInfo;

    fn snapshot() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 9, 28).unwrap()
    }

    fn listing(zpid: &str, name: Option<&str>, phone: Option<&str>, posted: &str) -> Listing {
        Listing {
            zpid_norm: Some(zpid.to_string()),
            city_id: Some("city_77".to_string()),
            date_posted: Some(posted.to_string()),
            attribution_info: Some(AttributionInfo {
                agent_name: name.map(str::to_string),
                agent_email: None,
                agent_phone_number: phone.map(str::to_string),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn phone_validity() {
        assert_eq!(
            normalize_phone(Some("555-123-4567")),
            (Some("5551234567".to_string()), true)
        );
        assert_eq!(normalize_phone(Some("N/A")), (Some("N/A".to_string()), false));
        assert_eq!(normalize_phone(Some("(555) 123")).1, false);
        assert_eq!(normalize_phone(None), (None, false));
    }

    #[test]
    fn link_uses_numeric_city_suffix() {
        let l = listing("999", Some("A"), Some("1"), "2023-09-01");
        assert_eq!(
            listing_link("https://x.test/properties/", &l).as_deref(),
            Some("https://x.test/properties/77/999")
        );
    }

    #[test]
    fn invalid_phone_rows_are_dropped() {
        let prepared = prepare_listings(
            snapshot(),
            vec![
                listing("1", Some("Ann Lee"), Some("N/A"), "2023-09-01"),
                listing("2", None, Some("555-000-1111"), "2023-09-01"),
                listing("3", Some("Bo Chan"), None, "2023-09-01"),
                listing("4", Some("Cy Dale"), Some("555-000-2222"), "2023-09-01"),
            ],
            "https://x.test",
        );

        let kept: Vec<&str> = contactable(&prepared)
            .iter()
            .filter_map(|p| p.listing.zpid_norm.as_deref())
            .collect();
        assert_eq!(kept, vec!["4"]);
    }

    #[test]
    fn freshest_listing_represents_agent() {
        let prepared = prepare_listings(
            snapshot(),
            vec![
                listing("old", Some("Jane Doe"), Some("555-123-4567"), "2023-09-18"), // 10 days
                listing("new", Some("Jane Doe"), Some("5551234567"), "2023-09-25"),   // 3 days
            ],
            "https://x.test",
        );

        let rows = rank_agents(&contactable(&prepared));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zpid_norm.as_deref(), Some("new"));
        assert_eq!(rows[0].days_on_zillow, Some(3));
        assert_eq!(rows[0].total_listings, 2);
        assert_eq!(rows[0].agent_first_name, "Jane");
        assert_eq!(rows[0].agent_phone_number, "5551234567");
    }

    #[test]
    fn ties_keep_first_seen_and_sort_is_stable() {
        let prepared = prepare_listings(
            snapshot(),
            vec![
                listing("a1", Some("Al"), Some("111"), "2023-09-20"),
                listing("b1", Some("Bea"), Some("222"), "2023-09-20"),
                listing("b2", Some("Bea"), Some("222"), "2023-09-20"),
                listing("c1", Some("Cal"), Some("333"), "2023-09-21"),
                listing("a2", Some("Al"), Some("111"), "2023-09-20"),
            ],
            "https://x.test",
        );

        let rows = rank_agents(&contactable(&prepared));
        let ids: Vec<&str> = rows.iter().filter_map(|r| r.zpid_norm.as_deref()).collect();
        // Al and Bea both hold two; Al's representative comes first in the snapshot.
        assert_eq!(ids, vec!["a1", "b1", "c1"]);

        let again = rank_agents(&contactable(&prepared));
        assert_eq!(rows, again);
    }

    #[test]
    fn undated_listings_count_but_never_represent() {
        let mut undated = listing("u", Some("Dee"), Some("444"), "");
        undated.date_posted = None;
        let prepared = prepare_listings(
            snapshot(),
            vec![
                undated,
                listing("d", Some("Dee"), Some("444"), "2023-09-27"),
                {
                    let mut other = listing("e", Some("Eve"), Some("555"), "");
                    other.date_posted = None;
                    other
                },
            ],
            "https://x.test",
        );

        let rows = rank_agents(&contactable(&prepared));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zpid_norm.as_deref(), Some("d"));
        assert_eq!(rows[0].total_listings, 2);
    }

    #[test]
    fn listings_without_zpid_still_count() {
        let mut no_zpid = listing("x", Some("Fay"), Some("666"), "2023-09-26");
        no_zpid.zpid_norm = None;
        let prepared = prepare_listings(
            snapshot(),
            vec![no_zpid, listing("f", Some("Fay"), Some("666"), "2023-09-20")],
            "https://x.test",
        );

        let rows = rank_agents(&contactable(&prepared));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zpid_norm, None);
        assert_eq!(rows[0].days_on_zillow, Some(2));
        assert_eq!(rows[0].total_listings, 2);
    }
}
