// src/listings/days_on_market.rs

use chrono::NaiveDate;

use crate::errors::ServerError;
use crate::listings::models::Listing;

const SNAPSHOT_FORMAT: &str = "%Y%m%d";
const POSTED_FORMAT: &str = "%Y-%m-%d";
const LISTED_FOR_SALE: &str = "Listed for sale";

/// How long a listing has been on the market, tagged with the rung of the
/// fallback chain that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysOnMarket {
    /// Snapshot date minus a posted/listed date.
    Posted { posted: NaiveDate, days: i64 },
    /// Provider-supplied `resoFacts.daysOnZillow`.
    Provider(i64),
    /// Parsed from the free-text `timeOnZillow` field.
    TimeOnMarket(i64),
    Unknown,
}

impl DaysOnMarket {
    pub fn days(&self) -> Option<i64> {
        match *self {
            DaysOnMarket::Posted { days, .. } => Some(days),
            DaysOnMarket::Provider(days) | DaysOnMarket::TimeOnMarket(days) => Some(days),
            DaysOnMarket::Unknown => None,
        }
    }
}

/// Parses a snapshot date such as `20230928`.
pub fn parse_snapshot_date(raw: &str) -> Result<NaiveDate, ServerError> {
    NaiveDate::parse_from_str(raw.trim(), SNAPSHOT_FORMAT)
        .map_err(|e| ServerError::Parse(format!("invalid snapshot date '{raw}': {e}")))
}

/// The date the listing went up for sale, as the raw upstream string:
/// `datePosted` when set, otherwise the first "Listed for sale" price event.
pub fn latest_listing_date(listing: &Listing) -> Option<&str> {
    if let Some(posted) = listing.date_posted.as_deref() {
        return Some(posted);
    }

    listing
        .price_history
        .iter()
        .find(|e| e.event.as_deref() == Some(LISTED_FOR_SALE))
        .and_then(|e| e.date.as_deref())
        .filter(|d| !d.is_empty())
}

/// Derives days on market. Never fails: every missing or malformed input
/// moves on to the next source, ending at `Unknown`.
pub fn days_on_market(snapshot: NaiveDate, listing: &Listing) -> DaysOnMarket {
    if let Some(posted) = latest_listing_date(listing).and_then(parse_posted_date) {
        return DaysOnMarket::Posted {
            posted,
            days: (snapshot - posted).num_days(),
        };
    }

    if let Some(days) = listing
        .reso_facts
        .as_ref()
        .and_then(|f| f.days_on_zillow)
    {
        return DaysOnMarket::Provider(days.trunc() as i64);
    }

    listing
        .time_on_zillow
        .as_deref()
        .and_then(parse_time_on_market)
        .map(DaysOnMarket::TimeOnMarket)
        .unwrap_or(DaysOnMarket::Unknown)
}

fn parse_posted_date(raw: &str) -> Option<NaiveDate> {
    // Anything shorter than 5 chars is a placeholder, not a date.
    if raw.chars().count() < 5 {
        return None;
    }
    NaiveDate::parse_from_str(raw.trim(), POSTED_FORMAT).ok()
}

/// "5 hours" -> 0, "3 days" -> 3. Anything else is unknown.
fn parse_time_on_market(text: &str) -> Option<i64> {
    if text.contains("hours") {
        return Some(0);
    }
    if text.contains("days") {
        return text.split(' ').next()?.parse().ok();
    }
    None
}
