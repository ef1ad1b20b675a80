use serde::{Deserialize, Deserializer};
use serde_json::Value;

// listing
//  ├── zpid_norm, city_id, streetAddress, city, state, postal_code
//  ├── price, bedrooms, bathrooms, derived_prop_type, fixer_upper_flag
//  ├── datePosted
//  ├── priceHistory[]
//  │    ├── event
//  │    └── date
//  ├── resoFacts
//  │    └── daysOnZillow
//  ├── timeOnZillow
//  ├── attributionInfo
//  │    ├── agentName
//  │    ├── agentEmail
//  │    └── agentPhoneNumber
//  └── listed_by
//       └── profile_url

/// One property record from a data-preparation snapshot.
/// Every field is optional: upstream rows are sparse and loosely typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Listing {
    #[serde(deserialize_with = "lenient_string")]
    pub zpid_norm: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub city_id: Option<String>,
    #[serde(rename = "streetAddress", deserialize_with = "lenient_string")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub postal_code: Option<String>,

    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub bedrooms: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub bathrooms: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub derived_prop_type: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub fixer_upper_flag: Option<bool>,

    #[serde(rename = "datePosted", deserialize_with = "lenient_string")]
    pub date_posted: Option<String>,
    #[serde(rename = "priceHistory", deserialize_with = "lenient_vec")]
    pub price_history: Vec<PriceEvent>,
    #[serde(rename = "resoFacts", deserialize_with = "lenient_struct")]
    pub reso_facts: Option<ResoFacts>,
    #[serde(rename = "timeOnZillow", deserialize_with = "lenient_string")]
    pub time_on_zillow: Option<String>,

    #[serde(rename = "attributionInfo", deserialize_with = "lenient_struct")]
    pub attribution_info: Option<AttributionInfo>,
    #[serde(deserialize_with = "lenient_struct")]
    pub listed_by: Option<ListedBy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriceEvent {
    #[serde(deserialize_with = "lenient_string")]
    pub event: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResoFacts {
    #[serde(rename = "daysOnZillow", deserialize_with = "lenient_f64")]
    pub days_on_zillow: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttributionInfo {
    #[serde(rename = "agentName", deserialize_with = "lenient_string")]
    pub agent_name: Option<String>,
    #[serde(rename = "agentEmail", deserialize_with = "lenient_string")]
    pub agent_email: Option<String>,
    #[serde(rename = "agentPhoneNumber", deserialize_with = "lenient_string")]
    pub agent_phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListedBy {
    #[serde(deserialize_with = "lenient_string")]
    pub profile_url: Option<String>,
}

// A wrongly-typed field reads as absent instead of failing the whole snapshot.

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_struct<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

fn lenient_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}
