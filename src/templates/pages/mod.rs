pub mod agents;
pub mod analytics;
pub mod error;
pub mod home;
pub mod label;

pub use agents::{agent_lookup_page, city_search_page};
pub use analytics::analytics_page;
pub use error::error_page;
pub use home::home_page;
pub use label::{label_login_page, label_page, LabelVm};
