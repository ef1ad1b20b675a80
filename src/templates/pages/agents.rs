use crate::listings::lookup::AgentLookup;
use crate::listings::{AgentReport, AGENT_COLUMNS};
use crate::templates::{desktop_layout, metric_tile, optional};
use maud::{html, Markup};

const TH: &str = "padding: 8px; text-align: left; border-bottom: 2px solid #e5e7eb; white-space: nowrap;";
const TD: &str = "padding: 6px 8px; border-bottom: 1px solid #f3f4f6;";

fn query_value(v: &str) -> String {
    url::form_urlencoded::byte_serialize(v.as_bytes()).collect()
}

fn tabs(location: Option<&str>) -> Markup {
    html! {
        @if let Some(location) = location {
            nav class="tabs" style="margin: 1rem 0;" {
                a href=(format!("/agents/search?city={}", query_value(location))) { "City Search" }
                " | "
                a href=(format!("/agents/lookup?city={}", query_value(location))) { "Agent" }
            }
        }
    }
}

fn city_form(locations: &[String], current: Option<&str>) -> Markup {
    html! {
        form action="/agents/search" method="get" style="display: flex; gap: 10px; align-items: center;" {
            label for="city" { "Select a city" }
            select name="city" id="city" required style="padding: 8px;" {
                option value="" disabled selected[current.is_none()] { "Select a city..." }
                @for loc in locations {
                    option value=(loc) selected[current == Some(loc.as_str())] { (loc) }
                }
            }
            button type="submit" style="padding: 8px 16px;" { "Run" }
        }
    }
}

pub fn city_search_page(
    locations: &[String],
    selected: Option<&str>,
    report: Option<&AgentReport>,
) -> Markup {
    desktop_layout(
        "Agents with Active Listings",
        html! {
            main class="container" {
                h1 { "Agents with Active Listings" }
                (city_form(locations, selected))
                (tabs(selected))

                @if let Some(report) = report {
                    (agent_table(report))
                }
            }
        },
    )
}

fn agent_table(report: &AgentReport) -> Markup {
    let city = query_value(&report.city.location_name());
    html! {
        section class="card" {
            div style="display: flex; justify-content: space-between; align-items: center;" {
                p {
                    strong { (report.agents.len()) } " agents in "
                    (report.city.city) ", " (report.city.state)
                    " (snapshot " (report.snapshot) ")"
                }
                div {
                    a href=(format!("/agents/export.csv?city={city}")) { "Download CSV" }
                    " · "
                    a href=(format!("/agents/export.xlsx?city={city}")) { "Download XLSX" }
                }
            }
            div style="overflow-x: auto;" {
                table style="width: 100%; border-collapse: collapse; font-size: 0.9em;" {
                    thead {
                        tr {
                            @for col in AGENT_COLUMNS {
                                th style=(TH) { (col) }
                            }
                        }
                    }
                    tbody {
                        @for row in &report.agents {
                            tr {
                                td style=(TD) { (row.agent_first_name) }
                                td style=(TD) { (row.agent_name) }
                                td style=(TD) { (row.agent_phone_number) }
                                td style=(TD) { (optional(&row.agent_email)) }
                                td style=(TD) { (optional(&row.days_on_zillow)) }
                                td style=(TD) { (row.total_listings) }
                                td style=(TD) { (optional(&row.street_address)) }
                                td style=(TD) { (optional(&row.city)) }
                                td style=(TD) { (optional(&row.state)) }
                                td style=(TD) { (optional(&row.city_id)) }
                                td style=(TD) { (optional(&row.zpid_norm)) }
                                td style=(TD) {
                                    @if let Some(link) = &row.listing_link {
                                        a href=(link) target="_blank" { "listing" }
                                    }
                                }
                                td style=(TD) {
                                    @if let Some(url) = &row.agent_profile_url {
                                        a href=(url) target="_blank" { "profile" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn agent_lookup_page(location: &str, phone: &str, lookup: Option<&AgentLookup<'_>>) -> Markup {
    desktop_layout(
        "Agent Lookup",
        html! {
            main class="container" {
                h1 { "Agent Lookup" }
                (tabs(Some(location)))

                p { "Search agent phone number 📱 to get all listings" }
                form action="/agents/lookup" method="get" style="display: flex; gap: 10px; align-items: center;" {
                    input type="hidden" name="city" value=(location);
                    input type="text" name="phone" value=(phone) placeholder="Agent phone number" style="padding: 8px;";
                    button type="submit" style="padding: 8px 16px;" { "Search" }
                }

                @match lookup {
                    Some(found) => (lookup_results(found)),
                    None => {
                        @if !phone.trim().is_empty() {
                            p { "No active listings for " strong { (phone) } "." }
                        }
                    }
                }
            }
        },
    )
}

fn lookup_results(found: &AgentLookup<'_>) -> Markup {
    html! {
        section class="card" {
            h3 { "Listings for " (found.phone) }
            div {
                (metric_tile("Number of Active Listings", &found.active_listings.to_string()))
                (metric_tile("Avg Days on Market", &optional(&found.avg_days_on_market)))
                (metric_tile("Avg Price", &optional(&found.avg_price)))
                (metric_tile("Ratio Fixer Uppers", &format!("{}%", found.fixer_upper_pct)))
            }
            table style="width: 100%; border-collapse: collapse; font-size: 0.9em;" {
                thead {
                    tr {
                        @for col in ["streetAddress", "postal_code", "price", "bedrooms", "bathrooms", "derived_prop_type", "days_on_zillow", "listing_link"] {
                            th style=(TH) { (col) }
                        }
                    }
                }
                tbody {
                    @for p in &found.listings {
                        tr {
                            td style=(TD) { (optional(&p.listing.street_address)) }
                            td style=(TD) { (optional(&p.listing.postal_code)) }
                            td style=(TD) { (optional(&p.listing.price)) }
                            td style=(TD) { (optional(&p.listing.bedrooms)) }
                            td style=(TD) { (optional(&p.listing.bathrooms)) }
                            td style=(TD) { (optional(&p.listing.derived_prop_type)) }
                            td style=(TD) { (optional(&p.days_on_market.days())) }
                            td style=(TD) {
                                @if let Some(link) = &p.listing_link {
                                    a href=(link) target="_blank" { (link) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
