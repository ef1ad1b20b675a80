// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Listing Dashboards" }

                (card("Agents with Active Listings", html! {
                    p { "Pick a city to see which agents hold the most active listings, with each agent's freshest listing." }
                    a href="/agents" { "Open agent search" }
                }))

                (card("Property Labeling", html! {
                    p { "Label property descriptions and track agreement between annotators." }
                    a href="/label" { "Start labeling" }
                    " · "
                    a href="/label/analytics" { "Analytics" }
                }))
            }
        },
    )
}
