use crate::labeling::metrics::LabelMetrics;
use crate::templates::{bar, desktop_layout, metric_tile};
use maud::{html, Markup};

pub fn analytics_page(metrics: &LabelMetrics, annotators: &[String; 3]) -> Markup {
    desktop_layout(
        "Labeling Analytics",
        html! {
            main class="container" {
                h1 { "Labeling Analytics" }

                div {
                    (metric_tile("Records", &metrics.total.to_string()))
                    (metric_tile("Confirmed", &format!("{}%", metrics.confirmed_pct)))
                    @for (name, votes) in annotators.iter().zip(metrics.votes_per_annotator) {
                        (metric_tile(&format!("Labels by {name}"), &votes.to_string()))
                    }
                }

                section class="card" {
                    h3 { "Label status" }
                    @for (category, count) in &metrics.by_category {
                        (bar(category.as_str(), *count, metrics.share(*count)))
                    }
                }

                section class="card" {
                    h3 { "Confirmed labels" }
                    @if metrics.final_labels.is_empty() {
                        p { "No confirmed labels yet." }
                    }
                    @for (label, count) in &metrics.final_labels {
                        (bar(label, *count, metrics.share(*count)))
                    }
                }
            }
        },
    )
}
