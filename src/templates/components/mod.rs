use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// A single headline number.
pub fn metric_tile(label: &str, value: &str) -> Markup {
    html! {
        div class="metric" style="display: inline-block; min-width: 180px; padding: 12px 16px; margin: 0 12px 12px 0; border: 1px solid #e5e7eb; border-radius: 6px;" {
            div style="font-size: 0.85em; color: #6b7280;" { (label) }
            div style="font-size: 1.6em; font-weight: 600;" { (value) }
        }
    }
}

/// Horizontal bar; `pct` is clamped to 0..=100.
pub fn bar(label: &str, count: usize, pct: f64) -> Markup {
    let width = pct.clamp(0.0, 100.0);
    html! {
        div class="bar-row" style="display: flex; align-items: center; gap: 8px; margin: 4px 0;" {
            span style="width: 160px;" { (label) }
            div style="flex: 1; background: #f3f4f6; border-radius: 4px;" {
                div style=(format!("width: {width:.1}%; background: #524ed2; height: 14px; border-radius: 4px;")) {}
            }
            span style="width: 110px; text-align: right;" { (count) " (" (format!("{pct:.1}")) "%)" }
        }
    }
}

pub fn optional<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
