use crate::labeling::annotator::{annotate, KeywordCategory};
use crate::labeling::priority::Prioritized;
use crate::labeling::{SessionContext, LABEL_OPTIONS};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn label_login_page(annotators: &[String; 3]) -> Markup {
    desktop_layout(
        "Labeling · Sign in",
        html! {
            main class="container narrow" {
                h1 { "Who is labeling?" }
                form action="/label/login" method="post" {
                    @for name in annotators {
                        label style="display: block; margin: 6px 0;" {
                            input type="radio" name="annotator" value=(name) required;
                            " " (name)
                        }
                    }
                    button type="submit" style="margin-top: 10px; padding: 8px 16px;" { "Log in" }
                }
            }
        },
    )
}

pub struct LabelVm<'a> {
    pub session: &'a SessionContext,
    pub next: Option<Prioritized<'a>>,
    pub remaining: usize,
}

pub fn label_page(vm: &LabelVm<'_>) -> Markup {
    desktop_layout(
        "Labeling",
        html! {
            main class="container" {
                div style="display: flex; justify-content: space-between; align-items: center;" {
                    p {
                        "Labeling as " strong { (vm.session.annotator.name) }
                        " · " (vm.session.labeled_ids.len()) " labeled this session"
                        " · " (vm.remaining) " left"
                    }
                    form action="/label/logout" method="post" style="margin: 0;" {
                        button type="submit" { "Log out" }
                    }
                }

                @match &vm.next {
                    None => {
                        section class="card" {
                            h3 { "All caught up" }
                            p { "There is nothing left for you to label." }
                            a href="/label/analytics" { "See analytics" }
                        }
                    }
                    Some(next) => {
                        section class="card" {
                            h3 { "Property " (next.record.property_id) }
                            p style="color: #6b7280; font-size: 0.9em;" {
                                "Priority " (next.priority)
                                " · " (next.record.consensus.category.as_str())
                                " · " (next.record.consensus.num_user_labels) " vote(s)"
                                @if next.record.fixer_upper_flag { " · flagged fixer-upper" }
                            }
                            p style="line-height: 1.7;" { (highlighted(&next.record.description)) }

                            form action="/label" method="post" {
                                input type="hidden" name="property_id" value=(next.record.property_id);
                                @for option in LABEL_OPTIONS {
                                    label style="margin-right: 16px;" {
                                        input type="radio" name="label" value=(option) required;
                                        " " (option)
                                    }
                                }
                                button type="submit" style="margin-left: 10px; padding: 6px 14px;" { "Submit" }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn keyword_color(category: KeywordCategory) -> &'static str {
    match category {
        KeywordCategory::Distressed => "#fee2e2",
        KeywordCategory::Maintained => "#dbeafe",
        KeywordCategory::Updated => "#dcfce7",
    }
}

fn highlighted(description: &str) -> Markup {
    html! {
        @for token in annotate(description) {
            @match token.category {
                Some(category) => {
                    span title=(category.as_str()) style=(format!("background: {}; border-radius: 3px; padding: 0 2px;", keyword_color(category))) { (token.text) }
                }
                None => { (token.text) }
            }
            " "
        }
    }
}
