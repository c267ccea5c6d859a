use crate::clipboard::{Notification, SystemClipboard, copy_diff};
use crate::diff::{DiffStats, parse_diff};
use crate::ui::Page;
use crate::views::shared::Toast;
use dioxus::prelude::*;

#[component]
pub fn DiffView(page: Signal<Page>, diff: String) -> Element {
    let notification = use_signal(|| Option::<Notification>::None);
    let lines = parse_diff(&diff);
    let stats = DiffStats::from_lines(&lines);

    let copy_payload = diff.clone();
    let on_copy = move |_| {
        let mut notification = notification;
        let note = copy_diff(&mut SystemClipboard, &copy_payload);
        notification.set(Some(note));
    };

    rsx! {
        div { class: "main-container",
            div { class: "diff-panel",
                div { class: "diff-header",
                    div { class: "diff-title",
                        h2 { "Git Diff" }
                        span { class: "diff-stats", "{stats.summary()}" }
                    }
                    div { class: "actions",
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| {
                                let mut page = page;
                                page.set(Page::Chat);
                            },
                            "Back to chat"
                        }
                        button { class: "btn btn-ghost", r#type: "button", onclick: on_copy, "Copy" }
                    }
                }
                p { class: "text-muted", "Review the changes between the old and new versions" }
                div { class: "diff-body",
                    for (index, line) in lines.iter().enumerate() {
                        div { key: "{index}", class: line.kind.as_class(),
                            if let Some(marker) = line.kind.marker() {
                                span { class: "diff-marker", "{marker}" }
                            }
                            "{line.text}"
                        }
                    }
                }
            }
            Toast { notification }
        }
    }
}
