use crate::transcript::Transcript;
use crate::types::Role;
use crate::ui::{Page, Services};
use crate::views::shared::{Markdown, format_message_timestamp};
use dioxus::events::Key;
use dioxus::prelude::*;

fn avatar_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "AI",
    }
}

#[component]
pub fn ChatView(page: Signal<Page>, transcript: Signal<Transcript>) -> Element {
    let services = use_context::<Services>();
    let mut input = use_signal(String::new);

    let send_message = use_callback(move |text: String| {
        if services.start_send(transcript, &text) {
            input.set(String::new());
        }
    });

    let view_diff = move |_| {
        let mut page = page;
        let diff = transcript.with(|t| t.latest_diff().map(str::to_string));
        if let Some(diff) = diff {
            tracing::debug!(lines = diff.lines().count(), "opening diff viewer");
            page.set(Page::Diff(diff));
        }
    };

    let snapshot = transcript();
    let busy = snapshot.is_busy();
    let has_diff = snapshot.has_latest_diff();

    rsx! {
        div { class: "main-container",
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for msg in snapshot.messages().iter() {
                        div { key: "{msg.id}", class: "message-row {msg.role.as_class()}",
                            div { class: "avatar {msg.role.as_class()}", "{avatar_label(msg.role)}" }
                            div { class: "message-stack",
                                div { class: "bubble {msg.role.as_class()}",
                                    if matches!(msg.role, Role::Assistant) {
                                        Markdown { content: msg.content.clone() }
                                    } else {
                                        p { class: "user-text", "{msg.content}" }
                                    }
                                }
                                if let Some(ts) = format_message_timestamp(msg.id) {
                                    div { class: "message-meta",
                                        span { class: "message-timestamp", "{ts}" }
                                    }
                                }
                            }
                        }
                    }
                    if busy {
                        div { class: "message-row assistant",
                            div { class: "avatar assistant", "AI" }
                            div { class: "message-stack",
                                div { class: "bubble assistant",
                                    div { class: "shimmer-line",
                                        span { class: "shimmer-text", "Analyzing..." }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    textarea {
                        rows: "3",
                        placeholder: "Ask me about terms and conditions, privacy policies, or legal documents...",
                        value: "{input}",
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                send_message.call(input());
                            }
                        },
                        disabled: busy,
                        autofocus: true,
                    }
                    div { class: "composer-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: busy || input().trim().is_empty(),
                            onclick: move |_| send_message.call(input()),
                            "Send"
                        }
                        if has_diff {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                title: "View document changes",
                                onclick: view_diff,
                                "View changes"
                            }
                        }
                    }
                }
                p { class: "composer-hint", "Press Enter to send, Shift+Enter for new line" }
            }
        }
    }
}
