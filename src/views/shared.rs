use crate::clipboard::Notification;
use crate::markdown::markdown_to_html;
use crate::types::MessageId;
use dioxus::prelude::*;
use std::time::Duration;
use time::{UtcOffset, format_description::FormatItem, macros::format_description};

const TOAST_HIDE_DELAY: Duration = Duration::from_secs(3);

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

pub fn format_message_timestamp(id: MessageId) -> Option<String> {
    let mut datetime = id.created_at()?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[component]
pub fn Markdown(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    rsx! {
        div { class: "md", dangerous_inner_html: "{content_html}" }
    }
}

/// Shows the current notification, clearing it after a few seconds.
#[component]
pub fn Toast(notification: Signal<Option<Notification>>) -> Element {
    use_effect(move || {
        if notification().is_some() {
            let mut control = notification;
            spawn(async move {
                tokio::time::sleep(TOAST_HIDE_DELAY).await;
                control.set(None);
            });
        }
    });

    rsx! {
        if let Some(note) = notification() {
            div { class: "{note.class()}", role: "status",
                div { class: "toast-title", "{note.title}" }
                div { class: "toast-description", "{note.description}" }
            }
        }
    }
}
