use crate::api::{ApiError, ChatBackend, backend_from_config};
use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::transcript::Transcript;
use crate::views::{ChatView, DiffView, LandingView};
use dioxus::prelude::*;
use std::sync::Arc;

const DEMISTIFY_CSS: Asset = asset!("/assets/demistify.css");

/// Top-level navigation. The diff page carries the diff text it shows.
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    Landing,
    Chat,
    Diff(String),
}

/// Backend and session store shared with the views through context.
#[derive(Clone)]
pub struct Services {
    backend: Result<Arc<dyn ChatBackend>, String>,
    pub session: SessionStore,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Self {
        let backend = backend_from_config(config).map_err(|err| {
            tracing::error!(error = %err, "failed to initialise chat backend");
            err.to_string()
        });
        Self {
            backend,
            session: SessionStore::default(),
        }
    }

    pub fn new(backend: Arc<dyn ChatBackend>, session: SessionStore) -> Self {
        Self {
            backend: Ok(backend),
            session,
        }
    }

    pub fn backend(&self) -> Result<Arc<dyn ChatBackend>, ApiError> {
        self.backend
            .clone()
            .map_err(ApiError::Unavailable)
    }

    /// Accept `text` into `transcript` and run the backend call. Returns
    /// false when the transcript refused the input.
    ///
    /// The request task belongs to the root scope: the transcript outlives
    /// the chat view, so the turn must complete even if the view unmounts.
    pub fn start_send(&self, transcript: Signal<Transcript>, text: &str) -> bool {
        let mut transcript = transcript;
        let Some(turn) = transcript.with_mut(|t| t.begin_send(text)) else {
            return false;
        };
        let session_id = self.session.get_or_create();
        let backend = self.backend();
        let session = self.session.clone();

        spawn_forever(async move {
            let outcome = match backend {
                Ok(backend) => backend.send(&turn.text, &session_id).await,
                Err(err) => Err(err),
            };
            if let Ok(reply) = &outcome
                && let Some(issued) = reply.session_id.as_deref()
            {
                session.adopt(issued);
            }
            transcript.with_mut(|t| {
                t.complete(&turn, outcome);
            });
        });
        true
    }
}

#[component]
pub fn App() -> Element {
    use_context_provider(|| Services::from_config(&AppConfig::from_env()));
    let page = use_signal(|| Page::Landing);
    // Lives at the app root so returning from the diff page keeps the chat.
    let transcript = use_signal(Transcript::with_greeting);

    rsx! {
        document::Link { rel: "stylesheet", href: DEMISTIFY_CSS }
        document::Title { "Demistify - Understand Terms & Conditions" }
        AppHeader { page }
        match page() {
            Page::Landing => rsx! { LandingView { page } },
            Page::Chat => rsx! { ChatView { page, transcript } },
            Page::Diff(diff) => rsx! { DiffView { page, diff } },
        }
    }
}

#[component]
fn AppHeader(page: Signal<Page>) -> Element {
    let mut page = page;
    let on_landing = matches!(page(), Page::Landing);
    rsx! {
        div { class: "header",
            div { class: "header-content",
                button {
                    class: "logo",
                    r#type: "button",
                    onclick: move |_| page.set(Page::Landing),
                    span { class: "logo-mark", "§" }
                    span { class: "logo-text", "Demistify" }
                }
                if on_landing {
                    nav { class: "header-nav",
                        a { href: "#features", "Features" }
                        a { href: "#how-it-works", "How It Works" }
                        a { href: "#faq", "FAQ" }
                    }
                } else {
                    nav { class: "header-nav",
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| page.set(Page::Landing),
                            "← Back to Home"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, ChatReply};
    use crate::storage::LocalStorage;
    use async_trait::async_trait;
    use dioxus::dioxus_core::NoOpMutations;
    use std::sync::Mutex;
    use std::time::Duration;

    /// (is_busy, transcript length) seen by the root on each render.
    static ROOT_RENDERS: Mutex<Vec<(bool, usize)>> = Mutex::new(Vec::new());
    /// (accepted, session id present) right after `start_send` returned.
    static SEND_STARTED: Mutex<Option<(bool, bool)>> = Mutex::new(None);

    struct SlowBackend;

    #[async_trait]
    impl ChatBackend for SlowBackend {
        async fn send(&self, text: &str, _session_id: &str) -> ApiResult<ChatReply> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(ChatReply {
                response: Some(format!("In plain words: {text}")),
                ..ChatReply::default()
            })
        }
    }

    #[component]
    fn Root() -> Element {
        use_context_provider(|| {
            let dir = std::env::temp_dir().join(format!("demistify-ui-{}", uuid::Uuid::new_v4()));
            Services::new(Arc::new(SlowBackend), SessionStore::new(LocalStorage::at(dir)))
        });
        let transcript = use_signal(Transcript::new);
        let mut show_chat = use_signal(|| true);

        // Leave the chat page while the request is still pending.
        use_hook(move || {
            spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                show_chat.set(false);
            })
        });

        let (busy, len) = transcript.with(|t| (t.is_busy(), t.len()));
        ROOT_RENDERS.lock().unwrap().push((busy, len));

        rsx! {
            if show_chat() {
                Sender { transcript }
            }
        }
    }

    #[component]
    fn Sender(transcript: Signal<Transcript>) -> Element {
        let services = use_context::<Services>();
        use_hook(move || {
            let accepted = services.start_send(transcript, "What does clause 4 mean?");
            let has_session = services.session.current().is_some();
            *SEND_STARTED.lock().unwrap() = Some((accepted, has_session));
        });
        rsx! { div { "chat" } }
    }

    #[tokio::test]
    async fn test_reply_lands_after_chat_view_unmounts() {
        let mut dom = VirtualDom::new(Root);
        dom.rebuild_in_place();

        let _ = tokio::time::timeout(Duration::from_millis(400), async {
            loop {
                dom.wait_for_work().await;
                dom.render_immediate(&mut NoOpMutations);
            }
        })
        .await;

        // The session id is written before the request task is spawned.
        assert_eq!(*SEND_STARTED.lock().unwrap(), Some((true, true)));

        let renders = ROOT_RENDERS.lock().unwrap();
        assert!(renders.iter().any(|&(busy, _)| busy), "send never went busy");
        assert_eq!(renders.last(), Some(&(false, 2)));
    }
}
