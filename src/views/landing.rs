use crate::ui::Page;
use dioxus::prelude::*;

struct Step {
    title: &'static str,
    body: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        title: "1. Upload Document",
        body: "Paste the URL of any terms and conditions page or upload your document",
    },
    Step {
        title: "2. AI Analysis",
        body: "Our AI breaks down complex legal language into plain English summaries",
    },
    Step {
        title: "3. Understand & Decide",
        body: "Get clear explanations of what you're agreeing to and make informed decisions",
    },
];

const FEATURES: &[Step] = &[
    Step {
        title: "Privacy First",
        body: "Your documents are processed securely",
    },
    Step {
        title: "Fast Results",
        body: "Get simplified explanations in seconds, not hours of reading",
    },
    Step {
        title: "AI-Powered",
        body: "Advanced language models",
    },
    Step {
        title: "Multiple Formats",
        body: "Currently supports HTML pages, with PDF and dynamic content coming soon",
    },
    Step {
        title: "User-Friendly",
        body: "No legal background required - designed for everyday users",
    },
    Step {
        title: "Accurate Summaries",
        body: "Highlights key points, risks, and important clauses you should know",
    },
];

const FAQ: &[Step] = &[
    Step {
        title: "What types of documents does Demistify support?",
        body: "Currently, Demistify works with HTML-based terms and conditions pages that are not client-side rendered. We're actively working on adding support for client-side rendered content and PDF documents.",
    },
    Step {
        title: "Is my data secure?",
        body: "Yes. We process your documents securely and store them securely on our servers. Your privacy and data security are our top priorities.",
    },
    Step {
        title: "When will PDF support be available?",
        body: "PDF support is currently in development and will be available in the coming months.",
    },
];

#[component]
pub fn LandingView(page: Signal<Page>) -> Element {
    let mut open_faq = use_signal(|| Option::<usize>::None);

    rsx! {
        div { class: "landing",
            section { class: "hero",
                span { class: "badge", "Currently supports HTML T&C • PDF support coming soon" }
                h1 { "Demystifying Legal Jargon" }
                p { class: "lead",
                    "Transform complex terms and conditions into clear, understandable language. Know exactly what you're agreeing to before you click \"Accept.\""
                }
                CallToAction { page, label: "Try Demistify Free" }
                div { class: "hero-card",
                    div { class: "hero-card-bar", span { class: "text-muted", "demistify.app" } }
                    div { class: "hero-sample complex",
                        span { class: "sample-label", "Complex:" }
                        " \"The licensee hereby grants to the licensor...\""
                    }
                    div { class: "hero-arrow", "↓" }
                    div { class: "hero-sample simple",
                        span { class: "sample-label", "Simple:" }
                        " \"You give us permission to...\""
                    }
                }
            }

            section { id: "how-it-works", class: "section muted",
                h2 { "How Demistify Works" }
                p { class: "lead", "Three simple steps to understand any terms and conditions document" }
                div { class: "grid three",
                    for step in STEPS.iter() {
                        div { class: "step",
                            h3 { "{step.title}" }
                            p { class: "text-muted", "{step.body}" }
                        }
                    }
                }
            }

            section { id: "features", class: "section",
                h2 { "Why Choose Demistify?" }
                p { class: "lead", "Powerful features designed to make legal documents accessible to everyone" }
                div { class: "grid three",
                    for feature in FEATURES.iter() {
                        div { class: "card",
                            h3 { "{feature.title}" }
                            p { class: "text-muted", "{feature.body}" }
                        }
                    }
                }
            }

            section { id: "faq", class: "section narrow",
                h2 { "Frequently Asked Questions" }
                for (index, item) in FAQ.iter().enumerate() {
                    div { class: "faq-item",
                        button {
                            class: "faq-question",
                            r#type: "button",
                            onclick: move |_| {
                                let next = if open_faq() == Some(index) { None } else { Some(index) };
                                open_faq.set(next);
                            },
                            "{item.title}"
                        }
                        if open_faq() == Some(index) {
                            p { class: "faq-answer", "{item.body}" }
                        }
                    }
                }
            }

            section { class: "section accent",
                h2 { "Ready to Understand Your Agreements?" }
                p { class: "lead", "Join thousands of users who are making informed decisions with Demistify" }
                CallToAction { page, label: "Start for Free" }
            }
        }
    }
}

#[component]
fn CallToAction(page: Signal<Page>, label: &'static str) -> Element {
    let mut page = page;
    rsx! {
        button {
            class: "btn btn-primary btn-lg",
            r#type: "button",
            onclick: move |_| page.set(Page::Chat),
            "{label} →"
        }
    }
}
