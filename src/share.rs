use dioxus::prelude::*;

use crate::clock::sleep_ms;
use crate::dom::{copy_text, current_href, open_popup};

pub const COPY_FLASH_MS: u32 = 2000;
pub const POPUP_FEATURES: &str = "width=600,height=400";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    LinkedIn,
}

impl SharePlatform {
    pub fn label(self) -> &'static str {
        match self {
            SharePlatform::Twitter => "Twitter",
            SharePlatform::LinkedIn => "LinkedIn",
        }
    }

    pub fn share_url(self, page_url: &str, blurb: &str) -> String {
        let url = urlencoding::encode(page_url);
        match self {
            SharePlatform::Twitter => format!(
                "https://twitter.com/intent/tweet?url={url}&text={}",
                urlencoding::encode(blurb)
            ),
            SharePlatform::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={url}")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CopySource {
    Text(String),
    PageUrl,
}

impl CopySource {
    fn resolve(&self) -> Option<String> {
        match self {
            CopySource::Text(text) => Some(text.clone()),
            CopySource::PageUrl => current_href(),
        }
    }
}

#[component]
pub fn CopyButton(
    source: CopySource,
    label: String,
    class: Option<String>,
    id: Option<String>,
    failure_alert: Option<String>,
) -> Element {
    let mut copied = use_signal(|| false);
    let class = class.unwrap_or_else(|| "copy-btn".to_string());
    let class = if copied() {
        format!("{class} copied")
    } else {
        class
    };

    rsx! {
        button {
            r#type: "button",
            id,
            class: "{class}",
            onclick: move |_| {
                let Some(text) = source.resolve() else {
                    return;
                };
                let failure_alert = failure_alert.clone();
                spawn(async move {
                    match copy_text(&text).await {
                        Ok(()) => {
                            copied.set(true);
                            sleep_ms(COPY_FLASH_MS).await;
                            copied.set(false);
                        }
                        Err(err) => {
                            tracing::warn!("copy: {err}");
                            if let Some(message) = failure_alert {
                                crate::dom::alert(&message);
                            }
                        }
                    }
                });
            },
            if copied() {
                "✓ Copied!"
            } else {
                "{label}"
            }
        }
    }
}

#[component]
pub fn ShareButtons() -> Element {
    let config = crate::config::use_site_config();
    rsx! {
        div { class: "share-buttons",
            span { class: "share-label", "Share:" }
            for platform in [SharePlatform::Twitter, SharePlatform::LinkedIn] {
                button {
                    key: "{platform.label()}",
                    r#type: "button",
                    class: "share-btn",
                    "data-platform": platform.label().to_lowercase(),
                    onclick: {
                        let blurb = config.share_blurb.clone();
                        move |_| {
                            let Some(page) = current_href() else {
                                return;
                            };
                            open_popup(&platform.share_url(&page, &blurb), POPUP_FEATURES);
                        }
                    },
                    "{platform.label()}"
                }
            }
            CopyButton {
                source: CopySource::PageUrl,
                label: "Copy link".to_string(),
                class: Some("share-btn copy-link".to_string()),
                id: Some("copyLinkBtn".to_string()),
                failure_alert: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn twitter_intent_encodes_url_and_text() {
        let url = SharePlatform::Twitter.share_url("https://example.com/blog/a b?x=1", "Read this & that");
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2Fblog%2Fa%20b%3Fx%3D1&text=Read%20this%20%26%20that"
        );
    }

    #[test]
    fn linkedin_only_carries_the_url() {
        let url = SharePlatform::LinkedIn.share_url("https://example.com/", "ignored");
        assert_eq!(
            url,
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fexample.com%2F"
        );
    }

    #[test]
    fn text_sources_resolve_to_themselves() {
        assert_eq!(
            CopySource::Text("key".to_string()).resolve().as_deref(),
            Some("key")
        );
    }
}
