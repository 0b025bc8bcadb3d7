use dioxus::prelude::*;
use dioxus_router::Link;

use crate::dom::{current_hash, current_href, replace_url, scroll_into_view, viewport_width};
use crate::filter::{blog_location, category_from_hash, CategoryFilter};
use crate::highlight::{highlight, Language};
use crate::pages::FilterButtons;
use crate::posts::{all_posts, format_date, get_post, Block, BLOG_CATEGORIES};
use crate::routes::Route;
use crate::share::{CopyButton, CopySource, ShareButtons};

const GRID_ID: &str = "blogsGrid";
const NARROW_VIEWPORT_PX: f64 = 768.0;

fn initial_filter() -> CategoryFilter {
    let mut filter = CategoryFilter::new(BLOG_CATEGORIES);
    if let Some(category) = category_from_hash(&current_hash()) {
        filter.select(category);
    }
    filter
}

fn sync_hash(category: &str) {
    let Some(href) = current_href() else {
        return;
    };
    let Ok(url) = url::Url::parse(&href) else {
        return;
    };
    let search = url.query().map(|query| format!("?{query}")).unwrap_or_default();
    if let Err(err) = replace_url(&blog_location(url.path(), &search, category)) {
        tracing::warn!("blog: {err}");
    }
}

#[component]
pub fn BlogPage() -> Element {
    let config = crate::config::use_site_config();
    let mut filter = use_signal(initial_filter);
    let posts = all_posts();
    let active = filter();
    let count = active.visible_count(&posts);

    rsx! {
        document::Title { "Blog | {config.site_title}" }
        document::Meta { name: "description", content: "Security write-ups, tutorials and notes from the lab." }
        section { class: "page-header",
            h1 { "Security Blog" }
            p { class: "page-subtitle",
                "Showing "
                span { id: "blogsCount", "{count}" }
                " posts"
            }
        }
        FilterButtons {
            categories: BLOG_CATEGORIES,
            active: active.active(),
            class: "filter-btn",
            on_select: move |category: String| {
                let selected = filter.with_mut(|filter| filter.select(&category));
                tracing::debug!("blog: filter {selected}");
                sync_hash(selected);
                if viewport_width() < NARROW_VIEWPORT_PX {
                    scroll_into_view(GRID_ID);
                }
            },
        }
        div { id: GRID_ID, class: "blogs-grid",
            for post in posts {
                article {
                    key: "{post.slug}",
                    class: if post.coming_soon { "blogs-card coming-soon" } else { "blogs-card" },
                    class: if !active.shows(&post) { "hidden" },
                    aria_hidden: (!active.shows(&post)).then_some("true"),
                    "data-category": post.category[0],
                    span { class: "blogs-category", "{post.category[0]}" }
                    h2 { class: "blogs-title",
                        if post.coming_soon {
                            "{post.title}"
                        } else {
                            Link { to: Route::BlogPost { slug: post.slug.to_string() }, "{post.title}" }
                        }
                    }
                    p { class: "blogs-excerpt", "{post.excerpt}" }
                    p { class: "blogs-meta",
                        if post.coming_soon {
                            span { class: "coming-soon-badge", "Coming soon" }
                        } else {
                            time { datetime: post.date, "{format_date(post.date)}" }
                            " · {post.reading_time} read"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn BlogPostPage(slug: String) -> Element {
    let config = crate::config::use_site_config();
    let Some(post) = get_post(&slug) else {
        return rsx! {
            document::Title { "Post not found | {config.site_title}" }
            section { class: "page-header",
                h1 { "Post not found" }
                p { "That write-up does not exist or has not been published yet." }
                Link { to: Route::Blog {}, class: "btn btn-outline", "Back to the blog" }
            }
        };
    };

    rsx! {
        document::Title { "{post.title} | {config.site_title}" }
        document::Meta { name: "description", content: "{post.excerpt}" }
        document::Meta { property: "og:title", content: "{post.title}" }
        document::Meta { property: "og:description", content: "{post.excerpt}" }
        article { class: "blog-post",
            header { class: "post-header",
                Link { to: Route::Blog {}, class: "back-link", "← All posts" }
                span { class: "blogs-category", "{post.category[0]}" }
                h1 { "{post.title}" }
                p { class: "post-meta",
                    time { datetime: post.date, "{format_date(post.date)}" }
                    " · {post.reading_time} read"
                }
            }
            div { class: "post-body",
                for (index, block) in post.blocks.iter().enumerate() {
                    {match block {
                        Block::Paragraph(text) => rsx! { p { key: "{index}", "{text}" } },
                        Block::Heading(text) => rsx! { h2 { key: "{index}", "{text}" } },
                        Block::Code { language, code } => rsx! {
                            CodeBlock { key: "{index}", language: *language, code: *code }
                        },
                    }}
                }
            }
            footer { class: "post-footer", ShareButtons {} }
        }
    }
}

#[component]
fn CodeBlock(language: &'static str, code: &'static str) -> Element {
    let language = Language::from_tag(language);
    let tokens = highlight(code, language);
    let label = language.class().trim_start_matches("language-");
    rsx! {
        div { class: "code-block",
            div { class: "code-header",
                span { class: "code-language", "{label}" }
                CopyButton {
                    source: CopySource::Text(code.to_string()),
                    label: "Copy".to_string(),
                    class: Some("copy-code".to_string()),
                    id: None,
                    failure_alert: None,
                }
            }
            pre {
                code { class: language.class(),
                    for (index, token) in tokens.into_iter().enumerate() {
                        span { key: "{index}", class: token.class, "{token.text}" }
                    }
                }
            }
        }
    }
}
