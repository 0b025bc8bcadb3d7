use url::Url;

use crate::error::SiteError;

pub const ALL: &str = "all";
pub const CATEGORY_PARAM: &str = "category";

pub trait Categorized {
    fn categories(&self) -> &[&'static str];

    fn counts(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryFilter {
    allowed: &'static [&'static str],
    active: &'static str,
}

impl CategoryFilter {
    /// `allowed` must contain [`ALL`].
    pub fn new(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed,
            active: ALL,
        }
    }

    pub fn active(&self) -> &'static str {
        self.active
    }

    pub fn normalize(&self, raw: &str) -> &'static str {
        let wanted = raw.trim().to_ascii_lowercase();
        self.allowed
            .iter()
            .copied()
            .find(|category| *category == wanted)
            .unwrap_or(ALL)
    }

    pub fn select(&mut self, raw: &str) -> &'static str {
        self.active = self.normalize(raw);
        self.active
    }

    pub fn is_active(&self, category: &str) -> bool {
        self.active == category
    }

    pub fn shows<T: Categorized>(&self, item: &T) -> bool {
        self.active == ALL || item.categories().contains(&self.active)
    }

    pub fn visible_count<T: Categorized>(&self, items: &[T]) -> usize {
        items
            .iter()
            .filter(|item| item.counts() && self.shows(*item))
            .count()
    }
}

pub fn blog_location(pathname: &str, search: &str, category: &str) -> String {
    if category == ALL {
        format!("{pathname}{search}")
    } else {
        format!("{pathname}{search}#{category}")
    }
}

pub fn project_location(href: &str, category: &str) -> Result<String, SiteError> {
    let mut url = Url::parse(href)?;
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != CATEGORY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.set_query(None);
    if !retained.is_empty() || category != ALL {
        let mut pairs = url.query_pairs_mut();
        pairs.extend_pairs(retained);
        if category != ALL {
            pairs.append_pair(CATEGORY_PARAM, category);
        }
    }
    Ok(url.to_string())
}

pub fn category_from_hash(hash: &str) -> Option<&str> {
    let category = hash.trim_start_matches('#');
    (!category.is_empty()).then_some(category)
}

pub fn category_from_query(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == CATEGORY_PARAM)
        .map(|(_, value)| value.into_owned())
}

pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn project_announcement(count: usize, category: &str) -> String {
    format!("Showing {count} projects in {category} category")
}
