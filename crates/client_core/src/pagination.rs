//! Page-link window shown under the blog list.

/// One entry of the page window: a zero-based page index or an elision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    Gap,
}

impl PageLink {
    pub fn page(self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(page),
            Self::Gap => None,
        }
    }
}

/// Page links around `current`: the first and last page always, every page
/// within `radius` of `current`, and a gap wherever pages are skipped.
///
/// `current` past the last page is treated as the last page.
pub fn page_window(total_pages: u32, current: u32, radius: u32) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut links = vec![PageLink::Page(0)];
    if total_pages == 1 {
        return links;
    }

    let last = total_pages - 1;
    let current = current.min(last);
    let start = current.saturating_sub(radius).max(1);
    let end = current.saturating_add(radius).min(last - 1);

    if start > 1 {
        links.push(PageLink::Gap);
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < last - 1 {
        links.push(PageLink::Gap);
    }

    links.push(PageLink::Page(last));
    links
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
