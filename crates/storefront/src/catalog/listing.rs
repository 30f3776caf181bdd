//! Category listing, search and pagination over the catalog.

use serde::{Deserialize, Serialize};

use super::{Catalog, Product};

/// Products shown per listing page.
pub const PRODUCTS_PER_PAGE: usize = 16;

/// A subcategory shown in the listing sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    /// Display label.
    pub label: &'static str,
    /// Lowercased catalog category the subcategory selects.
    pub count_key: &'static str,
    /// URL segment.
    pub slug: &'static str,
}

/// Subcategories offered by the listing page, in display order.
pub const SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        label: "Bere",
        count_key: "bere",
        slug: "bere",
    },
    Subcategory {
        label: "Gold Series",
        count_key: "gold-series",
        slug: "gold-series",
    },
    Subcategory {
        label: "Hoodie",
        count_key: "hoodie",
        slug: "hoodie",
    },
    Subcategory {
        label: "Saç Bandı",
        count_key: "sac-bandi",
        slug: "sac-bandi",
    },
    Subcategory {
        label: "Çorap",
        count_key: "corap",
        slug: "corap",
    },
];

impl Subcategory {
    /// Find a subcategory by URL segment, ignoring case.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<&'static Self> {
        let slug = slug.to_lowercase();
        SUBCATEGORIES.iter().find(|s| s.slug == slug)
    }
}

/// Listing filters as supplied by the shopper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    /// Subcategory slug. Unknown slugs select everything.
    pub category: Option<String>,
    /// Case-insensitive product name filter.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually returned.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `items` into pages of `per_page`, clamping `page` into range.
    #[must_use]
    pub fn paginate(items: &[T], page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));

        let items = items
            .chunks(per_page)
            .nth(page - 1)
            .map(<[T]>::to_vec)
            .unwrap_or_default();

        Self {
            items,
            page,
            total_pages,
            total_items,
        }
    }
}

impl Catalog {
    /// Products matching a listing query, one page at a time.
    #[must_use]
    pub fn listing(&self, query: &ListingQuery) -> Page<Product> {
        let selected = query.category.as_deref().and_then(Subcategory::from_slug);
        let needle = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let matches: Vec<Product> = self
            .all()
            .iter()
            .filter(|p| selected.is_none_or(|s| p.category.to_lowercase() == s.count_key))
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|q| p.name.to_lowercase().contains(q))
            })
            .cloned()
            .collect();

        Page::paginate(&matches, query.page.unwrap_or(1), PRODUCTS_PER_PAGE)
    }

    /// Quick search by product name or category label.
    ///
    /// Underscores and dashes in category labels match spaces, so
    /// `"gold series"` finds products in `gold-series`. A blank query returns
    /// nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.all()
            .iter()
            .filter(|p| {
                let category = p.category.to_lowercase();
                p.name.to_lowercase().contains(&query)
                    || category.contains(&query)
                    || category.replace(['_', '-'], " ").contains(&query)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn test_paginate_basic() {
        let items: Vec<u32> = (1..=40).collect();
        let page = Page::paginate(&items, 3, 16);
        assert_eq!(page.items, (33..=40).collect::<Vec<_>>());
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 40);
    }

    #[test]
    fn test_paginate_clamps_out_of_range() {
        let items: Vec<u32> = (1..=20).collect();
        assert_eq!(Page::paginate(&items, 0, 16).page, 1);

        let last = Page::paginate(&items, 99, 16);
        assert_eq!(last.page, 2);
        assert_eq!(last.items, vec![17, 18, 19, 20]);
    }

    #[test]
    fn test_paginate_empty() {
        let page = Page::<u32>::paginate(&[], 5, 16);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_listing_filters_by_subcategory() {
        let catalog = sample_catalog();
        let page = catalog.listing(&ListingQuery {
            category: Some("Hoodie".to_string()),
            ..ListingQuery::default()
        });
        assert_eq!(page.total_items, 2);
        assert!(page.items.iter().all(|p| p.category == "hoodie"));
    }

    #[test]
    fn test_listing_unknown_subcategory_shows_everything() {
        let catalog = sample_catalog();
        let page = catalog.listing(&ListingQuery {
            category: Some("shoes".to_string()),
            ..ListingQuery::default()
        });
        assert_eq!(page.total_items, 4);
    }

    #[test]
    fn test_listing_name_search() {
        let catalog = sample_catalog();
        let page = catalog.listing(&ListingQuery {
            q: Some("  ZIP ".to_string()),
            ..ListingQuery::default()
        });
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].slug, "zip-hoodie");
    }

    #[test]
    fn test_search_matches_name_and_category() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog
            .search("hoodie")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Oversize Hoodie", "Zip Hoodie"]);

        assert_eq!(catalog.search("gold").len(), 1);
    }

    #[test]
    fn test_search_dashes_match_spaces() {
        let catalog = Catalog::from_json(
            r#"{"products": {"gold-series": [
                {"id": 1, "name": "Chain", "price": 1, "category": "gold-series"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(catalog.search("gold series").len(), 1);
    }

    #[test]
    fn test_search_blank_query_is_empty() {
        assert!(sample_catalog().search("   ").is_empty());
    }

    #[test]
    fn test_subcategory_from_slug() {
        assert_eq!(Subcategory::from_slug("SAC-BANDI").unwrap().label, "Saç Bandı");
        assert!(Subcategory::from_slug("nope").is_none());
    }
}
