//! The listing query engine.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::catalog::Product;
use crate::search::{Pagination, QuerySpec, ResultPage, SortOption};

/// Products per listing page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Run a listing query over `items`.
///
/// Filters apply in order (text, category, brands, price ceiling), then a
/// stable sort, then pagination with the requested page clamped into range.
/// Never fails: any page number yields a valid page.
pub fn run_query(items: &[Product], spec: &QuerySpec, page_size: NonZeroUsize) -> ResultPage {
    let filters = spec.filters();
    let mut matched: Vec<&Product> = items
        .iter()
        .filter(|product| filters.iter().all(|f| f.matches(product)))
        .collect();

    sort_products(&mut matched, spec.sort);

    let pagination = Pagination::new(spec.page, page_size.get(), matched.len());
    let items: Vec<Product> = matched
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.per_page)
        .cloned()
        .collect();

    tracing::debug!(
        filters = filters.len(),
        sort = spec.sort.as_str(),
        total = pagination.total,
        page = pagination.page,
        "listing query"
    );

    ResultPage { items, pagination }
}

/// Stable sort; ties keep their input order.
pub fn sort_products(products: &mut [&Product], sort: SortOption) {
    match sort {
        SortOption::Relevance => {}
        SortOption::PriceAsc => {
            products.sort_by(|a, b| a.price.amount_cents.cmp(&b.price.amount_cents))
        }
        SortOption::PriceDesc => {
            products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
        }
        SortOption::NameAsc => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
}

/// Dictionary-style name ordering.
///
/// Letters compare case-insensitively first; names that differ only in case
/// put lowercase ahead of uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use proptest::prelude::*;

    fn ids(page: &ResultPage) -> Vec<u32> {
        page.items.iter().map(|p| p.id.get()).collect()
    }

    fn page_size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_category_electronics() {
        let catalog = Catalog::demo();
        let spec = QuerySpec::new().with_category(Category::Electronics);
        let page = run_query(catalog.products(), &spec, DEFAULT_PAGE_SIZE);

        assert_eq!(ids(&page), vec![2, 5, 6, 10]);
        assert_eq!(page.total_count(), 4);
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_price_ceiling_sorted_ascending() {
        let catalog = Catalog::demo();
        let spec = QuerySpec::new()
            .with_max_price(Money::new(20000, Currency::USD))
            .with_sort(SortOption::PriceAsc);
        let page = run_query(catalog.products(), &spec, DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&page), vec![9, 4, 7, 1]);

        let relevance = run_query(
            catalog.products(),
            &spec.clone().with_sort(SortOption::Relevance),
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(ids(&relevance), vec![1, 4, 7, 9]);
    }

    #[test]
    fn test_price_descending_and_name() {
        let catalog = Catalog::demo();
        let spec = QuerySpec::new()
            .with_category(Category::Electronics)
            .with_sort(SortOption::PriceDesc);
        let page = run_query(catalog.products(), &spec, DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&page), vec![10, 2, 5, 6]);

        let page = run_query(
            catalog.products(),
            &spec.with_sort(SortOption::NameAsc),
            DEFAULT_PAGE_SIZE,
        );
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Galaxy S23", "iPhone 14", "Laptop Pro 15", "MacBook Air 13"]);
    }

    #[test]
    fn test_relevance_keeps_catalog_order() {
        let catalog = Catalog::demo();
        let page = run_query(catalog.products(), &QuerySpec::new(), page_size(20));
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_clamping() {
        let catalog = Catalog::demo();

        let page = run_query(catalog.products(), &QuerySpec::new().with_page(99), DEFAULT_PAGE_SIZE);
        assert_eq!(page.current_page(), 2);
        assert_eq!(ids(&page), vec![9, 10]);

        let page = run_query(catalog.products(), &QuerySpec::new().with_page(-5), DEFAULT_PAGE_SIZE);
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.len(), 8);
    }

    #[test]
    fn test_no_matches() {
        let catalog = Catalog::demo();
        let spec = QuerySpec::new().with_text("toaster").with_page(3);
        let page = run_query(catalog.products(), &spec, DEFAULT_PAGE_SIZE);

        assert!(page.is_empty());
        assert_eq!(page.total_count(), 0);
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.summary(), "No products found");
    }

    #[test]
    fn test_brand_filter_with_text() {
        let catalog = Catalog::demo();
        let spec = QuerySpec::new().with_text("watch").with_brand("Huawei");
        let page = run_query(catalog.products(), &spec, DEFAULT_PAGE_SIZE);
        assert_eq!(ids(&page), vec![7]);
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zebra", "apple"), Ordering::Greater);
        assert_eq!(compare_names("iphone", "iPhone"), Ordering::Less);
        assert_eq!(compare_names("Same", "Same"), Ordering::Equal);
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            (
                0i64..50,
                prop::sample::select(vec!["alpha", "Beta", "gamma", "Alpha", "delta"]),
                prop::sample::select(Category::ALL.to_vec()),
            ),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (price, name, category))| {
                    Product::new(
                        ProductId::new(i as u32 + 1),
                        name,
                        Money::new(price * 100, Currency::USD),
                        "Generic",
                        category,
                        3.0,
                    )
                })
                .collect()
        })
    }

    fn arb_sort() -> impl Strategy<Value = SortOption> {
        prop::sample::select(SortOption::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_pagination_invariants(
            products in arb_products(),
            sort in arb_sort(),
            page in -5i64..20,
            size in 1usize..12,
        ) {
            let spec = QuerySpec::new().with_sort(sort).with_page(page);
            let result = run_query(&products, &spec, page_size(size));

            let expected_pages = products.len().div_ceil(size).max(1);
            prop_assert_eq!(result.total_count(), products.len());
            prop_assert_eq!(result.total_pages(), expected_pages);
            prop_assert!(result.current_page() >= 1);
            prop_assert!(result.current_page() <= result.total_pages());
            prop_assert!(result.len() <= size);
            if !products.is_empty() {
                prop_assert!(!result.is_empty());
            }
        }

        #[test]
        fn prop_sort_is_stable(products in arb_products(), sort in arb_sort()) {
            let spec = QuerySpec::new().with_sort(sort);
            let result = run_query(&products, &spec, page_size(products.len().max(1)));

            // Ids were assigned in input order, so equal keys must keep ascending ids.
            for pair in result.items.windows(2) {
                let tie = match sort {
                    SortOption::Relevance => true,
                    SortOption::PriceAsc | SortOption::PriceDesc => pair[0].price == pair[1].price,
                    SortOption::NameAsc => pair[0].name == pair[1].name,
                };
                if tie {
                    prop_assert!(pair[0].id.get() < pair[1].id.get());
                }
            }
        }

        #[test]
        fn prop_pages_cover_filtered_set(products in arb_products(), size in 1usize..6) {
            let spec = QuerySpec::new().with_category(Category::Audio);
            let first = run_query(&products, &spec, page_size(size));

            let mut seen = Vec::new();
            for page in 1..=first.total_pages() {
                let result = run_query(&products, &spec.clone().with_page(page as i64), page_size(size));
                seen.extend(result.items.into_iter().map(|p| p.id));
            }
            let expected: Vec<ProductId> = products
                .iter()
                .filter(|p| p.category == Category::Audio)
                .map(|p| p.id)
                .collect();
            prop_assert_eq!(seen, expected);
        }
    }
}
