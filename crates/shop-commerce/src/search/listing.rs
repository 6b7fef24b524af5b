//! Filter and sort over a fetched catalog.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::Product;
use crate::search::SortOption;

/// Products matching `query`, ordered by `sort`.
///
/// The query is trimmed and matched case-insensitively as a substring of
/// the title or of any tag; a blank query keeps every product. The sort is
/// stable, so products that compare equal keep their catalog order.
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    query: &str,
    sort: SortOption,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();

    let mut view: Vec<&Product> = if needle.is_empty() {
        products.iter().collect()
    } else {
        products
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect()
    };

    // slice::sort_by is stable.
    match sort {
        SortOption::NameAsc => view.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOption::PriceAsc => {
            view.sort_by(|a, b| a.discounted_price.total_cmp(&b.discounted_price))
        }
        SortOption::PriceDesc => {
            view.sort_by(|a, b| b.discounted_price.total_cmp(&a.discounted_price))
        }
    }

    view
}

/// Title order as a shopper reads it.
///
/// Primary key: the title decomposed (NFD) with combining marks dropped and
/// case folded, so "Éclair" files under E. Accents, then case, only separate
/// titles that are otherwise identical. This is a root-locale approximation;
/// language-specific tailorings (e.g. Swedish å after z) are not applied.
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn folded(title: &str) -> impl Iterator<Item = char> + '_ {
    title.nfd().flat_map(char::to_lowercase)
}

fn collation_key(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
