use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;

static SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("hard-coded pattern"));
static RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").expect("hard-coded pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("bad page specifier: {0:?}")]
    InvalidSpecifier(String),
    #[error("page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },
}

/// Resolve page specifiers like "3" or "5-9" into zero-based page indices.
///
/// Specifiers use 1-based page numbers. A range is inclusive on both ends;
/// a reversed range ("9-5") is empty rather than an error. Duplicates across
/// specifiers collapse, and the result is sorted ascending so the same input
/// always selects pages in the same order.
///
/// Every referenced page must exist in the document. Both failure modes stop
/// resolution outright; callers must not produce any output after an error.
pub fn resolve<S: AsRef<str>>(
    specifiers: &[S],
    page_count: usize,
) -> Result<Vec<usize>, ResolveError> {
    let mut pages = BTreeSet::new();

    for specifier in specifiers {
        let token = specifier.as_ref();

        if let Some(caps) = RANGE.captures(token) {
            let start = parse_number(&caps[1], token)?;
            let end = parse_number(&caps[2], token)?;
            // A reversed range contributes nothing. An oversized range is
            // capped just past the document: one out-of-range page already
            // fails the bounds check, so the rest never materializes.
            let cap = end.min(page_count.saturating_add(1));
            if start <= cap {
                pages.extend(start..=cap);
            } else if start <= end {
                pages.insert(start);
            }
        } else if let Some(caps) = SINGLE.captures(token) {
            pages.insert(parse_number(&caps[1], token)?);
        } else {
            return Err(ResolveError::InvalidSpecifier(token.to_string()));
        }
    }

    for &page in &pages {
        if page == 0 || page > page_count {
            return Err(ResolveError::PageOutOfRange { page, page_count });
        }
    }

    Ok(pages.into_iter().map(|page| page - 1).collect())
}

fn parse_number(digits: &str, token: &str) -> Result<usize, ResolveError> {
    digits
        .parse()
        .map_err(|_| ResolveError::InvalidSpecifier(token.to_string()))
}
