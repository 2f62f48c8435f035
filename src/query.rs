use serde::Serialize;

use crate::record::StudentRecord;

pub const PAGE_SIZE: usize = 10;

/// One page of the filtered roster, plus enough totals for pagination UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub records: Vec<StudentRecord>,
    pub total_matches: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Filter the full list by a case-insensitive substring search and slice out
/// one page. Out-of-range page numbers clamp to the nearest valid page, so a
/// stale page request never shows an empty page while earlier pages have
/// content. `page` is 1-based; with zero matches the result reports page 1
/// of 0.
pub fn project(records: &[StudentRecord], search: &str, page: usize) -> PageView {
    let needle = search.trim().to_lowercase();
    let matched: Vec<&StudentRecord> = records
        .iter()
        .filter(|r| needle.is_empty() || matches_term(r, &needle))
        .collect();

    let total_matches = matched.len();
    let total_pages = total_matches.div_ceil(PAGE_SIZE);
    let page = if total_pages == 0 {
        1
    } else {
        page.clamp(1, total_pages)
    };

    let records = matched
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    PageView {
        records,
        total_matches,
        page,
        total_pages,
    }
}

/// A record matches if the lowered needle is a substring of the full name,
/// email, city, or degree code (each lowered).
fn matches_term(record: &StudentRecord, needle: &str) -> bool {
    let f = &record.fields;
    format!("{} {}", f.first_name, f.last_name)
        .to_lowercase()
        .contains(needle)
        || f.email.to_lowercase().contains(needle)
        || f.city.to_lowercase().contains(needle)
        || f.degree_type.to_lowercase().contains(needle)
}
