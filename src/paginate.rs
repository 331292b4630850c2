// ---------------------------------------------------------------------------
// Fixed-size paging over a list
// ---------------------------------------------------------------------------

/// One page of a list plus the metadata the pager controls need.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// `0` when the list is empty ("no data"), otherwise `ceil(len / size)`.
    pub total_pages: usize,
    /// 1-based.
    pub page_number: usize,
}

impl<T> Page<'_, T> {
    /// `"Page X of Y"`, or `"No data"` for an empty list.
    pub fn label(&self) -> String {
        if self.total_pages == 0 {
            "No data".to_string()
        } else {
            format!("Page {} of {}", self.page_number, self.total_pages)
        }
    }
}

/// Slice page `page_number` (1-based) out of `items`.
///
/// Pages past the end are empty. A `page_size` of zero is treated as one.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let start = page_number.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: &items[start..end],
        total_pages,
        page_number,
    }
}

/// Previous page, never below 1.
pub fn prev(page_number: usize) -> usize {
    page_number.saturating_sub(1).max(1)
}

/// Next page. Unbounded; callers clamp against `total_pages`.
pub fn next(page_number: usize) -> usize {
    page_number.saturating_add(1)
}
