use serde::{Deserialize, Serialize};

/// Direction token accepted by the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query-string shape shared by the paginated listings
/// (`?page=0&size=20&sort_by=id&sort_direction=desc`).
#[derive(Debug, Clone, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

fn default_page_size() -> usize {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            sort_by: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl PageRequest {
    pub fn sort_key(&self) -> &str {
        self.sort_by.as_deref().unwrap_or("id")
    }
}

/// Response envelope for paginated listings.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice a fully materialized, already sorted collection into one page.
    /// The in-memory stores scan everything per request, so pagination is a
    /// plain window over the sorted vector.
    pub fn from_sorted(items: Vec<T>, request: &PageRequest) -> Self {
        let size = request.size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(size);

        let start = request.page.saturating_mul(size);
        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(size)
            .collect();

        Self {
            items,
            page: request.page,
            size,
            total_items,
            total_pages,
        }
    }
}
