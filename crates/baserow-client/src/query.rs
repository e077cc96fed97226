//! List parameters and the fluent list query builder

use crate::error::Result;
use crate::record::{Page, Record};
use crate::table::Table;
use std::fmt;
use tracing::debug;
use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Sort direction for `order_by`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl OrderDir {
    /// Prefix the API expects in front of the field name
    pub fn prefix(self) -> char {
        match self {
            OrderDir::Asc => '+',
            OrderDir::Desc => '-',
        }
    }
}

impl fmt::Display for OrderDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDir::Asc => write!(f, "ASC"),
            OrderDir::Desc => write!(f, "DESC"),
        }
    }
}

/// Parameters of a list call
///
/// Defaults to page 1, 100 rows, no search, ascending by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: u32,
    pub size: u32,
    pub search: String,
    /// Field to sort on; `None` leaves ordering to the server
    pub order_by: Option<String>,
    pub order_dir: OrderDir,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            order_by: Some("id".to_string()),
            order_dir: OrderDir::Asc,
        }
    }
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, dir: OrderDir) -> Self {
        self.order_by = Some(field.into());
        self.order_dir = dir;
        self
    }

    /// Change direction only, keeping the current sort field
    pub fn order_dir(mut self, dir: OrderDir) -> Self {
        self.order_dir = dir;
        self
    }

    /// Send no `order_by` at all
    pub fn unordered(mut self) -> Self {
        self.order_by = None;
        self
    }

    /// Encode as a form-urlencoded query string
    ///
    /// Key order is fixed: `page`, `size`, `user_field_names`, `search`,
    /// then `order_by` when a field is set.
    pub fn to_query_string(&self, use_field_names: bool) -> String {
        let mut pairs = form_urlencoded::Serializer::new(String::new());
        pairs
            .append_pair("page", &self.page.to_string())
            .append_pair("size", &self.size.to_string())
            .append_pair("user_field_names", &use_field_names.to_string())
            .append_pair("search", &self.search);
        if let Some(field) = &self.order_by {
            pairs.append_pair("order_by", &format!("{}{}", self.order_dir.prefix(), field));
        }
        pairs.finish()
    }
}

/// Fluent list query bound to a table
///
/// # Example
///
/// ```no_run
/// # use baserow_client::{Connection, OrderDir};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let baserow = Connection::new("my-database-token")?;
/// let oldest = baserow
///     .table(123)
///     .query()
///     .search("Doe")
///     .order_by("Age", OrderDir::Desc)
///     .size(10)
///     .fetch()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ListQuery<'a> {
    table: &'a Table,
    params: ListParams,
}

impl<'a> ListQuery<'a> {
    pub(crate) fn new(table: &'a Table) -> Self {
        Self {
            table,
            params: ListParams::default(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.params = self.params.page(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.params = self.params.size(size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.params = self.params.search(search);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, dir: OrderDir) -> Self {
        self.params = self.params.order_by(field, dir);
        self
    }

    pub fn order_dir(mut self, dir: OrderDir) -> Self {
        self.params = self.params.order_dir(dir);
        self
    }

    pub fn unordered(mut self) -> Self {
        self.params = self.params.unordered();
        self
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Fetch the requested page's records
    pub async fn fetch(self) -> Result<Vec<Record>> {
        debug!("List query on table {}: {:?}", self.table.id(), self.params);
        self.table.list(self.params).await
    }

    /// Fetch the requested page with its paging metadata
    pub async fn fetch_page(self) -> Result<Page> {
        self.table.list_page(self.params).await
    }

    /// Fetch from the requested page through the last one
    pub async fn fetch_all(self) -> Result<Vec<Record>> {
        self.table.list_all(self.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_string() {
        assert_eq!(
            ListParams::default().to_query_string(true),
            "page=1&size=100&user_field_names=true&search=&order_by=%2Bid"
        );
    }

    #[test]
    fn test_descending_order() {
        let qs = ListParams::new()
            .order_by("Name", OrderDir::Desc)
            .to_query_string(true);
        assert!(qs.ends_with("&order_by=-Name"), "{}", qs);
    }

    #[test]
    fn test_direction_without_field_sorts_id() {
        let qs = ListParams::new()
            .order_dir(OrderDir::Desc)
            .to_query_string(true);
        assert_eq!(
            qs,
            "page=1&size=100&user_field_names=true&search=&order_by=-id"
        );

        let renamed = ListParams::new()
            .order_dir(OrderDir::Desc)
            .order_by("Name", OrderDir::Asc);
        assert!(renamed.to_query_string(true).ends_with("&order_by=%2BName"));
    }

    #[test]
    fn test_unordered_omits_order_by() {
        let qs = ListParams::new().unordered().to_query_string(false);
        assert_eq!(qs, "page=1&size=100&user_field_names=false&search=");
    }

    #[test]
    fn test_search_and_paging_are_encoded() {
        let qs = ListParams::new()
            .page(3)
            .size(25)
            .search("John & Jane")
            .order_by("Last name", OrderDir::Asc)
            .to_query_string(true);
        assert_eq!(
            qs,
            "page=3&size=25&user_field_names=true&search=John+%26+Jane&order_by=%2BLast+name"
        );
    }

    #[test]
    fn test_order_dir_display() {
        assert_eq!(OrderDir::default(), OrderDir::Asc);
        assert_eq!(OrderDir::Asc.to_string(), "ASC");
        assert_eq!(OrderDir::Desc.prefix(), '-');
    }
}
