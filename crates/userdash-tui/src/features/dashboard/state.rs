//! View-local dashboard state: sort and pagination.
//!
//! Neither affects what was fetched; both operate on the rows already in
//! the store.

use std::cmp::Ordering;
use std::ops::Range;

use userdash_core::api::UserRecord;
use userdash_core::config::PAGE_SIZES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    FirstName,
    LastName,
    Age,
}

impl SortColumn {
    pub fn title(self) -> &'static str {
        match self {
            SortColumn::FirstName => "First Name",
            SortColumn::LastName => "Last Name",
            SortColumn::Age => "Age",
        }
    }

    fn compare(self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            SortColumn::FirstName => compare_text(&a.first_name, &b.first_name),
            SortColumn::LastName => compare_text(&a.last_name, &b.last_name),
            SortColumn::Age => a.age.cmp(&b.age),
        }
    }
}

pub const COLUMNS: [SortColumn; 3] = [
    SortColumn::FirstName,
    SortColumn::LastName,
    SortColumn::Age,
];

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// `None` keeps the server order.
    pub column: Option<SortColumn>,
    pub order: SortOrder,
}

impl SortState {
    /// None -> First Name -> Last Name -> Age -> None.
    pub fn cycle_column(&mut self) {
        self.column = match self.column {
            None => Some(SortColumn::FirstName),
            Some(SortColumn::FirstName) => Some(SortColumn::LastName),
            Some(SortColumn::LastName) => Some(SortColumn::Age),
            Some(SortColumn::Age) => None,
        };
        self.order = SortOrder::Ascending;
    }

    pub fn flip_order(&mut self) {
        if self.column.is_none() {
            return;
        }
        self.order = match self.order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        };
    }

    /// Rows in display order. Stable, so ties keep server order.
    pub fn apply<'a>(&self, users: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let mut rows: Vec<&UserRecord> = users.iter().collect();
        if let Some(column) = self.column {
            rows.sort_by(|a, b| {
                let ord = column.compare(a, b);
                match self.order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
    pub sort: SortState,
}

impl DashboardState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            sort: SortState::default(),
        }
    }

    /// At least one page, even when empty.
    pub fn page_count(&self, rows: usize) -> usize {
        rows.div_ceil(self.page_size).max(1)
    }

    pub fn clamp_page(&mut self, rows: usize) {
        self.page = self.page.min(self.page_count(rows) - 1);
    }

    pub fn next_page(&mut self, rows: usize) {
        self.page = (self.page + 1).min(self.page_count(rows) - 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn last_page(&mut self, rows: usize) {
        self.page = self.page_count(rows) - 1;
    }

    /// Moves to the next size in [`PAGE_SIZES`], keeping the first visible
    /// row on screen. Returns the new size.
    pub fn cycle_page_size(&mut self, rows: usize) -> usize {
        let first_row = self.page * self.page_size;
        self.page_size = PAGE_SIZES
            .iter()
            .copied()
            .find(|&size| size > self.page_size)
            .unwrap_or(PAGE_SIZES[0]);
        self.page = first_row / self.page_size;
        self.clamp_page(rows);
        self.page_size
    }

    /// Index range of the current page within `rows` items.
    pub fn page_range(&self, rows: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(rows);
        let end = (start + self.page_size).min(rows);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, first: &str, last: &str, age: u32) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: String::new(),
            username: String::new(),
            phone: String::new(),
            image: String::new(),
            age,
            gender: String::new(),
        }
    }

    fn users() -> Vec<UserRecord> {
        vec![
            record(1, "emily", "Johnson", 28),
            record(2, "Michael", "Williams", 35),
            record(3, "Sophia", "Brown", 42),
            record(4, "Ava", "Brown", 28),
        ]
    }

    fn ids(rows: &[&UserRecord]) -> Vec<u64> {
        rows.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_sort_cycle_and_flip() {
        let users = users();
        let mut sort = SortState::default();
        assert_eq!(ids(&sort.apply(&users)), vec![1, 2, 3, 4]);

        sort.cycle_column();
        assert_eq!(sort.column, Some(SortColumn::FirstName));
        assert_eq!(ids(&sort.apply(&users)), vec![4, 1, 2, 3]);

        sort.flip_order();
        assert_eq!(ids(&sort.apply(&users)), vec![3, 2, 1, 4]);

        sort.cycle_column();
        assert_eq!(sort.order, SortOrder::Ascending);
        // Ties keep server order.
        assert_eq!(ids(&sort.apply(&users)), vec![3, 4, 1, 2]);

        sort.cycle_column();
        assert_eq!(ids(&sort.apply(&users)), vec![1, 4, 2, 3]);

        sort.cycle_column();
        assert_eq!(sort.column, None);
    }

    #[test]
    fn test_flip_without_column_is_noop() {
        let mut sort = SortState::default();
        sort.flip_order();
        assert_eq!(sort.order, SortOrder::Ascending);
    }

    #[test]
    fn test_pagination_clamps_to_window() {
        let mut dash = DashboardState::new(10);
        assert_eq!(dash.page_count(30), 3);
        assert_eq!(dash.page_count(0), 1);

        dash.next_page(30);
        dash.next_page(30);
        dash.next_page(30);
        assert_eq!(dash.page, 2);
        assert_eq!(dash.page_range(30), 20..30);

        dash.prev_page();
        assert_eq!(dash.page, 1);

        dash.clamp_page(5);
        assert_eq!(dash.page, 0);
        assert_eq!(dash.page_range(5), 0..5);
    }

    #[test]
    fn test_cycle_page_size_keeps_first_row() {
        let mut dash = DashboardState::new(10);
        dash.page = 2;

        assert_eq!(dash.cycle_page_size(30), 20);
        assert_eq!(dash.page, 1);

        assert_eq!(dash.cycle_page_size(30), 50);
        assert_eq!(dash.page, 0);

        assert_eq!(dash.cycle_page_size(30), 100);
        assert_eq!(dash.cycle_page_size(30), 10);
    }

    #[test]
    fn test_odd_configured_page_size() {
        let mut dash = DashboardState::new(15);
        assert_eq!(dash.cycle_page_size(30), 20);

        let zero = DashboardState::new(0);
        assert_eq!(zero.page_size, 1);
    }
}
