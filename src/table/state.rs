use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::column::{Column, Record, Value};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Initial ordering; unset fields fall back to the first column, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableOptions {
    pub order_by: Option<usize>,
    pub order_dir: Option<SortDirection>,
}

/// One entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, active: bool },
    Ellipsis,
}

/// Nulls trail in both directions; the direction only flips how two present
/// values compare.
pub fn compare_values(a: &Value, b: &Value, dir: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match dir {
            SortDirection::Asc => a.cmp_present(b),
            SortDirection::Desc => b.cmp_present(a),
        },
    }
}

/// Sort, search and pagination over an in-memory record set. Holds no DOM;
/// `DataTable` renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    columns: Vec<Column>,
    original: Vec<Record>,
    visible: Vec<Record>,
    sort_column: usize,
    sort_direction: SortDirection,
    page: usize,
    page_size: usize,
    query: Option<String>,
}

impl TableState {
    pub fn new(columns: Vec<Column>, records: Vec<Record>, options: TableOptions) -> Self {
        let sort_column = options
            .order_by
            .filter(|&i| i < columns.len())
            .unwrap_or(0);
        let mut state = Self {
            columns,
            visible: records.clone(),
            original: records,
            sort_column,
            sort_direction: options.order_dir.unwrap_or_default(),
            page: 1,
            page_size: PAGE_SIZE,
            query: None,
        };
        state.sort();
        state
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn sort_column(&self) -> usize {
        self.sort_column
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn total_len(&self) -> usize {
        self.original.len()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.page_size)
    }

    /// Header click: a new column sorts ascending, the active one toggles.
    /// Columns that are not orderable ignore the click.
    pub fn click_header(&mut self, index: usize) {
        let Some(column) = self.columns.get(index) else {
            return;
        };
        if !column.orderable {
            return;
        }
        if index == self.sort_column {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = index;
            self.sort_direction = SortDirection::Asc;
        }
        self.sort();
        self.page = 1;
    }

    /// Filters from the original snapshot, then re-sorts. A blank query
    /// restores every record.
    pub fn search(&mut self, input: &str) {
        let trimmed = input.trim();
        self.query = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
        self.apply_filter();
        self.sort();
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
    }

    /// Records of the current page, sorted and filtered.
    pub fn page_records(&self) -> &[Record] {
        let start = ((self.page - 1) * self.page_size).min(self.visible.len());
        let end = (start + self.page_size).min(self.visible.len());
        &self.visible[start..end]
    }

    /// Rendered cells of the current page, one `Vec` per row.
    pub fn page_rows(&self) -> Vec<Vec<String>> {
        self.page_records()
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|col| col.render_cell(record))
                    .collect()
            })
            .collect()
    }

    /// First, last, current and its neighbours; every other run collapses
    /// into a single ellipsis.
    pub fn page_links(&self) -> Vec<PageLink> {
        let n = self.page_count();
        let p = self.page;
        let mut links = Vec::new();
        let mut ellipsis = false;
        for i in 1..=n {
            if i.abs_diff(p) <= 1 || i == 1 || i == n {
                links.push(PageLink::Page {
                    number: i,
                    active: i == p,
                });
                ellipsis = false;
            } else if !ellipsis {
                links.push(PageLink::Ellipsis);
                ellipsis = true;
            }
        }
        links
    }

    /// CSS classes of a header cell.
    pub fn header_class(&self, index: usize) -> String {
        match self.columns.get(index) {
            Some(col) if col.orderable => {
                if index == self.sort_column {
                    format!("sortable {}", self.sort_direction.as_str())
                } else {
                    "sortable".to_string()
                }
            }
            _ => String::new(),
        }
    }

    fn apply_filter(&mut self) {
        let Some(query) = self.query.as_deref() else {
            self.visible = self.original.clone();
            return;
        };
        let searchable: Vec<&Column> = self.columns.iter().filter(|c| c.searchable).collect();
        self.visible = self
            .original
            .iter()
            .filter(|record| {
                searchable.iter().any(|col| {
                    col.value(record)
                        .search_text()
                        .is_some_and(|text| text.contains(query))
                })
            })
            .cloned()
            .collect();
    }

    fn sort(&mut self) {
        let Some(column) = self.columns.get(self.sort_column) else {
            return;
        };
        let field = column.field.clone();
        let dir = self.sort_direction;
        self.visible
            .sort_by(|a, b| compare_values(a.get(&field), b.get(&field), dir));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn co2e_table(records: Vec<Record>) -> TableState {
        TableState::new(
            vec![
                Column::new("Name", "name"),
                Column::new("CO2e", "co2e").searchable(false),
            ],
            records,
            TableOptions::default(),
        )
    }

    fn names(state: &TableState) -> Vec<String> {
        state
            .page_records()
            .iter()
            .map(|r| r.get("name").to_string())
            .collect()
    }

    fn numbered(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                Record::new()
                    .with("name", format!("user{:03}", i))
                    .with("co2e", i as f64)
            })
            .collect()
    }

    fn render_links(links: &[PageLink]) -> String {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn null_trails_ascending() {
        let mut t = co2e_table(vec![
            Record::new().with("name", "B").with("co2e", 5.0),
            Record::new().with("name", "A").with("co2e", Value::Null),
        ]);
        t.click_header(1);
        assert_eq!(t.sort_direction(), SortDirection::Asc);
        assert_eq!(names(&t), ["B", "A"]);
    }

    #[test]
    fn reverse_direction_reverses_present_values_only() {
        let mut t = co2e_table(vec![
            Record::new().with("name", "a").with("co2e", 3.0),
            Record::new().with("name", "b").with("co2e", Value::Null),
            Record::new().with("name", "c").with("co2e", 1.0),
            Record::new().with("name", "d").with("co2e", 2.0),
            Record::new().with("name", "e"),
        ]);
        t.click_header(1);
        let asc = names(&t);
        assert_eq!(&asc[..3], ["c", "d", "a"]);
        assert!(asc[3..].iter().all(|n| n == "b" || n == "e"));

        t.click_header(1);
        assert_eq!(t.sort_direction(), SortDirection::Desc);
        let desc = names(&t);
        assert_eq!(&desc[..3], ["a", "d", "c"]);
        assert!(desc[3..].iter().all(|n| n == "b" || n == "e"));
    }

    #[test]
    fn text_sorts_case_insensitively() {
        let t = co2e_table(vec![
            Record::new().with("name", "beta"),
            Record::new().with("name", "Alpha"),
            Record::new().with("name", "gamma"),
            Record::new().with("name", "Delta"),
        ]);
        assert_eq!(names(&t), ["Alpha", "beta", "Delta", "gamma"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let t = co2e_table(vec![
            Record::new().with("name", "Zoe"),
            Record::new().with("name", "Émile"),
            Record::new().with("name", "Adam"),
        ]);
        assert_eq!(names(&t), ["Adam", "Émile", "Zoe"]);
    }

    #[test]
    fn switching_column_resets_direction_and_page() {
        let mut t = co2e_table(numbered(25));
        t.click_header(0);
        assert_eq!(t.sort_direction(), SortDirection::Desc);
        t.go_to_page(3);
        t.click_header(1);
        assert_eq!(t.sort_column(), 1);
        assert_eq!(t.sort_direction(), SortDirection::Asc);
        assert_eq!(t.current_page(), 1);
    }

    #[test]
    fn non_orderable_header_is_inert() {
        let mut t = TableState::new(
            vec![
                Column::new("Name", "name"),
                Column::new("Share", "co2e").orderable(false),
            ],
            numbered(3),
            TableOptions::default(),
        );
        t.click_header(1);
        assert_eq!(t.sort_column(), 0);
        assert_eq!(t.header_class(0), "sortable asc");
        assert_eq!(t.header_class(1), "");
    }

    #[test]
    fn initial_order_options() {
        let t = TableState::new(
            vec![Column::new("Name", "name"), Column::new("CO2e", "co2e")],
            numbered(3),
            TableOptions {
                order_by: Some(1),
                order_dir: Some(SortDirection::Desc),
            },
        );
        assert_eq!(names(&t), ["user002", "user001", "user000"]);
        assert_eq!(t.header_class(1), "sortable desc");
    }

    #[test]
    fn out_of_range_order_by_falls_back_to_first_column() {
        let t = TableState::new(
            vec![Column::new("Name", "name")],
            numbered(2),
            TableOptions {
                order_by: Some(7),
                order_dir: None,
            },
        );
        assert_eq!(t.sort_column(), 0);
    }

    #[test]
    fn empty_search_restores_everything() {
        let mut t = co2e_table(numbered(23));
        t.search("user01");
        assert_eq!(t.visible_len(), 10);
        t.search("   ");
        assert_eq!(t.visible_len(), 23);
        assert_eq!(t.query(), None);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut t = co2e_table(vec![
            Record::new().with("name", "Alpha Team"),
            Record::new().with("name", "beta"),
        ]);
        t.search("ALPHA");
        assert_eq!(names(&t), ["Alpha Team"]);
    }

    #[test]
    fn search_skips_non_searchable_columns() {
        let mut t = co2e_table(vec![
            Record::new().with("name", "alpha").with("co2e", 42.0),
            Record::new().with("name", "beta").with("co2e", 7.0),
        ]);
        t.search("42");
        assert_eq!(t.visible_len(), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn search_resets_page_and_keeps_sort() {
        let mut t = co2e_table(numbered(30));
        t.click_header(0);
        t.go_to_page(2);
        t.search("user0");
        assert_eq!(t.current_page(), 1);
        assert_eq!(names(&t)[0], "user029");
    }

    #[test]
    fn no_match_has_no_pages() {
        let mut t = co2e_table(numbered(5));
        t.search("zz");
        assert!(t.is_empty());
        assert_eq!(t.page_count(), 0);
        assert!(t.page_links().is_empty());
        assert!(t.page_rows().is_empty());
    }

    #[test]
    fn page_count_is_ceiling() {
        for (n, pages) in [(0, 0), (1, 1), (10, 1), (11, 2), (23, 3), (50, 5)] {
            assert_eq!(co2e_table(numbered(n)).page_count(), pages, "n = {n}");
        }
    }

    #[test]
    fn first_page_is_first_ten() {
        let t = co2e_table(numbered(23));
        let expected: Vec<String> = (0..10).map(|i| format!("user{:03}", i)).collect();
        assert_eq!(names(&t), expected);
    }

    #[test]
    fn page_links_without_ellipsis() {
        let t = co2e_table(numbered(23));
        assert_eq!(render_links(&t.page_links()), "1 2 3");
        assert_eq!(
            t.page_links()[0],
            PageLink::Page {
                number: 1,
                active: true
            }
        );
    }

    #[test]
    fn page_links_collapse_runs() {
        let mut t = co2e_table(numbered(50));
        t.go_to_page(5);
        assert_eq!(render_links(&t.page_links()), "1 … 4 5");

        t.go_to_page(1);
        assert_eq!(render_links(&t.page_links()), "1 2 … 5");

        let mut t = co2e_table(numbered(100));
        t.go_to_page(5);
        assert_eq!(render_links(&t.page_links()), "1 … 4 5 6 … 10");
    }

    #[test]
    fn page_change_does_not_resort() {
        let mut t = co2e_table(numbered(15));
        t.go_to_page(2);
        assert_eq!(names(&t), ["user010", "user011", "user012", "user013", "user014"]);
        t.go_to_page(99);
        assert_eq!(t.current_page(), 2);
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut t = co2e_table(numbered(42));
        t.search("user");
        t.go_to_page(3);
        assert_eq!(t.page_rows(), t.page_rows());
        assert_eq!(t.page_links(), t.page_links());
    }

    #[test]
    fn cells_use_column_renderer() {
        let t = TableState::new(
            vec![
                Column::new("Name", "name").render(|v, _| format!("[{}]", v)),
                Column::new("CO2e", "co2e"),
            ],
            vec![Record::new().with("name", "x").with("co2e", 1.5)],
            TableOptions::default(),
        );
        assert_eq!(t.page_rows(), vec![vec!["[x]".to_string(), "1.5".to_string()]]);
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let mut source = numbered(3);
        let t = co2e_table(source.clone());
        source.clear();
        assert_eq!(t.total_len(), 3);
    }
}
