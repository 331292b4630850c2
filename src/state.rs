use std::path::PathBuf;
use std::thread;

use anyhow::Result;
use crossbeam_channel::{Receiver, TryRecvError};

use crate::config::{ColumnNames, DEFAULT_PAGE_SIZE};
use crate::data::filter::{FilterCriteria, ScoreRange, filtered_positions};
use crate::data::loader::load_file;
use crate::data::model::{Dataset, Record};
use crate::paginate::{self, page};
use crate::selection::{ChartSeries, Selection};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A committed change of one filter control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Category(String),
    Sentiment(ScoreRange),
    Subjectivity(ScoreRange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
}

/// Lifecycle of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// A dataset load is in flight (or failed; see `status_message`).
    Loading,
    Ready,
}

// ---------------------------------------------------------------------------
// Table view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub text: String,
}

/// Everything the table and its pager draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub page_number: usize,
    pub total_pages: usize,
    pub label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            page_number: 1,
            total_pages: 0,
            label: "No data".to_string(),
            prev_enabled: false,
            next_enabled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Every reaction runs to completion and leaves `chart` and `table` in sync
/// with the filter, selection and page.
pub struct AppState {
    pub phase: Phase,

    /// Loaded dataset (None until the first load completes).
    pub dataset: Option<Dataset>,

    /// Active filter controls.
    pub criteria: FilterCriteria,

    /// Positions (into `dataset.records()`) of records passing the filter.
    filtered: Vec<usize>,

    selection: Selection,

    /// 1-based current table page.
    page_number: usize,
    page_size: usize,

    chart: ChartSeries,
    table: TableView,

    /// Column names handed to the loader.
    pub columns: ColumnNames,

    /// Path of the dataset currently loaded or loading.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pending: Option<Receiver<Result<Dataset>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ColumnNames::default(), DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new(columns: ColumnNames, page_size: usize) -> Self {
        Self {
            phase: Phase::Idle,
            dataset: None,
            criteria: FilterCriteria::for_category(""),
            filtered: Vec::new(),
            selection: Selection::default(),
            page_number: 1,
            page_size: page_size.max(1),
            chart: ChartSeries::default(),
            table: TableView::default(),
            columns,
            source: None,
            status_message: None,
            pending: None,
        }
    }

    // -- Loading --------------------------------------------------------

    /// Start loading `path` on a worker thread. A load already in flight is
    /// abandoned; its result is dropped.
    pub fn begin_loading(&mut self, path: PathBuf) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let columns = self.columns.clone();
        let worker_path = path.clone();
        thread::spawn(move || {
            let result = load_file(&worker_path, &columns);
            // The receiver is gone when a newer load superseded this one.
            let _ = tx.send(result);
        });

        log::info!("Loading {}", path.display());
        self.source = Some(path);
        self.pending = Some(rx);
        self.status_message = None;
        self.phase = Phase::Loading;
    }

    /// Check whether the in-flight load has finished. Returns `true` when a
    /// dataset was installed.
    pub fn poll_loading(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                log::error!("Dataset loader stopped without a result");
                self.status_message = Some("Error: dataset loader stopped unexpectedly".into());
                self.pending = None;
                return false;
            }
        };
        self.pending = None;

        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records ({} dropped) in categories {:?}",
                    dataset.len(),
                    dataset.dropped(),
                    dataset.categories()
                );
                self.set_dataset(dataset);
                true
            }
            Err(e) => {
                // No retry: the dashboard stays in `Loading` until another
                // file is opened.
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Ingest a loaded dataset: first category, full score ranges, then the
    /// same reaction as a control change.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let first = dataset.categories().first().cloned().unwrap_or_default();
        self.criteria = FilterCriteria::for_category(first);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.phase = Phase::Ready;
        self.refilter();
    }

    // -- Reactions ------------------------------------------------------

    /// Filter controls changed: re-filter, redraw the chart, drop the
    /// selection and return to page 1.
    pub fn on_control_change(&mut self, change: ControlChange) {
        if self.phase != Phase::Ready {
            return;
        }
        log::debug!("Control change: {change:?}");
        match change {
            ControlChange::Category(c) => self.criteria.category = c,
            ControlChange::Sentiment(r) => self.criteria.sentiment = r,
            ControlChange::Subjectivity(r) => self.criteria.subjectivity = r,
        }
        self.refilter();
    }

    /// The chart reported a region selection. An empty list clears it.
    pub fn on_selection_event(&mut self, ids: &[usize]) {
        if self.phase != Phase::Ready {
            return;
        }
        log::debug!("Selection event with {} points", ids.len());
        self.selection.set(ids.iter().copied());
        self.page_number = 1;
        self.rebuild_table();
    }

    /// Prev / next page. Out-of-range moves are ignored.
    pub fn on_page_nav(&mut self, nav: PageNav) {
        if self.phase != Phase::Ready {
            return;
        }
        match nav {
            PageNav::Prev if self.table.prev_enabled => {
                self.page_number = paginate::prev(self.page_number);
            }
            PageNav::Next if self.table.next_enabled => {
                self.page_number = paginate::next(self.page_number);
            }
            _ => return,
        }
        self.rebuild_table();
    }

    // -- Derived views ----------------------------------------------------

    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Records currently passing the filter, in dataset order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> + '_ {
        let records = self.dataset.as_ref().map(|ds| ds.records()).unwrap_or(&[]);
        self.filtered.iter().map(move |&i| &records[i])
    }

    /// Records the table lists: the selected ones, or every filtered record
    /// while nothing is selected.
    pub fn shown_records(&self) -> Vec<&Record> {
        if self.selection.is_empty() {
            self.filtered_records().collect()
        } else {
            self.filtered_records()
                .filter(|r| self.selection.contains(r.index))
                .collect()
        }
    }

    // -- Internals ----------------------------------------------------------

    fn refilter(&mut self) {
        self.filtered = match &self.dataset {
            Some(ds) => filtered_positions(ds.records(), &self.criteria),
            None => Vec::new(),
        };
        self.rebuild_chart();
        self.selection.clear();
        self.page_number = 1;
        self.rebuild_table();
    }

    fn rebuild_chart(&mut self) {
        let mut chart = ChartSeries::default();
        for rec in self.filtered_records() {
            chart.x.push(rec.x);
            chart.y.push(rec.y);
            chart.record_id.push(rec.index);
        }
        self.chart = chart;
    }

    fn rebuild_table(&mut self) {
        let shown = self.shown_records();
        let p = page(&shown, self.page_number, self.page_size);
        let table = TableView {
            rows: p
                .items
                .iter()
                .map(|r| TableRow {
                    index: r.index,
                    text: r.text.clone(),
                })
                .collect(),
            page_number: p.page_number,
            total_pages: p.total_pages,
            label: p.label(),
            prev_enabled: p.page_number > 1,
            next_enabled: !shown.is_empty() && p.page_number < p.total_pages,
        };
        self.table = table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Cell, RawRow};

    fn raw(cat: &str, text: &str, sent: f64, subj: f64) -> RawRow {
        RawRow {
            category: Cell::String(cat.into()),
            text: Cell::String(text.into()),
            sentiment: Cell::Float(sent),
            subjectivity: Cell::Float(subj),
            dim1: Cell::Float(sent),
            dim2: Cell::Float(subj),
        }
    }

    fn ready(rows: Vec<RawRow>, page_size: usize) -> AppState {
        let mut state = AppState::new(ColumnNames::default(), page_size);
        state.set_dataset(Dataset::load(rows));
        state
    }

    fn many(cat: &str, n: usize) -> Vec<RawRow> {
        (0..n).map(|i| raw(cat, &format!("t{i}"), 0.0, 0.5)).collect()
    }

    fn shown_ids(state: &AppState) -> Vec<usize> {
        state.shown_records().iter().map(|r| r.index).collect()
    }

    #[test]
    fn starts_idle_and_ignores_events() {
        let mut state = AppState::default();
        assert_eq!(state.phase, Phase::Idle);
        state.on_selection_event(&[1]);
        state.on_page_nav(PageNav::Next);
        state.on_control_change(ControlChange::Category("Jan".into()));
        assert!(state.selection().is_empty());
        assert_eq!(state.criteria.category, "");
        assert_eq!(state.table().label, "No data");
    }

    #[test]
    fn dataset_selects_first_category_and_full_ranges() {
        let state = ready(vec![raw("Mar", "a", 0.0, 0.0), raw("Feb", "b", 0.0, 0.0)], 10);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.criteria, FilterCriteria::for_category("Feb"));
        assert_eq!(state.chart().record_id, vec![1]);
    }

    #[test]
    fn table_shows_filtered_set_before_any_selection() {
        let state = ready(many("Jan", 3), 10);
        assert_eq!(shown_ids(&state), vec![0, 1, 2]);
        assert_eq!(state.table().rows.len(), 3);
        assert_eq!(state.table().label, "Page 1 of 1");
    }

    #[test]
    fn selection_narrows_table_and_resets_page() {
        let mut state = ready(many("Jan", 25), 10);
        state.on_page_nav(PageNav::Next);
        assert_eq!(state.page_number(), 2);

        state.on_selection_event(&[3, 4, 22]);
        assert_eq!(state.page_number(), 1);
        assert_eq!(shown_ids(&state), vec![3, 4, 22]);
        assert_eq!(state.table().label, "Page 1 of 1");
    }

    #[test]
    fn empty_selection_event_falls_back_to_filtered_set() {
        let mut state = ready(many("Jan", 4), 10);
        state.on_selection_event(&[1]);
        assert_eq!(shown_ids(&state), vec![1]);

        state.on_selection_event(&[]);
        assert!(state.selection().is_empty());
        assert_eq!(shown_ids(&state), vec![0, 1, 2, 3]);
    }

    #[test]
    fn selection_outside_filtered_set_shows_no_data() {
        let mut state = ready(many("Jan", 4), 10);
        state.on_selection_event(&[99]);
        assert!(state.table().rows.is_empty());
        assert_eq!(state.table().label, "No data");
        assert!(!state.table().prev_enabled);
        assert!(!state.table().next_enabled);
    }

    #[test]
    fn control_change_clears_selection_and_page() {
        let mut rows = many("Jan", 15);
        rows.extend(many("Feb", 3));
        let mut state = ready(rows, 10);
        state.on_control_change(ControlChange::Category("Jan".into()));
        state.on_selection_event(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        state.on_page_nav(PageNav::Next);
        assert_eq!(state.page_number(), 2);

        // Same category again: the filtered set still holds the selection.
        state.on_control_change(ControlChange::Category("Jan".into()));
        assert!(state.selection().is_empty());
        assert_eq!(state.page_number(), 1);
        assert_eq!(shown_ids(&state).len(), 15);
    }

    #[test]
    fn range_change_refilters_chart() {
        let mut state = ready(
            vec![raw("Jan", "a", -0.5, 0.2), raw("Jan", "b", 0.5, 0.8)],
            10,
        );
        state.on_control_change(ControlChange::Sentiment(ScoreRange::new(0.0, 1.0)));
        assert_eq!(state.chart().record_id, vec![1]);
        state.on_control_change(ControlChange::Subjectivity(ScoreRange::new(0.0, 0.5)));
        assert!(state.chart().is_empty());
        assert_eq!(state.table().label, "No data");
    }

    #[test]
    fn page_navigation_is_clamped() {
        let mut state = ready(many("Jan", 21), 10);
        assert!(!state.table().prev_enabled);
        state.on_page_nav(PageNav::Prev);
        assert_eq!(state.page_number(), 1);

        state.on_page_nav(PageNav::Next);
        state.on_page_nav(PageNav::Next);
        assert_eq!(state.table().label, "Page 3 of 3");
        assert_eq!(state.table().rows.len(), 1);
        assert!(!state.table().next_enabled);

        state.on_page_nav(PageNav::Next);
        assert_eq!(state.page_number(), 3);

        state.on_page_nav(PageNav::Prev);
        assert_eq!(state.page_number(), 2);
        assert!(state.table().prev_enabled && state.table().next_enabled);
    }

    #[test]
    fn page_navigation_keeps_selection_and_filter() {
        let mut state = ready(many("Jan", 30), 10);
        state.on_selection_event(&(5..25).collect::<Vec<_>>());
        state.on_page_nav(PageNav::Next);
        assert_eq!(state.selection().current().len(), 20);
        assert_eq!(state.table().rows[0].index, 15);
        assert_eq!(state.chart().len(), 30);
    }

    #[test]
    fn empty_dataset_is_ready_with_no_data() {
        let state = ready(Vec::new(), 10);
        assert_eq!(state.phase, Phase::Ready);
        assert!(state.chart().is_empty());
        assert_eq!(state.table().label, "No data");
    }

    #[test]
    fn dead_loader_reports_error_and_stays_loading() {
        let mut state = AppState::default();
        let (tx, rx) = crossbeam_channel::bounded::<Result<Dataset>>(1);
        drop(tx);
        state.pending = Some(rx);
        state.phase = Phase::Loading;

        assert!(!state.poll_loading());
        assert_eq!(state.phase, Phase::Loading);
        assert!(!state.is_loading());
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }
}
