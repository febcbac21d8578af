//! Terminal dashboard for review exploration
//!
//! Single screen: filter sidebar on the left, summary banner, metric cards,
//! charts, sample table, and keyword panels on the right. Every filter
//! interaction triggers one synchronous recompute pass
//! (cache → filter → aggregate → render).

pub mod ui;

use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Days, Months, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use reviewpulse_core::{
    keyword_corpus, monthly_trend, platform_histogram, rating_histogram, sample_most_recent,
    MonthCount, PlatformBucket, RatingBucket, ReviewSummary, Sentiment,
};
use reviewpulse_filters::{FilterSpec, KeywordExtractor};
use reviewpulse_formats::{cached_reviews, ReviewRecord};

/// Keywords shown per sentiment panel
const PANEL_KEYWORDS: usize = 20;

// ─── Dashboard state ─────────────────────────────────────────────────────────

/// Sidebar control the focus index resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    StartDate,
    EndDate,
    Platform(usize),
    Type(usize),
    RatingMin,
    RatingMax,
}

/// Aggregates recomputed from the current filtered subset
pub struct DashboardView {
    pub summary: ReviewSummary,
    pub ratings: Vec<RatingBucket>,
    pub platforms: Vec<PlatformBucket>,
    pub trend: Vec<MonthCount>,
    pub sample_order: Vec<usize>,
    pub positive_keywords: Vec<(String, usize)>,
    pub negative_keywords: Vec<(String, usize)>,
    pub filtered: Vec<ReviewRecord>,
}

impl DashboardView {
    fn compute(filtered: Vec<ReviewRecord>, extractor: &KeywordExtractor) -> Self {
        let summary = ReviewSummary::compute(&filtered);
        let ratings = rating_histogram(&filtered);
        let platforms = platform_histogram(&filtered);
        let trend = monthly_trend(&filtered);
        let sample_order = sample_most_recent(&filtered);
        let positive_keywords = extractor.top_keywords(
            &keyword_corpus(&filtered, Sentiment::Positive),
            PANEL_KEYWORDS,
        );
        let negative_keywords = extractor.top_keywords(
            &keyword_corpus(&filtered, Sentiment::Negative),
            PANEL_KEYWORDS,
        );
        Self {
            summary,
            ratings,
            platforms,
            trend,
            sample_order,
            positive_keywords,
            negative_keywords,
            filtered,
        }
    }
}

pub struct App {
    pub source: PathBuf,
    dataset: Arc<Vec<ReviewRecord>>,
    defaults: FilterSpec,
    extractor: KeywordExtractor,
    // sidebar option lists, fixed for the session
    pub platform_options: Vec<String>,
    pub type_options: Vec<String>,
    date_min: NaiveDate,
    date_max: NaiveDate,
    rating_domain: (i64, i64),
    // current filter state and derived view
    pub spec: FilterSpec,
    pub swapped_notice: bool,
    pub view: DashboardView,
    // UI
    pub focused: usize,
    pub table_offset: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(source: PathBuf, dataset: Arc<Vec<ReviewRecord>>) -> Self {
        let defaults = FilterSpec::defaults_for(&dataset);
        let extractor = KeywordExtractor::new();

        let dates: Vec<NaiveDate> = dataset
            .iter()
            .filter_map(|r| r.published_date.map(|ts| ts.date()))
            .collect();
        let date_min = dates.iter().min().copied().unwrap_or(defaults.start_date);
        let date_max = dates.iter().max().copied().unwrap_or(defaults.end_date);

        let mut app = Self {
            source,
            platform_options: defaults.platforms.iter().cloned().collect(),
            type_options: defaults.types.iter().cloned().collect(),
            date_min,
            date_max,
            rating_domain: (defaults.rating_min, defaults.rating_max),
            spec: defaults.clone(),
            defaults,
            extractor,
            swapped_notice: false,
            view: DashboardView::compute(Vec::new(), &KeywordExtractor::new()),
            focused: 0,
            table_offset: 0,
            should_quit: false,
            dataset,
        };
        app.recompute();
        app
    }

    /// One full synchronous pass: normalize the date range, filter, and
    /// rebuild every aggregate view
    pub fn recompute(&mut self) {
        let (effective, swapped) = self.spec.normalized();
        self.swapped_notice = swapped;
        let filtered = effective.apply(&self.dataset);
        self.view = DashboardView::compute(filtered, &self.extractor);

        let rows = self.view.sample_order.len();
        if self.table_offset >= rows {
            self.table_offset = rows.saturating_sub(1);
        }
    }

    // ── Focus handling ──

    pub fn field_count(&self) -> usize {
        4 + self.platform_options.len() + self.type_options.len()
    }

    pub fn control_at(&self, index: usize) -> Control {
        let platforms = self.platform_options.len();
        let types = self.type_options.len();
        match index {
            0 => Control::StartDate,
            1 => Control::EndDate,
            i if i < 2 + platforms => Control::Platform(i - 2),
            i if i < 2 + platforms + types => Control::Type(i - 2 - platforms),
            i if i == 2 + platforms + types => Control::RatingMin,
            _ => Control::RatingMax,
        }
    }

    pub fn focused_control(&self) -> Control {
        self.control_at(self.focused)
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.field_count();
    }

    pub fn prev_field(&mut self) {
        if self.focused == 0 {
            self.focused = self.field_count() - 1;
        } else {
            self.focused -= 1;
        }
    }

    pub fn is_adjustable(&self) -> bool {
        matches!(
            self.focused_control(),
            Control::StartDate | Control::EndDate | Control::RatingMin | Control::RatingMax
        )
    }

    // ── Filter mutation ──

    /// Step the focused control by `delta` units (days or rating points)
    pub fn adjust(&mut self, delta: i64) {
        match self.focused_control() {
            Control::StartDate => {
                self.spec.start_date =
                    shift_days(self.spec.start_date, delta).clamp(self.date_min, self.date_max);
            }
            Control::EndDate => {
                self.spec.end_date =
                    shift_days(self.spec.end_date, delta).clamp(self.date_min, self.date_max);
            }
            Control::RatingMin => {
                let (domain_min, _) = self.rating_domain;
                self.spec.rating_min =
                    (self.spec.rating_min + delta).clamp(domain_min, self.spec.rating_max);
            }
            Control::RatingMax => {
                let (_, domain_max) = self.rating_domain;
                self.spec.rating_max =
                    (self.spec.rating_max + delta).clamp(self.spec.rating_min, domain_max);
            }
            _ => return,
        }
        self.recompute();
    }

    /// Month-sized step for the focused date control
    pub fn shift_month(&mut self, delta: i32) {
        let shift = |date: NaiveDate| {
            let shifted = if delta >= 0 {
                date.checked_add_months(Months::new(delta as u32))
            } else {
                date.checked_sub_months(Months::new((-delta) as u32))
            };
            shifted.unwrap_or(date)
        };
        match self.focused_control() {
            Control::StartDate => {
                self.spec.start_date = shift(self.spec.start_date).clamp(self.date_min, self.date_max);
            }
            Control::EndDate => {
                self.spec.end_date = shift(self.spec.end_date).clamp(self.date_min, self.date_max);
            }
            _ => return,
        }
        self.recompute();
    }

    /// Toggle membership of the focused platform or type
    pub fn toggle(&mut self) {
        match self.focused_control() {
            Control::Platform(i) => {
                let name = self.platform_options[i].clone();
                if !self.spec.platforms.remove(&name) {
                    self.spec.platforms.insert(name);
                }
            }
            Control::Type(i) => {
                let name = self.type_options[i].clone();
                if !self.spec.types.remove(&name) {
                    self.spec.types.insert(name);
                }
            }
            _ => return,
        }
        self.recompute();
    }

    pub fn scroll_table(&mut self, delta: i64) {
        let rows = self.view.sample_order.len();
        if rows == 0 {
            self.table_offset = 0;
            return;
        }
        let offset = self.table_offset as i64 + delta;
        self.table_offset = offset.clamp(0, rows as i64 - 1) as usize;
    }

    /// Restore the dataset-derived default filters
    pub fn reset(&mut self) {
        self.spec = self.defaults.clone();
        self.table_offset = 0;
        self.recompute();
    }
}

fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new((-delta) as u64))
    };
    shifted.unwrap_or(date)
}

// ─── Entry point ─────────────────────────────────────────────────────────────

pub fn run_tui(input: PathBuf) -> Result<()> {
    // Load before touching the terminal so a failure prints normally and
    // nothing partial is rendered
    let dataset = cached_reviews(&input)
        .with_context(|| format!("Failed to load reviews from {}", input.display()))?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(input, dataset);
    let res = event_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // 50 ms tick keeps the UI responsive without burning CPU
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl-C always quits
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                handle_key(app, key.code);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.next_field(),
        KeyCode::BackTab => app.prev_field(),
        KeyCode::Up => {
            if app.is_adjustable() {
                app.adjust(1);
            } else {
                app.prev_field();
            }
        }
        KeyCode::Down => {
            if app.is_adjustable() {
                app.adjust(-1);
            } else {
                app.next_field();
            }
        }
        KeyCode::Left => app.shift_month(-1),
        KeyCode::Right => app.shift_month(1),
        KeyCode::Char(' ') => app.toggle(),
        KeyCode::Char('j') => app.scroll_table(1),
        KeyCode::Char('k') => app.scroll_table(-1),
        KeyCode::PageDown => app.scroll_table(10),
        KeyCode::PageUp => app.scroll_table(-10),
        KeyCode::Char('r') => app.reset(),
        _ => {}
    }
}
