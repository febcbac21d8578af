//! Rendering for the dashboard screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use super::{App, Control};

// ─── Colours ─────────────────────────────────────────────────────────────────

const ACCENT: Color = Color::Cyan;
const FOCUSED: Color = Color::Yellow;
const DIM: Color = Color::DarkGray;
const POSITIVE: Color = Color::Green;
const NEGATIVE: Color = Color::Red;
const BANNER_BG: Color = Color::Magenta;

// ─── Entry ───────────────────────────────────────────────────────────────────

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let source = app
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.source.display().to_string());
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" Review Pulse — {} ", source),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(outer, area);

    let inner = shrink(area, 1);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(inner);

    render_sidebar(f, app, columns[0]);
    render_main(f, app, columns[1]);
}

// ─── Filter sidebar ──────────────────────────────────────────────────────────

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(" Filters ", Style::default().fg(DIM)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(section("Date range"));
    lines.push(value_line(
        "Start",
        &app.spec.start_date.to_string(),
        app.focused_control() == Control::StartDate,
    ));
    lines.push(value_line(
        "End  ",
        &app.spec.end_date.to_string(),
        app.focused_control() == Control::EndDate,
    ));
    if app.swapped_notice {
        lines.push(Line::from(Span::styled(
            "Swapped dates so Start is before End.",
            Style::default().fg(FOCUSED),
        )));
    }
    lines.push(Line::from(""));

    lines.push(section("Platforms"));
    for (i, platform) in app.platform_options.iter().enumerate() {
        lines.push(check_line(
            platform,
            app.spec.platforms.contains(platform),
            app.focused_control() == Control::Platform(i),
        ));
    }
    lines.push(Line::from(""));

    lines.push(section("Review types"));
    for (i, kind) in app.type_options.iter().enumerate() {
        lines.push(check_line(
            kind,
            app.spec.types.contains(kind),
            app.focused_control() == Control::Type(i),
        ));
    }
    lines.push(Line::from(""));

    lines.push(section("Rating range"));
    lines.push(value_line(
        "Min  ",
        &app.spec.rating_min.to_string(),
        app.focused_control() == Control::RatingMin,
    ));
    lines.push(value_line(
        "Max  ",
        &app.spec.rating_max.to_string(),
        app.focused_control() == Control::RatingMax,
    ));

    lines.push(Line::from(""));
    for hint in [
        "[Tab] next  [Space] toggle",
        "[↑↓] adjust / move focus",
        "[←→] month step (dates)",
        "[j/k] scroll  [r] reset",
        "[q] quit",
    ] {
        lines.push(Line::from(Span::styled(hint, Style::default().fg(DIM))));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

/// "Label  [value]" row, brackets highlighted when focused
fn value_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let bracket_style = if focused {
        Style::default().fg(FOCUSED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };
    let value_style = if focused {
        Style::default().fg(FOCUSED)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("  {} ", label), Style::default().fg(DIM)),
        Span::styled("[", bracket_style),
        Span::styled(value.to_string(), value_style),
        Span::styled("]", bracket_style),
    ])
}

/// "[x] name" membership row
fn check_line(name: &str, checked: bool, focused: bool) -> Line<'static> {
    let bracket_style = if focused {
        Style::default().fg(FOCUSED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };
    let name_style = if focused {
        Style::default().fg(FOCUSED)
    } else if checked {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(DIM)
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled("[", bracket_style),
        Span::styled(
            if checked { "x" } else { " " },
            Style::default().fg(if checked { POSITIVE } else { DIM }),
        ),
        Span::styled("]", bracket_style),
        Span::raw(" "),
        Span::styled(name.to_string(), name_style),
    ])
}

// ─── Main pane ───────────────────────────────────────────────────────────────

fn render_main(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // banner
            Constraint::Length(3),  // metric cards
            Constraint::Length(10), // distribution charts
            Constraint::Length(8),  // trend
            Constraint::Min(5),     // sample table
            Constraint::Length(7),  // keyword panels
        ])
        .split(area);

    render_banner(f, app, rows[0]);
    render_metrics(f, app, rows[1]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    render_rating_chart(f, app, charts[0]);
    render_platform_bars(f, app, charts[1]);

    render_trend(f, app, rows[3]);
    render_table(f, app, rows[4]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[5]);
    keyword_panel(
        f,
        panels[0],
        " Positive keywords (4-5) ",
        &app.view.positive_keywords,
        POSITIVE,
    );
    keyword_panel(
        f,
        panels[1],
        " Negative keywords (1-2) ",
        &app.view.negative_keywords,
        NEGATIVE,
    );
}

fn render_banner(f: &mut Frame, app: &App, area: Rect) {
    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", app.view.summary.banner()),
        Style::default()
            .fg(Color::White)
            .bg(BANNER_BG)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(banner, area);
}

fn render_metrics(f: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let summary = &app.view.summary;
    let average = summary
        .average_rating
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string());
    let median = summary
        .median_helpful_votes
        .map(|v| format!("{:.0}", v))
        .unwrap_or_else(|| "N/A".to_string());

    metric_card(f, cards[0], "Reviews", &fmt_num(summary.total_count));
    metric_card(f, cards[1], "Average rating", &average);
    metric_card(f, cards[2], "Median helpful votes", &median);
}

fn metric_card(f: &mut Frame, area: Rect, title: &str, value: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(DIM),
        ));
    let paragraph = Paragraph::new(Span::styled(
        value.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(paragraph, area);
}

fn render_rating_chart(f: &mut Frame, app: &App, area: Rect) {
    let block = chart_block(" Rating distribution ");
    if app.view.ratings.is_empty() {
        empty_panel(f, area, block);
        return;
    }

    let labels: Vec<(String, u64)> = app
        .view
        .ratings
        .iter()
        .map(|bucket| {
            let label = bucket
                .rating
                .map(|v| v.to_string())
                .unwrap_or_else(|| "n/a".to_string());
            (label, bucket.count as u64)
        })
        .collect();
    let data: Vec<(&str, u64)> = labels.iter().map(|(l, c)| (l.as_str(), *c)).collect();

    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(ACCENT))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(chart, area);
}

fn render_platform_bars(f: &mut Frame, app: &App, area: Rect) {
    let block = chart_block(" Reviews by platform ");
    if app.view.platforms.is_empty() {
        empty_panel(f, area, block);
        return;
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let max = app
        .view
        .platforms
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(1)
        .max(1);
    let bar_space = inner.width.saturating_sub(22) as usize;

    let lines: Vec<Line> = app
        .view
        .platforms
        .iter()
        .take(inner.height as usize)
        .map(|bucket| {
            let width = (bucket.count * bar_space).div_ceil(max);
            Line::from(vec![
                Span::styled(
                    format!("{:<12} ", truncate(&bucket.platform, 12)),
                    Style::default().fg(DIM),
                ),
                Span::styled("█".repeat(width), Style::default().fg(FOCUSED)),
                Span::raw(format!(" {}", bucket.count)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_trend(f: &mut Frame, app: &App, area: Rect) {
    let block = chart_block(" Review volume over time ");
    let trend = &app.view.trend;
    if trend.is_empty() {
        empty_panel(f, area, block);
        return;
    }

    let points: Vec<(f64, f64)> = trend
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.count as f64))
        .collect();
    let max_count = trend.iter().map(|p| p.count).max().unwrap_or(1).max(1) as f64;
    let x_max = (trend.len().saturating_sub(1)).max(1) as f64;

    let month_label = |i: usize| trend[i].month.format("%Y-%m").to_string();
    let x_labels = if trend.len() > 2 {
        vec![
            month_label(0),
            month_label(trend.len() / 2),
            month_label(trend.len() - 1),
        ]
    } else {
        vec![month_label(0), month_label(trend.len() - 1)]
    };
    let y_labels = vec![
        "0".to_string(),
        format!("{:.0}", max_count / 2.0),
        format!("{:.0}", max_count),
    ];

    let dataset = Dataset::default()
        .name("reviews")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(POSITIVE))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(DIM))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(DIM))
                .bounds([0.0, max_count])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let total = app.view.sample_order.len();
    let visible = area.height.saturating_sub(3) as usize;
    let first = if total == 0 { 0 } else { app.table_offset + 1 };
    let last = (app.table_offset + visible).min(total);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(
            format!(" Sample reviews — newest first ({first}-{last} of {total}) "),
            Style::default().fg(DIM),
        ));

    let header = Row::new(["Published", "Rating", "Title", "Text", "Type", "Platform"])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let rows = app
        .view
        .sample_order
        .iter()
        .skip(app.table_offset)
        .take(visible)
        .map(|&i| {
            let r = &app.view.filtered[i];
            Row::new(vec![
                r.published_date
                    .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "—".to_string()),
                r.rating
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "—".to_string()),
                truncate(r.title.as_deref().unwrap_or(""), 24),
                truncate(r.text.as_deref().unwrap_or(""), 60),
                r.review_type.clone(),
                r.published_platform.clone(),
            ])
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(6),
            Constraint::Percentage(22),
            Constraint::Percentage(48),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1);

    f.render_widget(table, area);
}

fn keyword_panel(
    f: &mut Frame,
    area: Rect,
    title: &str,
    keywords: &[(String, usize)],
    color: Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    if keywords.is_empty() {
        empty_panel(f, area, block);
        return;
    }

    // Weight style by frequency relative to the top keyword
    let max = keywords.first().map(|(_, c)| *c).unwrap_or(1).max(1);
    let mut spans: Vec<Span> = Vec::new();
    for (word, count) in keywords {
        let style = if count * 3 >= max * 2 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if count * 2 >= max {
            Style::default().fg(color)
        } else {
            Style::default().fg(DIM)
        };
        spans.push(Span::styled(word.to_string(), style));
        spans.push(Span::styled(
            format!(" ({})  ", count),
            Style::default().fg(DIM),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

// ─── Widget helpers ──────────────────────────────────────────────────────────

fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(ACCENT),
        ))
}

fn empty_panel(f: &mut Frame, area: Rect, block: Block) {
    let paragraph = Paragraph::new(Span::styled("No data", Style::default().fg(DIM)))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}

fn shrink(r: Rect, by: u16) -> Rect {
    Rect {
        x: r.x + by,
        y: r.y + by,
        width: r.width.saturating_sub(by * 2),
        height: r.height.saturating_sub(by * 2),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}
