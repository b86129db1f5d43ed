use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::archive_panel::ArchivePanel;
use crate::components::sheets_panel::SheetsPanel;
use crate::state::app_state::{Focus, SEASONS};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::outcome::{self, AnalysisOutcome};
use crate::ui::layout::LayoutAreas;
use scout_api::SetupResult;

static TABS: &[&str; 2] = &["Setup", "Field Map"];

/// Entries shown on the analysis card before collapsing into "+N more".
const FIELD_ELEMENT_PREVIEW: usize = 3;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::SetupWizard => {
                    draw_wizard(f, layout.main, app);
                    draw_side_panels(f, layout.side, app);
                }
                MenuItem::FieldMap => draw_field_map(f, layout.content),
                MenuItem::Help => draw_placeholder(
                    f,
                    layout.content,
                    "Help: q=quit  1=Setup  2=Field Map  Tab=next control  h/l=season  j/k=move  \
                     i=edit URL  s=submit  Enter=submit/continue  a=archive  o=restore  g=sheets  \
                     \"=logs  f=fullscreen",
                ),
            }

            if app.state.show_logs {
                draw_logs(f, layout.main);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn focus_color(app: &App, focus: Focus) -> Color {
    if app.state.focus == focus { Color::Yellow } else { Color::DarkGray }
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::SetupWizard => 0,
        MenuItem::FieldMap => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = tui::widgets::Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Wizard — form branch or result branch, chosen solely by the setup phase
// ---------------------------------------------------------------------------

fn draw_wizard(f: &mut Frame, area: Rect, app: &App) {
    match app.state.wizard.phase.result() {
        Some(result) => draw_result(f, area, app, result),
        None => draw_form(f, area, app),
    }
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Event Setup ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 12 {
        f.render_widget(
            Paragraph::new("Terminal too small for the setup form")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let [year_area, events_area, url_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(2),
    ])
    .areas(inner);

    draw_year_selector(f, year_area, app);
    draw_event_selector(f, events_area, app);
    draw_url_field(f, url_area, app);
    draw_form_status(f, status_area, app);
}

fn draw_year_selector(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(focus_color(app, Focus::Year)).title(" Season ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut spans = Vec::with_capacity(SEASONS.len() * 2);
    for year in SEASONS {
        let style = if year == app.state.wizard.year {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {year} "), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled("(h/l to change)", Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_event_selector(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(focus_color(app, Focus::Events)).title(" Event ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let wizard = &app.state.wizard;

    // Loading and failure replace the selector inline; the rest of the
    // form stays usable either way.
    if wizard.events_loading {
        f.render_widget(
            Paragraph::new("Loading events...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    if let Some(err) = wizard.events_error.as_deref() {
        f.render_widget(
            Paragraph::new(format!("Could not load events: {err}\nChange the season to retry"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    if wizard.list.groups.is_empty() {
        f.render_widget(
            Paragraph::new("No events for this season")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Grouped list with section headers; track which display line carries
    // the selection so the window can keep it visible.
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    let mut flat_idx = 0usize;
    for group in &wizard.list.groups {
        lines.push(Line::from(Span::styled(
            group.label.to_uppercase(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for event in &group.events {
            let is_selected = wizard.selected == Some(flat_idx);
            let marker = if is_selected { '>' } else { ' ' };
            let style = if is_selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            if is_selected {
                selected_line = lines.len();
            }
            let entry = format!("{marker} {} - {}", event.name, event.location);
            let clipped: String = entry.chars().take(inner.width as usize).collect();
            lines.push(Line::from(Span::styled(clipped, style)));
            flat_idx += 1;
        }
    }

    let visible = inner.height as usize;
    let start = selected_line.saturating_sub(visible.saturating_sub(1));
    let window: Vec<Line> = lines.into_iter().skip(start).take(visible).collect();
    f.render_widget(Paragraph::new(window), inner);
}

fn draw_url_field(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(focus_color(app, Focus::ManualUrl)).title(" Game Manual URL ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let wizard = &app.state.wizard;
    let value_line = if wizard.editing_url {
        Line::from(Span::styled(
            format!("> {}_", wizard.manual_url),
            Style::default().fg(Color::Yellow),
        ))
    } else if wizard.manual_url.is_empty() {
        Line::from(Span::styled("(none)", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::raw(wizard.manual_url.clone()))
    };

    let hint = Line::from(Span::styled(
        "Optional. Paste a manual PDF link, or leave blank to use the season default.",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(vec![value_line, hint]), inner);
}

fn draw_form_status(f: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.state.wizard;

    let mut lines = Vec::with_capacity(2);
    if let Some(err) = wizard.phase.error() {
        lines.push(Line::from(Span::styled(
            format!("✗ Setup failed: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let submit = if wizard.phase.is_submitting() {
        Span::styled("Submitting setup...", Style::default().fg(Color::DarkGray))
    } else if !wizard.can_submit() {
        Span::styled("[ Start Setup ]", Style::default().fg(Color::DarkGray))
    } else if app.state.focus == Focus::Submit {
        Span::styled(
            "[ Start Setup ]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Start Setup ]", Style::default().fg(Color::White))
    };
    lines.push(Line::from(vec![
        submit,
        Span::styled("   Tab=next field  s=submit", Style::default().fg(Color::DarkGray)),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Result branch
// ---------------------------------------------------------------------------

/// Badge color per analysis outcome. Must stay in lock-step with the
/// classifier's label set.
fn outcome_color(outcome: AnalysisOutcome) -> Color {
    match outcome {
        AnalysisOutcome::None => Color::DarkGray,
        AnalysisOutcome::Warning => Color::Yellow,
        AnalysisOutcome::Cached => Color::Cyan,
        AnalysisOutcome::Basic => Color::Blue,
        AnalysisOutcome::Error => Color::Red,
        AnalysisOutcome::Full => Color::Green,
        AnalysisOutcome::Unknown => Color::DarkGray,
    }
}

fn draw_result(f: &mut Frame, area: Rect, app: &App, result: &SetupResult) {
    let block = default_border(Color::White).title(" Setup Summary ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let wizard = &app.state.wizard;
    let mut lines: Vec<Line> = Vec::new();

    // Event card. Display name resolves through the locally tracked list
    // and falls back to the raw key.
    match result.event_key.as_deref() {
        Some(key) => {
            let name = wizard.list.name_for(key).unwrap_or(key);
            lines.push(Line::from(vec![
                Span::styled("Event  ", Style::default().fg(Color::DarkGray)),
                Span::styled(name.to_owned(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Key    ", Style::default().fg(Color::DarkGray)),
                Span::raw(key.to_owned()),
                Span::styled("   Season ", Style::default().fg(Color::DarkGray)),
                Span::raw(wizard.year.to_string()),
            ]));
        }
        None => {
            lines.push(Line::from(vec![
                Span::styled("Event  ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("none — season-wide setup ({})", wizard.year),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
    }
    lines.push(Line::from(""));

    // Analysis card.
    let outcome = outcome::classify(Some(result));
    let color = outcome_color(outcome);
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}]", outcome.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Game: ", Style::default().fg(Color::DarkGray)),
        Span::raw(result.game_analysis.game_name.clone()),
    ]));
    lines.push(Line::from(Span::styled(
        outcome.summary(),
        Style::default().fg(color),
    )));

    if !result.game_analysis.field_elements.is_empty() {
        lines.push(Line::from(Span::raw(format_field_elements(
            &result.game_analysis.field_elements,
        ))));
    }

    let counts = result.game_analysis.variable_counts();
    if !counts.is_empty() {
        lines.push(Line::from(Span::styled(
            "Scouting variables",
            Style::default().fg(Color::DarkGray),
        )));
        for row in format_variable_columns(&counts) {
            lines.push(Line::from(Span::raw(row)));
        }
    }
    lines.push(Line::from(""));

    // Sample teams table.
    lines.push(Line::from(Span::styled(
        "Sample Teams",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        format!("{:>6}  {:<24} {:>7}", "#", "Team", "EPA"),
        Style::default().add_modifier(Modifier::UNDERLINED),
    )));
    for team in &result.sample_teams {
        let epa = team
            .epa_total
            .map(|e| format!("{e:.1}"))
            .unwrap_or_else(|| "N/A".to_owned());
        lines.push(Line::from(Span::raw(format!(
            "{:>6}  {:<24} {:>7}",
            team.team_number,
            truncate(&team.team_name, 24),
            epa
        ))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter=continue to field mapping   j/k=scroll",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.state.result_view.scroll_offset, 0)),
        inner,
    );
}

fn format_field_elements(elements: &[String]) -> String {
    let shown: Vec<&str> = elements
        .iter()
        .take(FIELD_ELEMENT_PREVIEW)
        .map(String::as_str)
        .collect();
    let rest = elements.len().saturating_sub(FIELD_ELEMENT_PREVIEW);
    if rest > 0 {
        format!("Field: {} +{rest} more", shown.join(", "))
    } else {
        format!("Field: {}", shown.join(", "))
    }
}

/// Two-column tally rows: "category: count" pairs, left column padded.
fn format_variable_columns(counts: &[(&str, usize)]) -> Vec<String> {
    counts
        .chunks(2)
        .map(|pair| {
            let left = format!("{}: {}", pair[0].0, pair[0].1);
            match pair.get(1) {
                Some((label, count)) => format!("  {left:<28} {label}: {count}"),
                None => format!("  {left}"),
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Side panels and auxiliary screens
// ---------------------------------------------------------------------------

fn draw_side_panels(f: &mut Frame, side: [Rect; 2], app: &App) {
    let wizard = &app.state.wizard;
    f.render_widget(
        ArchivePanel {
            event_key: wizard.effective_event_key(),
            year: wizard.year,
            last_action: app.state.archive.last_action.as_deref(),
            focused: app.state.focus == Focus::Archive,
        },
        side[0],
    );
    f.render_widget(
        SheetsPanel {
            event_key: wizard.effective_event_key(),
            year: wizard.year,
            last_change: app.state.sheets.last_change.as_deref(),
            focused: app.state.focus == Focus::Sheets,
        },
        side[1],
    );
}

fn draw_field_map(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Field Mapping ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(
            "Next step: map field element positions for the selected event.\n\
             Press 1 to return to setup.",
        )
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center),
        inner,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let [_, log_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(area);
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, log_area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
