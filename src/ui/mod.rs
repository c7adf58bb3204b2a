mod components;

use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Section};
use crate::theme::Theme;
use components::{capitalize, spinner};

// Load theme once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn danger() -> Color { theme().danger }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn inactive() -> Color { theme().inactive }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(2), // Header (title + subtitle)
            Constraint::Length(1), // Info line
            Constraint::Length(6), // Question box
            Constraint::Length(3), // Local LLM toggle box (one-liner with border)
            Constraint::Min(5),    // Response / error area
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_header(f, chunks[0]);
    draw_info_line(f, app, chunks[1]);
    draw_question_box(f, app, chunks[2]);
    draw_toggle_box(f, app, chunks[3]);
    draw_output_area(f, app, chunks[4]);
    draw_footer(f, app, chunks[5]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Vernacular Language Translator",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Ask any question and get AI-powered insights",
            Style::default().fg(text_dim()),
        )),
    ];

    let title = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: loading spinner > last error hint > ready
    let line = if app.is_loading() {
        Line::from(vec![
            Span::styled(spinner(app.spinner_frame), Style::default().fg(warning())),
            Span::styled(" Generating...", Style::default().fg(warning())),
        ])
    } else if app.error.is_some() {
        Line::from(Span::styled(
            "Request failed — edit the question and press Enter to retry",
            Style::default().fg(text_dim()),
        ))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(text_dim())))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_question_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::Question;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Question ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let content = if app.question.is_empty() && !is_active {
        Line::from(Span::styled(
            "Enter your question here...",
            Style::default().fg(text_dim()),
        ))
    } else {
        let cursor = if is_active && !app.is_loading() { "_" } else { "" };
        let question_style = if app.is_loading() {
            Style::default().fg(text_dim())
        } else {
            Style::default().fg(text())
        };
        Line::from(vec![
            Span::styled(app.question.as_str(), question_style),
            Span::styled(cursor, Style::default().fg(accent())),
        ])
    };

    let input = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(input, area);
}

fn draw_toggle_box(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.section == Section::LocalLlm;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let block = Block::default()
        .title(Span::styled(" Use Local LLM ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let (state_text, state_color, description) = if app.use_local_llm {
        ("ON ", success(), "Using local LLM for generation")
    } else {
        ("OFF", text_dim(), "Using cloud AI services")
    };

    let mut spans = vec![
        Span::styled("  [", Style::default().fg(text_dim())),
        Span::styled(state_text, Style::default().fg(state_color).add_modifier(Modifier::BOLD)),
        Span::styled("] ", Style::default().fg(text_dim())),
        Span::styled(description, Style::default().fg(text())),
    ];

    if is_active && !app.is_loading() {
        spans.extend([
            Span::styled(" │ ", Style::default().fg(inactive())),
            Span::styled("Space", Style::default().fg(accent())),
            Span::styled(" toggle", Style::default().fg(text_dim())),
        ]);
    }

    let content = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(content, area);
}

fn draw_output_area(f: &mut Frame, app: &App, area: Rect) {
    if let Some(ref error) = app.error {
        draw_error_alert(f, error, area);
    } else if app.response.is_some() {
        draw_response_card(f, app, area);
    } else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Answers will appear here",
            Style::default().fg(text_dim()),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(inactive())),
        );
        f.render_widget(placeholder, area);
    }
}

fn draw_error_alert(f: &mut Frame, error: &str, area: Rect) {
    let alert = Paragraph::new(Line::from(vec![
        Span::styled("✗ ", Style::default().fg(danger())),
        Span::styled(error, Style::default().fg(danger())),
    ]))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .title(Span::styled(
                " Error ",
                Style::default().fg(danger()).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(danger())),
    );

    f.render_widget(alert, area);
}

fn draw_response_card(f: &mut Frame, app: &App, area: Rect) {
    let Some(response) = app.response.as_ref() else {
        return;
    };

    let title = format!(" {} ", capitalize(&response.status));
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(success()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(success()));

    let mut lines = vec![
        Line::from(Span::styled(response.message.as_str(), Style::default().fg(text()))),
        Line::from(""),
        Line::from(Span::styled(
            "Generated Content:",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(
        response
            .data
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(text())))),
    );

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(card, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = if app.is_loading() {
        vec![("Ctrl+C", "Quit")]
    } else {
        match app.section {
            Section::Question if app.can_submit() => vec![
                ("Enter", "Generate"),
                ("Tab", "Toggle field"),
                ("Esc", "Clear"),
                ("Ctrl+C", "Quit"),
            ],
            Section::Question => vec![
                ("Tab", "Toggle field"),
                ("Esc", "Clear"),
                ("Ctrl+C", "Quit"),
            ],
            Section::LocalLlm => vec![
                ("Space", "Toggle"),
                ("Tab", "Question field"),
                ("Esc", "Clear"),
                ("Ctrl+C", "Quit"),
            ],
        }
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 50 { 2 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}
