use crate::core::history::Exchange;
use crate::core::state::App;
use crate::tui::TuiState;

use chrono::DateTime;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollbarVisibility};

/// Shown in the responses area when the history is empty.
pub const EMPTY_PLACEHOLDER: &str = "No recent responses to display...";

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

struct RenderedExchange<'a> {
    paragraph: Paragraph<'a>,
    height: u16,
}

impl<'a> RenderedExchange<'a> {
    fn new(exchange: &'a Exchange, window_area: Rect) -> Self {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    "Prompt:   ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(exchange.user_prompt.trim()),
            ]),
            Line::from(vec![
                Span::styled(
                    "Response: ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(exchange.prompt_response.trim()),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(format_created(exchange.created))
                    .border_style(Style::default().add_modifier(Modifier::DIM)),
            )
            .wrap(Wrap { trim: true });

        let inner_width = window_area.width.saturating_sub(2);
        let height = paragraph.line_count(inner_width) as u16;

        RenderedExchange { paragraph, height }
    }
}

fn format_created(created: i64) -> String {
    match DateTime::from_timestamp(created, 0) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => created.to_string(),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3), Length(1)]);
    let [title_area, main_area, input_area, status_area] = layout.areas(frame.area());

    // Title bar
    let title_text = format!("Ask OpenAI (model: {})", app.model_name);
    frame.render_widget(Span::raw(title_text), title_area);

    // Responses area
    if app.history.is_empty() {
        draw_placeholder(frame, main_area);
    } else {
        draw_history(frame, main_area, app, tui);
    }

    // Input area - dimmed while a request is in flight (submit disabled)
    let (input_title, input_style) = if app.is_loading {
        (
            "Enter Prompt (submitting...)",
            Style::default().add_modifier(Modifier::DIM),
        )
    } else {
        ("Enter Prompt", Style::default())
    };
    let input = Paragraph::new(app.prompt.as_str())
        .block(Block::bordered().title(input_title).border_style(input_style))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, input_area);

    // Status line: error > loading > status text with key hints
    let status_line = if let Some(error_msg) = &app.error {
        Line::from(Span::styled(
            format!("Error: {error_msg}"),
            Style::default().fg(Color::Red),
        ))
    } else if app.is_loading {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{spinner} Fetching OpenAI's response..."),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let mut hints = String::from("Enter: submit | Esc: quit");
        if !app.history.is_empty() {
            hints.push_str(" | Ctrl+R: reset");
        }
        Line::from(vec![
            Span::raw(app.status_message.clone()),
            Span::styled(
                format!("  ({hints})"),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(status_line), status_area);
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    let [line_area] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(placeholder, line_area);
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let content_width = area.width.saturating_sub(1);

    let rendered: Vec<RenderedExchange> = app
        .history
        .iter()
        .map(|exchange| RenderedExchange::new(exchange, area))
        .collect();

    let total_height: u16 = rendered.iter().map(|r| r.height).sum();

    let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    let mut y_offset: u16 = 0;
    for item in &rendered {
        let rect = Rect::new(0, y_offset, content_width, item.height);
        scroll_view.render_widget(item.paragraph.clone(), rect);
        y_offset += item.height;
    }

    frame.render_stateful_widget(scroll_view, area, &mut tui.scroll_state);
}
