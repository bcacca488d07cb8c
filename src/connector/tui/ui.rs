use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::PlannerForm;

const TITLE: &str = "AI Travel Assistant";
const SUBTITLE: &str = "Get personalized travel recommendations powered by AI";
const PLACEHOLDER: &str = "Enter destination (e.g., Paris, Tokyo)";
const BUTTON_WIDTH: u16 = 18;

pub fn button_label(form: &PlannerForm) -> &'static str {
    if form.is_loading() {
        "Generating..."
    } else {
        "Generate Plan"
    }
}

pub fn draw(frame: &mut Frame, form: &PlannerForm, scroll: u16) {
    let [header, input_row, result, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_input_row(frame, form, input_row);
    draw_result(frame, form, scroll, result);

    let hint = Paragraph::new("Enter: generate  ↑/↓: scroll  Esc: quit")
        .style(Style::new().fg(Color::DarkGray));
    frame.render_widget(hint, help);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::new().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::new().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_input_row(frame: &mut Frame, form: &PlannerForm, area: Rect) {
    let [input_area, button_area] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)]).areas(area);

    let input = if form.destination().is_empty() {
        Paragraph::new(Span::styled(PLACEHOLDER, Style::new().fg(Color::DarkGray)))
    } else {
        Paragraph::new(form.destination())
    };
    frame.render_widget(
        input.block(Block::bordered().title("Plan Your Next Adventure")),
        input_area,
    );

    let button_style = if form.can_submit() {
        Style::new().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    let button = Paragraph::new(button_label(form))
        .alignment(Alignment::Center)
        .style(button_style)
        .block(Block::bordered());
    frame.render_widget(button, button_area);

    // Cursor sits after the typed text, inside the border.
    let typed = form.destination().chars().count() as u16;
    let max_x = input_area.x + input_area.width.saturating_sub(2);
    frame.set_cursor_position((
        (input_area.x + 1 + typed).min(max_x),
        input_area.y + 1,
    ));
}

fn draw_result(frame: &mut Frame, form: &PlannerForm, scroll: u16, area: Rect) {
    let Some(plan) = form.plan() else {
        return;
    };

    let result = Paragraph::new(plan)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::bordered().title("Your Travel Plan"));
    frame.render_widget(result, area);
}
