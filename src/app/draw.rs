use crate::wizard::{LineKind, Screen, Wizard, render};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, wizard: &Wizard) {
    let screen = render(wizard, Utc::now());

    let [body, help] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" turtle ");
    frame.render_widget(
        Paragraph::new(body_lines(&screen))
            .block(block)
            .wrap(Wrap { trim: false }),
        body,
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            screen.help.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        help,
    );
}

fn body_lines(screen: &Screen) -> Vec<Line<'static>> {
    screen
        .body
        .iter()
        .map(|line| Line::from(Span::styled(line.text.clone(), style_for(line.kind))))
        .collect()
}

const fn style_for(kind: LineKind) -> Style {
    match kind {
        LineKind::Heading => Style::new().add_modifier(Modifier::BOLD),
        LineKind::Text => Style::new(),
        LineKind::Muted => Style::new().fg(Color::DarkGray),
        LineKind::Selected => Style::new().fg(Color::Indexed(229)).bg(Color::Indexed(57)),
        LineKind::Input => Style::new().fg(Color::Cyan),
        LineKind::Notice => Style::new().fg(Color::Red),
    }
}
