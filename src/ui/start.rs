use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Difficulty, QUESTION_COUNT, SESSION_DURATION_SECS};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let card = super::centered(area, 60, 17);
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(card);

    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
        card,
    );

    render_title(frame, chunks[0]);
    render_email(frame, chunks[1], app);
    render_difficulty(frame, chunks[2], app.start_form().difficulty);
    render_status(frame, chunks[3], app);
    render_controls(frame, chunks[4]);

    if app.start_form().resume_prompt {
        render_resume_dialog(frame, area);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            format!(
                "{} Questions · {} Minutes",
                QUESTION_COUNT,
                SESSION_DURATION_SECS / 60
            )
            .fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_email(frame: &mut Frame, area: Rect, app: &App) {
    let email = &app.start_form().email;
    let (text, style) = if email.is_empty() {
        ("your@email.com".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (email.clone(), Style::default().fg(Color::White))
    };

    let widget = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Email "),
    );
    frame.render_widget(widget, area);

    if !app.is_loading() && !app.start_form().resume_prompt {
        let cursor_x = area.x + 1 + email.chars().count() as u16;
        frame.set_cursor_position(Position::new(
            cursor_x.min(area.right().saturating_sub(2)),
            area.y + 1,
        ));
    }
}

fn render_difficulty(frame: &mut Frame, area: Rect, selected: Option<Difficulty>) {
    let mut spans = Vec::with_capacity(Difficulty::ALL.len() * 2);
    for difficulty in Difficulty::ALL {
        let is_selected = selected == Some(difficulty);
        let style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", difficulty.label()), style));
        spans.push(Span::raw("  "));
    }

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Difficulty "),
        );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.start_form();
    let line = if app.is_loading() {
        Line::from("Loading questions...".fg(Color::Yellow))
    } else if let Some(error) = &form.error {
        Line::from(error.as_str().fg(Color::Red))
    } else if let Some(notice) = &form.notice {
        Line::from(notice.as_str().fg(Color::Green))
    } else {
        Line::from("")
    };

    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "←/→ difficulty  ·  enter start  ·  ctrl+u clear email  ·  esc quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_resume_dialog(frame: &mut Frame, area: Rect) {
    let dialog = super::centered(area, 48, 8);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Resume your quiz?",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("You have an unfinished attempt saved.".fg(Color::Gray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(Color::Green).bold()),
            Span::raw(" resume   "),
            Span::styled("n", Style::default().fg(Color::Red).bold()),
            Span::raw(" start new"),
        ]),
    ];

    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Cyan),
        ),
        dialog,
    );
}
