use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Question, QuestionKind, SESSION_DURATION_SECS, Session};

use super::navigator;

const LOW_TIME_SECS: u32 = 5 * 60;
const CRITICAL_TIME_SECS: u32 = 60;
const NAVIGATOR_WIDTH: u16 = 30;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let Some(question) = session.current_question() else {
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, rows[0], session);
    render_progress(frame, rows[1], session);

    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Length(NAVIGATOR_WIDTH)])
        .spacing(2)
        .split(rows[2]);

    render_question(frame, columns[0], app, question);
    navigator::render(frame, columns[1], session);
    render_controls(frame, rows[3]);

    if app.confirm_submit() {
        render_submit_dialog(frame, area, session);
    }
}

fn timer_color(time_remaining: u32) -> Color {
    if time_remaining <= CRITICAL_TIME_SECS {
        Color::Red
    } else if time_remaining <= LOW_TIME_SECS {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(14)]).split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Quiz Challenge",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(session.email().fg(Color::DarkGray)),
    ])
    .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(title, chunks[0]);

    let remaining = session.time_remaining();
    let timer = Paragraph::new(super::format_clock(remaining))
        .alignment(Alignment::Center)
        .style(Style::default().fg(timer_color(remaining)).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(timer_color(remaining)),
        );
    frame.render_widget(timer, chunks[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &Session) {
    let total = session.total_questions().max(1);
    let answered = session.answered_count();
    let time_used = session.elapsed_secs() as f64 / SESSION_DURATION_SECS as f64;

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio((answered as f64 / total as f64).clamp(0.0, 1.0))
        .label(format!(
            "{}/{} answered · {:.0}% of time used",
            answered,
            session.total_questions(),
            time_used * 100.0
        ));
    frame.render_widget(gauge, area);
}

fn render_question(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let session = app.session();
    let selected = session
        .current_state()
        .and_then(|s| s.selected_answer.as_deref());

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .split(area);

    let meta = Line::from(vec![
        Span::styled(
            format!(
                "Question {} of {}",
                session.current_question_index() + 1,
                session.total_questions()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  ·  "),
        Span::styled(question.category.as_str(), Style::default().fg(Color::Magenta)),
        Span::raw("  ·  "),
        Span::styled(
            question.difficulty.label(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(meta), chunks[0]);

    let text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(text, chunks[2]);

    render_answers(frame, chunks[3], question, app.answer_cursor(), selected);
}

fn answer_label(kind: QuestionKind, index: usize) -> String {
    match kind {
        QuestionKind::Boolean => " ".to_string(),
        QuestionKind::Multiple => {
            let letter = char::from(b'A' + (index % 26) as u8);
            format!("{}.", letter)
        }
    }
}

fn render_answers(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: usize,
    selected: Option<&str>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.all_answers.len() * 2);

    for (index, answer) in question.all_answers.iter().enumerate() {
        let is_cursor = index == cursor;
        let is_selected = selected == Some(answer.as_str());

        let style = match (is_selected, is_cursor) {
            (true, _) => Style::default().fg(Color::Green).bold(),
            (false, true) => Style::default().fg(Color::Cyan).bold(),
            _ => Style::default().fg(Color::Gray),
        };
        let marker = if is_cursor { ">" } else { " " };
        let check = if is_selected { " ✓" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{} ", answer_label(question.kind, index)), style),
            Span::styled(answer.as_str(), style),
            Span::styled(check, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k choose · enter select · h/l prev/next · tab unanswered · s submit · q save & quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_submit_dialog(frame: &mut Frame, area: Rect, session: &Session) {
    let dialog = super::centered(area, 50, 8);
    let unanswered = session.total_questions() - session.answered_count();
    let detail = if unanswered == 0 {
        "All questions answered.".to_string()
    } else {
        format!("{} question(s) still unanswered.", unanswered)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Submit quiz?",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(detail.fg(Color::Gray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).bold()),
            Span::raw(" submit   "),
            Span::styled("n", Style::default().fg(Color::Red).bold()),
            Span::raw(" keep going"),
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
