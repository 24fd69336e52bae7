use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::results::{QuestionResult, QuizResults, breakdown};

const QUESTION_PREVIEW_LENGTH: usize = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let results = app.results();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app.session().email(), &results);
    render_question_breakdown(frame, chunks[2], app, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        90.. => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, email: &str, results: &QuizResults) {
    let grade_color = get_grade_color(results.percentage);

    let content = vec![
        Line::from(Span::styled(
            results.verdict().message(),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(email.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                results.correct, results.total, results.percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} correct", results.correct),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  ·  "),
            Span::styled(
                format!("{} incorrect", results.incorrect),
                Style::default().fg(Color::Red),
            ),
            Span::raw("  ·  "),
            Span::styled(
                format!("{} unattempted", results.unattempted),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(
            format!("time taken {}", super::format_clock(results.elapsed_secs))
                .fg(Color::DarkGray),
        ),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn result_symbol(result: &QuestionResult) -> (&'static str, Color) {
    if result.is_correct {
        ("+", Color::Green)
    } else if result.is_attempted() {
        ("-", Color::Red)
    } else {
        ("?", Color::DarkGray)
    }
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, result) in breakdown(app.session()).iter().enumerate() {
        let (symbol, color) = result_symbol(result);
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_question(&result.question.text),
                Style::default().fg(Color::Gray),
            ),
        ]));

        let answer_line = match result.selected_answer {
            Some(answer) if result.is_correct => Line::from(vec![
                Span::raw("       "),
                Span::styled(answer.to_string(), Style::default().fg(Color::Green)),
            ]),
            Some(answer) => Line::from(vec![
                Span::raw("       "),
                Span::styled(answer.to_string(), Style::default().fg(Color::Red)),
                Span::raw("  →  "),
                Span::styled(
                    result.question.correct_answer.clone(),
                    Style::default().fg(Color::Green),
                ),
            ]),
            None => Line::from(vec![
                Span::raw("       "),
                Span::styled("not answered", Style::default().fg(Color::DarkGray)),
                Span::raw("  →  "),
                Span::styled(
                    result.question.correct_answer.clone(),
                    Style::default().fg(Color::Green),
                ),
            ]),
        };
        lines.push(answer_line);
    }

    // Each question takes two lines.
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll(((scroll * 2) as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retake  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(80);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_grade_color() {
        assert_eq!(get_grade_color(100), Color::Green);
        assert_eq!(get_grade_color(75), Color::Cyan);
        assert_eq!(get_grade_color(33), Color::Red);
    }
}
