//! Question overview grid.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::models::{QuestionState, Session};

const COLUMNS: usize = 5;

/// How a cell in the grid is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Current,
    Answered,
    Visited,
    Unvisited,
}

pub fn cell_kind(state: &QuestionState, is_current: bool) -> CellKind {
    if is_current {
        CellKind::Current
    } else if state.answered {
        CellKind::Answered
    } else if state.visited {
        CellKind::Visited
    } else {
        CellKind::Unvisited
    }
}

fn cell_style(kind: CellKind) -> Style {
    match kind {
        CellKind::Current => Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        CellKind::Answered => Style::default().fg(Color::Black).bg(Color::Green),
        CellKind::Visited => Style::default().fg(Color::Yellow),
        CellKind::Unvisited => Style::default().fg(Color::DarkGray),
    }
}

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let current = session.current_question_index();
    let states = session.question_states();

    let mut lines: Vec<Line> = states
        .chunks(COLUMNS)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .flat_map(|(col, state)| {
                    let index = row * COLUMNS + col;
                    let kind = cell_kind(state, index == current);
                    [
                        Span::styled(format!(" {:>2} ", index + 1), cell_style(kind)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(legend_line(CellKind::Answered, "answered"));
    lines.push(legend_line(CellKind::Visited, "visited"));
    lines.push(legend_line(CellKind::Unvisited, "not visited"));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Questions ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn legend_line(kind: CellKind, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("    ", cell_style(kind)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(Color::Gray)),
    ])
}
