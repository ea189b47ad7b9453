use super::state::AppState;
use crate::snapshot::RecordStatus;
use crate::views::TeamLoad;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(body[1]);

    draw_queue(f, state, left[0]);
    draw_summary(f, state, left[1]);
    draw_board(f, state, right[0]);
    draw_highlights(f, state, right[1]);
    draw_footer(f, chunks[2]);
}

fn status_color(status: &RecordStatus) -> Color {
    match status {
        RecordStatus::Ready => Color::Green,
        RecordStatus::Running => Color::Cyan,
        RecordStatus::Blocked => Color::Red,
        RecordStatus::Other(_) => Color::DarkGray,
    }
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let source = if state.is_live {
        Span::styled("LIVE", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            "FALLBACK",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    };

    let refreshed = state
        .last_refresh
        .as_deref()
        .unwrap_or("never")
        .to_string();

    let line = Line::from(vec![
        Span::raw(" Source: "),
        source,
        Span::raw(format!(
            " | Refreshed: {} | Cycles: {} | Up: {}",
            refreshed, state.cycles, state.uptime()
        )),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ops-dash ");
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_queue(f: &mut Frame, state: &AppState, area: Rect) {
    let header = Row::new(vec!["#", "Automation", "Status", "Next", "Action"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .queue
        .entries
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(format!("{}", entry.order)),
                Cell::from(entry.name.clone()),
                Cell::from(entry.status_label.clone())
                    .style(Style::default().fg(status_color(&entry.status))),
                Cell::from(entry.next_run.clone()),
                Cell::from(entry.action_hint.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(18),
            Constraint::Length(8),
            Constraint::Length(17),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Queue ({}) ", state.queue.entries.len())),
    );

    f.render_widget(table, area);
}

fn draw_board(f: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Board ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.board.columns.is_empty() {
        let empty = Paragraph::new(Span::styled(
            " No board columns",
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(empty, inner);
        return;
    }

    let share = (100 / state.board.columns.len().max(1)) as u16;
    let constraints: Vec<Constraint> = state
        .board
        .columns
        .iter()
        .map(|_| Constraint::Percentage(share))
        .collect();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (col, slot) in state.board.columns.iter().zip(slots.iter()) {
        let mut lines = vec![Line::from(Span::styled(
            format!("{} ({})", col.name, col.item_count),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        for item in &col.items {
            lines.push(Line::from(format!("- {}", item.title)));
            lines.push(Line::from(Span::styled(
                format!("  {} | {} | due {}", item.tag, item.owner, item.due),
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(Paragraph::new(lines), *slot);
    }
}

fn draw_highlights(f: &mut Frame, state: &AppState, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::raw("Next automation: "),
            Span::styled(
                state.highlights.next_automation.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Blocked: "),
            Span::styled(
                state.highlights.blocked.clone(),
                Style::default().fg(if state.highlights.blocked == "None" {
                    Color::Green
                } else {
                    Color::Red
                }),
            ),
        ]),
        Line::from(vec![
            Span::raw("In progress: "),
            Span::styled(
                format!("{} tasks", state.highlights.in_progress_tasks),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Today ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_summary(f: &mut Frame, state: &AppState, area: Rect) {
    let load_color = match state.summary.load {
        TeamLoad::High => Color::Yellow,
        TeamLoad::Stable => Color::Green,
    };

    let lines = vec![
        Line::from(format!("Automations queued:  {}", state.summary.total_queued)),
        Line::from(format!("Ready to run:        {}", state.summary.ready)),
        Line::from(format!("Tasks total:         {}", state.summary.tasks_total)),
        Line::from(vec![
            Span::raw("Team load:           "),
            Span::styled(state.summary.load.label(), Style::default().fg(load_color)),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Summary ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Span::styled(
        " q: quit",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(footer, area);
}
