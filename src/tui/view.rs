//! Rendering. Every function here is a pure function of `UiState` and `ViewConfig`.

use super::help;
use super::state::{Mode, UiState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const ADD_PROMPT: &str = "Enter new dependency (format: name@version)";
const UPDATE_PROMPT: &str = "Update dependency (format: name@version)";
const INPUT_PLACEHOLDER: &str = "Enter dependency...";

/// Layout settings for the list screen, fixed for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct ViewConfig {
    pub margin: Margin,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            margin: Margin {
                vertical: 1,
                horizontal: 2,
            },
        }
    }
}

pub fn draw(f: &mut Frame, state: &UiState, cfg: &ViewConfig) {
    let area = f.area();
    if state.loading {
        draw_loading(f, area, state);
    } else if state.input_active() {
        draw_input(f, area, state);
    } else if let Mode::DeleteConfirm { .. } = state.mode {
        draw_delete_confirm(f, area, state);
    } else {
        draw_list(f, area.inner(cfg.margin), state);
    }
}

fn draw_loading(f: &mut Frame, area: Rect, state: &UiState) {
    let dots = ".".repeat(state.loading_dots as usize);
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(format!("   Loading{dots}")),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" to quit"),
        ]),
    ]);
    f.render_widget(p, area);
}

fn draw_input(f: &mut Frame, area: Rect, state: &UiState) {
    let prompt = match state.mode {
        Mode::Update { .. } => UPDATE_PROMPT,
        _ => ADD_PROMPT,
    };
    let editor = if state.input.value().is_empty() {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(format!("> {}", state.input.value()))
    };
    let p = Paragraph::new(vec![
        Line::from(prompt),
        Line::from(""),
        editor,
        Line::from(""),
        Line::from(Span::styled(
            "(esc to cancel)",
            Style::default().fg(Color::Gray),
        )),
    ]);
    f.render_widget(p, area);

    let x = cursor_column(area.x.saturating_add(2), state.input.before_cursor());
    if x < area.right() && area.height > 2 {
        f.set_cursor_position((x, area.y + 2));
    }
}

/// Column of a cursor placed after `prefix`, which is drawn starting at `origin`.
fn cursor_column(origin: u16, prefix: &str) -> u16 {
    let width = u16::try_from(Span::raw(prefix).width()).unwrap_or(u16::MAX);
    origin.saturating_add(width)
}

fn draw_delete_confirm(f: &mut Frame, area: Rect, state: &UiState) {
    let target = state
        .delete_target()
        .map(|d| d.query())
        .unwrap_or_else(|| "this dependency".to_string());
    let p = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Are you sure you want to delete "),
            Span::styled(target, Style::default().fg(Color::Yellow)),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from("(y/n)"),
    ]);
    f.render_widget(p, area);
}

fn draw_list(f: &mut Frame, area: Rect, state: &UiState) {
    let show_filter = state.filter_editing || !state.filter.is_empty();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(u16::from(show_filter)),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title_style = if state.title.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(state.title.clone(), title_style));

    let visible = state.visible_indices();
    if visible.is_empty() {
        let msg = if state.deps.is_empty() {
            "No dependencies."
        } else {
            "No matches."
        };
        let p = Paragraph::new(Span::styled(msg, Style::default().fg(Color::DarkGray)))
            .block(block);
        f.render_widget(p, chunks[0]);
    } else {
        let items: Vec<ListItem> = visible
            .iter()
            .map(|&i| {
                let dep = &state.deps[i];
                ListItem::new(vec![
                    Line::from(Span::styled(
                        dep.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        dep.version.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Magenta))
            .highlight_symbol("│ ");
        let mut list_state = ListState::default();
        list_state.select(Some(state.selected));
        f.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    if show_filter {
        let filter = Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Gray)),
            Span::raw(state.filter.clone()),
        ]);
        f.render_widget(Paragraph::new(filter), chunks[1]);
        if state.filter_editing {
            let x = cursor_column(chunks[1].x.saturating_add(8), &state.filter);
            if x < chunks[1].right() {
                f.set_cursor_position((x, chunks[1].y));
            }
        }
    }

    let hint = if state.filter_editing {
        help::filter_hint()
    } else {
        help::normal_hint()
    };
    f.render_widget(Paragraph::new(hint), chunks[2]);
}
