use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

const NORMAL_KEYS: &[(&str, &str)] = &[
    ("a", "add"),
    ("u", "update"),
    ("d", "delete"),
    ("t", "go mod tidy"),
    ("/", "filter"),
    ("q", "quit"),
];

/// Build a `key action · key action` hint line.
pub fn hint_line(keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(Color::Magenta),
        ));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

pub fn normal_hint() -> Line<'static> {
    hint_line(NORMAL_KEYS)
}

pub fn filter_hint() -> Line<'static> {
    hint_line(&[("enter", "apply filter"), ("esc", "clear filter")])
}
