//! Key interpretation for each UI mode.

use super::state::{Mode, UiState};
use crate::model::{Dependency, Mutation};
use crate::orchestrator::UiCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Rows moved by PageUp/PageDown.
const PAGE: usize = 10;

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

impl UiState {
    /// Interpret one key press. Returned commands are sent to the orchestrator in order;
    /// `UiCommand::Quit` means the UI should shut down.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<UiCommand> {
        if is_interrupt(&key) {
            return vec![UiCommand::Quit];
        }
        if self.loading {
            return match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => vec![UiCommand::Quit],
                _ => Vec::new(),
            };
        }
        match self.mode {
            Mode::Normal if self.filter_editing => {
                self.handle_filter_key(key);
                Vec::new()
            }
            Mode::Normal => self.handle_normal_key(key),
            Mode::Add | Mode::Update { .. } => self.handle_input_key(key),
            Mode::DeleteConfirm { index } => self.handle_delete_key(key, index),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<UiCommand> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return vec![UiCommand::Quit],
            (KeyModifiers::NONE, KeyCode::Char('a')) => {
                self.mode = Mode::Add;
                self.input.clear();
            }
            (KeyModifiers::NONE, KeyCode::Char('u')) => {
                if let Some(index) = self.selected_index() {
                    self.mode = Mode::Update { index };
                    self.input.set_value(self.deps[index].query());
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('d')) => {
                if let Some(index) = self.selected_index() {
                    self.mode = Mode::DeleteConfirm { index };
                }
            }
            (KeyModifiers::NONE, KeyCode::Char('t')) => {
                return self.begin(UiCommand::Run(Mutation::Tidy))
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                self.filter.clear();
                self.filter_editing = true;
                self.selected = 0;
            }
            (_, KeyCode::Esc) => {
                self.filter.clear();
                self.clamp_selection();
            }
            _ => self.navigate(key),
        }
        Vec::new()
    }

    fn navigate(&mut self, key: KeyEvent) {
        let last = self.visible_indices().len().saturating_sub(1);
        self.selected = match (key.modifiers, key.code) {
            (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                self.selected.saturating_sub(1)
            }
            (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                (self.selected + 1).min(last)
            }
            (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => 0,
            (_, KeyCode::End) | (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                last
            }
            (_, KeyCode::PageUp) => self.selected.saturating_sub(PAGE),
            (_, KeyCode::PageDown) => (self.selected + PAGE).min(last),
            _ => return,
        };
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.filter_editing = false,
            KeyCode::Esc => {
                self.filter.clear();
                self.filter_editing = false;
            }
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
            }
            KeyCode::Up | KeyCode::Down => self.navigate(key),
            _ => {}
        }
        self.clamp_selection();
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Vec<UiCommand> {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc => {
                self.input.clear();
                self.mode = Mode::Normal;
                Vec::new()
            }
            _ => {
                self.input.handle_key(key);
                Vec::new()
            }
        }
    }

    fn submit_input(&mut self) -> Vec<UiCommand> {
        let raw = self.input.value().to_string();
        self.input.clear();
        let mode = std::mem::take(&mut self.mode);

        let Some(dep) = Dependency::parse_query(&raw) else {
            tracing::debug!(input = %raw, "ignoring input without a single name@version");
            return Vec::new();
        };

        match mode {
            Mode::Add => {
                self.deps.insert(0, dep);
                self.selected = 0;
            }
            Mode::Update { index } => match self.deps.get_mut(index) {
                Some(slot) => *slot = dep,
                None => tracing::warn!(index, "update target vanished; skipping local edit"),
            },
            _ => return Vec::new(),
        }
        self.begin(UiCommand::Run(Mutation::Get(raw)))
    }

    fn handle_delete_key(&mut self, key: KeyEvent, index: usize) -> Vec<UiCommand> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('y')) => {
                if index >= self.deps.len() {
                    tracing::warn!(index, "delete target vanished; cancelling");
                    self.mode = Mode::Normal;
                    return Vec::new();
                }
                let dep = self.deps.remove(index);
                self.clamp_selection();
                self.begin(UiCommand::Run(Mutation::Remove(dep.name)))
            }
            (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
                self.mode = Mode::Normal;
                Vec::new()
            }
            (KeyModifiers::NONE, KeyCode::Char('q')) => vec![UiCommand::Quit],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(state: &mut UiState, code: KeyCode) -> Vec<UiCommand> {
        state.handle_key(key(code))
    }

    fn type_str(state: &mut UiState, s: &str) {
        for c in s.chars() {
            assert!(press(state, KeyCode::Char(c)).is_empty());
        }
    }

    fn loaded(deps: &[(&str, &str)]) -> UiState {
        let mut state = UiState::default();
        state.apply_event(AppEvent::DependenciesLoaded(
            deps.iter().map(|(n, v)| Dependency::new(*n, *v)).collect(),
        ));
        state
    }

    fn assert_mode_invariant(state: &UiState) {
        let expected = matches!(state.mode, Mode::Add | Mode::Update { .. });
        assert_eq!(state.input_active(), expected);
    }

    #[test]
    fn add_is_optimistic_then_replaced_by_refresh() {
        let mut state = loaded(&[("bar", "v0.1.0")]);
        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, Mode::Add);
        assert_mode_invariant(&state);
        type_str(&mut state, "foo@1.2.3");

        let cmds = press(&mut state, KeyCode::Enter);
        assert_eq!(
            cmds,
            [
                UiCommand::Run(Mutation::Get("foo@1.2.3".into())),
                UiCommand::ScheduleTick(1)
            ]
        );
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.loading);
        assert_eq!(state.deps[0], Dependency::new("foo", "1.2.3"));
        assert_eq!(state.deps.len(), 2);

        state.apply_event(AppEvent::DependenciesLoaded(vec![
            Dependency::new("bar", "v0.1.0"),
            Dependency::new("foo", "1.2.4"),
        ]));
        assert!(!state.loading);
        assert_eq!(state.deps[1], Dependency::new("foo", "1.2.4"));
        assert_eq!(state.deps.len(), 2);
    }

    #[test]
    fn malformed_add_input_is_discarded() {
        let mut state = loaded(&[("bar", "v0.1.0")]);
        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, "foo");
        assert!(press(&mut state, KeyCode::Enter).is_empty());
        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.loading);
        assert_eq!(state.deps, vec![Dependency::new("bar", "v0.1.0")]);
        assert_eq!(state.input.value(), "");
    }

    #[test]
    fn double_separator_is_malformed() {
        let mut state = loaded(&[]);
        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, "a@b@c");
        assert!(press(&mut state, KeyCode::Enter).is_empty());
        assert!(state.deps.is_empty());
    }

    #[test]
    fn letters_in_input_mode_are_typed_not_bound() {
        let mut state = loaded(&[("x", "v1")]);
        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, "qudt");
        assert_eq!(state.input.value(), "qudt");
        assert_eq!(state.mode, Mode::Add);
    }

    #[test]
    fn esc_cancels_input() {
        let mut state = loaded(&[("x", "v1")]);
        press(&mut state, KeyCode::Char('u'));
        assert!(state.input_active());
        assert!(press(&mut state, KeyCode::Esc).is_empty());
        assert_eq!(state.mode, Mode::Normal);
        assert_mode_invariant(&state);
        assert_eq!(state.deps, vec![Dependency::new("x", "v1")]);
    }

    #[test]
    fn update_prefills_and_replaces_selected_entry() {
        let mut state = loaded(&[("a", "v1"), ("b", "v2")]);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char('u'));
        assert_eq!(state.mode, Mode::Update { index: 1 });
        assert_eq!(state.input.value(), "b@v2");

        press(&mut state, KeyCode::Backspace);
        type_str(&mut state, "3");
        let cmds = press(&mut state, KeyCode::Enter);
        assert_eq!(cmds[0], UiCommand::Run(Mutation::Get("b@v3".into())));
        assert_eq!(state.deps[1], Dependency::new("b", "v3"));
        assert_eq!(state.deps[0], Dependency::new("a", "v1"));
    }

    #[test]
    fn stale_update_index_still_runs_command() {
        let mut state = loaded(&[("a", "v1")]);
        state.mode = Mode::Update { index: 5 };
        state.input.set_value("a@v2");
        let cmds = press(&mut state, KeyCode::Enter);
        assert_eq!(cmds[0], UiCommand::Run(Mutation::Get("a@v2".into())));
        assert_eq!(state.deps, vec![Dependency::new("a", "v1")]);
    }

    #[test]
    fn delete_confirm_removes_and_runs_remove() {
        let mut state = loaded(&[("a", "v1"), ("b", "v2")]);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::DeleteConfirm { index: 0 });
        assert_mode_invariant(&state);
        assert_eq!(state.delete_target(), Some(&Dependency::new("a", "v1")));

        let cmds = press(&mut state, KeyCode::Char('y'));
        assert_eq!(
            cmds,
            [
                UiCommand::Run(Mutation::Remove("a".into())),
                UiCommand::ScheduleTick(1)
            ]
        );
        assert_eq!(state.deps, vec![Dependency::new("b", "v2")]);
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.loading);
    }

    #[test]
    fn delete_decline_keeps_list() {
        let mut state = loaded(&[("a", "v1")]);
        press(&mut state, KeyCode::Char('d'));
        assert!(press(&mut state, KeyCode::Char('n')).is_empty());
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.deps.len(), 1);
        assert!(!state.loading);
    }

    #[test]
    fn stale_delete_index_is_cancelled() {
        let mut state = loaded(&[("a", "v1")]);
        state.mode = Mode::DeleteConfirm { index: 3 };
        assert!(press(&mut state, KeyCode::Char('y')).is_empty());
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.deps.len(), 1);
    }

    #[test]
    fn update_and_delete_need_a_selection() {
        let mut state = loaded(&[]);
        press(&mut state, KeyCode::Char('u'));
        assert_eq!(state.mode, Mode::Normal);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn tidy_starts_loading() {
        let mut state = loaded(&[]);
        let cmds = press(&mut state, KeyCode::Char('t'));
        assert_eq!(
            cmds,
            [UiCommand::Run(Mutation::Tidy), UiCommand::ScheduleTick(1)]
        );
        assert!(state.loading);
    }

    #[test]
    fn loading_suppresses_everything_but_quit() {
        let mut state = UiState::default();
        for c in ['a', 'u', 'd', 't', 'j', '/'] {
            assert!(press(&mut state, KeyCode::Char(c)).is_empty());
        }
        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.filter_editing);
        assert_eq!(press(&mut state, KeyCode::Char('q')), [UiCommand::Quit]);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = loaded(&[]);
        press(&mut state, KeyCode::Char('a'));
        let cmds = state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(cmds, [UiCommand::Quit]);
    }

    #[test]
    fn ctrl_letters_do_not_trigger_actions() {
        let mut state = loaded(&[("a", "v1"), ("b", "v2")]);
        for c in ['a', 'u', 'd', 't', 'q', '/', 'j'] {
            let cmds = state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
            assert!(cmds.is_empty(), "ctrl-{c} produced {cmds:?}");
        }
        assert_eq!(state.mode, Mode::Normal);
        assert!(!state.loading);
        assert!(!state.filter_editing);
        assert_eq!(state.selected, 0);

        press(&mut state, KeyCode::Char('d'));
        let cmds = state.handle_key(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL));
        assert!(cmds.is_empty());
        assert_eq!(state.deps.len(), 2);
        assert_eq!(state.mode, Mode::DeleteConfirm { index: 0 });
    }

    #[test]
    fn shifted_g_jumps_to_last_row() {
        let mut state = loaded(&[("a", "v1"), ("b", "v2"), ("c", "v3")]);
        state.handle_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut state = loaded(&[("a", "v1"), ("b", "v2"), ("c", "v3")]);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.selected, 0);
        press(&mut state, KeyCode::PageDown);
        assert_eq!(state.selected, 2);
        press(&mut state, KeyCode::Char('k'));
        assert_eq!(state.selected_index(), Some(1));
        press(&mut state, KeyCode::Char('g'));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn filter_routes_letters_and_targets_underlying_item() {
        let mut state = loaded(&[("alpha", "v1"), ("beta", "v2"), ("gamma", "v3")]);
        press(&mut state, KeyCode::Char('/'));
        type_str(&mut state, "mm");
        assert!(state.filter_editing);
        assert_eq!(state.visible_indices(), [2usize]);
        press(&mut state, KeyCode::Enter);
        assert!(!state.filter_editing);

        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::DeleteConfirm { index: 2 });
        press(&mut state, KeyCode::Char('n'));

        press(&mut state, KeyCode::Esc);
        assert!(state.filter.is_empty());
        assert_eq!(state.visible_indices().len(), 3);
    }
}
