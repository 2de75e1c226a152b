use super::input::LineInput;
use crate::model::{AppEvent, Dependency};
use crate::orchestrator::UiCommand;

pub const DEFAULT_TITLE: &str = "Go Dependencies";

/// Which keys mean what. Pending selections live inside the variant that uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Add,
    Update {
        index: usize,
    },
    DeleteConfirm {
        index: usize,
    },
}

pub struct UiState {
    pub mode: Mode,
    pub loading: bool,
    pub loading_dots: u8,
    /// Bumped on every new loading phase; ticks from older phases are dropped.
    pub tick_generation: u64,
    pub title: String,
    pub deps: Vec<Dependency>,
    /// Cursor position within `visible_indices()`.
    pub selected: usize,
    pub input: LineInput,
    // List filtering
    pub filter: String,
    pub filter_editing: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            loading: true,
            loading_dots: 0,
            tick_generation: 0,
            title: DEFAULT_TITLE.to_string(),
            deps: Vec::new(),
            selected: 0,
            input: LineInput::default(),
            filter: String::new(),
            filter_editing: false,
        }
    }
}

impl UiState {
    /// Commands to issue at startup: the first refresh plus the loading animation.
    pub fn init(&self) -> Vec<UiCommand> {
        vec![UiCommand::Refresh, UiCommand::ScheduleTick(self.tick_generation)]
    }

    pub fn input_active(&self) -> bool {
        matches!(self.mode, Mode::Add | Mode::Update { .. })
    }

    /// Indices into `deps` that pass the current filter, in display order.
    pub fn visible_indices(&self) -> Vec<usize> {
        if self.filter.is_empty() {
            return (0..self.deps.len()).collect();
        }
        let needle = self.filter.to_lowercase();
        self.deps
            .iter()
            .enumerate()
            .filter(|(_, d)| d.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Index into `deps` of the item under the cursor.
    pub fn selected_index(&self) -> Option<usize> {
        self.visible_indices().get(self.selected).copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_indices().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Dependency targeted by a pending delete, if the index is still valid.
    pub fn delete_target(&self) -> Option<&Dependency> {
        match self.mode {
            Mode::DeleteConfirm { index } => self.deps.get(index),
            _ => None,
        }
    }

    /// Return to normal mode, start the loading animation and issue `cmd`.
    pub(super) fn begin(&mut self, cmd: UiCommand) -> Vec<UiCommand> {
        self.loading = true;
        self.mode = Mode::Normal;
        self.tick_generation = self.tick_generation.wrapping_add(1);
        vec![cmd, UiCommand::ScheduleTick(self.tick_generation)]
    }

    /// Merge an asynchronous result. Returns a follow-up command when one is needed.
    pub fn apply_event(&mut self, ev: AppEvent) -> Option<UiCommand> {
        match ev {
            AppEvent::DependenciesLoaded(deps) => {
                self.deps = deps;
                self.loading = false;
                self.title = DEFAULT_TITLE.to_string();
                self.clamp_selection();
                None
            }
            AppEvent::CommandFailed(msg) => {
                self.loading = false;
                self.title = format!("Error: {msg}");
                None
            }
            AppEvent::LoadingTick(generation) => {
                if !self.loading || generation != self.tick_generation {
                    return None;
                }
                self.loading_dots = (self.loading_dots + 1) % 4;
                Some(UiCommand::ScheduleTick(generation))
            }
        }
    }
}
