mod help;
mod input;
mod keys;
mod state;
mod view;

use crate::model::AppEvent;
use crate::orchestrator::{self, UiCommand};
use crate::toolchain::Toolchain;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::UiState;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use view::ViewConfig;

pub async fn run(toolchain: Toolchain, tick: Duration) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle =
        std::thread::spawn(move || run_threaded(ViewConfig::default(), event_rx, cmd_tx));

    let res = orchestrator::run_controller(toolchain, tick, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Send commands to the controller. Returns true if one of them was `Quit`.
fn send_all(cmd_tx: &UnboundedSender<UiCommand>, cmds: Vec<UiCommand>) -> bool {
    let mut quit = false;
    for cmd in cmds {
        quit |= cmd == UiCommand::Quit;
        let _ = cmd_tx.send(cmd);
    }
    quit
}

/// Run the TUI loop on a dedicated thread. This thread is the only owner of `UiState`.
fn run_threaded(
    cfg: ViewConfig,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    // Returning drops `cmd_tx`, which also stops the controller.
    let res = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| {
            terminal.clear().ok();
            event_loop(&mut terminal, cfg, &mut event_rx, &cmd_tx)
        });

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: ViewConfig,
    event_rx: &mut UnboundedReceiver<AppEvent>,
    cmd_tx: &UnboundedSender<UiCommand>,
) -> Result<()> {
    let mut state = UiState::default();
    send_all(cmd_tx, state.init());

    let frame_rate = Duration::from_millis(50);
    let mut last_draw: Option<Instant> = None;
    let mut dirty = true;

    loop {
        // Drain results without blocking; each one is applied in arrival order.
        while let Ok(ev) = event_rx.try_recv() {
            if let Some(cmd) = state.apply_event(ev) {
                let _ = cmd_tx.send(cmd);
            }
            dirty = true;
        }

        if dirty && last_draw.map_or(true, |t| t.elapsed() >= frame_rate) {
            terminal
                .draw(|f| view::draw(f, &state, &cfg))
                .context("draw frame")?;
            last_draw = Some(Instant::now());
            dirty = false;
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if !event::poll(Duration::from_millis(10)).unwrap_or(false) {
            continue;
        }
        match event::read() {
            Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => {
                tracing::trace!(key = ?k.code, mode = ?state.mode, "key");
                if send_all(cmd_tx, state.handle_key(k)) {
                    tracing::info!("quit requested");
                    return Ok(());
                }
                dirty = true;
            }
            Ok(Event::Resize(..)) => dirty = true,
            Ok(_) => {}
            Err(e) => return Err(e).context("read terminal event"),
        }
    }
}
