//! Command dispatch controller.
//!
//! Runs toolchain work off the UI thread and emits one terminal event per unit of work.

use crate::model::{AppEvent, Mutation};
use crate::toolchain::Toolchain;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::Duration;

/// Commands emitted by the UI state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiCommand {
    Refresh,
    Run(Mutation),
    /// Deliver an `AppEvent::LoadingTick` with the same generation after the tick delay.
    ScheduleTick(u64),
    Quit,
}

/// Spawn one unit of work for `cmd`. Returns false once the UI asked to quit.
fn dispatch(
    toolchain: &Toolchain,
    tick: Duration,
    event_tx: &UnboundedSender<AppEvent>,
    cmd: UiCommand,
) -> bool {
    match cmd {
        UiCommand::Refresh => {
            let toolchain = toolchain.clone();
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                let ev = into_event(toolchain.list().await);
                let _ = event_tx.send(ev);
            });
        }
        UiCommand::Run(mutation) => {
            let toolchain = toolchain.clone();
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                let ev = into_event(toolchain.mutate(&mutation).await);
                let _ = event_tx.send(ev);
            });
        }
        UiCommand::ScheduleTick(generation) => {
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(tick).await;
                let _ = event_tx.send(AppEvent::LoadingTick(generation));
            });
        }
        UiCommand::Quit => return false,
    }
    true
}

fn into_event(res: Result<Vec<crate::model::Dependency>>) -> AppEvent {
    match res {
        Ok(deps) => AppEvent::DependenciesLoaded(deps),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "toolchain command failed");
            AppEvent::CommandFailed(format!("{e:#}"))
        }
    }
}

/// Serve UI commands until the UI quits or drops its sender.
pub(crate) async fn run_controller(
    toolchain: Toolchain,
    tick: Duration,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    while let Some(cmd) = cmd_rx.recv().await {
        tracing::debug!(?cmd, "dispatching");
        if !dispatch(&toolchain, tick, &event_tx, cmd) {
            break;
        }
    }
    tracing::info!("controller stopped");
    Ok(())
}
