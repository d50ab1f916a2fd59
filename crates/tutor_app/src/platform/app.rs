use std::io::{self, IsTerminal, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tutor_core::{update, ChatState, Msg, Phase};
use tutor_logging::{tutor_info, tutor_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{self, AppEvent};
use super::logging;
use super::ui::constants::HELP_TEXT;
use super::ui::render::TranscriptRenderer;

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::initialize(config.log_destination);
    tutor_info!("Starting tutor chat against {}", config.client.base_url());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(config.client.clone(), event_tx.clone())
        .context("starting transport")?;

    let stdout = io::stdout();
    let use_color = stdout.is_terminal();
    let mut renderer = TranscriptRenderer::new(stdout, use_color);
    renderer.banner()?;

    let mut state = ChatState::new();
    renderer.render(&state.view())?;
    state.consume_dirty();

    // Probe once at startup; the poller takes over from there.
    state = dispatch(state, Msg::HealthPollDue, &effects);
    if let Some(interval) = config.health_interval {
        spawn_health_poller(interval, event_tx.clone());
    }
    input::spawn_reader(event_tx);

    let state = run_loop(state, &event_rx, &effects, &mut renderer)?;

    tutor_info!(
        "Session ended with {} transcript entries",
        state.transcript().len()
    );
    Ok(())
}

/// Drains the inbox until a quit lands while the controller is idle.
fn run_loop<W: Write>(
    mut state: ChatState,
    events: &mpsc::Receiver<AppEvent>,
    effects: &EffectRunner,
    renderer: &mut TranscriptRenderer<W>,
) -> io::Result<ChatState> {
    let mut quit_requested = false;
    while let Ok(event) = events.recv() {
        match event {
            AppEvent::Core(msg) => {
                let busy_submit = matches!(msg, Msg::Submitted)
                    && state.phase() == Phase::AwaitingResponse
                    && !state.pending_input().trim().is_empty();
                state = dispatch(state, msg, effects);
                if state.consume_dirty() {
                    renderer.render(&state.view())?;
                }
                if busy_submit {
                    renderer.rejected_submit()?;
                }
            }
            AppEvent::Help => renderer.notice(HELP_TEXT)?,
            AppEvent::Invalid(reason) => renderer.notice(&reason)?,
            AppEvent::Quit => {
                quit_requested = true;
                // No cancellation: a quit while a reply is pending waits for it.
                if state.phase() != Phase::Idle {
                    tutor_warn!("Quit requested while awaiting a reply; waiting for it");
                }
            }
        }

        if quit_requested && state.phase() == Phase::Idle {
            break;
        }
    }
    Ok(state)
}

fn dispatch(state: ChatState, msg: Msg, effects: &EffectRunner) -> ChatState {
    let (state, pending) = update(state, msg);
    effects.run(pending);
    state
}

fn spawn_health_poller(interval: Duration, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if tx.send(AppEvent::Core(Msg::HealthPollDue)).is_err() {
            break;
        }
    });
}
