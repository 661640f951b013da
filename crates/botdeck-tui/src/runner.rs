//! Main TUI runner - entry point and event loop
//!
//! The loop is the classic shape: drain completion messages through the
//! pure update function, perform the returned actions, draw the frame
//! from state, then poll the terminal. All recurring work lives in the
//! poll scheduler, which is cancelled wholesale on exit.

use tokio::sync::mpsc;

use botdeck_api::Gateway;
use botdeck_app::message::Message;
use botdeck_app::{
    handle_action, update, ActionContext, AppState, PollScheduler, Settings, UpdateAction,
};
use botdeck_core::prelude::*;

use crate::{event, render, terminal};

/// Run the console against the configured backend
pub async fn run(settings: Settings, initial_bot: Option<i64>) -> Result<()> {
    terminal::install_panic_hook();
    let mut term = ratatui::init();

    let mut state = AppState::new(settings.clone());
    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(256);
    let scheduler = PollScheduler::new();
    let ctx = ActionContext {
        gateway: Gateway::new(&settings.server),
        msg_tx,
        scheduler: scheduler.clone(),
        seq: state.seq.clone(),
        settings,
    };

    // First paint happens against an empty cache; the list arrives as a
    // normal completion message.
    state.bots_loading = true;
    handle_action(UpdateAction::LoadBots, &ctx);

    let result = run_loop(&mut term, &mut state, &mut msg_rx, &ctx, initial_bot);

    // Teardown: every timer dies with the loop, and any open session
    // releases its media preview.
    scheduler.cancel_all();
    if let Some(mut session) = state.close_session() {
        session.files.close();
    }
    ratatui::restore();
    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    msg_rx: &mut mpsc::Receiver<Message>,
    ctx: &ActionContext,
    mut pending_open: Option<i64>,
) -> Result<()> {
    while !state.should_quit() {
        // Process completion messages from background tasks
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, ctx);
        }

        // `--bot` flag: open the requested bot once the list is in
        if let Some(bot_id) = pending_open {
            if !state.bots_loading {
                pending_open = None;
                open_bot(state, ctx, bot_id);
            }
        }

        // Render
        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            process_message(state, message, ctx);
        }
    }
    Ok(())
}

/// Run one message (and any follow-ups) through update, performing the
/// returned actions
pub fn process_message(state: &mut AppState, message: Message, ctx: &ActionContext) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        for action in result.actions {
            handle_action(action, ctx);
        }
        msg = result.message;
    }
}

fn open_bot(state: &mut AppState, ctx: &ActionContext, bot_id: i64) {
    let Some(bot) = state.bots.iter().find(|b| b.id == bot_id).cloned() else {
        state.notify_error(format!("no bot with id {bot_id}"));
        return;
    };
    let generation = state.open_session(&bot);
    handle_action(
        UpdateAction::StartStatusPolling {
            generation,
            bot_id: bot.id,
        },
        ctx,
    );
    handle_action(
        UpdateAction::StartMetricsPolling {
            generation,
            bot_id: bot.id,
        },
        ctx,
    );
    info!(bot = %bot.name, "opened bot from command line");
}
