//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Flows are spawned with a `FlowContext` whose dispatcher and navigator
//! send `UiEvent`s to `inbox_tx`. The runtime drains `inbox_rx` each frame
//! and feeds the events through the reducer.

mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
pub use inbox::{InboxDispatcher, InboxNavigator, UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use userdash_core::api::Backend;
use userdash_core::config::Config;
use userdash_core::flows::{self, FlowContext, RestoreOutcome};
use userdash_core::storage::Storage;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Spinner cadence.
pub const TICK_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop or panic.
pub struct TuiRuntime<B> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    ctx: FlowContext<B>,
    /// Inbox sender - flows send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl<B: Backend> TuiRuntime<B> {
    pub fn new(config: &Config, backend: B, storage: Arc<dyn Storage>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let ctx = FlowContext::new(
            backend,
            Arc::new(InboxDispatcher::new(inbox_tx.clone())),
            Arc::new(InboxNavigator::new(inbox_tx.clone())),
            storage,
        );

        Ok(Self {
            terminal,
            state: AppState::new(config),
            ctx,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::init(&mut self.state);
        self.execute_effects(effects);

        while !self.state.should_quit {
            let events = self.collect_events()?;
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            self.terminal.draw(|frame| {
                render::render(&self.state, frame);
            })?;
        }

        Ok(())
    }

    /// Collects inbox events, terminal input and the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick only when there is nothing to process.
        let poll_duration = if events.is_empty() {
            TICK_DURATION.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_DURATION {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a flow on the tokio runtime, sending its result event (if
    /// any) to the inbox when it completes.
    fn spawn_flow<F, Fut>(&self, f: F)
    where
        F: FnOnce(FlowContext<B>) -> Fut + Send + 'static,
        Fut: Future<Output = Option<UiEvent>> + Send + 'static,
    {
        let ctx = self.ctx.clone();
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            if let Some(ev) = f(ctx).await {
                let _ = tx.send(ev);
            }
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        debug!(?effect, "effect");
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Login { credentials } => {
                self.spawn_flow(move |ctx| async move {
                    flows::login(&ctx, credentials).await;
                    None
                });
            }
            UiEffect::Logout => {
                flows::logout(&self.ctx);
            }
            UiEffect::FetchOnMount { limit } => {
                let users = self.state.store.users.clone();
                self.spawn_flow(move |ctx| async move {
                    flows::fetch_on_mount(&ctx, &users, limit).await;
                    None
                });
            }
            UiEffect::Refetch { limit } => {
                self.spawn_flow(move |ctx| async move {
                    flows::refetch(&ctx, limit).await;
                    None
                });
            }
            UiEffect::RestoreSession => {
                self.spawn_flow(|ctx| async move {
                    let notice = match flows::restore_session(&ctx).await {
                        Ok(RestoreOutcome::Rejected(_)) => {
                            Some("Your session has expired. Please log in again.".to_string())
                        }
                        Ok(RestoreOutcome::Unreachable(message)) => {
                            Some(format!("Could not restore your session: {message}"))
                        }
                        Ok(_) => None,
                        Err(e) => {
                            warn!(error = %format!("{e:#}"), "session restore failed");
                            Some(format!("{e:#}"))
                        }
                    };
                    Some(UiEvent::RestoreFinished { notice })
                });
            }
            UiEffect::PersistPageSize { page_size } => {
                if let Err(e) = Config::save_page_size(page_size) {
                    warn!(error = %format!("{e:#}"), page_size, "failed to persist page size");
                }
            }
        }
    }
}

impl<B> Drop for TuiRuntime<B> {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
