//! Session lifecycle orchestration.
//!
//! One orchestrator owns one session from start to finish. It composes the
//! module sequencer, the command router and the per-module result entities
//! into a single state machine, and mediates with the external display
//! subsystem so that module activation and module presentation stay one
//! cause-and-effect pair.
//!
//! All state transitions happen inside a single event-handling turn; the
//! only suspension points are the display show/hide requests, each bounded
//! by the configured handshake timeout.

use crate::controller::ModuleController;
use crate::controllers::build_controller;
use crate::display::DisplayGate;
use crate::events::SessionSignal;
use crate::router::{CommandRouter, Routed};
use sideline_core::command::Command;
use sideline_core::config::AssessmentConfig;
use sideline_core::module::{ModuleKind, SessionType};
use sideline_core::result::ModuleResult;
use sideline_core::sequencer::{ModuleSequencer, Position};
use sideline_core::session::{ResultRepository, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Where the flow is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Session created, nothing presented yet.
    NotStarted,
    /// Exactly one module is live and addressable.
    ModuleActive,
    /// Between modules: hide requested, confirmation pending.
    Transitioning,
    /// Flow exited, normally or via early termination.
    Finished,
}

/// Drives one assessment session to completion.
///
/// The orchestrator guarantees that at most one module is ever active for
/// command-routing purposes: the router's target is installed at every
/// `ModuleActive` entry and cleared at every `Transitioning` entry.
pub struct SessionOrchestrator {
    session: Session,
    sequencer: ModuleSequencer,
    router: CommandRouter,
    config: AssessmentConfig,
    display: Arc<dyn DisplayGate>,
    repository: Arc<dyn ResultRepository>,
    state: FlowState,
    /// Word list for delayed recall, captured from the first
    /// immediate-memory trial once that module completes.
    canonical_words: Vec<String>,
    /// A hide we requested is awaiting confirmation.
    awaiting_hide: bool,
    hide_retried: bool,
    /// The exit path issues its hide exactly once.
    exit_hide_issued: bool,
}

impl SessionOrchestrator {
    pub fn new(
        session_type: SessionType,
        config: AssessmentConfig,
        display: Arc<dyn DisplayGate>,
        repository: Arc<dyn ResultRepository>,
    ) -> Self {
        let session = Session::new(session_type);
        let sequencer = ModuleSequencer::new(session.module_order.clone());
        let canonical_words = config.word_list.clone();
        Self {
            session,
            sequencer,
            router: CommandRouter::new(),
            config,
            display,
            repository,
            state: FlowState::NotStarted,
            canonical_words,
            awaiting_hide: false,
            hide_retried: false,
            exit_hide_issued: false,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The router, for the help surface and presentation accessors.
    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Mutable router access for rendering collaborators' mutators.
    pub fn router_mut(&mut self) -> &mut CommandRouter {
        &mut self.router
    }

    /// Runs the flow over a signal stream until it finishes.
    ///
    /// Signals are handled one at a time; each handler runs to completion
    /// before the next signal is taken. A closed channel is treated as an
    /// exit request.
    pub async fn run(&mut self, mut signals: mpsc::Receiver<SessionSignal>) {
        self.start().await;
        while self.state != FlowState::Finished {
            let received = if self.state == FlowState::Transitioning {
                match timeout(self.handshake_timeout(), signals.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        self.on_transition_timeout().await;
                        continue;
                    }
                }
            } else {
                signals.recv().await
            };

            match received {
                Some(signal) => self.handle_signal(signal).await,
                None => {
                    tracing::debug!("signal channel closed, exiting flow");
                    self.exit().await;
                }
            }
        }
    }

    /// Starts the flow: activates the first module, or finishes
    /// immediately on an empty module order.
    pub async fn start(&mut self) {
        debug_assert_eq!(self.state, FlowState::NotStarted);
        match self.sequencer.start() {
            Position::Active(_) => self.activate_current().await,
            _ => self.finish_flow().await,
        }
    }

    /// Handles one external signal to completion.
    pub async fn handle_signal(&mut self, signal: SessionSignal) {
        match signal {
            SessionSignal::Command { command } => self.handle_command(command).await,
            SessionSignal::DisplayChanged { shown } => self.on_display_changed(shown).await,
            SessionSignal::Exit => self.exit().await,
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match self.router.route(&command) {
            Routed::ModuleCompleted(result) => self.on_module_completed(result).await,
            // Handled, dropped and help toggles need no sequencing reaction.
            _ => {}
        }
    }

    async fn on_module_completed(&mut self, result: ModuleResult) {
        let kind = result.kind();
        let newly_completed = self.sequencer.complete_current();

        if newly_completed {
            tracing::info!(module = %kind, score = result.score(), "module completed");
            if let ModuleResult::ImmediateMemory(ref memory) = result {
                self.canonical_words = memory.canonical_words().to_vec();
            }
            if let Err(e) = self.repository.save_result(&self.session.id, &result).await {
                tracing::warn!(error = %e, module = %kind, "failed to persist module result");
            }
            self.session.mark_completed(kind);
        }

        // Enter the handshake whenever a completion is still waiting to be
        // turned into an advancement; a re-delivered completion after an
        // abandoned transition retries it, a stale duplicate does nothing.
        if self.state != FlowState::Transitioning && self.sequencer.has_unacknowledged_completions()
        {
            self.enter_transitioning().await;
        }
    }

    async fn enter_transitioning(&mut self) {
        self.router.clear_target();
        self.state = FlowState::Transitioning;
        self.awaiting_hide = true;
        self.hide_retried = false;
        self.request_hide().await;
    }

    async fn on_display_changed(&mut self, shown: bool) {
        match (shown, self.state) {
            (false, FlowState::Transitioning) => {
                self.awaiting_hide = false;
                if self.sequencer.unacknowledged_completions() == 0 {
                    // Hidden without a new completion behind it: resume the
                    // current module rather than lose sequencing.
                    tracing::debug!("hide confirmed without new completion, resuming current module");
                    self.activate_current().await;
                    return;
                }
                match self.sequencer.advance() {
                    Position::Active(_) => self.activate_current().await,
                    _ => self.finish_flow().await,
                }
            }
            (false, FlowState::ModuleActive) => {
                // External dismissal we did not ask for: re-present the
                // current module, never skip one.
                tracing::warn!("display hidden without a pending request, re-presenting current module");
                if let Some(kind) = self.sequencer.current() {
                    self.request_show(kind).await;
                }
            }
            (true, _) => {
                // Show confirmations are informational; the module became
                // interactive when its controller was installed.
                tracing::debug!("display shown");
            }
            _ => {}
        }
    }

    async fn on_transition_timeout(&mut self) {
        if self.awaiting_hide && !self.hide_retried {
            self.hide_retried = true;
            tracing::warn!("hide confirmation timed out, retrying once");
            self.request_hide().await;
            return;
        }

        // Second miss. Trust the observable state over the lost event.
        if !self.display.is_shown() {
            tracing::debug!("hidden confirmation lost, proceeding from observed state");
            self.on_display_changed(false).await;
            return;
        }

        tracing::warn!("display handshake failed twice, staying on current module");
        self.awaiting_hide = false;
        self.activate_current().await;
    }

    /// Enters `ModuleActive` for the sequencer's current module: builds its
    /// controller, installs it as the router target and requests the show.
    async fn activate_current(&mut self) {
        let Some(kind) = self.sequencer.current() else {
            self.finish_flow().await;
            return;
        };
        self.session.position = self.sequencer.position();
        self.session.touch();

        let controller: Box<dyn ModuleController> =
            build_controller(kind, &self.config, &self.canonical_words);
        self.router.set_target(controller);
        self.state = FlowState::ModuleActive;
        tracing::info!(module = %kind, "module active");

        self.request_show(kind).await;
    }

    async fn finish_flow(&mut self) {
        self.router.clear_target();
        self.session.position = self.sequencer.position();
        self.session.touch();
        self.state = FlowState::Finished;
        if let Err(e) = self.repository.save_session(&self.session).await {
            tracing::warn!(error = %e, "failed to persist finished session");
        }
        tracing::info!(session = %self.session.id, "assessment flow finished");
    }

    /// Exits the flow from any state, including mid-transition.
    ///
    /// Issues a best-effort hide of any open surface exactly once and
    /// leaves the session position untouched, so no module is skipped if
    /// the record is ever resumed by the storage collaborator.
    pub async fn exit(&mut self) {
        tracing::info!(session = %self.session.id, "exit requested");
        self.router.clear_target();
        if !self.exit_hide_issued {
            self.exit_hide_issued = true;
            self.request_hide().await;
        }
        if self.state != FlowState::Finished {
            self.state = FlowState::Finished;
            self.session.touch();
            if let Err(e) = self.repository.save_session(&self.session).await {
                tracing::warn!(error = %e, "failed to persist session on exit");
            }
        }
    }

    fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.config.display_timeout_ms.max(1))
    }

    async fn request_show(&self, module: ModuleKind) {
        match timeout(self.handshake_timeout(), self.display.request_show(module)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, module = %module, "display show request failed"),
            Err(_) => tracing::warn!(module = %module, "display show request timed out"),
        }
    }

    async fn request_hide(&self) {
        match timeout(self.handshake_timeout(), self.display.request_hide()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "display hide request failed"),
            Err(_) => tracing::warn!("display hide request timed out"),
        }
    }
}
