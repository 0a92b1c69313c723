//! Run Debate use case
//!
//! Orchestrates a full run: blocks of alternating turns, an extension vote
//! after each block, and the optional final review.
//!
//! Every effect (progress updates, transcript appends, counter changes) is
//! gated on the run token. A superseded run keeps its in-flight request but
//! stops at the next checkpoint and reports [`RunOutcome::Stopped`].

use crate::cancellation::{RunToken, RunTokenSource};
use crate::config::RunDebateInput;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::run_store::{
    MessageKind, NewMessage, NoRunStore, PersistenceError, RunId, RunPatch, RunStore,
};
use crate::use_cases::decide_extension::DecideExtensionUseCase;
use crate::use_cases::generate_review::GenerateReviewUseCase;
use crate::use_cases::generate_turn::{GenerateTurnInput, GenerateTurnUseCase};
use chrono::Utc;
use duet_domain::{
    DomainError, ExtensionOutcome, RunExport, RunState, RunStatus, Side, SplitResponse,
    Transcript, TranscriptEntry,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const SYSTEM_AUTHOR: &str = "System";

/// Errors that can abort a debate run
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed,
    /// Superseded or stopped by the user. Not an error.
    Stopped,
    Failed(RunDebateError),
}

impl RunOutcome {
    pub fn status(&self) -> RunStatus {
        match self {
            RunOutcome::Completed => RunStatus::Completed,
            RunOutcome::Stopped => RunStatus::Stopped,
            RunOutcome::Failed(_) => RunStatus::Errored,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// Output from the RunDebate use case
#[derive(Debug)]
pub struct RunDebateOutput {
    pub outcome: RunOutcome,
    pub state: RunState,
    pub transcript: Transcript,
    /// Latest extension vote, if any happened
    pub last_outcome: Option<ExtensionOutcome>,
    pub final_review: Option<SplitResponse>,
    /// Snapshot of the run, present whenever the transcript is non-empty
    pub export: Option<RunExport>,
    /// Identifier assigned by the run-history service
    pub run_id: Option<RunId>,
}

/// Mutable bookkeeping of the active run.
struct ActiveRun {
    token: RunToken,
    state: RunState,
    transcript: Transcript,
    last_outcome: Option<ExtensionOutcome>,
    final_review: Option<SplitResponse>,
    run_id: Option<RunId>,
}

/// How the loop exited without an error
enum Flow {
    Completed,
    Stopped,
}

/// Use case for running a debate
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    turns: GenerateTurnUseCase<G>,
    extension: DecideExtensionUseCase<G>,
    review: GenerateReviewUseCase<G>,
    store: Arc<dyn RunStore>,
    logger: Arc<dyn ConversationLogger>,
    tokens: RunTokenSource,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            turns: GenerateTurnUseCase::new(Arc::clone(&gateway)),
            extension: DecideExtensionUseCase::new(Arc::clone(&gateway)),
            review: GenerateReviewUseCase::new(gateway),
            store: Arc::new(NoRunStore),
            logger: Arc::new(NoConversationLogger),
            tokens: RunTokenSource::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn RunStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Share a token source, e.g. with a Ctrl-C handler.
    pub fn with_token_source(mut self, tokens: RunTokenSource) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn token_source(&self) -> &RunTokenSource {
        &self.tokens
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<RunDebateOutput, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Only invalid input is returned as `Err`. Once the run has started,
    /// failures are reported through [`RunOutcome::Failed`] so the partial
    /// transcript and export survive.
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunDebateOutput, RunDebateError> {
        input.validate()?;

        let mut run = ActiveRun {
            token: self.tokens.begin(),
            state: RunState::new(
                input.theme.clone(),
                input.interaction_mode,
                input.initial_turns,
                input.max_extensions,
            ),
            transcript: Transcript::new(),
            last_outcome: None,
            final_review: None,
            run_id: None,
        };

        info!(
            "Starting debate on '{}' ({} vs {}, mode {})",
            input.theme, input.left.name, input.right.name, input.interaction_mode
        );
        progress.on_status(&RunStatus::Running);
        announce(&input, progress);

        let snapshot = build_export(&input, &run);
        run.run_id = swallow("start run", self.store.start_run(&snapshot).await);
        self.logger.log(ConversationEvent::new(
            "run_started",
            json!({
                "theme": input.theme,
                "interaction_mode": input.interaction_mode,
                "initial_turns": input.initial_turns,
                "max_extensions": input.max_extensions,
                "review_enabled": input.review_enabled,
                "left": input.left,
                "right": input.right,
                "review": input.review,
                "run_id": run.run_id,
            }),
        ));

        let outcome = match self.drive(&input, &mut run, progress).await {
            Ok(Flow::Completed) => {
                run.state.mark_completed();
                RunOutcome::Completed
            }
            Ok(Flow::Stopped) => RunOutcome::Stopped,
            Err(e) => RunOutcome::Failed(e),
        };

        match &outcome {
            RunOutcome::Completed => info!("Debate completed after {} turns", run.state.total_turns()),
            RunOutcome::Stopped => {
                info!("Debate stopped after {} turns", run.state.total_turns());
                progress.on_notice(SYSTEM_AUTHOR, "Run stopped by user.");
            }
            RunOutcome::Failed(e) => {
                warn!("Debate failed: {}", e);
                progress.on_notice("Error", &e.to_string());
            }
        }
        progress.on_status(&outcome.status());

        let export = (!run.transcript.is_empty()).then(|| build_export(&input, &run));
        self.finish(&run, &outcome, export.as_ref()).await;

        Ok(RunDebateOutput {
            outcome,
            state: run.state,
            transcript: run.transcript,
            last_outcome: run.last_outcome,
            final_review: run.final_review,
            export,
            run_id: run.run_id,
        })
    }

    /// The block loop followed by the optional review.
    async fn drive(
        &self,
        input: &RunDebateInput,
        run: &mut ActiveRun,
        progress: &dyn ProgressNotifier,
    ) -> Result<Flow, RunDebateError> {
        loop {
            let block = run.state.turns_this_block();
            info!("Starting block with {} turns", block);
            progress.on_block_start(block);

            for _ in 0..block {
                if !run.token.is_current() {
                    return Ok(Flow::Stopped);
                }
                self.take_turn(input, run, progress).await?;
            }

            if !run.token.is_current() {
                return Ok(Flow::Stopped);
            }

            if run.state.extensions_exhausted() {
                info!("Max extensions reached. Ending.");
                break;
            }

            progress.on_status(&RunStatus::Evaluating);
            let outcome = self
                .extension
                .execute(
                    &input.theme,
                    input.interaction_mode,
                    &input.left,
                    &input.right,
                    &run.transcript,
                )
                .await?;

            if !run.token.is_current() {
                return Ok(Flow::Stopped);
            }

            run.last_outcome = Some(outcome);
            let extend = run.state.apply_extension(outcome.decided as usize);

            progress.on_notice(
                "Outcome",
                &format!(
                    "Next turns decision -> {} ({} proposed {}, {} proposed {})",
                    outcome.decided, input.left.name, outcome.left, input.right.name, outcome.right
                ),
            );
            progress.on_outcome(&outcome, run.state.extensions_used());
            self.logger.log(ConversationEvent::new(
                "extension_vote",
                json!({
                    "left": outcome.left,
                    "right": outcome.right,
                    "decided": outcome.decided,
                    "extensions_used": run.state.extensions_used(),
                }),
            ));
            self.patch(
                run,
                RunPatch {
                    extensions_used: Some(run.state.extensions_used()),
                    last_outcome: Some(outcome.to_string()),
                    ..Default::default()
                },
            )
            .await;

            if !extend {
                info!("Outcome is 0. Ending.");
                break;
            }
        }

        if !input.review_enabled {
            progress.on_notice(
                SYSTEM_AUTHOR,
                "Review Agent is disabled. Skipping final review.",
            );
            return Ok(Flow::Completed);
        }

        if !run.token.is_current() {
            return Ok(Flow::Stopped);
        }

        if !run.transcript.is_empty() {
            self.take_review(input, run, progress).await?;
            if !run.token.is_current() {
                return Ok(Flow::Stopped);
            }
        }

        Ok(Flow::Completed)
    }

    async fn take_turn(
        &self,
        input: &RunDebateInput,
        run: &mut ActiveRun,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), RunDebateError> {
        let side = Side::for_turn(run.state.total_turns());
        let (active, other) = match side {
            Side::Left => (&input.left, &input.right),
            Side::Right => (&input.right, &input.left),
        };
        let turn_number = run.state.next_turn_number();

        progress.on_status(&RunStatus::Streaming(active.name.clone()));
        progress.on_turn_start(side, &active.name, turn_number);

        let turn = self
            .turns
            .execute(
                GenerateTurnInput {
                    theme: &input.theme,
                    mode: input.interaction_mode,
                    active,
                    other,
                    transcript: &run.transcript,
                    turn_number,
                },
                &run.token,
                progress,
            )
            .await?;

        // A superseded run must not touch the transcript.
        if !run.token.is_current() {
            debug!("Dropping turn {} from a superseded run", turn_number);
            return Ok(());
        }

        if turn.attempts > 1 {
            self.logger.log(ConversationEvent::new(
                "turn_retry",
                json!({
                    "turn": turn_number,
                    "author": active.name,
                    "attempts": turn.attempts,
                    "unresolved": turn.unresolved,
                }),
            ));
        }
        self.logger.log(ConversationEvent::new(
            "turn_accepted",
            json!({
                "turn": turn_number,
                "side": side,
                "author": active.name,
                "text": turn.response.clean_text,
                "thinking": turn.response.thinking_text,
                "attempts": turn.attempts,
                "best_effort": turn.is_best_effort(),
                "warnings": turn.warnings,
            }),
        ));

        let entry = turn.into_entry(active.name.clone());
        self.append(run, turn_number, MessageKind::Agent, &entry).await;
        if !run.token.is_current() {
            debug!("Dropping turn {} stopped while it was being stored", turn_number);
            return Ok(());
        }
        run.transcript.push(entry);
        run.state.record_turn();

        if let Some(entry) = run.transcript.entries().last() {
            progress.on_turn_complete(entry, run.state.total_turns());
        }
        info!("{} completed turn {}", active.name, run.state.total_turns());
        Ok(())
    }

    async fn take_review(
        &self,
        input: &RunDebateInput,
        run: &mut ActiveRun,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), RunDebateError> {
        progress.on_status(&RunStatus::StreamingReview);
        progress.on_review_start(&input.review.name);

        let review = self
            .review
            .execute(
                &input.theme,
                input.interaction_mode,
                &input.review,
                &run.transcript,
                &run.token,
                progress,
            )
            .await?;

        if !run.token.is_current() {
            return Ok(());
        }

        info!("Final review completed.");
        self.logger.log(ConversationEvent::new(
            "review_completed",
            json!({
                "author": input.review.name,
                "text": review.clean_text,
                "thinking": review.thinking_text,
            }),
        ));
        let entry = TranscriptEntry::new(input.review.name.clone(), review.clone());
        self.append(run, run.state.total_turns(), MessageKind::Review, &entry)
            .await;
        if !run.token.is_current() {
            return Ok(());
        }
        progress.on_review_complete(&review);
        run.final_review = Some(review);
        Ok(())
    }

    async fn append(
        &self,
        run: &ActiveRun,
        turn_index: usize,
        kind: MessageKind,
        entry: &TranscriptEntry,
    ) {
        let Some(id) = run.run_id else { return };
        let message = NewMessage {
            turn_index,
            message_type: kind,
            author: entry.author.clone(),
            raw_text: entry.raw_text.clone(),
            thinking_text: entry.thinking_text.clone(),
            answer_text: entry.text.clone(),
        };
        swallow("append message", self.store.append_message(id, &message).await);
    }

    async fn patch(&self, run: &ActiveRun, patch: RunPatch) {
        let Some(id) = run.run_id else { return };
        swallow("update run", self.store.patch_run(id, &patch).await);
    }

    /// Record the final totals and close the conversation log for this run.
    async fn finish(&self, run: &ActiveRun, outcome: &RunOutcome, export: Option<&RunExport>) {
        let now = RunExport::timestamp(Utc::now());
        let patch = RunPatch {
            exported_at: export.map(|e| e.exported_at.clone()),
            total_turns: Some(run.state.total_turns()),
            extensions_used: Some(run.state.extensions_used()),
            last_outcome: Some(RunExport::outcome_label(run.last_outcome.as_ref())),
            final_review: run.final_review.as_ref().map(|r| r.clean_text.clone()),
            completed: outcome.is_completed(),
            finished_at: Some(now),
        };
        self.patch(run, patch).await;

        let error = match outcome {
            RunOutcome::Failed(e) => Some(e.to_string()),
            _ => None,
        };
        self.logger.log(ConversationEvent::new(
            "run_finished",
            json!({
                "status": outcome.status().to_string(),
                "total_turns": run.state.total_turns(),
                "extensions_used": run.state.extensions_used(),
                "last_outcome": RunExport::outcome_label(run.last_outcome.as_ref()),
                "error": error,
            }),
        ));
    }
}

/// System lines shown when a run starts.
fn announce(input: &RunDebateInput, progress: &dyn ProgressNotifier) {
    progress.on_notice(SYSTEM_AUTHOR, &format!("Theme: {}", input.theme));
    progress.on_notice(SYSTEM_AUTHOR, &format!("Mode: {}", input.interaction_mode));
    progress.on_notice(
        SYSTEM_AUTHOR,
        &format!("Participants: {} vs {}", input.left.name, input.right.name),
    );

    let review_model = if input.review_enabled {
        input.review.model_id.to_string()
    } else {
        "disabled".to_string()
    };
    progress.on_notice(
        SYSTEM_AUTHOR,
        &format!(
            "Underlying models selected (local only): left={}, right={}, review={}",
            input.left.model_id, input.right.model_id, review_model
        ),
    );

    for agent in [&input.left, &input.right] {
        if !agent.agent_prompt.is_empty() {
            progress.on_notice(
                SYSTEM_AUTHOR,
                &format!("{} agent prompt: {}", agent.name, agent.agent_prompt),
            );
        }
    }
    if input.review_enabled && !input.review.agent_prompt.is_empty() {
        progress.on_notice(
            SYSTEM_AUTHOR,
            &format!("Review agent prompt: {}", input.review.agent_prompt),
        );
    }
}

fn build_export(input: &RunDebateInput, run: &ActiveRun) -> RunExport {
    RunExport {
        exported_at: RunExport::timestamp(Utc::now()),
        theme: input.theme.clone(),
        interaction_mode: input.interaction_mode,
        initial_turns: input.initial_turns,
        max_extensions: input.max_extensions,
        total_turns: run.state.total_turns(),
        extensions_used: run.state.extensions_used(),
        last_outcome: RunExport::outcome_label(run.last_outcome.as_ref()),
        left_agent: input.left.clone(),
        right_agent: input.right.clone(),
        review_enabled: input.review_enabled,
        review_agent: input.review.clone(),
        transcript: run.transcript.entries().to_vec(),
        final_review: run
            .final_review
            .as_ref()
            .map(|r| r.clean_text.clone())
            .unwrap_or_default(),
    }
}

/// Run-history failures are logged and never reach the loop.
fn swallow<T>(action: &str, result: Result<T, PersistenceError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(PersistenceError::Disabled) => None,
        Err(e) => {
            warn!("Run history: {} failed: {}", action, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedGateway, solid_reply};
    use async_trait::async_trait;
    use duet_domain::{AgentConfig, InteractionMode};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct RecordingStore {
        started: Mutex<Vec<RunExport>>,
        messages: Mutex<Vec<NewMessage>>,
        patches: Mutex<Vec<RunPatch>>,
    }

    #[async_trait]
    impl RunStore for RecordingStore {
        async fn start_run(&self, run: &RunExport) -> Result<RunId, PersistenceError> {
            self.started.lock().unwrap().push(run.clone());
            Ok(42)
        }

        async fn append_message(
            &self,
            id: RunId,
            message: &NewMessage,
        ) -> Result<(), PersistenceError> {
            assert_eq!(id, 42);
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn patch_run(&self, _id: RunId, patch: &RunPatch) -> Result<(), PersistenceError> {
            self.patches.lock().unwrap().push(patch.clone());
            Ok(())
        }

        async fn list_runs(
            &self,
        ) -> Result<Vec<crate::ports::run_store::RunSummary>, PersistenceError> {
            Ok(vec![])
        }

        async fn get_run(
            &self,
            id: RunId,
        ) -> Result<crate::ports::run_store::StoredRun, PersistenceError> {
            Err(PersistenceError::NotFound(id))
        }
    }

    struct UnreachableStore;

    #[async_trait]
    impl RunStore for UnreachableStore {
        async fn start_run(&self, _run: &RunExport) -> Result<RunId, PersistenceError> {
            Err(PersistenceError::Unreachable("connection refused".to_string()))
        }

        async fn append_message(
            &self,
            _id: RunId,
            _message: &NewMessage,
        ) -> Result<(), PersistenceError> {
            unreachable!("no run id was assigned")
        }

        async fn patch_run(&self, _id: RunId, _patch: &RunPatch) -> Result<(), PersistenceError> {
            unreachable!("no run id was assigned")
        }

        async fn list_runs(
            &self,
        ) -> Result<Vec<crate::ports::run_store::RunSummary>, PersistenceError> {
            Err(PersistenceError::Unreachable("connection refused".to_string()))
        }

        async fn get_run(
            &self,
            _id: RunId,
        ) -> Result<crate::ports::run_store::StoredRun, PersistenceError> {
            Err(PersistenceError::Unreachable("connection refused".to_string()))
        }
    }

    /// Stops the run while the first message is being stored.
    struct StoppingStore {
        source: RunTokenSource,
        messages: Mutex<usize>,
    }

    #[async_trait]
    impl RunStore for StoppingStore {
        async fn start_run(&self, _run: &RunExport) -> Result<RunId, PersistenceError> {
            Ok(7)
        }

        async fn append_message(
            &self,
            _id: RunId,
            _message: &NewMessage,
        ) -> Result<(), PersistenceError> {
            *self.messages.lock().unwrap() += 1;
            self.source.stop();
            Ok(())
        }

        async fn patch_run(&self, _id: RunId, _patch: &RunPatch) -> Result<(), PersistenceError> {
            Ok(())
        }

        async fn list_runs(
            &self,
        ) -> Result<Vec<crate::ports::run_store::RunSummary>, PersistenceError> {
            Ok(vec![])
        }

        async fn get_run(
            &self,
            id: RunId,
        ) -> Result<crate::ports::run_store::StoredRun, PersistenceError> {
            Err(PersistenceError::NotFound(id))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        statuses: Mutex<Vec<RunStatus>>,
        notices: Mutex<Vec<(String, String)>>,
        updates: Mutex<usize>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_status(&self, status: &RunStatus) {
            self.statuses.lock().unwrap().push(status.clone());
        }

        fn on_notice(&self, author: &str, text: &str) {
            self.notices
                .lock()
                .unwrap()
                .push((author.to_string(), text.to_string()));
        }

        fn on_stream_update(&self, _author: &str, _accumulated: &str, _fragment: &str) {
            *self.updates.lock().unwrap() += 1;
        }
    }

    fn input() -> RunDebateInput {
        RunDebateInput::new(
            "Remote work",
            AgentConfig::left("gemma3:1b"),
            AgentConfig::right("qwen3:4b"),
        )
        .with_mode(InteractionMode::Debate)
    }

    fn replies(range: std::ops::Range<usize>) -> Vec<String> {
        range.map(solid_reply).collect()
    }

    // ==================== End-to-end scenarios ====================

    #[tokio::test]
    async fn test_two_turns_without_extension_or_review() {
        let gateway = Arc::new(ScriptedGateway::new().with_streams(replies(1..3)));
        let use_case = RunDebateUseCase::new(Arc::clone(&gateway));
        let progress = RecordingProgress::default();

        let output = use_case
            .execute_with_progress(
                input()
                    .with_initial_turns(2)
                    .with_max_extensions(0)
                    .without_review(),
                &progress,
            )
            .await
            .unwrap();

        assert!(output.outcome.is_completed());
        let authors: Vec<_> = output
            .transcript
            .entries()
            .iter()
            .map(|e| e.author.as_str())
            .collect();
        assert_eq!(authors, vec!["Left Analyst", "Right Analyst"]);
        assert_eq!(gateway.vote_count(), 0);
        assert_eq!(gateway.stream_count(), 2);
        assert!(output.final_review.is_none());
        assert!(output.last_outcome.is_none());
        assert!(output.state.is_completed());

        let notices = progress.notices.lock().unwrap();
        assert!(notices.contains(&(
            "System".to_string(),
            "Review Agent is disabled. Skipping final review.".to_string()
        )));
        assert_eq!(
            progress.statuses.lock().unwrap().last(),
            Some(&RunStatus::Completed)
        );

        let export = output.export.unwrap();
        assert_eq!(export.total_turns, 2);
        assert_eq!(export.last_outcome, "-");
        assert_eq!(export.final_review, "");
    }

    #[tokio::test]
    async fn test_extension_runs_decided_turns_before_reevaluating() {
        // Block 1: 2 turns. Vote 2/3 -> 3 more turns. Vote 0/0 -> done.
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..6))
                .with_streams(["Summary: keep hybrid schedules."])
                .with_vote("Left Analyst", "2")
                .with_vote("Right Analyst", "3")
                .with_vote("Left Analyst", "0")
                .with_vote("Right Analyst", "0"),
        );
        let use_case = RunDebateUseCase::new(Arc::clone(&gateway));

        let output = use_case
            .execute(input().with_initial_turns(2).with_max_extensions(3))
            .await
            .unwrap();

        assert!(output.outcome.is_completed());
        assert_eq!(output.transcript.len(), 5);
        assert_eq!(output.state.extensions_used(), 1);
        assert_eq!(gateway.vote_count(), 4);
        assert_eq!(
            output.last_outcome,
            Some(ExtensionOutcome {
                left: 0,
                right: 0,
                decided: 0
            })
        );

        // Turns keep alternating by parity across blocks.
        let authors: Vec<_> = output
            .transcript
            .entries()
            .iter()
            .map(|e| e.author.as_str())
            .collect();
        assert_eq!(
            authors,
            vec![
                "Left Analyst",
                "Right Analyst",
                "Left Analyst",
                "Right Analyst",
                "Left Analyst"
            ]
        );

        let review = output.final_review.unwrap();
        assert_eq!(review.clean_text, "Summary: keep hybrid schedules.");
        let export = output.export.unwrap();
        assert_eq!(export.final_review, "Summary: keep hybrid schedules.");
        assert_eq!(export.last_outcome, "left=0, right=0, decided=0");
    }

    #[tokio::test]
    async fn test_extension_budget_caps_blocks() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..8))
                .with_vote("Left Analyst", "3")
                .with_vote("Right Analyst", "4"),
        );
        let use_case = RunDebateUseCase::new(Arc::clone(&gateway));

        let output = use_case
            .execute(
                input()
                    .with_initial_turns(2)
                    .with_max_extensions(1)
                    .without_review(),
            )
            .await
            .unwrap();

        assert!(output.outcome.is_completed());
        assert_eq!(output.transcript.len(), 6);
        assert_eq!(output.state.extensions_used(), 1);
        assert_eq!(gateway.vote_count(), 2);
        assert_eq!(
            output.export.unwrap().last_outcome,
            "left=3, right=4, decided=4"
        );
    }

    #[tokio::test]
    async fn test_zero_initial_turns_runs_one_turn() {
        let gateway = Arc::new(ScriptedGateway::new().with_streams(replies(1..2)));
        let use_case = RunDebateUseCase::new(gateway);

        let output = use_case
            .execute(
                input()
                    .with_initial_turns(0)
                    .with_max_extensions(0)
                    .without_review(),
            )
            .await
            .unwrap();

        assert_eq!(output.transcript.len(), 1);
    }

    // ==================== Errors and cancellation ====================

    #[tokio::test]
    async fn test_invalid_input_rejected_before_start() {
        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = RunDebateUseCase::new(Arc::clone(&gateway));

        let mut bad = input();
        bad.theme = String::new();
        let err = use_case.execute(bad).await.unwrap_err();

        assert!(matches!(
            err,
            RunDebateError::InvalidInput(DomainError::EmptyTheme)
        ));
        assert_eq!(gateway.stream_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_error_fails_run_but_keeps_export() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..2))
                .with_stream_error(GatewayError::RemoteService {
                    status: 404,
                    body: "model not found".to_string(),
                }),
        );
        let use_case = RunDebateUseCase::new(gateway);
        let progress = RecordingProgress::default();

        let output = use_case
            .execute_with_progress(input().with_initial_turns(4), &progress)
            .await
            .unwrap();

        assert!(matches!(
            output.outcome,
            RunOutcome::Failed(RunDebateError::Gateway(GatewayError::RemoteService {
                status: 404,
                ..
            }))
        ));
        assert_eq!(output.transcript.len(), 1);
        assert_eq!(output.export.unwrap().transcript.len(), 1);
        assert_eq!(
            progress.statuses.lock().unwrap().last(),
            Some(&RunStatus::Errored)
        );
    }

    #[tokio::test]
    async fn test_stop_during_turn_discards_it() {
        let source = RunTokenSource::new();
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..5))
                .stop_after_streams(2, source.clone()),
        );
        let use_case =
            RunDebateUseCase::new(Arc::clone(&gateway)).with_token_source(source.clone());
        let progress = RecordingProgress::default();

        let output = use_case
            .execute_with_progress(input().with_initial_turns(4), &progress)
            .await
            .unwrap();

        assert!(matches!(output.outcome, RunOutcome::Stopped));
        // The second turn was generated but never appended.
        assert_eq!(gateway.stream_count(), 2);
        assert_eq!(output.transcript.len(), 1);
        assert_eq!(output.state.total_turns(), 1);
        assert!(output.final_review.is_none());
        assert_eq!(
            progress.statuses.lock().unwrap().last(),
            Some(&RunStatus::Stopped)
        );
        assert!(progress.notices.lock().unwrap().contains(&(
            "System".to_string(),
            "Run stopped by user.".to_string()
        )));
    }

    #[tokio::test]
    async fn test_superseded_stream_updates_are_dropped() {
        let source = RunTokenSource::new();
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..3))
                .stop_after_streams(1, source.clone()),
        );
        let use_case = RunDebateUseCase::new(gateway).with_token_source(source);
        let progress = RecordingProgress::default();

        let output = use_case
            .execute_with_progress(input().with_initial_turns(2), &progress)
            .await
            .unwrap();

        assert!(matches!(output.outcome, RunOutcome::Stopped));
        assert!(output.transcript.is_empty());
        assert!(output.export.is_none());
        assert_eq!(*progress.updates.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stop_while_storing_turn_leaves_transcript_untouched() {
        let source = RunTokenSource::new();
        let gateway = Arc::new(ScriptedGateway::new().with_streams(replies(1..5)));
        let store = Arc::new(StoppingStore {
            source: source.clone(),
            messages: Mutex::new(0),
        });
        let use_case = RunDebateUseCase::new(Arc::clone(&gateway))
            .with_store(store.clone())
            .with_token_source(source);

        let output = use_case
            .execute(input().with_initial_turns(4).without_review())
            .await
            .unwrap();

        assert!(matches!(output.outcome, RunOutcome::Stopped));
        assert_eq!(*store.messages.lock().unwrap(), 1);
        assert_eq!(gateway.stream_count(), 1);
        assert!(output.transcript.is_empty());
        assert_eq!(output.state.total_turns(), 0);
        assert!(output.export.is_none());
    }

    #[tokio::test]
    async fn test_stop_during_review_is_not_completed() {
        let source = RunTokenSource::new();
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..4))
                .stop_after_streams(3, source.clone()),
        );
        let use_case =
            RunDebateUseCase::new(Arc::clone(&gateway)).with_token_source(source.clone());

        let output = use_case
            .execute(input().with_initial_turns(2).with_max_extensions(0))
            .await
            .unwrap();

        assert!(matches!(output.outcome, RunOutcome::Stopped));
        assert!(!output.state.is_completed());
        assert_eq!(gateway.stream_count(), 3);
        assert_eq!(output.transcript.len(), 2);
        assert!(output.final_review.is_none());
        assert_eq!(output.export.unwrap().final_review, "");
    }

    // ==================== Persistence and logging ====================

    #[tokio::test]
    async fn test_run_history_records_turns_review_and_totals() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_streams(replies(1..3))
                .with_streams(["<think>plan</think>Summary: pilot it."]),
        );
        let store = Arc::new(RecordingStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let use_case = RunDebateUseCase::new(gateway)
            .with_store(Arc::clone(&store) as Arc<dyn RunStore>)
            .with_conversation_logger(Arc::clone(&logger) as Arc<dyn ConversationLogger>);

        let output = use_case
            .execute(input().with_initial_turns(2).with_max_extensions(0))
            .await
            .unwrap();

        assert_eq!(output.run_id, Some(42));

        let started = store.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        assert!(started[0].transcript.is_empty());
        assert_eq!(started[0].theme, "Remote work");

        let messages = store.messages.lock().unwrap();
        let kinds: Vec<_> = messages
            .iter()
            .map(|m| (m.turn_index, m.message_type))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (1, MessageKind::Agent),
                (2, MessageKind::Agent),
                (2, MessageKind::Review)
            ]
        );
        assert_eq!(messages[2].thinking_text, "plan");
        assert_eq!(messages[2].answer_text, "Summary: pilot it.");

        let patches = store.patches.lock().unwrap();
        let last = patches.last().unwrap();
        assert!(last.completed);
        assert_eq!(last.total_turns, Some(2));
        assert_eq!(last.final_review.as_deref(), Some("Summary: pilot it."));
        assert_eq!(last.last_outcome.as_deref(), Some("-"));

        let events = logger.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "run_started",
                "turn_accepted",
                "turn_accepted",
                "review_completed",
                "run_finished"
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_store_does_not_abort() {
        let gateway = Arc::new(ScriptedGateway::new().with_streams(replies(1..3)));
        let use_case = RunDebateUseCase::new(gateway).with_store(Arc::new(UnreachableStore));

        let output = use_case
            .execute(
                input()
                    .with_initial_turns(2)
                    .with_max_extensions(0)
                    .without_review(),
            )
            .await
            .unwrap();

        assert!(output.outcome.is_completed());
        assert_eq!(output.run_id, None);
        assert!(output.export.is_some());
    }

    #[tokio::test]
    async fn test_retry_is_logged() {
        let gateway = Arc::new(
            ScriptedGateway::new().with_streams(["Let's begin!".to_string(), solid_reply(1)]),
        );
        let logger = Arc::new(RecordingLogger::default());
        let use_case = RunDebateUseCase::new(gateway)
            .with_conversation_logger(Arc::clone(&logger) as Arc<dyn ConversationLogger>);

        use_case
            .execute(
                input()
                    .with_initial_turns(1)
                    .with_max_extensions(0)
                    .without_review(),
            )
            .await
            .unwrap();

        let events = logger.events.lock().unwrap();
        assert!(events.contains(&"turn_retry"));
    }
}
