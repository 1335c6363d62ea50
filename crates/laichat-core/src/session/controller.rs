//! Turn lifecycle state machine for a streaming chat session.
//!
//! `submit` drives one full turn: the user's text is appended to the
//! in-memory list immediately, persistence (conversation creation plus
//! the user message write) runs on a spawned task so it never delays the
//! completion request, and the streamed answer is accumulated into a
//! placeholder assistant turn. Server ids are reconciled back into the
//! list by correlation token once the writes confirm. A failed attempt
//! unwinds the placeholder, keeps the user turn, and parks the
//! controller in `Errored` with a localized message.

use std::sync::Arc;

use futures_util::StreamExt;
use laichat_types::conversation::{Conversation, Message, Role};
use laichat_types::error::SessionError;
use laichat_types::turn::{ChatRequest, FileAttachment, Turn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::chat::repository::ConversationRepository;
use crate::chat::service::ConversationService;

use super::decode::Utf8Carry;
use super::transport::{ByteStream, CompletionTransport, TransportError};
use super::{SessionConfig, SessionTurn, TurnPhase};

/// What the spawned persistence task produced for one turn.
struct PrepOutcome {
    conversation: Option<Conversation>,
    user_message_id: Option<Uuid>,
}

/// How the stream read loop ended.
enum StreamOutcome {
    Completed,
    Failed(SessionError),
}

/// Drives streaming turns for one conversation.
pub struct SessionController<T, R>
where
    T: CompletionTransport,
    R: ConversationRepository + Send + Sync + 'static,
{
    transport: T,
    store: Arc<ConversationService<R>>,
    identity: Option<Uuid>,
    config: SessionConfig,
    cancel: CancellationToken,
    phase: TurnPhase,
    conversation: Option<Conversation>,
    turns: Vec<SessionTurn>,
    last_error: Option<SessionError>,
}

impl<T, R> SessionController<T, R>
where
    T: CompletionTransport,
    R: ConversationRepository + Send + Sync + 'static,
{
    pub fn new(
        transport: T,
        store: Arc<ConversationService<R>>,
        identity: Option<Uuid>,
        config: SessionConfig,
    ) -> Self {
        Self {
            transport,
            store,
            identity,
            config,
            cancel: CancellationToken::new(),
            phase: TurnPhase::Idle,
            conversation: None,
            turns: Vec::new(),
            last_error: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turns(&self) -> &[SessionTurn] {
        &self.turns
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Token that aborts the in-flight turn when cancelled.
    ///
    /// A cancelled token is replaced during the unwind, so the next turn
    /// starts clean; callers watching for cancellation should re-fetch it
    /// after each attempt.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Text of the most recent user turn, offered back when the user
    /// retries a failed attempt.
    pub fn retry_text(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.text.as_str())
    }

    /// Dismiss the current error without resubmitting.
    pub fn clear_error(&mut self) {
        self.last_error = None;
        if self.phase == TurnPhase::Errored {
            self.phase = TurnPhase::Idle;
        }
    }

    fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            TurnPhase::Sending | TurnPhase::Streaming | TurnPhase::Settling
        )
    }

    // -----------------------------------------------------------------------
    // Conversation lifecycle
    // -----------------------------------------------------------------------

    /// Continue a previously persisted conversation.
    pub fn resume(&mut self, conversation: Conversation, messages: &[Message]) {
        self.turns = messages.iter().map(SessionTurn::from_message).collect();
        self.conversation = Some(conversation);
        self.phase = TurnPhase::Idle;
        self.last_error = None;
    }

    /// Drop the current conversation view and start fresh.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.conversation = None;
        self.phase = TurnPhase::Idle;
        self.last_error = None;
    }

    // -----------------------------------------------------------------------
    // Turn submission
    // -----------------------------------------------------------------------

    /// Submit one turn and stream the answer to completion.
    ///
    /// `on_delta` receives each decoded text fragment as it arrives; the
    /// cumulative text is also kept on the trailing turn. Empty submits
    /// and submits while a turn is in flight are ignored.
    pub async fn submit(
        &mut self,
        message: String,
        files: Vec<FileAttachment>,
        mut on_delta: impl FnMut(&str),
    ) -> Result<(), SessionError> {
        if (message.trim().is_empty() && files.is_empty()) || self.in_flight() {
            return Ok(());
        }
        self.last_error = None;

        let visible = visible_text(&message, &files);
        let user_turn = SessionTurn::new(Role::User, visible.clone());
        let user_token = user_turn.token;
        self.turns.push(user_turn);
        self.phase = TurnPhase::Sending;

        // History excludes the turn being submitted.
        let history: Vec<Turn> = self.turns[..self.turns.len() - 1]
            .iter()
            .map(|turn| Turn::text(turn.role, turn.text.clone()))
            .collect();

        let prep = self.spawn_persistence_prep(message.clone(), visible);

        let request = ChatRequest {
            message,
            history,
            files: if files.is_empty() { None } else { Some(files) },
        };

        let attempt = self.cancel.child_token();
        let opened = tokio::time::timeout(
            self.config.response_timeout,
            self.transport.open(request, attempt.clone()),
        )
        .await;

        let mut stream = match opened {
            Ok(Ok(stream)) => stream,
            Ok(Err(err)) => {
                attempt.cancel();
                return self.fail(prep, user_token, session_error(err)).await;
            }
            Err(_) => {
                attempt.cancel();
                return self.fail(prep, user_token, SessionError::Timeout).await;
            }
        };

        self.phase = TurnPhase::Streaming;
        self.turns.push(SessionTurn::new(Role::Model, String::new()));

        match self.read_stream(&mut stream, &attempt, &mut on_delta).await {
            StreamOutcome::Completed => {}
            StreamOutcome::Failed(err) => {
                attempt.cancel();
                return self.fail(prep, user_token, err).await;
            }
        }

        self.phase = TurnPhase::Settling;
        self.adopt_prep(prep, user_token).await;
        self.persist_model_turn().await;
        self.phase = TurnPhase::Idle;
        Ok(())
    }

    /// Consume the response body, appending decoded text to the trailing
    /// turn.
    async fn read_stream(
        &mut self,
        stream: &mut ByteStream,
        attempt: &CancellationToken,
        on_delta: &mut impl FnMut(&str),
    ) -> StreamOutcome {
        let mut decoder = Utf8Carry::new();
        loop {
            let next = tokio::select! {
                _ = attempt.cancelled() => {
                    return StreamOutcome::Failed(SessionError::Cancelled);
                }
                next = stream.next() => next,
            };
            match next {
                Some(Ok(chunk)) => {
                    let text = decoder.push(&chunk);
                    if !text.is_empty() {
                        self.append_to_tail(&text);
                        on_delta(&text);
                    }
                }
                Some(Err(TransportError::Cancelled)) => {
                    return StreamOutcome::Failed(SessionError::Cancelled);
                }
                Some(Err(err)) => {
                    return StreamOutcome::Failed(SessionError::StreamInterrupted(
                        err.to_string(),
                    ));
                }
                None => {
                    if let Some(tail) = decoder.finish() {
                        let text = tail.to_string();
                        self.append_to_tail(&text);
                        on_delta(&text);
                    }
                    return StreamOutcome::Completed;
                }
            }
        }
    }

    fn append_to_tail(&mut self, text: &str) {
        if let Some(turn) = self.turns.last_mut() {
            turn.text.push_str(text);
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Ensure a conversation exists and persist the user message, off the
    /// critical path of the completion request.
    ///
    /// With no resolvable identity the conversation cannot be created and
    /// the turn simply goes unpersisted; streaming proceeds regardless.
    fn spawn_persistence_prep(
        &self,
        title_source: String,
        content: String,
    ) -> JoinHandle<PrepOutcome> {
        let store = Arc::clone(&self.store);
        let identity = self.identity;
        let existing = self.conversation.clone();
        tokio::spawn(async move {
            let conversation = match existing {
                Some(conversation) => Some(conversation),
                None => store.create_conversation(identity, &title_source).await,
            };
            let Some(conversation) = conversation else {
                return PrepOutcome {
                    conversation: None,
                    user_message_id: None,
                };
            };
            let saved = store
                .save_message(conversation.id, Role::User, content)
                .await;
            PrepOutcome {
                user_message_id: saved.map(|message| message.id),
                conversation: Some(conversation),
            }
        })
    }

    /// Join the persistence task and fold its results into session state.
    ///
    /// Runs on both the settle and the error path: a conversation created
    /// for a failed turn is still adopted, so a retry lands in it instead
    /// of creating another one.
    async fn adopt_prep(&mut self, prep: JoinHandle<PrepOutcome>, user_token: Uuid) {
        match prep.await {
            Ok(outcome) => {
                if self.conversation.is_none() {
                    self.conversation = outcome.conversation;
                }
                if let Some(id) = outcome.user_message_id {
                    if let Some(turn) =
                        self.turns.iter_mut().find(|turn| turn.token == user_token)
                    {
                        turn.id = Some(id);
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "persistence prep task failed");
            }
        }
    }

    /// Persist the completed assistant turn and attach its server id.
    ///
    /// Failure is tolerated silently: the visible text is already
    /// correct, only the durable copy is at risk.
    async fn persist_model_turn(&mut self) {
        let Some(conversation) = &self.conversation else {
            return;
        };
        let Some(turn) = self.turns.last() else {
            return;
        };
        if turn.role != Role::Model || turn.text.is_empty() {
            return;
        }
        let token = turn.token;
        let saved = self
            .store
            .save_message(conversation.id, Role::Model, turn.text.clone())
            .await;
        if let Some(message) = saved {
            if let Some(turn) = self.turns.iter_mut().find(|turn| turn.token == token) {
                turn.id = Some(message.id);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Unwind
    // -----------------------------------------------------------------------

    /// Unwind a failed attempt.
    ///
    /// The placeholder assistant turn is removed whether it is empty or
    /// holds partial text: an interrupted answer is discarded rather than
    /// shown or persisted half-finished. The user turn stays for retry.
    async fn fail(
        &mut self,
        prep: JoinHandle<PrepOutcome>,
        user_token: Uuid,
        err: SessionError,
    ) -> Result<(), SessionError> {
        if let Some(last) = self.turns.last() {
            if last.role == Role::Model && last.id.is_none() {
                self.turns.pop();
            }
        }
        self.adopt_prep(prep, user_token).await;
        if matches!(err, SessionError::Cancelled) {
            self.cancel = CancellationToken::new();
        }
        debug!(error = %err, "turn failed");
        self.phase = TurnPhase::Errored;
        self.last_error = Some(err.clone());
        Err(err)
    }
}

/// Turn text as rendered in the transcript: the raw input, plus a file
/// listing when attachments ride along.
fn visible_text(message: &str, files: &[FileAttachment]) -> String {
    if files.is_empty() {
        return message.to_string();
    }
    let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
    format!("{message}\n\n[Attached files: {}]", names.join(", "))
}

fn session_error(err: TransportError) -> SessionError {
    match err {
        TransportError::Configuration(message) => SessionError::Configuration(message),
        TransportError::Cancelled => SessionError::Cancelled,
        other => SessionError::Failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::testing::MemoryConversationRepository;

    // -----------------------------------------------------------------------
    // Scripted transport
    // -----------------------------------------------------------------------

    enum Script {
        /// Headers arrive, then these chunk results, then a clean end.
        Respond(Vec<Result<Vec<u8>, TransportError>>),
        /// Headers arrive, chunks flow, then the stream stalls forever.
        RespondThenStall(Vec<Vec<u8>>),
        /// The gateway refuses the turn outright.
        Refuse(TransportError),
        /// Headers never arrive.
        Stall,
    }

    struct MockTransport {
        scripts: Mutex<VecDeque<Script>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockTransport {
        fn new(scripts: Vec<Script>) -> Self {
            Self {
                scripts: Mutex::new(scripts.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl CompletionTransport for &MockTransport {
        fn open(
            &self,
            request: ChatRequest,
            cancel: CancellationToken,
        ) -> impl std::future::Future<Output = Result<ByteStream, TransportError>> + Send
        {
            self.requests.lock().unwrap().push(request);
            let script = self.scripts.lock().unwrap().pop_front();
            async move {
                match script {
                    None => Err(TransportError::Connect("no script".to_string())),
                    Some(Script::Refuse(err)) => Err(err),
                    Some(Script::Stall) => {
                        cancel.cancelled().await;
                        Err(TransportError::Cancelled)
                    }
                    Some(Script::Respond(chunks)) => {
                        let stream: ByteStream = Box::pin(tokio_stream::iter(chunks));
                        Ok(stream)
                    }
                    Some(Script::RespondThenStall(chunks)) => {
                        let stream: ByteStream = Box::pin(async_stream::stream! {
                            for chunk in chunks {
                                yield Ok(chunk);
                            }
                            std::future::pending::<()>().await;
                        });
                        Ok(stream)
                    }
                }
            }
        }
    }

    fn ok_chunks(parts: &[&str]) -> Script {
        Script::Respond(parts.iter().map(|p| Ok(p.as_bytes().to_vec())).collect())
    }

    fn controller_with(
        scripts: &MockTransport,
        identity: Option<Uuid>,
        config: SessionConfig,
    ) -> SessionController<&'_ MockTransport, MemoryConversationRepository> {
        let store = Arc::new(ConversationService::new(
            MemoryConversationRepository::default(),
        ));
        SessionController::new(scripts, store, identity, config)
    }

    fn attachment(name: &str) -> FileAttachment {
        FileAttachment {
            name: name.to_string(),
            mime_type: Some("image/png".to_string()),
            data: Some("aGVsbG8=".to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_round_trip_persists_and_reconciles_both_turns() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![ok_chunks(&["Ka ", "lawm."])]);
        let mut controller =
            controller_with(&transport, Some(user_id), SessionConfig::default());

        let mut seen = String::new();
        controller
            .submit("hello".to_string(), Vec::new(), |delta| {
                seen.push_str(delta);
            })
            .await
            .unwrap();

        assert_eq!(controller.phase(), TurnPhase::Idle);
        assert_eq!(seen, "Ka lawm.");

        let turns = controller.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].text, "hello");
        assert!(turns[0].id.is_some());
        assert_eq!(turns[1].role, Role::Model);
        assert_eq!(turns[1].text, "Ka lawm.");
        assert!(turns[1].id.is_some());

        let conversation = controller.conversation().unwrap().clone();
        assert_eq!(conversation.title, "hello");
        let stored = controller.store.messages(&conversation.id).await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].role, Role::User);
        assert_eq!(stored[0].id, turns[0].id.unwrap());
        assert_eq!(stored[1].content, "Ka lawm.");
    }

    #[tokio::test]
    async fn test_second_turn_reuses_conversation_and_carries_history() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![
            ok_chunks(&["first answer"]),
            ok_chunks(&["second answer"]),
        ]);
        let mut controller =
            controller_with(&transport, Some(user_id), SessionConfig::default());

        controller
            .submit("one".to_string(), Vec::new(), |_| {})
            .await
            .unwrap();
        controller
            .submit("two".to_string(), Vec::new(), |_| {})
            .await
            .unwrap();

        let conversations = controller.store.conversations(&user_id).await;
        assert_eq!(conversations.len(), 1);
        let stored = controller.store.messages(&conversations[0].id).await;
        assert_eq!(stored.len(), 4);

        let requests = transport.requests();
        assert!(requests[0].history.is_empty());
        let history: Vec<(Role, String)> = requests[1]
            .history
            .iter()
            .map(|turn| (turn.role, turn.joined_text()))
            .collect();
        assert_eq!(
            history,
            vec![
                (Role::User, "one".to_string()),
                (Role::Model, "first answer".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_submit_is_ignored() {
        let transport = MockTransport::new(vec![]);
        let mut controller =
            controller_with(&transport, Some(Uuid::now_v7()), SessionConfig::default());

        controller
            .submit("   ".to_string(), Vec::new(), |_| {})
            .await
            .unwrap();

        assert_eq!(controller.phase(), TurnPhase::Idle);
        assert!(controller.turns().is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_attachments_suffix_transcript_but_not_wire_message() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![ok_chunks(&["noted"])]);
        let mut controller =
            controller_with(&transport, Some(user_id), SessionConfig::default());

        controller
            .submit(
                "look at these".to_string(),
                vec![attachment("a.png"), attachment("b.png")],
                |_| {},
            )
            .await
            .unwrap();

        let expected = "look at these\n\n[Attached files: a.png, b.png]";
        assert_eq!(controller.turns()[0].text, expected);

        let requests = transport.requests();
        assert_eq!(requests[0].message, "look at these");
        assert_eq!(requests[0].files.as_ref().unwrap().len(), 2);

        // The persisted copy matches the transcript, suffix included.
        let conversation = controller.conversation().unwrap().clone();
        let stored = controller.store.messages(&conversation.id).await;
        assert_eq!(stored[0].content, expected);
    }

    #[tokio::test]
    async fn test_split_utf8_sequence_reassembles_across_chunks() {
        // "ṭhat" with U+1E6D split mid-sequence.
        let transport = MockTransport::new(vec![Script::Respond(vec![
            Ok(vec![0xE1, 0xB9]),
            Ok(vec![0xAD, b'h', b'a', b't']),
        ])]);
        let mut controller =
            controller_with(&transport, Some(Uuid::now_v7()), SessionConfig::default());

        let mut deltas: Vec<String> = Vec::new();
        controller
            .submit("hi".to_string(), Vec::new(), |delta| {
                deltas.push(delta.to_string());
            })
            .await
            .unwrap();

        assert_eq!(controller.turns()[1].text, "\u{1E6D}hat");
        assert!(deltas.iter().all(|d| !d.contains('\u{FFFD}')));
    }

    // -----------------------------------------------------------------------
    // Failure paths
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_timeout_unwinds_placeholder_and_keeps_user_turn() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![Script::Stall]);
        let config = SessionConfig {
            response_timeout: Duration::from_millis(50),
        };
        let mut controller = controller_with(&transport, Some(user_id), config);

        let err = controller
            .submit("slow one".to_string(), Vec::new(), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Timeout));
        assert_eq!(
            err.localized_message(),
            "Hngak khawh a rei deuhdeuh. Tivei hnih in i fel law."
        );
        assert_eq!(controller.phase(), TurnPhase::Errored);

        // Only the optimistic user turn remains, and its persistence
        // still completed and reconciled.
        assert_eq!(controller.turns().len(), 1);
        assert_eq!(controller.turns()[0].role, Role::User);
        assert!(controller.turns()[0].id.is_some());
        assert!(controller.conversation().is_some());
    }

    #[tokio::test]
    async fn test_missing_credential_maps_to_configuration_error() {
        let transport = MockTransport::new(vec![Script::Refuse(
            TransportError::Configuration("API Key missing".to_string()),
        )]);
        let mut controller =
            controller_with(&transport, Some(Uuid::now_v7()), SessionConfig::default());

        let err = controller
            .submit("hi".to_string(), Vec::new(), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Configuration(_)));
        assert_eq!(
            err.localized_message(),
            "API key biafelmiam a um. Administrator ah a hriamhnak petu."
        );
    }

    #[tokio::test]
    async fn test_mid_stream_interruption_discards_partial_text() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![Script::Respond(vec![
            Ok(b"partial ".to_vec()),
            Err(TransportError::Stream("connection reset".to_string())),
        ])]);
        let mut controller =
            controller_with(&transport, Some(user_id), SessionConfig::default());

        let err = controller
            .submit("question".to_string(), Vec::new(), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::StreamInterrupted(_)));
        assert_eq!(controller.turns().len(), 1);
        assert_eq!(controller.retry_text(), Some("question"));

        // The partial answer was never persisted.
        let conversation = controller.conversation().unwrap().clone();
        let stored = controller.store.messages(&conversation.id).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_cancellation_discards_partial_and_next_turn_starts_clean() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![
            Script::RespondThenStall(vec![b"never finished".to_vec()]),
            ok_chunks(&["done"]),
        ]);
        let mut controller =
            controller_with(&transport, Some(user_id), SessionConfig::default());

        let cancel = controller.cancel_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        });

        let err = controller
            .submit("first".to_string(), Vec::new(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Cancelled));
        assert_eq!(controller.turns().len(), 1);

        // The replaced token lets a follow-up turn run normally.
        controller
            .submit("second".to_string(), Vec::new(), |_| {})
            .await
            .unwrap();
        assert_eq!(controller.phase(), TurnPhase::Idle);
        assert!(controller.last_error().is_none());
        let texts: Vec<&str> = controller
            .turns()
            .iter()
            .map(|turn| turn.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "done"]);
    }

    #[tokio::test]
    async fn test_missing_identity_streams_without_persisting() {
        let transport = MockTransport::new(vec![ok_chunks(&["still works"])]);
        let mut controller = controller_with(&transport, None, SessionConfig::default());

        controller
            .submit("hello".to_string(), Vec::new(), |_| {})
            .await
            .unwrap();

        assert_eq!(controller.phase(), TurnPhase::Idle);
        assert!(controller.conversation().is_none());
        assert_eq!(controller.turns().len(), 2);
        assert!(controller.turns().iter().all(|turn| turn.id.is_none()));
    }

    #[tokio::test]
    async fn test_resume_rehydrates_and_next_turn_joins_conversation() {
        let user_id = Uuid::now_v7();
        let transport = MockTransport::new(vec![ok_chunks(&["welcome back"])]);
        let mut controller =
            controller_with(&transport, Some(user_id), SessionConfig::default());

        let conversation = controller
            .store
            .create_conversation(Some(user_id), "old chat")
            .await
            .unwrap();
        let earlier = controller
            .store
            .save_message(conversation.id, Role::User, "old question".to_string())
            .await
            .unwrap();

        controller.resume(conversation.clone(), &[earlier]);
        assert_eq!(controller.turns().len(), 1);
        assert!(controller.turns()[0].id.is_some());

        controller
            .submit("new question".to_string(), Vec::new(), |_| {})
            .await
            .unwrap();

        let conversations = controller.store.conversations(&user_id).await;
        assert_eq!(conversations.len(), 1);
        let requests = transport.requests();
        assert_eq!(requests[0].history.len(), 1);
        assert_eq!(requests[0].history[0].joined_text(), "old question");
    }
}
