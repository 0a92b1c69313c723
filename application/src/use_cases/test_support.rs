//! Scripted gateway shared by the use case tests.

use crate::cancellation::RunTokenSource;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, UpdateSink};
use async_trait::async_trait;
use duet_domain::{Message, ModelId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A reply long enough and specific enough to pass validation.
pub(crate) fn solid_reply(n: usize) -> String {
    format!(
        "Point {n}: distributed teams trade hallway serendipity for deep focus time, \
         and measuring output per sprint shows the tradeoff clearly. Which metric would convince you?"
    )
}

pub(crate) struct ScriptedGateway {
    streams: Mutex<VecDeque<Result<String, GatewayError>>>,
    votes: Mutex<HashMap<String, VecDeque<String>>>,
    pub(crate) stream_calls: Mutex<Vec<(ModelId, Vec<Message>)>>,
    pub(crate) vote_calls: Mutex<Vec<Vec<Message>>>,
    /// Stop the run once this many streams have started
    stop_after: Mutex<Option<(usize, RunTokenSource)>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self {
            streams: Mutex::new(VecDeque::new()),
            votes: Mutex::new(HashMap::new()),
            stream_calls: Mutex::new(Vec::new()),
            vote_calls: Mutex::new(Vec::new()),
            stop_after: Mutex::new(None),
        }
    }

    pub(crate) fn with_streams<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.streams
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(|r| Ok(r.into())));
        self
    }

    pub(crate) fn with_stream_error(self, error: GatewayError) -> Self {
        self.streams.lock().unwrap().push_back(Err(error));
        self
    }

    pub(crate) fn with_vote(self, agent: &str, reply: &str) -> Self {
        self.votes
            .lock()
            .unwrap()
            .entry(agent.to_string())
            .or_default()
            .push_back(reply.to_string());
        self
    }

    pub(crate) fn stop_after_streams(self, count: usize, source: RunTokenSource) -> Self {
        *self.stop_after.lock().unwrap() = Some((count, source));
        self
    }

    pub(crate) fn stream_count(&self) -> usize {
        self.stream_calls.lock().unwrap().len()
    }

    pub(crate) fn vote_count(&self) -> usize {
        self.vote_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        _model: &ModelId,
        messages: &[Message],
    ) -> Result<String, GatewayError> {
        self.vote_calls.lock().unwrap().push(messages.to_vec());
        let system = &messages[0].content;
        let mut votes = self.votes.lock().unwrap();
        let reply = votes
            .iter_mut()
            .find(|(agent, _)| system.starts_with(&format!("You are {}.", agent)))
            .and_then(|(_, replies)| replies.pop_front())
            .unwrap_or_else(|| "0".to_string());
        Ok(reply)
    }

    async fn complete_streaming(
        &self,
        model: &ModelId,
        messages: &[Message],
        on_update: UpdateSink<'_>,
    ) -> Result<String, GatewayError> {
        let started = {
            let mut calls = self.stream_calls.lock().unwrap();
            calls.push((model.clone(), messages.to_vec()));
            calls.len()
        };

        let next = self
            .streams
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Connection("no scripted reply".to_string())));

        if let Some((count, source)) = self.stop_after.lock().unwrap().as_ref() {
            if started >= *count {
                source.stop();
            }
        }

        let text = next?;
        let mut accumulated = String::new();
        for fragment in text.split_inclusive(' ') {
            accumulated.push_str(fragment);
            on_update(&accumulated, fragment);
        }
        Ok(accumulated.trim().to_string())
    }

    async fn available_models(&self) -> Result<Vec<ModelId>, GatewayError> {
        Ok(vec![ModelId::new("gemma3:1b")])
    }
}
