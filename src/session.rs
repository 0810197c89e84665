use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One connected harness and its running episode.
pub struct Session {
    pub id: String,
    pub episode: u64,
    pub steps: u64,
    pub total: f64,
    pub last: Option<f64>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            id,
            episode: 0,
            steps: 0,
            total: 0.0,
            last: None,
        }
    }

    pub fn record(&mut self, reward: f64) -> StepReply {
        self.steps += 1;
        self.total += reward;
        self.last = Some(reward);
        StepReply {
            msg_type: "reward",
            episode: self.episode,
            step: self.steps,
            reward,
            total: self.total,
        }
    }

    pub fn reset(&mut self) -> u64 {
        self.episode += 1;
        self.steps = 0;
        self.total = 0.0;
        self.last = None;
        self.episode
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            msg_type: "summary",
            episode: self.episode,
            steps: self.steps,
            total: self.total,
            last: self.last,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepReply {
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub episode: u64,
    pub step: u64,
    pub reward: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub episode: u64,
    pub steps: u64,
    pub total: f64,
    pub last: Option<f64>,
}

pub struct SharedSessionState {
    pub sessions: HashMap<String, Session>,
}

impl SharedSessionState {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Start tracking a new client under a fresh session id.
    pub fn open_session(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Session::new(id.clone()));
        id
    }

    pub fn close_session(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SharedSessionState {
    fn default() -> Self {
        Self::new()
    }
}
