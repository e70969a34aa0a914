use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::movegen::JumpRule;
use crate::search::alphabeta::ResultPolicy;
use crate::search::eval::OpponentWeight;

pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Per-player search settings. Set once by the caller, read-only while a
/// search runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_depth: u32,
    /// Depth used instead of `max_depth` when the armies cannot interact.
    pub max_depth_without_opponent: u32,
    /// Actions examined per node (after ordering); `None` examines all.
    pub max_actions: Option<usize>,
    pub sort_actions: bool,
    pub without_opponent: bool,
    /// Split the root across the rayon pool.
    pub parallel: bool,
    pub policy: ResultPolicy,
    pub opponent_weight: OpponentWeight,
    pub jump_rule: JumpRule,
    /// Seed for tie-breaking; entropy when absent.
    pub seed: Option<u64>,
    /// Advisory wall-clock budget. Overruns are logged, never enforced.
    pub time_budget_ms: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_depth_without_opponent: DEFAULT_MAX_DEPTH - 1,
            max_actions: None,
            sort_actions: false,
            without_opponent: false,
            parallel: false,
            policy: ResultPolicy::AllTied,
            opponent_weight: OpponentWeight::Full,
            jump_rule: JumpRule::Bridge,
            seed: None,
            time_budget_ms: None,
        }
    }
}

impl AgentConfig {
    pub fn from_json_str(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigIo { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

    pub fn depth(&self, without_opponent: bool) -> u32 {
        if without_opponent { self.max_depth_without_opponent } else { self.max_depth }
    }

    pub fn time_budget(&self) -> Option<Duration> { self.time_budget_ms.map(Duration::from_millis) }
}
