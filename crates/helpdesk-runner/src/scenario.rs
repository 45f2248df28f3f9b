use std::path::Path;

use anyhow::{anyhow, Context, Result};
use helpdesk_core::TicketQueue;
use serde::Deserialize;

use crate::reply::NoticeKind;
use crate::{Config, ScriptStats, Session};

#[derive(Debug, Deserialize)]
pub struct ScenarioExpected {
    pub scenario_id: String,
    #[serde(default)]
    pub pending: Vec<String>,
    #[serde(default)]
    pub resolved: Vec<String>,
    #[serde(default)]
    pub notices: Vec<NoticeKind>,
    #[serde(default)]
    pub parse_errors: usize,
}

#[derive(Debug)]
pub struct ScenarioResult {
    pub pending: Vec<String>,
    pub resolved: Vec<String>,
    pub notices: Vec<NoticeKind>,
    pub stats: ScriptStats,
    /// Everything the session printed, in order.
    pub transcript: String,
}

pub fn load_expected(dir: &Path) -> Result<ScenarioExpected> {
    let p = dir.join("expected.yaml");
    let s = std::fs::read_to_string(&p).with_context(|| format!("read expected.yaml: {}", p.display()))?;
    let exp: ScenarioExpected = serde_yaml::from_str(&s).with_context(|| "parse expected.yaml")?;
    Ok(exp)
}

/// Runs `script.txt` from a fixture directory through a fresh session.
/// A `helpdesk.toml` next to the script overrides the default config.
pub fn simulate(dir: &Path) -> Result<ScenarioResult> {
    let config = Config::load_or_default(&dir.join("helpdesk.toml"))?;
    let script_path = dir.join("script.txt");
    let script = std::fs::read_to_string(&script_path).with_context(|| format!("read {}", script_path.display()))?;

    let mut session = Session::new(TicketQueue::new(), config);
    let mut out = Vec::new();
    let stats = session.run_script(script.as_bytes(), &mut out)?;

    let snap = session.queue().snapshot();
    Ok(ScenarioResult {
        pending: snap.pending_texts().into_iter().map(str::to_string).collect(),
        resolved: snap.resolved_texts().into_iter().map(str::to_string).collect(),
        notices: stats.notices.clone(),
        stats,
        transcript: String::from_utf8_lossy(&out).into_owned(),
    })
}

/// Simulates a fixture and compares the outcome with its `expected.yaml`.
pub fn check(dir: &Path) -> Result<ScenarioResult> {
    let exp = load_expected(dir)?;
    let res = simulate(dir)?;
    let mut problems = Vec::new();
    if res.pending != exp.pending {
        problems.push(format!("pending: expected {:?}, got {:?}", exp.pending, res.pending));
    }
    if res.resolved != exp.resolved {
        problems.push(format!("resolved: expected {:?}, got {:?}", exp.resolved, res.resolved));
    }
    if res.notices != exp.notices {
        problems.push(format!("notices: expected {:?}, got {:?}", exp.notices, res.notices));
    }
    if res.stats.parse_errors != exp.parse_errors {
        problems.push(format!(
            "parse errors: expected {}, got {}",
            exp.parse_errors, res.stats.parse_errors
        ));
    }
    if !problems.is_empty() {
        return Err(anyhow!("scenario {} failed:\n{}", exp.scenario_id, problems.join("\n")));
    }
    Ok(res)
}
