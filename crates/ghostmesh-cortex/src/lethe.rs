// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — GhostMesh Lethe Memory Decay
// ─────────────────────────────────────────────────────────────────────
//! Working memory that rots unless reinforced.
//!
//! A record's strength is `(1 / (age_h + 1)) · (1 + ln(retrievals + 1))`.
//! Records at or below the survival threshold are pruned on every
//! metabolize pass. Strong records are compressed into milestones once.

use serde::{Deserialize, Serialize};

use ghostmesh_types::{GhostmeshError, GhostmeshResult};

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetheConfig {
    pub survival_threshold: f64,
    pub promotion_threshold: f64,
    /// Milestone content is truncated to this many characters.
    pub milestone_chars: usize,
}

impl Default for LetheConfig {
    fn default() -> Self {
        Self {
            survival_threshold: 0.1,
            promotion_threshold: 0.8,
            milestone_chars: 100,
        }
    }
}

impl LetheConfig {
    pub fn validate(&self) -> GhostmeshResult<()> {
        if !self.survival_threshold.is_finite() || !self.promotion_threshold.is_finite() {
            return Err(GhostmeshError::Config(format!(
                "thresholds must be finite, got survival={} promotion={}",
                self.survival_threshold, self.promotion_threshold
            )));
        }
        if self.promotion_threshold < self.survival_threshold {
            return Err(GhostmeshError::Config(format!(
                "promotion_threshold ({}) must be >= survival_threshold ({})",
                self.promotion_threshold, self.survival_threshold
            )));
        }
        Ok(())
    }
}

/// One working-memory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub content: String,
    pub meta: String,
    /// Unix time of ingestion, in seconds.
    pub timestamp_s: f64,
    pub retrievals: u32,
    #[serde(default)]
    promoted: bool,
}

impl MemoryRecord {
    pub fn new(content: impl Into<String>, meta: impl Into<String>, timestamp_s: f64) -> Self {
        Self {
            content: content.into(),
            meta: meta.into(),
            timestamp_s,
            retrievals: 0,
            promoted: false,
        }
    }

    pub fn with_retrievals(mut self, retrievals: u32) -> Self {
        self.retrievals = retrievals;
        self
    }

    pub fn is_promoted(&self) -> bool {
        self.promoted
    }

    /// Decay strength at `now_s`. Records from the future count as age 0.
    pub fn strength(&self, now_s: f64) -> f64 {
        let age_h = ((now_s - self.timestamp_s) / SECONDS_PER_HOUR).max(0.0);
        let recency = 1.0 / (age_h + 1.0);
        recency * (1.0 + (f64::from(self.retrievals) + 1.0).ln())
    }
}

/// Compressed long-term entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub content: String,
    pub meta: String,
    pub timestamp_s: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetabolizeOutcome {
    pub survivors: usize,
    pub pruned: usize,
    pub promoted: usize,
}

impl MetabolizeOutcome {
    pub fn promoted_any(&self) -> bool {
        self.promoted > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct LetheEngine {
    config: LetheConfig,
    working: Vec<MemoryRecord>,
    milestones: Vec<Milestone>,
}

impl LetheEngine {
    pub fn new(config: LetheConfig) -> GhostmeshResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            working: Vec::new(),
            milestones: Vec::new(),
        })
    }

    /// Ingest `record`, decay the whole working set against `now_s`, and
    /// promote strong survivors.
    pub fn metabolize(&mut self, record: MemoryRecord, now_s: f64) -> MetabolizeOutcome {
        self.working.push(record);

        let before = self.working.len();
        let survival = self.config.survival_threshold;
        self.working.retain(|m| m.strength(now_s) > survival);

        let limit = self.config.milestone_chars;
        let mut promoted = 0;
        for mem in self.working.iter_mut() {
            if mem.promoted || mem.strength(now_s) <= self.config.promotion_threshold {
                continue;
            }
            mem.promoted = true;
            self.milestones.push(Milestone {
                content: mem.content.chars().take(limit).collect(),
                meta: mem.meta.clone(),
                timestamp_s: mem.timestamp_s,
            });
            promoted += 1;
        }

        let outcome = MetabolizeOutcome {
            survivors: self.working.len(),
            pruned: before - self.working.len(),
            promoted,
        };
        if outcome.promoted_any() {
            log::info!(
                "lethe promoted {} milestone(s), {} total",
                outcome.promoted,
                self.milestones.len()
            );
        }
        log::debug!(
            "lethe metabolize: {} survivors, {} pruned",
            outcome.survivors,
            outcome.pruned
        );
        outcome
    }

    /// Count a retrieval of the working-memory record at `index`.
    pub fn reinforce(&mut self, index: usize) -> GhostmeshResult<()> {
        let len = self.working.len();
        let Some(record) = self.working.get_mut(index) else {
            return Err(GhostmeshError::Validation(format!(
                "memory index {index} out of range (len {len})"
            )));
        };
        record.retrievals = record.retrievals.saturating_add(1);
        Ok(())
    }

    pub fn working_memory(&self) -> &[MemoryRecord] {
        &self.working
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }
}
