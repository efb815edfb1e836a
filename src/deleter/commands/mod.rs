use crate::model::CandidateUser;

pub mod purge;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// What happened to a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Still in the directory, left alone.
    Present,
    /// Gone from the directory. `deleted` is false in dry-run mode.
    Absent { deleted: bool },
    /// No directory identity to check, never deleted.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub user: CandidateUser,
    /// Filter searched for, `None` when the candidate was skipped.
    pub filter: Option<String>,
    pub decision: Decision,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSummary {
    pub candidates: usize,
    pub present: usize,
    pub absent: usize,
    pub deleted: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcomes: Vec<Outcome>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_outcome(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub fn summary(&self) -> PurgeSummary {
        let mut summary = PurgeSummary {
            candidates: self.outcomes.len(),
            ..Default::default()
        };
        for outcome in &self.outcomes {
            match outcome.decision {
                Decision::Present => summary.present += 1,
                Decision::Absent { deleted } => {
                    summary.absent += 1;
                    if deleted {
                        summary.deleted += 1;
                    }
                }
                Decision::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    /// Ids actually handed to the deleter.
    pub fn deleted_ids(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.decision == Decision::Absent { deleted: true })
            .map(|o| o.user.id.as_str())
            .collect()
    }
}
