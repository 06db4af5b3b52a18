use super::{ContactError, ContactStatus, ContactSubmission, NewSubmission};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Filter and pagination for listing submissions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { status: None, skip: 0, limit: DEFAULT_LIMIT }
    }
}

impl ListQuery {
    pub fn with_status(status: ContactStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }

    /// A zero limit means "no limit"; every page is capped at `MAX_LIMIT`.
    fn page_size(&self) -> usize {
        match self.limit {
            0 => MAX_LIMIT,
            limit => limit.min(MAX_LIMIT),
        }
    }
}

/// Submission counts per status, for the admin view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InboxStats {
    pub total: usize,
    pub new: usize,
    pub read: usize,
    pub responded: usize,
}

/// All contact submissions received so far, kept in memory
#[derive(Debug, Default)]
pub struct Inbox {
    submissions: RwLock<Vec<ContactSubmission>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a new submission.
    pub fn submit(&self, submission: NewSubmission) -> Result<ContactSubmission, ContactError> {
        let submission = ContactSubmission::new(submission.normalize()?);
        self.write().push(submission.clone());
        tracing::info!(id = %submission.id, "contact submission received");
        Ok(submission)
    }

    pub fn get(&self, id: Uuid) -> Result<ContactSubmission, ContactError> {
        self.read().iter().find(|s| s.id == id).cloned().ok_or_else(|| ContactError::NotFound(id.to_string()))
    }

    /// Newest first, filtered by status, then paginated.
    pub fn list(&self, query: &ListQuery) -> Vec<ContactSubmission> {
        let submissions = self.read();
        // reversed insertion order puts the newest first among equal timestamps
        let mut matching: Vec<&ContactSubmission> = submissions
            .iter()
            .rev()
            .filter(|s| query.status.map_or(true, |status| s.status == status))
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        matching.into_iter().skip(query.skip).take(query.page_size()).cloned().collect()
    }

    /// Move a submission along the workflow: `new → read → responded`.
    pub fn update_status(&self, id: Uuid, status: ContactStatus) -> Result<ContactSubmission, ContactError> {
        let mut submissions = self.write();
        let submission =
            submissions.iter_mut().find(|s| s.id == id).ok_or_else(|| ContactError::NotFound(id.to_string()))?;
        if !submission.status.can_transition_to(status) {
            return Err(ContactError::InvalidTransition { from: submission.status, to: status });
        }
        tracing::info!(%id, from = %submission.status, to = %status, "contact submission status changed");
        submission.status = status;
        Ok(submission.clone())
    }

    pub fn stats(&self) -> InboxStats {
        self.read().iter().fold(InboxStats::default(), |mut stats, submission| {
            stats.total += 1;
            match submission.status {
                ContactStatus::New => stats.new += 1,
                ContactStatus::Read => stats.read += 1,
                ContactStatus::Responded => stats.responded += 1,
            }
            stats
        })
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<ContactSubmission>> {
        self.submissions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ContactSubmission>> {
        self.submissions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
