use tokio::sync::watch;

use crate::workflows::prioritization::{Assessment, AssessmentId};

/// Storage abstraction so the service can be exercised without a real document store.
///
/// `list` and `subscribe` yield assessments ordered by creation time.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError>;
    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError>;
    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;
    fn list(&self, owner: Option<&str>) -> Result<Vec<Assessment>, RepositoryError>;
    fn subscribe(&self, owner: Option<&str>) -> Result<AssessmentFeed, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assessment already exists")]
    Conflict,
    #[error("assessment not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Live view over the stored collection, optionally narrowed to one owner.
///
/// Repositories publish the full collection on every write; the feed filters and
/// orders each snapshot for its subscriber.
#[derive(Debug, Clone)]
pub struct AssessmentFeed {
    receiver: watch::Receiver<Vec<Assessment>>,
    owner: Option<String>,
}

impl AssessmentFeed {
    pub fn new(receiver: watch::Receiver<Vec<Assessment>>, owner: Option<String>) -> Self {
        Self { receiver, owner }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Current contents of the collection as seen by this subscriber.
    pub fn snapshot(&self) -> Vec<Assessment> {
        let mut visible: Vec<Assessment> = self
            .receiver
            .borrow()
            .iter()
            .filter(|assessment| owned_by(assessment, self.owner.as_deref()))
            .cloned()
            .collect();
        order_by_creation(&mut visible);
        visible
    }

    /// Wait for the next write and return the resulting snapshot.
    pub async fn changed(&mut self) -> Result<Vec<Assessment>, RepositoryError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| RepositoryError::Unavailable("assessment feed closed".to_string()))?;
        Ok(self.snapshot())
    }
}

/// `None` matches every assessment.
pub fn owned_by(assessment: &Assessment, owner: Option<&str>) -> bool {
    match owner {
        Some(owner) => assessment.owner_id.as_deref() == Some(owner),
        None => true,
    }
}

/// Oldest first; ids break ties between records created in the same instant.
pub fn order_by_creation(assessments: &mut [Assessment]) {
    assessments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}
