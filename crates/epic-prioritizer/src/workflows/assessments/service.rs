use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::corroboration::{
    build_corroboration_prompt, parse_corroboration, CorroborationError, CorroborationOutcome,
    TextGenerator,
};
use super::intake::{IntakeGuard, IntakeLimits, IntakeViolation};
use super::repository::{AssessmentFeed, AssessmentRepository, RepositoryError};
use crate::workflows::prioritization::{
    Assessment, AssessmentDraft, AssessmentId, CategoryCatalog, PrioritizationEngine,
    PrioritizationReport, PrioritizationRequest,
};

/// Service composing the intake guard, repository, optional corroborator, and the
/// prioritization engine.
pub struct AssessmentService<R> {
    guard: IntakeGuard,
    repository: Arc<R>,
    generator: Option<Arc<dyn TextGenerator>>,
    engine: Arc<PrioritizationEngine>,
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: CategoryCatalog) -> Self {
        Self {
            guard: IntakeGuard::default(),
            repository,
            generator: None,
            engine: Arc::new(PrioritizationEngine::new(catalog)),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_limits(mut self, limits: IntakeLimits) -> Self {
        self.guard = IntakeGuard::with_limits(limits);
        self
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        self.engine.catalog()
    }

    pub fn engine(&self) -> &PrioritizationEngine {
        &self.engine
    }

    pub fn corroboration_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Validate and store a new assessment. The store assigns id and creation time.
    pub fn submit(
        &self,
        draft: AssessmentDraft,
        owner_id: Option<String>,
    ) -> Result<Assessment, AssessmentServiceError> {
        let draft = self.guard.validate(draft).inspect_err(|violation| {
            debug!(%violation, "assessment rejected at intake");
        })?;

        let assessment =
            Assessment::from_draft(AssessmentId::generate(), draft, owner_id, Utc::now());
        let stored = self.repository.insert(assessment)?;

        info!(id = %stored.id, epic = %stored.epic_name, "assessment stored");
        Ok(stored)
    }

    /// Replace the editable fields of an existing assessment.
    pub fn update(
        &self,
        id: &AssessmentId,
        draft: AssessmentDraft,
    ) -> Result<Assessment, AssessmentServiceError> {
        let mut assessment = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let draft = self.guard.validate(draft)?;

        assessment.apply_draft(draft, Utc::now());
        self.repository.update(assessment.clone())?;

        info!(id = %assessment.id, epic = %assessment.epic_name, "assessment updated");
        Ok(assessment)
    }

    pub fn delete(&self, id: &AssessmentId) -> Result<(), AssessmentServiceError> {
        self.repository.delete(id)?;
        info!(id = %id, "assessment deleted");
        Ok(())
    }

    pub fn get(&self, id: &AssessmentId) -> Result<Assessment, AssessmentServiceError> {
        let assessment = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    /// All assessments, optionally narrowed to one owner, oldest first.
    pub fn list(
        &self,
        owner_id: Option<&str>,
    ) -> Result<Vec<Assessment>, AssessmentServiceError> {
        let assessments = self.repository.list(owner_id)?;
        debug!(count = assessments.len(), owner = ?owner_id, "assessments listed");
        Ok(assessments)
    }

    pub fn subscribe(
        &self,
        owner_id: Option<&str>,
    ) -> Result<AssessmentFeed, AssessmentServiceError> {
        Ok(self.repository.subscribe(owner_id)?)
    }

    /// Ask the configured generator for a second opinion on a draft's levels.
    ///
    /// Blocks on the generator; async callers should run it on a blocking thread.
    pub fn corroborate(
        &self,
        draft: AssessmentDraft,
    ) -> Result<CorroborationOutcome, AssessmentServiceError> {
        let generator = self.generator.as_ref().ok_or(CorroborationError::Disabled)?;
        let draft = self.guard.validate(draft)?;

        let prompt = build_corroboration_prompt(&draft, self.engine.catalog());
        let response = generator
            .complete(&prompt)
            .map_err(CorroborationError::from)
            .inspect_err(|err| warn!(error = %err, "corroboration generator failed"))?;
        let levels = parse_corroboration(&response)
            .map_err(CorroborationError::from)
            .inspect_err(|err| warn!(error = %err, "corroboration response rejected"))?;

        let outcome = levels.apply(&draft);
        info!(
            epic = %draft.epic_name,
            changes = outcome.changes.len(),
            "ratings corroborated"
        );
        Ok(outcome)
    }

    /// Build every prioritization view over the stored assessments.
    pub fn prioritize(
        &self,
        owner_id: Option<&str>,
        request: &PrioritizationRequest,
    ) -> Result<PrioritizationReport, AssessmentServiceError> {
        let assessments = self.repository.list(owner_id)?;
        let report = self.engine.report(&assessments, request);
        debug!(assessed = report.assessed, owner = ?owner_id, "prioritization report built");
        Ok(report)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Corroboration(#[from] CorroborationError),
}
