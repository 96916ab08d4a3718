//! Assessment intake, storage, corroboration, and the HTTP surface around them.
//!
//! The service validates drafts before they reach the repository or the text generator,
//! and hands stored assessments to the prioritization engine for every ranking view.

pub mod corroboration;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use corroboration::{
    CommandTextGenerator, CorroboratedLevels, CorroborationError, CorroborationOutcome,
    GeneratorError, LevelChange, ParseError, TextGenerator,
};
pub use intake::{IntakeGuard, IntakeLimits, IntakeViolation};
pub use repository::{
    order_by_creation, owned_by, AssessmentFeed, AssessmentRepository, RepositoryError,
};
pub use router::{assessment_router, PrioritizationQuery, SubmitAssessmentRequest};
pub use service::{AssessmentService, AssessmentServiceError};
