use std::sync::Arc;

use super::common::*;
use crate::workflows::assessments::corroboration::{
    CorroborationError, GeneratorError, LevelChange, ParseError,
};
use crate::workflows::assessments::intake::IntakeViolation;
use crate::workflows::assessments::AssessmentServiceError;
use crate::workflows::prioritization::{Category, CategoryRating, EffortSize, RatingLevel};

use RatingLevel::{High, Low, Mid};

#[test]
fn corroborate_without_generator_is_disabled() {
    let (service, _) = build_service();

    assert!(!service.corroboration_enabled());
    assert!(matches!(
        service.corroborate(draft("Alpha", [Mid; 5], EffortSize::M)),
        Err(AssessmentServiceError::Corroboration(CorroborationError::Disabled))
    ));
}

#[test]
fn corroborate_returns_adjusted_draft_and_changes() {
    let generator = Arc::new(ScriptedGenerator::replying(CORROBORATED));
    let (service, repository) = build_service();
    let service = service.with_generator(generator.clone());
    let mut submitted = draft("Alpha", [Low, Mid, Mid, Mid, Mid], EffortSize::S);
    submitted.ratings.set(
        Category::Urgency,
        CategoryRating::new(Low).with_notes("regulator deadline in March"),
    );

    let outcome = service.corroborate(submitted).expect("corroboration succeeds");

    assert_eq!(
        outcome.changes,
        vec![
            LevelChange {
                category: Category::Urgency,
                from: Some(Low),
                to: High,
            },
            LevelChange {
                category: Category::Strategic,
                from: Some(Mid),
                to: Low,
            },
        ]
    );
    let urgency = outcome
        .draft
        .ratings
        .get(Category::Urgency)
        .expect("urgency rated");
    assert_eq!(urgency.notes, "regulator deadline in March");
    assert_eq!(outcome.draft.t_shirt_size, EffortSize::S);

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("regulator deadline in March"));
    assert!(
        repository.records.lock().expect("repository mutex poisoned").is_empty(),
        "corroboration never stores anything"
    );
}

#[test]
fn corroborate_validates_before_calling_generator() {
    let generator = Arc::new(ScriptedGenerator::replying(CORROBORATED));
    let (service, _) = build_service();
    let service = service.with_generator(generator.clone());

    assert!(matches!(
        service.corroborate(draft("", [Mid; 5], EffortSize::M)),
        Err(AssessmentServiceError::Intake(IntakeViolation::MissingEpicName))
    ));
    assert!(generator.prompts().is_empty());
}

#[test]
fn generator_failures_are_reported() {
    let (service, _) = build_service();
    let service = service.with_generator(Arc::new(FailingGenerator));

    match service.corroborate(draft("Alpha", [Mid; 5], EffortSize::M)) {
        Err(AssessmentServiceError::Corroboration(CorroborationError::Generator(
            GeneratorError::Failed(message),
        ))) => assert_eq!(message, "model timed out"),
        other => panic!("expected generator failure, got {other:?}"),
    }
}

#[test]
fn malformed_responses_are_parse_errors() {
    let (service, _) = build_service();
    let service =
        service.with_generator(Arc::new(ScriptedGenerator::replying("The ratings look fine.")));

    assert!(matches!(
        service.corroborate(draft("Alpha", [Mid; 5], EffortSize::M)),
        Err(AssessmentServiceError::Corroboration(CorroborationError::Parse(
            ParseError::NoJson
        )))
    ));
}
