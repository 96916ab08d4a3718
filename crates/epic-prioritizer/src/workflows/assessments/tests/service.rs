use std::sync::Arc;

use super::common::*;
use crate::workflows::assessments::intake::IntakeViolation;
use crate::workflows::assessments::repository::{AssessmentRepository, RepositoryError};
use crate::workflows::assessments::{AssessmentService, AssessmentServiceError};
use crate::workflows::prioritization::{
    AssessmentId, Category, CategoryCatalog, EffortSize, PrioritizationRequest, RatingLevel,
};

use RatingLevel::{High, Low, Mid};

#[test]
fn submit_assigns_identity_and_owner() {
    let (service, repository) = build_service();

    let stored = service
        .submit(
            draft("Alpha", [High, Mid, Low, Mid, Low], EffortSize::S),
            Some("owner-1".to_string()),
        )
        .expect("submission succeeds");

    assert!(!stored.id.as_str().is_empty());
    assert_eq!(stored.owner_id.as_deref(), Some("owner-1"));
    assert!(stored.updated_at.is_none());
    let fetched = repository
        .fetch(&stored.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(fetched, stored);
}

#[test]
fn submit_propagates_intake_violations() {
    let (service, repository) = build_service();

    match service.submit(draft(" ", [Mid; 5], EffortSize::M), None) {
        Err(AssessmentServiceError::Intake(IntakeViolation::MissingEpicName)) => {}
        other => panic!("expected intake violation, got {other:?}"),
    }
    assert!(repository.list(None).expect("list succeeds").is_empty());
}

#[test]
fn update_replaces_fields_and_keeps_creation_time() {
    let (service, _) = build_service();
    let stored = service
        .submit(draft("Beta", [Mid; 5], EffortSize::M), None)
        .expect("submission succeeds");

    let updated = service
        .update(&stored.id, draft("Beta v2", [High; 5], EffortSize::L))
        .expect("update succeeds");

    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.created_at, stored.created_at);
    assert_eq!(updated.epic_name, "Beta v2");
    assert_eq!(updated.level(Category::Cost), Some(High));
    assert!(updated.updated_at.is_some());
    assert_eq!(service.get(&stored.id).expect("get succeeds"), updated);
}

#[test]
fn update_and_get_report_missing_records() {
    let (service, _) = build_service();
    let missing = AssessmentId("missing".to_string());

    match service.update(&missing, draft("Ghost", [Mid; 5], EffortSize::M)) {
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
    match service.get(&missing) {
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn delete_removes_the_record() {
    let (service, _) = build_service();
    let stored = service
        .submit(draft("Gamma", [Low, High, High, High, High], EffortSize::Xl), None)
        .expect("submission succeeds");

    service.delete(&stored.id).expect("delete succeeds");

    assert!(service.list(None).expect("list succeeds").is_empty());
    assert!(matches!(
        service.delete(&stored.id),
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn list_filters_by_owner_in_creation_order() {
    let (service, _) = build_service();
    for (name, owner) in [("First", "owner-1"), ("Second", "owner-2"), ("Third", "owner-1")] {
        service
            .submit(draft(name, [Mid; 5], EffortSize::M), Some(owner.to_string()))
            .expect("submission succeeds");
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let mine: Vec<String> = service
        .list(Some("owner-1"))
        .expect("list succeeds")
        .into_iter()
        .map(|assessment| assessment.epic_name)
        .collect();

    assert_eq!(mine, vec!["First", "Third"]);
    assert_eq!(service.list(None).expect("list succeeds").len(), 3);
}

#[test]
fn prioritize_reports_on_stored_assessments() {
    let (service, _) = build_service();
    service
        .submit(draft("Alpha", [High, Mid, Low, Mid, Low], EffortSize::S), None)
        .expect("alpha stored");
    service
        .submit(draft("Beta", [Mid; 5], EffortSize::M), None)
        .expect("beta stored");
    service
        .submit(draft("Gamma", [Low, High, High, High, High], EffortSize::Xl), None)
        .expect("gamma stored");

    let report = service
        .prioritize(None, &PrioritizationRequest::default())
        .expect("report builds");

    assert_eq!(report.assessed, 3);
    let direct: Vec<(&str, u32)> = report
        .direct
        .iter()
        .map(|entry| (entry.epic_name.as_str(), entry.score))
        .collect();
    assert_eq!(direct, vec![("Gamma", 13), ("Beta", 10), ("Alpha", 9)]);
    assert_eq!(report.primary.category, Category::Urgency);
    assert_eq!(report.primary.entries[0].epic_name, "Alpha");
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service =
        AssessmentService::new(Arc::new(UnavailableRepository), CategoryCatalog::standard());

    assert!(matches!(
        service.submit(draft("Alpha", [Mid; 5], EffortSize::M), None),
        Err(AssessmentServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        service.prioritize(None, &PrioritizationRequest::default()),
        Err(AssessmentServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}
