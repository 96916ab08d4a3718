use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;
use tokio::sync::watch;

use crate::workflows::assessments::corroboration::{GeneratorError, TextGenerator};
use crate::workflows::assessments::repository::{
    order_by_creation, owned_by, AssessmentFeed, AssessmentRepository, RepositoryError,
};
use crate::workflows::assessments::{assessment_router, AssessmentService};
use crate::workflows::prioritization::{
    Assessment, AssessmentDraft, AssessmentId, CategoryCatalog, CategoryRatings, EffortSize,
    RatingLevel,
};

pub(super) const CORROBORATED: &str = r#"Adjusted after reading the notes:
```json
{"urgency": "high", "marketImpact": "mid", "strategic": "low", "revenue": "mid", "cost": "mid"}
```"#;

/// Levels are given in catalog order: urgency, market impact, strategic, revenue, cost.
pub(super) fn draft(
    epic_name: &str,
    levels: [RatingLevel; 5],
    size: EffortSize,
) -> AssessmentDraft {
    let mut draft = AssessmentDraft::new(epic_name);
    draft.ratings = CategoryRatings::from_levels(levels);
    draft.t_shirt_size = size;
    draft
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(repository.clone(), CategoryCatalog::standard());
    (service, repository)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("request builds")
}

pub(super) fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, Assessment>>>,
    updates: watch::Sender<Vec<Assessment>>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            updates,
        }
    }
}

impl MemoryRepository {
    fn publish(&self, records: &HashMap<AssessmentId, Assessment>) {
        self.updates.send_replace(records.values().cloned().collect());
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        self.publish(&guard);
        Ok(assessment)
    }

    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&assessment.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(assessment.id.clone(), assessment);
        self.publish(&guard);
        Ok(())
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)?;
        self.publish(&guard);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, owner: Option<&str>) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut assessments: Vec<Assessment> = guard
            .values()
            .filter(|assessment| owned_by(assessment, owner))
            .cloned()
            .collect();
        order_by_creation(&mut assessments);
        Ok(assessments)
    }

    fn subscribe(&self, owner: Option<&str>) -> Result<AssessmentFeed, RepositoryError> {
        Ok(AssessmentFeed::new(
            self.updates.subscribe(),
            owner.map(str::to_string),
        ))
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _assessment: Assessment) -> Result<Assessment, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _assessment: Assessment) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn delete(&self, _id: &AssessmentId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn list(&self, _owner: Option<&str>) -> Result<Vec<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn subscribe(&self, _owner: Option<&str>) -> Result<AssessmentFeed, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Generator that answers every prompt with the same text and remembers the prompts.
pub(super) struct ScriptedGenerator {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub(super) fn replying(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn complete(&self, prompt: &str) -> Result<String, GeneratorError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.to_string());
        Ok(self.response.clone())
    }
}

pub(super) struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    fn complete(&self, _prompt: &str) -> Result<String, GeneratorError> {
        Err(GeneratorError::Failed("model timed out".to_string()))
    }
}
