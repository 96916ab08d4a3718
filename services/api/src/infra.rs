use epic_prioritizer::config::CorroborationConfig;
use epic_prioritizer::error::AppError;
use epic_prioritizer::workflows::assessments::{
    order_by_creation, owned_by, AssessmentFeed, AssessmentRepository, CommandTextGenerator,
    RepositoryError, TextGenerator,
};
use epic_prioritizer::workflows::prioritization::{Assessment, AssessmentDraft, AssessmentId};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store that publishes the whole collection to subscribers after
/// every write.
#[derive(Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, Assessment>>>,
    updates: watch::Sender<Vec<Assessment>>,
}

impl Default for InMemoryAssessmentRepository {
    fn default() -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            updates,
        }
    }
}

impl InMemoryAssessmentRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<AssessmentId, Assessment>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("assessment store poisoned".to_string()))
    }

    fn publish(&self, records: &HashMap<AssessmentId, Assessment>) {
        self.updates.send_replace(records.values().cloned().collect());
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        self.publish(&guard);
        Ok(assessment)
    }

    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&assessment.id) {
            guard.insert(assessment.id.clone(), assessment);
            self.publish(&guard);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).ok_or(RepositoryError::NotFound)?;
        self.publish(&guard);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self, owner: Option<&str>) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.lock()?;
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

pub(crate) fn generator_from_config(
    config: &CorroborationConfig,
) -> Option<Arc<dyn TextGenerator>> {
    CommandTextGenerator::from_config(config)
        .map(|generator| Arc::new(generator) as Arc<dyn TextGenerator>)
}

/// One entry of a portfolio file: either a stored assessment (with id and creation
/// time) or a bare draft that still needs to pass intake.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum PortfolioEntry {
    Stored(Assessment),
    Draft(AssessmentDraft),
}

pub(crate) fn parse_portfolio(raw: &str) -> Result<Vec<PortfolioEntry>, AppError> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn load_portfolio(path: &Path) -> Result<Vec<PortfolioEntry>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_portfolio(&raw)
}
