pub mod assessments;
pub mod prioritization;
