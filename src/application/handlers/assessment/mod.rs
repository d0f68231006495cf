//! Assessment command and query handlers.

mod create_assessment;
mod delete_assessment;
mod get_assessment;
mod get_assessment_trend;
mod list_assessments;

pub use create_assessment::{CreateAssessmentCommand, CreateAssessmentHandler};
pub use delete_assessment::{DeleteAssessmentCommand, DeleteAssessmentHandler};
pub use get_assessment::{GetAssessmentHandler, GetAssessmentQuery};
pub use get_assessment_trend::{GetAssessmentTrendHandler, GetAssessmentTrendQuery};
pub use list_assessments::{ListAssessmentsHandler, ListAssessmentsQuery};
