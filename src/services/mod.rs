pub mod ai_service;
pub mod extraction_service;
pub mod fallback_service;
pub mod generation_service;
pub mod grading_service;
pub mod progress_service;
pub mod prompt_service;
pub mod question_service;
pub mod reconcile_service;
pub mod results_service;
pub mod topic_service;
