pub mod progress;
pub mod question;
pub mod quiz_result;
pub mod topic;
