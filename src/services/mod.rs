pub mod attempt_locks;
pub mod grading;
pub mod quiz_attempt_service;
pub mod quiz_service;
