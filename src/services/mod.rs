pub mod format_service;
pub mod orchestrator_service;
pub mod storage_service;
