pub mod llm;
pub mod observability;
pub mod places;
pub mod session;
pub mod speech;
pub mod storage;
