// Application layer - use cases and the data pipeline
pub mod aggregator;
pub mod dashboard_service;
pub mod metrics_repository;
pub mod normalizer;
pub mod view;
