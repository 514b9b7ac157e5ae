mod service;

pub use service::{IngestService, INGEST_QUEUE_DEPTH};
