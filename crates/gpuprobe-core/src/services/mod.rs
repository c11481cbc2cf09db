//! Application services composed from ports.

mod probe_service;

pub use probe_service::ProbeService;
