// Application layer - Ports and the session use case
pub mod clock;
pub mod session_controller;
pub mod snapshot_source;
pub mod trend_session;
