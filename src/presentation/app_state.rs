// Application state for HTTP handlers
use crate::application::session_controller::SessionController;
use crate::domain::calendar::CalendarZone;
use crate::domain::entity::Entity;

#[derive(Clone)]
pub struct AppState {
    pub controller: SessionController,
    pub entities: Vec<Entity>,
    pub zone: CalendarZone,
}
