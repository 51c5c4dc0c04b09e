pub mod app;
pub mod composition;
pub mod effects;
pub mod scene_runtime;
pub mod settings;
pub mod ui;

pub use app::bootstrap::run_client_app;
