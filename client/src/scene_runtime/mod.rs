pub mod components;
pub mod model_loader;
pub mod pipeline;
pub mod registration;
pub mod scene_graph;
pub mod state;
pub mod systems;
