use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SceneRenderPipeline {
    Input,
    Load,
    Spawn,
    Simulate,
    Present,
    Camera,
}
