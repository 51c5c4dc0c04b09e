use crate::scene_runtime::state::{AnatomyModel, ModelStatus};
use bevy::asset::LoadState;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest GLB that can hold a header and a JSON chunk.
const MIN_GLB_BYTES: u64 = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelAssetError {
    #[error("asset path not found: {0}")]
    Missing(String),
    #[error("failed to stat GLB '{path}': {reason}")]
    Stat { path: String, reason: String },
    #[error("GLB payload too small ({0} bytes)")]
    TooSmall(u64),
    #[error("unsupported model format '{0}'; use glb")]
    Unsupported(String),
}

/// Which root the scene should currently render.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneRootChoice {
    Model(Handle<Scene>),
    Placeholder,
}

/// The loaded model when it is ready, the placeholder otherwise.
pub fn select_scene_root(status: &ModelStatus) -> SceneRootChoice {
    match status {
        ModelStatus::Ready(handle) => SceneRootChoice::Model(handle.clone()),
        ModelStatus::Unrequested | ModelStatus::Loading(_) | ModelStatus::Failed(_) => {
            SceneRootChoice::Placeholder
        }
    }
}

pub fn asset_disk_path(asset_path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("assets")
        .join(asset_path)
}

pub fn validate_model_asset(model_path: &str) -> Result<PathBuf, ModelAssetError> {
    let normalized_model_path = model_path.split('#').next().unwrap_or(model_path);
    let full_path = asset_disk_path(normalized_model_path);
    validate_model_file(&full_path)?;
    Ok(full_path)
}

fn validate_model_file(path: &Path) -> Result<(), ModelAssetError> {
    if !path.exists() {
        return Err(ModelAssetError::Missing(path.display().to_string()));
    }

    match path.extension().and_then(|extension| extension.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("glb") => validate_glb_asset(path),
        Some(ext) => Err(ModelAssetError::Unsupported(ext.to_string())),
        None => Err(ModelAssetError::Unsupported(String::new())),
    }
}

fn validate_glb_asset(path: &Path) -> Result<(), ModelAssetError> {
    let size = fs::metadata(path)
        .map_err(|error| ModelAssetError::Stat {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?
        .len();
    if size < MIN_GLB_BYTES {
        return Err(ModelAssetError::TooSmall(size));
    }
    Ok(())
}

fn scene_path(model_path: &str) -> String {
    if model_path.contains('#') {
        model_path.to_string()
    } else {
        format!("{model_path}#Scene0")
    }
}

/// Kicks off the GLB load, or fails fast when the file cannot be a model.
pub fn request_anatomy_model(mut model: ResMut<AnatomyModel>, asset_server: Res<AssetServer>) {
    if model.status != ModelStatus::Unrequested {
        return;
    }

    match validate_model_asset(&model.path) {
        Ok(full_path) => {
            info!("Loading anatomy model '{}'", full_path.display());
            let handle: Handle<Scene> = asset_server.load(scene_path(&model.path));
            model.status = ModelStatus::Loading(handle);
        }
        Err(error) => {
            warn!(
                "Anatomy model '{}' unavailable ({}). Using placeholder body.",
                model.path, error
            );
            model.status = ModelStatus::Failed(error.to_string());
        }
    }
}

pub fn poll_anatomy_model(mut model: ResMut<AnatomyModel>, asset_server: Res<AssetServer>) {
    let ModelStatus::Loading(handle) = &model.status else {
        return;
    };
    let handle = handle.clone();

    if asset_server.is_loaded_with_dependencies(&handle) {
        info!("Anatomy model '{}' ready", model.path);
        model.status = ModelStatus::Ready(handle);
    } else if let LoadState::Failed(error) = asset_server.load_state(&handle) {
        warn!(
            "Anatomy model '{}' failed to load ({}). Using placeholder body.",
            model.path, error
        );
        model.status = ModelStatus::Failed(error.to_string());
    }
}
