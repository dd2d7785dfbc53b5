use crate::error::ExportError;
use crate::export::SceneSnapshot;
use crate::view::Scene;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn export_json<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = scene_json(scene)?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    tracing::info!(path = %path_ref.display(), "Exported scene snapshot");
    Ok(())
}

/// The scene snapshot as pretty-printed JSON.
pub fn scene_json(scene: &Scene) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&SceneSnapshot::new(scene))?)
}
