use crate::error::{Result, SunpkgError};
use crate::project_identity;
use directories::ProjectDirs;
use std::path::PathBuf;

pub fn config_dir() -> Result<PathBuf> {
    let name = project_identity::CONFIG_DIR_NAME;
    let proj = ProjectDirs::from("com", name, name)
        .ok_or_else(|| SunpkgError::PathError("Could not determine config directory".to_string()))?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn manifest_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(project_identity::MANIFEST_FILE_BASENAME))
}
