use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the server home directory.
///
/// - `None` => `<user home>/<default_subdir>`
/// - `"~"` or `"~/..."` => expanded against the user home
/// - relative paths => joined with the current working directory
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => expand_tilde(&raw)?,
    };

    let path = if path.is_relative() {
        std::env::current_dir()
            .context("cannot read current directory")?
            .join(path)
    } else {
        path
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home dir '{}'", path.display()))?;
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}

fn user_home() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    if let Some(appdata) = std::env::var_os("APPDATA") {
        return Ok(PathBuf::from(appdata));
    }
    dirs::home_dir().ok_or_else(|| anyhow!("unable to determine the user home directory"))
}
