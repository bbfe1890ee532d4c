use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the application home directory.
///
/// `requested` may be absolute, relative (resolved against cwd) or start
/// with `~`; when absent, falls back to `$HOME/<default_subdir>`.
pub fn resolve_home_dir(
    requested: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match requested {
        Some(raw) => expand_tilde(&raw)?,
        None => user_home()?.join(default_subdir),
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("failed to create home dir {}", absolute.display()))?;
    }

    Ok(absolute)
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("cannot determine the user home directory"))
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if let Some(rest) = raw.strip_prefix("~/") {
        return Ok(user_home()?.join(rest));
    }
    if raw == "~" {
        return user_home();
    }
    Ok(Path::new(raw).to_path_buf())
}
