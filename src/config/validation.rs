use super::models::AddonConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Bind host must not be empty")]
    EmptyHost,

    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),

    #[error("Static directory '{path}' does not exist or is not a directory")]
    StaticDirNotFound { path: String },

    #[error("Static directory '{path}' has no base name to mount it under")]
    StaticDirWithoutName { path: String },

    #[error("Static directories '{first}' and '{second}' would both be mounted at /{mount}")]
    StaticMountConflict {
        first: String,
        second: String,
        mount: String,
    },

    #[error("Landing redirect '{0}' is not an absolute http(s) URL")]
    InvalidLandingRedirect(String),
}

/// Validate the entire configuration
pub fn validate(config: &AddonConfig) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_log(config)?;
    validate_static_dirs(config)?;
    validate_landing_redirect(config)?;
    Ok(())
}

fn validate_server(config: &AddonConfig) -> Result<(), ValidationError> {
    if config.server.host.trim().is_empty() {
        return Err(ValidationError::EmptyHost);
    }
    Ok(())
}

fn validate_log(config: &AddonConfig) -> Result<(), ValidationError> {
    if config.log.filter_directive().is_none() {
        return Err(ValidationError::InvalidLogLevel(config.log.level.clone()));
    }
    Ok(())
}

/// Every static directory must exist and mount under a distinct base name
fn validate_static_dirs(config: &AddonConfig) -> Result<(), ValidationError> {
    let mut mounts: Vec<(String, String)> = Vec::new();

    for dir in &config.http.static_dirs {
        let path = dir.display().to_string();

        if !dir.is_dir() {
            return Err(ValidationError::StaticDirNotFound { path });
        }

        let absolute = std::path::absolute(dir)
            .map_err(|_| ValidationError::StaticDirNotFound { path: path.clone() })?;
        let Some(mount) = absolute.file_name().and_then(|name| name.to_str()) else {
            return Err(ValidationError::StaticDirWithoutName { path });
        };

        if let Some((_, first)) = mounts.iter().find(|(existing, _)| existing == mount) {
            return Err(ValidationError::StaticMountConflict {
                first: first.clone(),
                second: path,
                mount: mount.to_string(),
            });
        }
        mounts.push((mount.to_string(), path));
    }

    Ok(())
}

fn validate_landing_redirect(config: &AddonConfig) -> Result<(), ValidationError> {
    let redirect = &config.http.landing_redirect;
    match url::Url::parse(redirect) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::InvalidLandingRedirect(redirect.clone())),
    }
}
