use directories::ProjectDirs;

const PROJECT_ROOT: &str = env!("CARGO_MANIFEST_DIR");

pub fn asset_dir() -> std::path::PathBuf {
    let path = if cfg!(debug_assertions) {
        std::path::PathBuf::from(PROJECT_ROOT).join("../../dev_assets")
    } else {
        ProjectDirs::from("nl", "tuinbeheer", "tuinbeheer")
            .expect("OS didn't give us a home directory")
            .data_dir()
            .to_path_buf()
    };

    // Ensure the directory exists
    if !path.exists() {
        std::fs::create_dir_all(&path).expect("Failed to create asset directory");
    }

    path
}

/// Get the database file path.
///
/// Respects the `TUIN_DATABASE_PATH` environment variable for custom
/// locations. Supports tilde expansion (e.g. `~/tuinbeheer/db.sqlite`).
///
/// Default: `{asset_dir}/db.sqlite`
pub fn database_path() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("TUIN_DATABASE_PATH") {
        return crate::path::expand_tilde(&path);
    }
    asset_dir().join("db.sqlite")
}

/// Get the log directory path.
///
/// Respects the `TUIN_LOG_DIR` environment variable for custom locations.
///
/// Default: `{asset_dir}/logs`
pub fn log_dir() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("TUIN_LOG_DIR") {
        return crate::path::expand_tilde(&path);
    }
    asset_dir().join("logs")
}
