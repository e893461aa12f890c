use std::path::PathBuf;

/// Expand a leading tilde in a path (e.g. `~/tuinbeheer/db.sqlite`).
///
/// Paths without a tilde are returned unchanged. Expansion failures fall
/// back to the literal input so a bad `$HOME` never panics here.
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(expand_tilde("/var/data/db.sqlite"), PathBuf::from("/var/data/db.sqlite"));
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn tilde_is_expanded() {
        let expanded = expand_tilde("~/tuinbeheer");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
