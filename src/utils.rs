use std::path::PathBuf;

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/walls/a.png"), home.join("walls/a.png"));
        }
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        assert_eq!(expand_tilde("/tmp/a.png"), PathBuf::from("/tmp/a.png"));
        assert_eq!(expand_tilde("walls/~/a.png"), PathBuf::from("walls/~/a.png"));
        assert_eq!(expand_tilde("~user/a.png"), PathBuf::from("~user/a.png"));
    }
}
