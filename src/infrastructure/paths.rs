//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host's working directory (usually the home
//! directory) is mounted at `/host`, so user-facing `~` paths are mapped onto
//! it and mapped back for display.

use std::path::PathBuf;

/// Sandbox mount point of the host directory.
pub const HOST_ROOT: &str = "/host";

/// Directory holding Homescout's trace files:
/// `/host/.local/share/zellij/homescout`.
///
/// # Examples
///
/// ```
/// use homescout::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/homescout"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("homescout")
}

/// Maps a leading `~` onto the sandbox mount.
///
/// # Examples
///
/// ```
/// use homescout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/listings.json"), "/host/listings.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/listings.json"), "/data/listings.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Inverse of [`expand_tilde`], for showing paths to the user.
///
/// # Examples
///
/// ```
/// use homescout::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/data/listings.json"), "~/data/listings.json");
/// assert_eq!(display_path("/hostile/listings.json"), "/hostile/listings.json");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_as_prefix() {
        assert_eq!(expand_tilde("~user/listings.json"), "~user/listings.json");
        assert_eq!(expand_tilde("data/~/x.json"), "data/~/x.json");
    }

    #[test]
    fn display_reverses_expansion() {
        for path in ["~", "~/listings.json", "~/a/b/c.json"] {
            assert_eq!(display_path(&expand_tilde(path)), path);
        }
    }
}
