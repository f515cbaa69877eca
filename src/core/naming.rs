use std::path::Path;
use tokio::fs;

use crate::core::error::{Error, Result};

/// Probe bound; far beyond any realistic pile of same-named variants.
const MAX_ATTEMPTS: u32 = 10_000;

/// Find a name for `desired` that is currently free under `dir`.
///
/// The first collision appends `_copy`, later ones `_copy2`, `_copy3` and
/// so on. File names keep their extension after the suffix; directory
/// names are suffixed whole. The check is check-then-act: a concurrent
/// external writer can still take the name between resolution and use.
pub async fn resolve_available_name(dir: &Path, desired: &str, is_dir: bool) -> Result<String> {
    let (base, ext) = if is_dir {
        (desired, "")
    } else {
        split_extension(desired)
    };

    let mut candidate = desired.to_string();
    let mut counter: u32 = 0;

    while occupied(&dir.join(&candidate)).await {
        counter += 1;
        if counter > MAX_ATTEMPTS {
            return Err(Error::NameCollisionExhausted {
                dir: dir.to_path_buf(),
                name: desired.to_string(),
                attempts: MAX_ATTEMPTS,
            });
        }
        candidate = if counter == 1 {
            format!("{base}_copy{ext}")
        } else {
            format!("{base}_copy{counter}{ext}")
        };
    }

    Ok(candidate)
}

/// Split at the last dot. A dot in first position belongs to the base, so
/// dotfiles carry no extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Non-following existence probe, so broken links still occupy their name.
async fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn free_name_is_untouched() {
        let temp = tempdir().unwrap();
        let name = resolve_available_name(temp.path(), "a.txt", false)
            .await
            .unwrap();
        assert_eq!(name, "a.txt");
    }

    #[tokio::test]
    async fn file_suffix_goes_before_the_extension() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("a.txt"), b"").unwrap();

        let name = resolve_available_name(temp.path(), "a.txt", false)
            .await
            .unwrap();
        assert_eq!(name, "a_copy.txt");
    }

    #[tokio::test]
    async fn second_collision_counts_from_two() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("a.txt"), b"").unwrap();
        std::fs::write(temp.path().join("a_copy.txt"), b"").unwrap();

        let name = resolve_available_name(temp.path(), "a.txt", false)
            .await
            .unwrap();
        assert_eq!(name, "a_copy2.txt");
    }

    #[tokio::test]
    async fn directories_are_suffixed_whole() {
        let temp = tempdir().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();
        std::fs::create_dir(temp.path().join("docs_copy")).unwrap();

        let name = resolve_available_name(temp.path(), "docs", true)
            .await
            .unwrap();
        assert_eq!(name, "docs_copy2");
    }

    #[tokio::test]
    async fn dotfiles_have_no_extension() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(".env"), b"").unwrap();

        let name = resolve_available_name(temp.path(), ".env", false)
            .await
            .unwrap();
        assert_eq!(name, ".env_copy");
    }

    #[tokio::test]
    async fn only_the_last_extension_is_preserved() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("a.tar.gz"), b"").unwrap();

        let name = resolve_available_name(temp.path(), "a.tar.gz", false)
            .await
            .unwrap();
        assert_eq!(name, "a.tar_copy.gz");
    }
}
