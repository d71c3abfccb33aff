use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Rend `p` absolu par rapport à `base`, normalisé lexicalement (`.` et `..`).
/// Ne touche pas au disque : le fichier n'a pas besoin d'exister.
pub fn absolutize(base: &Path, p: &Path) -> PathBuf {
    let joined = if p.is_absolute() { p.to_path_buf() } else { base.join(p) };
    let mut out = PathBuf::new();
    for c in joined.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` reste `/`
                if !matches!(out.components().next_back(), None | Some(Component::RootDir | Component::Prefix(_))) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

pub fn ensure_parent(p: &Path) -> io::Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Chemin temporaire utilisé pendant l'écriture de `p` (`<nom>.part`).
pub fn part_path(p: &Path) -> PathBuf {
    let mut name = p.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".part");
    p.with_file_name(name)
}

/// Fichiers de `dir` portant l'extension `ext`, triés par nom.
pub fn list_with_extension(dir: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for e in fs::read_dir(dir)? {
        let p = e?.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some(ext) {
            out.push(p);
        }
    }
    out.sort();
    Ok(out)
}
