//! Étapes gardées : `(vérif. artefacts) -> Ensured | Erreur`.
//!
//! Une étape n'est "faite" que si TOUS ses artefacts sont présents ; après
//! l'action, le jeu est revérifié pour ne jamais valider un état partiel.

use std::path::{Path, PathBuf};

use crate::error::{GrunError, Result};
use crate::util::fs::list_with_extension;

/// Issue d'une étape gardée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// Artefacts déjà là, rien n'a été lancé
    Present,
    /// L'action a tourné et a produit les artefacts
    Created,
}

/// Jeu d'artefacts attendu par une étape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSet {
    /// Fichiers précis
    Files(Vec<PathBuf>),
    /// Fichiers précis + un `.class` pour chaque `.java` du dossier
    Compiled { dir: PathBuf, required: Vec<PathBuf> },
}

impl ArtifactSet {
    /// Noms des artefacts manquants (vide ⇒ étape faite).
    ///
    /// # Errors
    ///
    /// [`GrunError::Io`] si le dossier de `Compiled` est illisible.
    pub fn missing(&self) -> Result<Vec<String>> {
        match self {
            Self::Files(files) => Ok(missing_files(files)),
            Self::Compiled { dir, required } => {
                let mut missing = missing_files(required);
                if dir.is_dir() {
                    let sources = list_with_extension(dir, "java")
                        .map_err(|e| GrunError::io("lecture du dossier", dir.as_path(), e))?;
                    for src in sources {
                        let class = src.with_extension("class");
                        let name = display_name(&class);
                        if !class.is_file() && !missing.contains(&name) {
                            missing.push(name);
                        }
                    }
                }
                Ok(missing)
            }
        }
    }
}

fn missing_files(files: &[PathBuf]) -> Vec<String> {
    files.iter().filter(|p| !p.is_file()).map(|p| display_name(p)).collect()
}

fn display_name(p: &Path) -> String {
    p.file_name().map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Lance `action` seulement si `artifacts` est incomplet, puis revérifie.
///
/// # Errors
///
/// Erreur de `action` telle quelle, ou [`GrunError::MissingArtifacts`] si le
/// jeu reste incomplet après elle.
pub fn ensure<F>(step: &'static str, artifacts: &ArtifactSet, action: F) -> Result<Ensured>
where
    F: FnOnce() -> Result<()>,
{
    let before = artifacts.missing()?;
    if before.is_empty() {
        log::debug!("{step}: déjà fait, on passe");
        return Ok(Ensured::Present);
    }
    log::debug!("{step}: manquant {}", before.join(", "));
    action()?;
    let after = artifacts.missing()?;
    if after.is_empty() {
        Ok(Ensured::Created)
    } else {
        Err(GrunError::MissingArtifacts { step, missing: after })
    }
}
