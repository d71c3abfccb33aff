use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::error::{GrunError, Result};
use crate::util::fs::absolutize;

pub const DEFAULT_ANTLR_URL: &str = "https://www.antlr.org/download/antlr-4.7.2-complete.jar";
/// Nom du fichier de config cherché dans le dossier de l'appelant.
pub const CONFIG_FILE: &str = "grun.toml";

/// Configuration de l'orchestrateur (`grun.toml`, toutes les clés optionnelles).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrunConfig {
    /// URL du jar ANTLR "complete"
    pub antlr_url: String,
    /// Nom du jar dans le dossier de travail
    pub antlr_jar: String,
    /// Identifiant de grammaire (`C` → `C.g4`, `CParser.java`…)
    pub grammar: String,
    /// Dossier contenant `<grammar>.g4`
    pub grammar_dir: Utf8PathBuf,
    /// Règle racine passée au `TestRig`
    pub root_production: String,
    /// Dossier de travail (jar + artefacts générés/compilés)
    pub work_dir: Utf8PathBuf,
    /// Binaire `java`
    pub java: String,
    /// Binaire `javac`
    pub javac: String,
}

impl Default for GrunConfig {
    fn default() -> Self {
        Self {
            antlr_url: DEFAULT_ANTLR_URL.into(),
            antlr_jar: "antlr.jar".into(),
            grammar: "C".into(),
            grammar_dir: "./MyCCompiler/".into(),
            root_production: "compilationUnit".into(),
            work_dir: "./.grun/".into(),
            java: "java".into(),
            javac: "javac".into(),
        }
    }
}

impl GrunConfig {
    /// Parse une config TOML ; `origin` ne sert qu'aux messages d'erreur.
    ///
    /// # Errors
    ///
    /// [`GrunError::Config`] si le TOML est invalide ou contient une clé inconnue.
    pub fn from_toml_str(src: &str, origin: &Path) -> Result<Self> {
        toml::from_str(src).map_err(|source| GrunError::Config { path: origin.to_path_buf(), source })
    }

    /// # Errors
    ///
    /// [`GrunError::ConfigRead`] si le fichier est illisible, puis comme
    /// [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let src =
            fs::read_to_string(path).map_err(|source| GrunError::ConfigRead { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&src, path)
    }

    /// Charge `explicit` s'il est donné, sinon `grun.toml` dans `caller_dir`
    /// s'il existe, sinon les valeurs par défaut.
    ///
    /// # Errors
    ///
    /// Comme [`Self::load`] ; un `explicit` absent est une erreur.
    pub fn discover(explicit: Option<&Path>, caller_dir: &Path) -> Result<Self> {
        if let Some(p) = explicit {
            return Self::load(&absolutize(caller_dir, p));
        }
        let implicit = caller_dir.join(CONFIG_FILE);
        if implicit.is_file() {
            log::debug!("config: {}", implicit.display());
            Self::load(&implicit)
        } else {
            Ok(Self::default())
        }
    }

    /// Résout tous les chemins par rapport au dossier de l'appelant.
    #[must_use]
    pub fn layout(&self, caller_dir: &Path) -> Layout {
        let work_dir = absolutize(caller_dir, self.work_dir.as_std_path());
        let grammar_file = absolutize(caller_dir, &self.grammar_dir.as_std_path().join(format!("{}.g4", self.grammar)));
        Layout { archive: work_dir.join(&self.antlr_jar), caller_dir: caller_dir.to_path_buf(), work_dir, grammar_file }
    }
}

/// Chemins absolus dérivés de la config : la "base" passée à chaque étape
/// à la place d'un changement de dossier courant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Dossier d'où l'outil est appelé (résolution des chemins relatifs)
    pub caller_dir: PathBuf,
    pub work_dir: PathBuf,
    pub archive: PathBuf,
    pub grammar_file: PathBuf,
}

impl Layout {
    /// `.` puis le jar absolu, joints avec le séparateur de la plateforme.
    ///
    /// # Errors
    ///
    /// [`GrunError::ClassPath`] si le chemin du jar contient le séparateur.
    pub fn classpath(&self) -> Result<OsString> {
        std::env::join_paths([Path::new("."), self.archive.as_path()])
            .map_err(|source| GrunError::ClassPath { path: self.archive.clone(), source })
    }

    /// Chemin d'entrée rendu absolu avant toute étape.
    #[must_use]
    pub fn resolve_input(&self, input: &Path) -> PathBuf {
        absolutize(&self.caller_dir, input)
    }
}
