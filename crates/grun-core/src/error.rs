use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Résultat standard de l'orchestrateur.
pub type Result<T, E = GrunError> = std::result::Result<T, E>;

/// Toutes les erreurs sont fatales : rien n'est rattrapé ni retenté.
#[derive(Debug, Error)]
pub enum GrunError {
    #[error("{context}: {}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("téléchargement impossible: {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("impossible de lancer `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` a échoué ({status})")]
    CommandFailed { program: String, status: ExitStatus },

    #[error("étape `{step}` terminée mais artefacts absents: {}", .missing.join(", "))]
    MissingArtifacts { step: &'static str, missing: Vec<String> },

    #[error("lecture config {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config TOML invalide: {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("classpath invalide pour {}", .path.display())]
    ClassPath {
        path: PathBuf,
        #[source]
        source: std::env::JoinPathsError,
    },
}

impl GrunError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { context, path: path.into(), source }
    }

    /// Code de sortie du sous-process fautif, s'il y en a un.
    ///
    /// `None` pour les erreurs qui ne viennent pas d'un outil externe, ou
    /// quand l'outil a été tué par un signal.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { status, .. } => status.code(),
            _ => None,
        }
    }
}
