//! grun-core — orchestrateur ANTLR4 pour tester une grammaire.
//! - Télécharge le jar ANTLR "complete" s'il manque
//! - Génère lexer/parser depuis `<grammaire>.g4`, puis les compile avec `javac`
//! - Lance `org.antlr.v4.gui.TestRig` sur un fichier d'entrée
//!
//! Chaque étape de préparation est gardée par un jeu d'artefacts complet et
//! reste idempotente. Les outils externes passent par [`CommandRunner`] et le
//! téléchargement par [`Fetcher`], tous deux injectables.

pub mod config;
pub mod ensure;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod process;
mod util;

pub use config::{GrunConfig, Layout, CONFIG_FILE, DEFAULT_ANTLR_URL};
pub use ensure::{ensure, ArtifactSet, Ensured};
pub use error::{GrunError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use pipeline::{Orchestrator, RunReport, ANTLR_TOOL, TEST_RIG};
pub use process::{CommandRunner, SystemRunner, ToolCommand};
