//! Primitive unique "lancer un outil externe, vérifier le code, échouer vite",
//! partagée par le générateur, `javac` et le `TestRig`.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GrunError, Result};

/// Ligne de commande d'un outil externe, lancée dans `cwd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl ToolCommand {
    #[must_use]
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: cwd.into() }
    }

    #[must_use]
    pub fn arg(mut self, a: impl AsRef<OsStr>) -> Self {
        self.args.push(a.as_ref().to_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, it: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(it.into_iter().map(|s| s.as_ref().to_owned()));
        self
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exécute une commande jusqu'à sa fin ; code non nul ⇒ erreur.
pub trait CommandRunner {
    /// # Errors
    ///
    /// [`GrunError::Spawn`] si le programme ne démarre pas,
    /// [`GrunError::CommandFailed`] s'il sort en échec.
    fn run(&self, cmd: &ToolCommand) -> Result<()>;
}

/// Implémentation réelle via `std::process::Command`, stdio hérités
/// (la sortie du `TestRig` et la fenêtre `-gui` arrivent à l'utilisateur).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<()> {
        log::debug!("[{}] $ {cmd}", cmd.cwd.display());
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .current_dir(&cmd.cwd)
            .status()
            .map_err(|source| GrunError::Spawn { program: cmd.program.clone(), source })?;
        if !status.success() {
            return Err(GrunError::CommandFailed { program: cmd.program.clone(), status });
        }
        Ok(())
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, cmd: &ToolCommand) -> Result<()> {
        (**self).run(cmd)
    }
}
