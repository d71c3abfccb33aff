use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{GrunConfig, Layout};
use crate::ensure::{ensure, ArtifactSet, Ensured};
use crate::error::{GrunError, Result};
use crate::fetch::Fetcher;
use crate::process::{CommandRunner, ToolCommand};
use crate::util::fs::{ensure_parent, list_with_extension, part_path};

pub const ANTLR_TOOL: &str = "org.antlr.v4.Tool";
pub const TEST_RIG: &str = "org.antlr.v4.gui.TestRig";

/// Issue des étapes de préparation d'un run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub work_dir: Ensured,
    pub archive: Ensured,
    pub generated: Ensured,
    pub compiled: Ensured,
}

impl RunReport {
    /// Vrai si aucune étape de préparation n'a eu à agir.
    #[must_use]
    pub fn all_present(&self) -> bool {
        [self.work_dir, self.archive, self.generated, self.compiled].iter().all(|e| *e == Ensured::Present)
    }
}

/// Orchestrateur principal : étapes gardées puis `TestRig`.
///
/// Le dossier courant du process n'est jamais modifié ; chaque outil externe
/// reçoit `layout.work_dir` comme dossier courant.
pub struct Orchestrator<R, F> {
    cfg: GrunConfig,
    layout: Layout,
    runner: R,
    fetcher: F,
}

impl<R: CommandRunner, F: Fetcher> Orchestrator<R, F> {
    #[must_use]
    pub fn new(cfg: GrunConfig, caller_dir: &Path, runner: R, fetcher: F) -> Self {
        let layout = cfg.layout(caller_dir);
        Self { cfg, layout, runner, fetcher }
    }

    /// Config effective (fichier + options) utilisée pour ce run.
    #[must_use]
    pub const fn config(&self) -> &GrunConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Enchaîne les quatre étapes gardées puis lance le `TestRig`.
    /// Première erreur ⇒ arrêt, sans nettoyage.
    ///
    /// # Errors
    ///
    /// La première erreur d'étape, telle quelle (voir [`GrunError`]).
    pub fn run(&self, flag: &str, input: &Path) -> Result<RunReport> {
        let input = self.layout.resolve_input(input);
        let report = RunReport {
            work_dir: self.ensure_work_dir()?,
            archive: self.ensure_archive()?,
            generated: self.ensure_generated()?,
            compiled: self.ensure_compiled()?,
        };
        self.run_test_rig(flag, &input)?;
        Ok(report)
    }

    /// # Errors
    ///
    /// [`GrunError::Io`] si le dossier ne peut pas être créé.
    pub fn ensure_work_dir(&self) -> Result<Ensured> {
        let dir = &self.layout.work_dir;
        if dir.is_dir() {
            return Ok(Ensured::Present);
        }
        fs::create_dir_all(dir).map_err(|e| GrunError::io("création du dossier de travail", dir.as_path(), e))?;
        Ok(Ensured::Created)
    }

    /// Télécharge le jar s'il manque. Écriture dans `<jar>.part` puis
    /// renommage : un téléchargement interrompu ne laisse jamais de jar.
    ///
    /// # Errors
    ///
    /// Erreur du [`Fetcher`], ou [`GrunError::Io`] sur le renommage.
    pub fn ensure_archive(&self) -> Result<Ensured> {
        let jar = &self.layout.archive;
        ensure("archive", &ArtifactSet::Files(vec![jar.clone()]), || {
            log::info!("Downloading {}...", self.cfg.antlr_url);
            ensure_parent(jar).map_err(|e| GrunError::io("création du dossier", jar.as_path(), e))?;
            let part = part_path(jar);
            self.fetcher.fetch(&self.cfg.antlr_url, &part)?;
            fs::rename(&part, jar).map_err(|e| GrunError::io("renommage", part.as_path(), e))
        })
    }

    /// # Errors
    ///
    /// Échec du générateur, ou [`GrunError::MissingArtifacts`] s'il n'a pas
    /// produit lexer et parser.
    pub fn ensure_generated(&self) -> Result<Ensured> {
        ensure("génération", &self.generated_set(), || {
            log::info!("Generating {} parser and lexer...", self.cfg.grammar);
            self.runner.run(&self.generate_command()?)
        })
    }

    /// # Errors
    ///
    /// Échec de `javac`, ou [`GrunError::MissingArtifacts`] s'il manque
    /// encore des `.class`.
    pub fn ensure_compiled(&self) -> Result<Ensured> {
        ensure("compilation", &self.compiled_set(), || {
            log::info!("Compiling {} parser and lexer...", self.cfg.grammar);
            self.runner.run(&self.compile_command()?)
        })
    }

    /// Toujours exécuté ; `input` doit déjà être absolu.
    ///
    /// # Errors
    ///
    /// [`GrunError::CommandFailed`] avec le code du `TestRig`.
    pub fn run_test_rig(&self, flag: &str, input: &Path) -> Result<()> {
        log::info!("Running grun...");
        self.runner.run(&self.test_rig_command(flag, input)?)
    }

    /// `java -cp <cp> org.antlr.v4.Tool -o . <grammaire absolue>`
    ///
    /// # Errors
    ///
    /// [`GrunError::ClassPath`] si le chemin du jar est inutilisable.
    pub fn generate_command(&self) -> Result<ToolCommand> {
        Ok(self.java()?.arg(ANTLR_TOOL).args(["-o", "."]).arg(&self.layout.grammar_file))
    }

    /// `javac -cp <cp> <tous les .java du dossier, triés>`.
    /// Le joker `*.java` est développé ici : aucun shell n'est impliqué.
    ///
    /// # Errors
    ///
    /// [`GrunError::Io`] si le dossier est illisible, [`GrunError::ClassPath`].
    pub fn compile_command(&self) -> Result<ToolCommand> {
        let dir = &self.layout.work_dir;
        let sources =
            list_with_extension(dir, "java").map_err(|e| GrunError::io("lecture du dossier", dir.as_path(), e))?;
        let names = sources.iter().filter_map(|p| p.file_name().map(ToOwned::to_owned));
        Ok(ToolCommand::new(&self.cfg.javac, dir.as_path()).arg("-cp").arg(self.layout.classpath()?).args(names))
    }

    /// `java -cp <cp> org.antlr.v4.gui.TestRig <G> <racine> <flag> <entrée>`
    ///
    /// # Errors
    ///
    /// [`GrunError::ClassPath`] si le chemin du jar est inutilisable.
    pub fn test_rig_command(&self, flag: &str, input: &Path) -> Result<ToolCommand> {
        Ok(self.java()?.arg(TEST_RIG).arg(&self.cfg.grammar).arg(&self.cfg.root_production).arg(flag).arg(input))
    }

    fn java(&self) -> Result<ToolCommand> {
        let cp: OsString = self.layout.classpath()?;
        Ok(ToolCommand::new(&self.cfg.java, self.layout.work_dir.as_path()).arg("-cp").arg(cp))
    }

    fn generated_set(&self) -> ArtifactSet {
        ArtifactSet::Files(self.grammar_files("java"))
    }

    fn compiled_set(&self) -> ArtifactSet {
        ArtifactSet::Compiled { dir: self.layout.work_dir.clone(), required: self.grammar_files("class") }
    }

    /// `<G>Lexer.<ext>` et `<G>Parser.<ext>` dans le dossier de travail.
    fn grammar_files(&self, ext: &str) -> Vec<PathBuf> {
        ["Lexer", "Parser"]
            .iter()
            .map(|suffix| self.layout.work_dir.join(format!("{}{suffix}.{ext}", self.cfg.grammar)))
            .collect()
    }
}
