//! grun-cli/src/lib.rs — CLI `grun` au-dessus de grun-core
//!
//!   grun [OPTIONS] <FLAG> <INPUT>
//!
//! `FLAG` part tel quel au `TestRig` (`-tree`, `-tokens`, `-gui`…), `INPUT` est
//! rendu absolu par rapport au dossier courant.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use grun_core::{GrunConfig, GrunError, HttpFetcher, Orchestrator, RunReport, SystemRunner};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "grun", version, about = "Télécharge ANTLR4, génère et compile la grammaire, puis lance le TestRig")]
pub struct Cli {
    /// Flag transmis au `TestRig` sans modification (ex: -tree, -tokens, -gui)
    #[arg(value_name = "FLAG", allow_hyphen_values = true)]
    pub flag: String,

    /// Fichier à parser
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Fichier de config TOML (défaut: ./grun.toml s'il existe)
    #[arg(short, long, env = "GRUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dossier de travail (jar + artefacts)
    #[arg(long)]
    pub work_dir: Option<Utf8PathBuf>,

    /// Identifiant de grammaire (`C` → `C.g4`)
    #[arg(long)]
    pub grammar: Option<String>,

    /// Dossier contenant la grammaire
    #[arg(long)]
    pub grammar_dir: Option<Utf8PathBuf>,

    /// Règle racine pour le `TestRig`
    #[arg(long, value_name = "RULE")]
    pub root: Option<String>,

    /// Binaire java
    #[arg(long, env = "GRUN_JAVA")]
    pub java: Option<String>,

    /// Binaire javac
    #[arg(long, env = "GRUN_JAVAC")]
    pub javac: Option<String>,

    /// URL du jar ANTLR
    #[arg(long)]
    pub antlr_url: Option<String>,

    /// Verbosité (répéter pour plus de bruit)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Seulement avertissements et erreurs
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Les options explicites écrasent la config chargée.
    pub fn apply(&self, cfg: &mut GrunConfig) {
        if let Some(v) = &self.work_dir {
            cfg.work_dir.clone_from(v);
        }
        if let Some(v) = &self.grammar {
            cfg.grammar.clone_from(v);
        }
        if let Some(v) = &self.grammar_dir {
            cfg.grammar_dir.clone_from(v);
        }
        if let Some(v) = &self.root {
            cfg.root_production.clone_from(v);
        }
        if let Some(v) = &self.java {
            cfg.java.clone_from(v);
        }
        if let Some(v) = &self.javac {
            cfg.javac.clone_from(v);
        }
        if let Some(v) = &self.antlr_url {
            cfg.antlr_url.clone_from(v);
        }
    }

    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}

/// Logger stderr : messages d'avancement en clair, le reste préfixé du niveau.
/// `RUST_LOG` garde la main s'il est défini.
pub fn init_logging(level: LevelFilter) {
    let init = env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "[{}] {}", record.level(), record.args())
            }
        })
        .try_init();
    // logger déjà posé (tests, embarquement) : on le signale sans échouer
    if let Err(e) = init {
        eprintln!("env_logger: {e}");
    }
}

/// Charge la config, applique les options, puis lance l'orchestrateur.
///
/// # Errors
///
/// Config illisible ou invalide, ou première étape en échec ; la
/// [`GrunError`] d'origine reste accessible par `downcast_ref`.
pub fn run(cli: &Cli) -> Result<RunReport> {
    let caller_dir = std::env::current_dir().wrap_err("dossier courant illisible")?;
    let mut cfg = GrunConfig::discover(cli.config.as_deref(), &caller_dir)?;
    cli.apply(&mut cfg);

    let orch = Orchestrator::new(cfg, &caller_dir, SystemRunner, HttpFetcher::default());
    log::debug!("config: {:?}", orch.config());
    let report = orch.run(&cli.flag, &cli.input)?;
    log::debug!("préparation: {report:?}");
    Ok(report)
}

/// Code de sortie du sous-process fautif s'il y en a un, 1 sinon.
#[must_use]
pub fn failure_code(report: &color_eyre::Report) -> u8 {
    report
        .downcast_ref::<GrunError>()
        .and_then(GrunError::exit_code)
        .and_then(|c| u8::try_from(c).ok())
        .filter(|c| *c != 0)
        .unwrap_or(1)
}

#[must_use]
pub fn exit_code(report: &color_eyre::Report) -> ExitCode {
    ExitCode::from(failure_code(report))
}
