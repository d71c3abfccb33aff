use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::{GrunError, Result};

/// Récupère une ressource distante dans un fichier local.
pub trait Fetcher {
    /// # Errors
    ///
    /// [`GrunError::Fetch`] sur erreur réseau ou statut non-2xx (rien n'est
    /// alors écrit), [`GrunError::Io`] si `dest` ne peut pas être écrit.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// GET HTTP(S) bloquant ; statut non-2xx ⇒ erreur. Pas de retry ni de timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self { user_agent: concat!("grun/", env!("CARGO_PKG_VERSION")).into() }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let fetch_err = |source: reqwest::Error| GrunError::Fetch { url: url.to_string(), source };
        let client = reqwest::blocking::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(None::<Duration>)
            .build()
            .map_err(fetch_err)?;
        let mut resp =
            client.get(url).send().and_then(reqwest::blocking::Response::error_for_status).map_err(fetch_err)?;

        let mut file = File::create(dest).map_err(|e| GrunError::io("création", dest, e))?;
        let n = resp.copy_to(&mut file).map_err(fetch_err)?;
        file.flush().and_then(|()| file.sync_all()).map_err(|e| GrunError::io("écriture", dest, e))?;
        log::debug!("{n} octets reçus de {url}");
        Ok(())
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).fetch(url, dest)
    }
}
