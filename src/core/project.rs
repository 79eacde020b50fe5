//! Project discovery and initialization
//!
//! A project is any directory containing a `.roi/` folder. It holds the
//! configuration and the session cache that carries calculator state from
//! one command to the next.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project metadata directory
pub const PROJECT_DIR: &str = ".roi";

/// Maximum number of ancestor directories searched by [`Project::discover`]
const MAX_TRAVERSAL_DEPTH: usize = 10;

const DEFAULT_CONFIG: &str = r#"# Neptune ROI calculator configuration
#
# Apps Script (or any JSON) webhook that receives lead submissions.
# Can also be set with ROI_WEBHOOK_URL or GOOGLE_APPS_SCRIPT_URL.
# webhook_url: https://script.google.com/macros/s/XXXX/exec
# webhook_timeout_secs: 10

# Local CSV ledger of submissions, relative to the project root
# ledger: leads.csv

currency_symbol: "₹"
report_dir: reports

vendor:
  name: Neptune Plastics
  email: nikunj@neptuneplastic.net
  phone: "+91 9830569698"
  whatsapp: "+91 7439505779"
  website: https://neptuneplastic.net/

# Image files embedded by path into HTML reports; unreadable files are skipped
# logo: assets/neptune-logo.png
# customer_logos:
#   - assets/logos/bhavin.png
"#;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not inside a roi project (no {PROJECT_DIR}/ directory found). Run `roi init` first")]
    NotFound,

    #[error("A roi project already exists at {0} (use --force to reinitialize)")]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a project directory
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Open a project rooted at `root` without checking it exists
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the project containing the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Find the project containing `start`, searching up through its ancestors
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        start
            .ancestors()
            .take(MAX_TRAVERSAL_DEPTH)
            .find(|dir| dir.join(PROJECT_DIR).is_dir())
            .map(|dir| {
                log::debug!("Found project at {}", dir.display());
                Self::at(dir)
            })
            .ok_or(ProjectError::NotFound)
    }

    /// Create the `.roi/` directory and a default config in `root`
    pub fn init(root: &Path, force: bool) -> Result<Self, ProjectError> {
        let meta = root.join(PROJECT_DIR);
        if meta.exists() && !force {
            return Err(ProjectError::AlreadyExists(root.to_path_buf()));
        }
        fs::create_dir_all(&meta)?;
        fs::write(meta.join("config.yaml"), DEFAULT_CONFIG)?;
        log::info!("Initialized project at {}", root.display());
        Ok(Self::at(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.roi/` metadata directory
    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.meta_dir().join("config.yaml")
    }

    pub fn session_path(&self) -> PathBuf {
        self.meta_dir().join("session.json")
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
