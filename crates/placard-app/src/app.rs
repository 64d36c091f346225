//! Native command-line front end.
//!
//! Each invocation opens the stored layout, applies one command, and writes
//! the layout back through the editor.

use crate::shortcuts::ShortcutRegistry;
use placard_core::element::UnknownKind;
use placard_core::storage::{FileStorage, create_default_storage};
use placard_core::{Editor, EditorConfig, ElementKind, ExportFile, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "PLACARD_CONFIG";

const USAGE: &str = "usage: placard <command>

commands:
  add <type>      add an element (rectangle, text, line, arrow, ellipse)
  list            list layers in stacking order
  export [dir]    write design.json and design.html
  shortcuts       list keyboard shortcuts
  clear           remove every element";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub editor: EditorConfig,
    /// Where the layout is stored. Defaults to the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Default target for `export`.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            storage_dir: None,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config from the file named by `PLACARD_CONFIG`, or the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(ElementKind),
    List,
    Export(Option<PathBuf>),
    Shortcuts,
    Clear,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, AppError> {
        let Some(name) = args.first() else {
            return Ok(Command::Help);
        };
        match name.as_str() {
            "add" => {
                let kind = args.get(1).ok_or(AppError::MissingArgument("add"))?;
                Ok(Command::Add(kind.to_lowercase().parse()?))
            }
            "list" | "ls" => Ok(Command::List),
            "export" => Ok(Command::Export(args.get(1).map(PathBuf::from))),
            "shortcuts" => Ok(Command::Shortcuts),
            "clear" => Ok(Command::Clear),
            "help" | "-h" | "--help" => Ok(Command::Help),
            other => Err(AppError::UnknownCommand(other.to_string())),
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    editor: Editor<FileStorage>,
}

impl App {
    /// Open the stored layout using `config`.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let storage = match &config.storage_dir {
            Some(dir) => Arc::new(FileStorage::new(dir.clone())?),
            None => create_default_storage()?,
        };
        log::info!("Using storage at {}", storage.base_path().display());
        let editor = Editor::open(config.editor.clone(), storage);
        Ok(Self { config, editor })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(AppConfig::from_env()?)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn editor(&self) -> &Editor<FileStorage> {
        &self.editor
    }

    /// Parse and execute `args`, printing the result.
    pub fn run(&mut self, args: &[String]) -> Result<(), AppError> {
        let command = Command::parse(args)?;
        let output = self.execute(command)?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }

    /// Execute a command and return its printable output.
    pub fn execute(&mut self, command: Command) -> Result<String, AppError> {
        match command {
            Command::Add(kind) => {
                let id = self.editor.add_element(kind);
                let name = self
                    .editor
                    .document()
                    .get(id)
                    .map(|el| el.name())
                    .unwrap_or_default();
                Ok(format!("Added {}", name))
            }
            Command::List => Ok(self.list()),
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| self.config.export_dir.clone());
                let names = write_export(&dir, &self.editor.export_names()?)?;
                let html = write_export(&dir, &self.editor.export_html())?;
                Ok(format!("Wrote {}\nWrote {}", names.display(), html.display()))
            }
            Command::Shortcuts => Ok(ShortcutRegistry::render()),
            Command::Clear => {
                let count = self.editor.document().len();
                self.editor.clear();
                Ok(format!("Removed {} elements", count))
            }
            Command::Help => Ok(USAGE.to_string()),
        }
    }

    fn list(&self) -> String {
        let document = self.editor.document();
        if document.is_empty() {
            return "No elements".to_string();
        }
        document
            .iter()
            .map(|el| {
                format!(
                    "{:>3}  {:<14} at ({}, {})  {}x{}  rotate {}deg",
                    el.z_index(),
                    el.name(),
                    el.left,
                    el.top,
                    el.width,
                    el.height,
                    el.rotation
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Write an export file into `dir`, creating the directory if needed.
pub fn write_export(dir: &Path, file: &ExportFile) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|source| AppError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file.file_name);
    fs::write(&path, &file.contents).map_err(|source| AppError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("Exported {} ({} bytes)", path.display(), file.contents.len());
    Ok(path)
}
