use crate::paths::ConfigPaths;
use anyhow::{Context, Result};
use fd_lock::RwLock;
use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStoreRecord")]
pub struct StoreRecord {
    pub storeId: String,
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projectDir: Option<String>,
}

// Records written before aliases existed carry only a store id.
#[derive(Deserialize)]
struct RawStoreRecord {
    storeId: String,
    alias: Option<String>,
    #[serde(default, deserialize_with = "EmptyAsNone")]
    projectDir: Option<String>,
}

impl From<RawStoreRecord> for StoreRecord {
    fn from(raw: RawStoreRecord) -> Self {
        let alias = raw.alias.unwrap_or_else(|| raw.storeId.clone());

        Self {
            storeId: raw.storeId,
            alias,
            projectDir: raw.projectDir,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub stores: Vec<StoreRecord>,
    #[serde(
        default,
        deserialize_with = "EmptyAsNone",
        skip_serializing_if = "Option::is_none"
    )]
    pub workspace: Option<PathBuf>,
}

// Some writers emit `""` for unset optional fields.
fn EmptyAsNone<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.filter(|text| !text.is_empty()).map(T::from))
}

/// The alias registry, backed by a single JSON document that is rewritten in
/// full after every mutation.
#[derive(Debug, Clone)]
pub struct Store {
    pub paths: ConfigPaths,
    document: ConfigDocument,
}

impl Store {
    pub fn Load(paths: ConfigPaths) -> Result<Self> {
        EnsureFilesExist(&paths)?;

        let document = LoadDocument(&paths.configFile)?;

        log::debug!(
            "loaded {} store(s) from {}",
            document.stores.len(),
            paths.configFile.display()
        );

        Ok(Self { paths, document })
    }

    pub fn AddStore(&mut self, storeId: &str, alias: &str, projectDir: Option<&str>) -> Result<()> {
        self.document.stores.push(StoreRecord {
            storeId: storeId.to_string(),
            alias: alias.to_string(),
            projectDir: projectDir.map(str::to_string),
        });

        self.Save()
    }

    pub fn GetStore(&self, alias: &str) -> Option<&StoreRecord> {
        self.document.stores.iter().find(|store| store.alias == alias)
    }

    pub fn ListStores(&self) -> &[StoreRecord] {
        &self.document.stores
    }

    pub fn SetWorkspace(&mut self, path: &Path) -> Result<()> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;

        self.document.workspace = Some(ResolveAgainst(&cwd, path));

        self.Save()
    }

    pub fn GetWorkspace(&self) -> Option<&Path> {
        self.document.workspace.as_deref()
    }

    fn Save(&self) -> Result<()> {
        WriteDocument(&self.paths.configFile, &self.document)
    }
}

/// Joins a relative `path` onto `base` and folds `.`/`..` lexically, without
/// touching the filesystem.
pub fn ResolveAgainst(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }

    resolved
}

fn EnsureFilesExist(paths: &ConfigPaths) -> Result<()> {
    if !paths.configDir.as_os_str().is_empty() && !paths.configDir.exists() {
        fs::create_dir_all(&paths.configDir).with_context(|| {
            format!("Failed to create config directory '{}'", paths.configDir.display())
        })?;
    }

    if !paths.configFile.exists() {
        WriteDocument(&paths.configFile, &ConfigDocument::default())?;
    }

    Ok(())
}

fn LoadDocument(path: &Path) -> Result<ConfigDocument> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    let document = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

    Ok(document)
}

fn WriteDocument(path: &Path, document: &ConfigDocument) -> Result<()> {
    let rendered = serde_json::to_string_pretty(document)?;

    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open config file '{}'", path.display()))?;

    let mut lock = RwLock::new(file);

    let mut guard = lock.write()?;

    guard.set_len(0)?;
    guard.seek(SeekFrom::Start(0))?;

    guard.write_all(rendered.as_bytes())?;

    log::debug!("wrote config file {}", path.display());

    Ok(())
}
