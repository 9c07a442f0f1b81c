use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use image::RgbaImage;

use crate::assets::decode::decode_template;
use crate::config::model::LayoutConfig;
use crate::config::settings::RenderSettings;
use crate::foundation::error::{LockerError, LockerResult};

/// Subdirectory of the asset dir scanned for registered fonts.
pub const FONT_DIR: &str = "fonts";

/// The template images the compositor draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Grayscale cell face; tinted to derive the body color.
    Cell,
    /// Door handle, drawn once per cell.
    Handle,
    /// Control-panel module, drawn once at its fixed slot.
    ControlPanel,
}

impl TemplateKind {
    pub const ALL: [Self; 3] = [Self::Cell, Self::Handle, Self::ControlPanel];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Cell => "cell.png",
            Self::Handle => "handle.png",
            Self::ControlPanel => "control_panel.png",
        }
    }
}

type TemplateSlot = Result<Arc<RgbaImage>, String>;

/// Immutable template images and the font database, loaded once per process.
///
/// A template that fails to load is remembered as a failure instead of aborting the load; a
/// render that needs it degrades to the fallback grid. The store holds no interior mutability
/// and is shared by reference across concurrent renders.
#[derive(Clone)]
pub struct AssetStore {
    root: PathBuf,
    cell: TemplateSlot,
    handle: TemplateSlot,
    control_panel: TemplateSlot,
    fontdb: Arc<usvg::fontdb::Database>,
    registered_families: Vec<String>,
}

impl fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetStore")
            .field("root", &self.root)
            .field("cell", &self.cell.as_ref().map(|i| i.dimensions()))
            .field("handle", &self.handle.as_ref().map(|i| i.dimensions()))
            .field(
                "control_panel",
                &self.control_panel.as_ref().map(|i| i.dimensions()),
            )
            .field("font_faces", &self.fontdb.len())
            .field("registered_families", &self.registered_families)
            .finish()
    }
}

/// Templates required by one render, borrowed from the store.
#[derive(Clone, Copy, Debug)]
pub struct Templates<'a> {
    pub cell: &'a RgbaImage,
    pub handle: Option<&'a RgbaImage>,
    pub control_panel: Option<&'a RgbaImage>,
}

impl AssetStore {
    /// Read every template from `settings.asset_dir` and register fonts from its `fonts/`
    /// subdirectory plus the system font set.
    ///
    /// Font registration happens here and only here. Call this once before starting
    /// concurrent renders.
    #[tracing::instrument(skip(settings), fields(asset_dir = %settings.asset_dir.display()))]
    pub fn load(settings: &RenderSettings) -> Self {
        let root = settings.asset_dir.clone();
        let load = |kind: TemplateKind| -> TemplateSlot {
            load_template(&root, kind).map(Arc::new).map_err(|e| {
                tracing::warn!(template = kind.file_name(), error = %e, "template unavailable");
                e.to_string()
            })
        };
        let cell = load(TemplateKind::Cell);
        let handle = load(TemplateKind::Handle);
        let control_panel = load(TemplateKind::ControlPanel);

        let mut db = usvg::fontdb::Database::new();
        load_fonts_from_dir(&mut db, &root.join(FONT_DIR));
        let registered_families = family_names(&db);
        if registered_families.is_empty() {
            tracing::info!("no registered fonts; frame text uses system fonts");
        }
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), ?registered_families, "fonts loaded");

        Self {
            root,
            cell,
            handle,
            control_panel,
            fontdb: Arc::new(db),
            registered_families,
        }
    }

    /// Build a store from in-memory templates. `None` marks a template as missing.
    ///
    /// The font database starts empty; see [`AssetStore::with_fontdb`].
    pub fn from_templates(
        cell: Option<RgbaImage>,
        handle: Option<RgbaImage>,
        control_panel: Option<RgbaImage>,
    ) -> Self {
        let slot = |img: Option<RgbaImage>, kind: TemplateKind| -> TemplateSlot {
            img.map(Arc::new)
                .ok_or_else(|| format!("{} not provided", kind.file_name()))
        };
        Self {
            root: PathBuf::new(),
            cell: slot(cell, TemplateKind::Cell),
            handle: slot(handle, TemplateKind::Handle),
            control_panel: slot(control_panel, TemplateKind::ControlPanel),
            fontdb: Arc::new(usvg::fontdb::Database::new()),
            registered_families: Vec::new(),
        }
    }

    /// Replace the font database. Families found in `db` count as registered.
    pub fn with_fontdb(mut self, db: usvg::fontdb::Database) -> Self {
        self.registered_families = family_names(&db);
        self.fontdb = Arc::new(db);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template(&self, kind: TemplateKind) -> LockerResult<&RgbaImage> {
        let slot = match kind {
            TemplateKind::Cell => &self.cell,
            TemplateKind::Handle => &self.handle,
            TemplateKind::ControlPanel => &self.control_panel,
        };
        slot.as_deref()
            .map_err(|e| LockerError::asset_load(format!("{}: {e}", kind.file_name())))
    }

    /// Templates needed to render `config`: the cell always, the handle and control panel
    /// only when the config uses them.
    pub fn require(&self, config: &LayoutConfig) -> LockerResult<Templates<'_>> {
        let cell = self.template(TemplateKind::Cell)?;
        let handle = if config.handle {
            Some(self.template(TemplateKind::Handle)?)
        } else {
            None
        };
        let control_panel = if config.has_control_panel() {
            Some(self.template(TemplateKind::ControlPanel)?)
        } else {
            None
        };
        Ok(Templates {
            cell,
            handle,
            control_panel,
        })
    }

    pub fn fontdb(&self) -> &Arc<usvg::fontdb::Database> {
        &self.fontdb
    }

    /// Families loaded from the asset font directory, preferred over system fonts.
    pub fn registered_families(&self) -> &[String] {
        &self.registered_families
    }
}

fn load_template(root: &Path, kind: TemplateKind) -> LockerResult<RgbaImage> {
    let path = root.join(kind.file_name());
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read template '{}'", path.display()))?;
    let img = decode_template(&bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(LockerError::asset_load(format!(
            "template '{}' is empty",
            path.display()
        )));
    }
    Ok(img)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<PathBuf> = rd.flatten().map(|e| e.path()).collect();
    paths.sort();
    for path in paths {
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "font file skipped");
        }
    }
}

fn family_names(db: &usvg::fontdb::Database) -> Vec<String> {
    let mut names = Vec::<String>::new();
    for face in db.faces() {
        for (name, _) in &face.families {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
