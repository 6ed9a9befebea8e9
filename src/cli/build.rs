//! Build command implementation.
//!
//! Turns each source sheet into `<out>/<name>/<name>.png` (the padded atlas)
//! and `<out>/<name>/<name>.json` (slice metadata).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::discover_inputs;
use crate::error::{Result, TilepadError};
use crate::manifest::{Manifest, TileSize};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::process;
use crate::png::{read_png, write_png};
use crate::sheet::write_sheet_json;
use crate::types::{Alignment, Colour, EmptyTileBehavior, NamingScheme, Pivot, TileGridConfig};

/// Grid and output settings shared by `build` and `watch`.
#[derive(Args, Debug, Clone, Default)]
pub struct SheetArgs {
    /// Config file (default: ./tilepad.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tile size as WxH (e.g. 16x16)
    #[arg(long)]
    pub tile: Option<TileSize>,

    /// Bleed pixels around each tile
    #[arg(long)]
    pub padding: Option<u32>,

    /// Colour key to make transparent (e.g. #FF00FF)
    #[arg(long, value_name = "COLOUR")]
    pub mask: Option<Colour>,

    /// Slice naming scheme
    #[arg(long, value_enum)]
    pub naming: Option<NamingScheme>,

    /// Keep or remove fully transparent tiles
    #[arg(long, value_enum)]
    pub empty: Option<EmptyTileBehavior>,

    /// Pixels per unit recorded in the slice metadata
    #[arg(long)]
    pub ppu: Option<f32>,

    /// Sprite alignment recorded for every slice
    #[arg(long, value_enum)]
    pub alignment: Option<Alignment>,

    /// Custom pivot as X,Y (normalized, bottom-left origin)
    #[arg(long)]
    pub pivot: Option<Pivot>,

    /// Output root (default: the directory of each input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Base name for slices and output files (default: input file stem)
    #[arg(long)]
    pub name: Option<String>,
}

/// Resolved settings: flags over config file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: TileGridConfig,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
}

impl SheetArgs {
    pub fn resolve(&self, printer: &Printer) -> Result<Settings> {
        let found = match &self.config {
            Some(path) => Some((path.clone(), Manifest::load(path)?)),
            None => Manifest::find(Path::new("."))?,
        };
        let manifest = match found {
            Some((path, manifest)) => {
                printer.verbose("Config", &display_path(&path));
                manifest
            }
            None => Manifest::default(),
        };

        let mut config = manifest.tile_config();
        if let Some(tile) = self.tile {
            config.tile_width = tile.width;
            config.tile_height = tile.height;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(colour) = self.mask {
            config = config.with_mask(colour);
        }
        if let Some(scheme) = self.naming {
            config.naming_scheme = scheme;
        }
        if let Some(behavior) = self.empty {
            config.empty_tile_behavior = behavior;
        }
        if let Some(ppu) = self.ppu {
            config.pixels_per_unit = ppu;
        }
        if let Some(alignment) = self.alignment {
            config.alignment = alignment;
        }
        if let Some(pivot) = self.pivot {
            config.pivot = pivot;
        }
        config.validate()?;

        Ok(Settings {
            config,
            output: self.output.clone().or(manifest.output),
            name: self.name.clone(),
        })
    }
}

/// Build padded atlases and slice metadata from sprite sheets
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// PNG sheets or directories containing them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub sheet: SheetArgs,
}

/// Files written for one source sheet.
#[derive(Debug, Clone)]
pub struct BuiltSheet {
    pub atlas: PathBuf,
    pub metadata: PathBuf,
    pub slices: usize,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<Vec<BuiltSheet>> {
    let settings = args.sheet.resolve(printer)?;
    let inputs = discover_inputs(&args.inputs)?;

    if inputs.is_empty() {
        printer.warning("Warning", "No PNG files found");
        return Ok(Vec::new());
    }
    if settings.name.is_some() && inputs.len() > 1 {
        return Err(TilepadError::Build {
            message: format!("--name given with {} inputs", inputs.len()),
            help: Some("Use --name with a single input file".to_string()),
        });
    }

    let built = inputs
        .iter()
        .map(|input| build_sheet(input, &settings, printer))
        .collect::<Result<Vec<_>>>()?;

    if built.len() > 1 {
        let slices: usize = built.iter().map(|b| b.slices).sum();
        printer.status(
            "Finished",
            &format!(
                "{}, {}",
                plural(built.len(), "sheet", "sheets"),
                plural(slices, "slice", "slices")
            ),
        );
    }

    Ok(built)
}

/// Process one source sheet and write its atlas and metadata.
pub fn build_sheet(input: &Path, settings: &Settings, printer: &Printer) -> Result<BuiltSheet> {
    let config = &settings.config;
    let display = display_path(input);

    printer.status("Loading", &display);
    let source = read_png(input)?;

    let base_name = match &settings.name {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet")
            .to_string(),
    };

    let sheet = process(&source, &base_name, config)?;
    let geometry = &sheet.geometry;

    let (extra_x, extra_y) = geometry.remainder();
    if extra_x > 0 || extra_y > 0 {
        printer.warning(
            "Warning",
            &format!(
                "{}x{} image is not a multiple of {}x{} tiles; ignoring {} pixel columns and {} pixel rows",
                source.width(),
                source.height(),
                config.tile_width,
                config.tile_height,
                extra_x,
                extra_y
            ),
        );
    }

    printer.status(
        "Building",
        &format!(
            "{}x{} grid of {}x{} tiles, atlas {}x{}",
            geometry.cols,
            geometry.rows,
            config.tile_width,
            config.tile_height,
            geometry.atlas_width,
            geometry.atlas_height
        ),
    );
    printer.status(
        "Slicing",
        &format!("{} as {}", plural(sheet.slices.len(), "slice", "slices"), base_name),
    );
    if sheet.removed() > 0 {
        printer.info(
            "Removed",
            &plural(sheet.removed(), "empty tile", "empty tiles"),
        );
    }

    let root = settings
        .output
        .clone()
        .unwrap_or_else(|| input.parent().map(Path::to_path_buf).unwrap_or_default());
    let dir = root.join(&base_name);
    fs::create_dir_all(&dir).map_err(|e| TilepadError::Io {
        path: dir.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let image_name = format!("{}.png", base_name);
    let atlas_path = dir.join(&image_name);
    let metadata_path = dir.join(format!("{}.json", base_name));

    printer.status("Writing", &display_path(&dir));
    write_png(&sheet.atlas, &atlas_path)?;
    printer.verbose("Wrote", &display_path(&atlas_path));
    write_sheet_json(&sheet, &image_name, config.pixels_per_unit, &metadata_path)?;
    printer.verbose("Wrote", &display_path(&metadata_path));

    printer.status(
        "Finished",
        &format!("{} -> {}", display, display_path(&dir)),
    );

    Ok(BuiltSheet {
        atlas: atlas_path,
        metadata: metadata_path,
        slices: sheet.slices.len(),
    })
}
