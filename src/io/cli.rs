//! Command-line interface for converting an image into a tile grid preview

use crate::io::catalog::load_catalog;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MAX_GRID_DIMENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, TileMapError, invalid_parameter};
use crate::io::image::{export_preview_png, load_source_image};
use crate::io::progress::ProgressManager;
use crate::palette::{CandidateCatalog, CandidateKind, PaletteBuilder, SharedPalette};
use crate::spatial::{ConversionResult, GridConverter, GridDimensions, SamplingMode};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tilemapper")]
#[command(
    author,
    version,
    about = "Convert an image into tile, wall and paint ids through a precomputed palette"
)]
/// Command-line arguments for the conversion tool
pub struct Cli {
    /// Source image to convert
    #[arg(value_name = "IMAGE")]
    pub target: PathBuf,

    /// Candidate color file (count-prefixed RGBA floats for tiles, walls, paints)
    #[arg(short, long, value_name = "FILE")]
    pub colors: PathBuf,

    /// Default validity file (count-prefixed tile and wall ids); all enabled if omitted
    #[arg(long, value_name = "FILE")]
    pub valid: Option<PathBuf>,

    /// Output grid width in tiles
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output grid height in tiles
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Do not derive the missing side from the source aspect ratio
    #[arg(long)]
    pub no_aspect: bool,

    /// Sampling strategy for output cells
    #[arg(long, value_enum, default_value_t = SamplingMode::Interpolated)]
    pub sampling: SamplingMode,

    /// Worker threads for the palette build (defaults to all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Enable a tile id (repeatable)
    #[arg(long, value_name = "ID")]
    pub enable_tile: Vec<u16>,

    /// Disable a tile id (repeatable)
    #[arg(long, value_name = "ID")]
    pub disable_tile: Vec<u16>,

    /// Enable a wall id (repeatable)
    #[arg(long, value_name = "ID")]
    pub enable_wall: Vec<u16>,

    /// Disable a wall id (repeatable)
    #[arg(long, value_name = "ID")]
    pub disable_wall: Vec<u16>,

    /// Disable every wall before applying overrides
    #[arg(long)]
    pub no_walls: bool,

    /// Preview output path (defaults to <IMAGE stem>_tiles.png)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Tracing filter directive, e.g. `tilemapper=debug`
    #[arg(long, value_name = "DIRECTIVE")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Whether a single given side determines the other through the source aspect ratio
    pub const fn keep_aspect(&self) -> bool {
        !self.no_aspect
    }

    /// Resolve the output grid size for a source of the given size
    ///
    /// Both sides given are used as-is. With one side given the other follows
    /// the source aspect ratio, or matches it when aspect locking is off. With
    /// neither, the default width drives the height the same way.
    ///
    /// # Errors
    ///
    /// Returns an error if a side is zero or the resolved grid exceeds
    /// `MAX_GRID_DIMENSION` on either axis
    pub fn grid_dimensions(
        &self,
        source_width: usize,
        source_height: usize,
    ) -> Result<GridDimensions> {
        let dimensions = match (self.width, self.height) {
            (Some(w), Some(h)) => GridDimensions::new(w, h),
            (None, Some(h)) if self.keep_aspect() => {
                GridDimensions::with_height_locked(h, source_width, source_height)
            }
            (None, Some(h)) => GridDimensions::new(h, h),
            (width, None) if self.keep_aspect() => GridDimensions::with_width_locked(
                width.unwrap_or(DEFAULT_GRID_WIDTH),
                source_width,
                source_height,
            ),
            (Some(w), None) => GridDimensions::new(w, w),
            (None, None) => GridDimensions::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
        }?;

        for (parameter, side) in [
            ("width", dimensions.width()),
            ("height", dimensions.height()),
        ] {
            if side > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &side,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(dimensions)
    }

    /// Apply the enable/disable flags to a catalog
    ///
    /// `--no-walls` runs first, then enables, then disables, so a disable
    /// always wins over an enable of the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is not in the catalog
    pub fn apply_overrides(&self, catalog: &mut CandidateCatalog) -> Result<()> {
        if self.no_walls {
            catalog.set_all(CandidateKind::Wall, false);
        }
        for (kind, ids, enabled) in [
            (CandidateKind::Tile, &self.enable_tile, true),
            (CandidateKind::Wall, &self.enable_wall, true),
            (CandidateKind::Tile, &self.disable_tile, false),
            (CandidateKind::Wall, &self.disable_wall, false),
        ] {
            for &id in ids {
                catalog.set_enabled(kind, id, enabled)?;
            }
        }
        Ok(())
    }

    /// Where the preview image is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.target))
    }

    fn default_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Orchestrates catalog loading, palette build, conversion and export
pub struct Generator {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    palette: SharedPalette,
}

impl Generator {
    /// Create a generator for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            palette: SharedPalette::new(),
        }
    }

    /// Run the full pipeline and return the converted grid
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog, image or output cannot be processed
    pub fn process(&mut self) -> Result<ConversionResult> {
        let mut catalog = load_catalog(&self.cli.colors, self.cli.valid.as_deref())?;
        self.cli.apply_overrides(&mut catalog)?;

        self.rebuild_palette(&catalog)?;

        let image = load_source_image(&self.cli.target)?;
        let dimensions = self.cli.grid_dimensions(image.width(), image.height())?;
        tracing::info!(
            source_width = image.width(),
            source_height = image.height(),
            width = dimensions.width(),
            height = dimensions.height(),
            sampling = ?self.cli.sampling,
            "converting image"
        );

        let palette = self
            .palette
            .snapshot()
            .ok_or_else(|| TileMapError::InvalidSourceData {
                reason: "palette has not been built".to_string(),
            })?;

        let converter = GridConverter::new(&image).with_mode(self.cli.sampling);
        let result = match self.progress_manager.as_mut() {
            Some(pm) => {
                let bar = pm.start_conversion(dimensions.height());
                converter.convert_with_progress(dimensions, palette.as_ref(), &|| bar.inc(1))?
            }
            None => converter.convert(dimensions, palette.as_ref())?,
        };

        export_preview_png(&result, &catalog, &self.cli.output_path())?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        tracing::info!(
            tiles = result.placed_tiles(),
            walls = result.placed_walls(),
            empty = result.empty_cells(),
            "conversion summary"
        );

        Ok(result)
    }

    fn rebuild_palette(&mut self, catalog: &CandidateCatalog) -> Result<()> {
        let mut builder = PaletteBuilder::new(catalog.snapshot()?);
        if let Some(threads) = self.cli.threads {
            builder = builder.with_threads(threads)?;
        }

        let store = match self.progress_manager.as_mut() {
            Some(pm) => {
                let bar = pm.start_palette();
                builder.build_with_progress(&|| bar.inc(1))?
            }
            None => builder.build()?,
        };

        self.palette.replace(store);
        Ok(())
    }
}
