//! Headless session replay.
//!
//! A session script is a JSON array of [`SessionCommand`]s applied in order
//! to a [`DesignerState`]. The first failing command stops the replay with
//! its index in the error context.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use plantrace_designer::ingest::load_background;
use plantrace_designer::{
    BoundaryType, DesignerState, FlipAxis, LineStyle, Point, PointerKind, Quote, ToolMode,
};
use plantrace_settings::Config;
use serde::{Deserialize, Serialize};

/// One editor action. Coordinates are model (image) pixels unless the
/// variant says screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Load a raster background; relative paths resolve against the script.
    LoadImage { path: PathBuf },
    SetTool { tool: ToolMode },
    SetLineStyle { style: LineStyle },
    Click { x: f64, y: f64 },
    /// Press and release at a screen position.
    Tap { x: f64, y: f64 },
    /// Press at `from`, move to `to` and release, in screen coordinates.
    Drag { from: Point, to: Point },
    Wheel { x: f64, y: f64, delta_y: f64 },
    ConfirmPending,
    CancelPending,
    ContextMenu,
    CalibrateScale { p1: Point, p2: Point, meters: String },
    /// Finish a calibration from the two picked site vertices.
    ConfirmScale { meters: String },
    SelectAt { x: f64, y: f64 },
    MoveItem { dx: f64, dy: f64 },
    RotateItem { degrees: f64 },
    FlipItem { axis: FlipAxis },
    SetItemHeight { height: Option<f64> },
    DeleteItem,
    SetBoundaryType { index: usize, boundary: BoundaryType },
    SetVertexHeight { index: usize, height: f64 },
    RotateView,
    ConfirmRotation,
    GoToStep { step: u8 },
    Undo,
    Redo,
}

/// Replays commands against one designer.
#[derive(Debug)]
pub struct Session {
    state: DesignerState,
    base_dir: PathBuf,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            state: DesignerState::with_config(config),
            base_dir: PathBuf::from("."),
        }
    }

    /// Directory that relative image paths are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn state(&self) -> &DesignerState {
        &self.state
    }

    pub fn quote(&self) -> Quote {
        self.state.quote()
    }

    /// Parses a JSON script and applies every command.
    pub fn run_script(&mut self, script: &str) -> anyhow::Result<()> {
        let commands: Vec<SessionCommand> =
            serde_json::from_str(script).context("Failed to parse session script")?;
        tracing::info!("Replaying {} commands", commands.len());
        for (index, command) in commands.into_iter().enumerate() {
            self.apply(command)
                .with_context(|| format!("Command {} failed", index))?;
        }
        Ok(())
    }

    /// Reads a script file; its directory becomes the base directory.
    pub fn run_script_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        if let Some(dir) = path.parent() {
            self.base_dir = dir.to_path_buf();
        }
        self.run_script(&script)
    }

    pub fn apply(&mut self, command: SessionCommand) -> anyhow::Result<()> {
        tracing::debug!("Applying {:?}", command);
        let state = &mut self.state;
        match command {
            SessionCommand::LoadImage { path } => {
                let path = self.base_dir.join(path);
                let pdf_scale = state.config().ingest.pdf_raster_scale;
                let background = load_background(&path, None, pdf_scale)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                state.apply_background(background);
            }
            SessionCommand::SetTool { tool } => state.set_tool(tool)?,
            SessionCommand::SetLineStyle { style } => state.set_line_style(style),
            SessionCommand::Click { x, y } => state.click(Point::new(x, y)),
            SessionCommand::Tap { x, y } => {
                state.pointer_down(0, PointerKind::Mouse, x, y, Instant::now());
                state.pointer_up(0, x, y);
            }
            SessionCommand::Drag { from, to } => {
                state.pointer_down(0, PointerKind::Mouse, from.x, from.y, Instant::now());
                state.pointer_move(0, to.x, to.y);
                state.pointer_up(0, to.x, to.y);
            }
            SessionCommand::Wheel { x, y, delta_y } => {
                if !state.wheel(x, y, delta_y) {
                    tracing::warn!("Wheel ignored by tool {:?}", state.tool());
                }
            }
            SessionCommand::ConfirmPending => {
                if !state.confirm_pending() {
                    bail!("Nothing is awaiting confirmation");
                }
            }
            SessionCommand::CancelPending => {
                state.cancel_pending();
            }
            SessionCommand::ContextMenu => {
                state.context_menu();
            }
            SessionCommand::CalibrateScale { p1, p2, meters } => {
                state.calibrate_scale(p1, p2, &meters)?;
            }
            SessionCommand::ConfirmScale { meters } => {
                state.confirm_scale_distance(&meters)?;
            }
            SessionCommand::SelectAt { x, y } => {
                let threshold = state.thresholds().snap;
                match state.item_at(Point::new(x, y), threshold) {
                    Some(id) => state.select_item(id)?,
                    None => bail!("No item at ({}, {})", x, y),
                }
            }
            SessionCommand::MoveItem { dx, dy } => state.move_selected_item(dx, dy)?,
            SessionCommand::RotateItem { degrees } => state.rotate_selected_item(degrees)?,
            SessionCommand::FlipItem { axis } => state.flip_selected_item(axis)?,
            SessionCommand::SetItemHeight { height } => state.set_item_height(height)?,
            SessionCommand::DeleteItem => {
                state.delete_selected_item()?;
            }
            SessionCommand::SetBoundaryType { index, boundary } => {
                state.set_boundary_type(index, boundary)?
            }
            SessionCommand::SetVertexHeight { index, height } => {
                state.set_vertex_height(index, height)?
            }
            SessionCommand::RotateView => state.rotate_view_90(),
            SessionCommand::ConfirmRotation => state.confirm_rotation()?,
            SessionCommand::GoToStep { step } => state.go_to_step(step)?,
            SessionCommand::Undo => {
                if !state.undo() {
                    tracing::warn!("Nothing to undo");
                }
            }
            SessionCommand::Redo => {
                if !state.redo() {
                    tracing::warn!("Nothing to redo");
                }
            }
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
