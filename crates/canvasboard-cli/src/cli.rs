//! Command-line arguments.

use canvasboard_core::persistence::{DEFAULT_SERVER_URL, EXPORT_FILE_NAME};
use canvasboard_core::shapes::ShapeKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "canvasboard", version, about = "Drop, move, recolor and persist shapes on a drawing")]
pub struct Cli {
    /// Working drawing file, created on first change
    #[arg(long, short, global = true, env = "CANVASBOARD_DRAWING", default_value = EXPORT_FILE_NAME)]
    pub drawing: PathBuf,

    /// Base URL of the save/load server
    #[arg(long, global = true, env = "CANVASBOARD_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the shapes that can be dropped onto the canvas
    Templates,
    /// Show the shapes in the drawing
    List,
    /// Drop a new shape centered on a point
    Add {
        kind: ShapeKind,
        #[arg(value_parser = parse_coordinate, allow_negative_numbers = true)]
        x: f64,
        #[arg(value_parser = parse_coordinate, allow_negative_numbers = true)]
        y: f64,
    },
    /// Drag a shape so its center lands on a point
    Move {
        id: String,
        #[arg(value_parser = parse_coordinate, allow_negative_numbers = true)]
        x: f64,
        #[arg(value_parser = parse_coordinate, allow_negative_numbers = true)]
        y: f64,
    },
    /// Advance a shape to the next palette color
    Recolor { id: String },
    /// Remove a shape
    Delete { id: String },
    /// Count shapes by type
    Counts,
    /// Write drawing.json into a directory
    Export {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Replace the drawing with the contents of a .json file
    Import { file: PathBuf },
    /// Store the drawing on the server under a name
    Save { name: String },
    /// Replace the drawing with canvases fetched from the server
    ///
    /// With several names the requests run at once and the last one to
    /// arrive wins.
    Load {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Pixel coordinate: any finite number.
fn parse_coordinate(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{}` is not a number: {}", s, e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("`{}` is not a finite coordinate", s))
    }
}
