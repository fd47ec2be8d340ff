//! edit3d terminal editor
//!
//! Loads an STL file (or a cube) and edits it with undoable transforms.
//! Run with no arguments for the default cube; the title bar lists the keys.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use edit3d_core::{stl, Mesh, MeshModel};
use edit3d_terminal::{EditorConfig, TerminalApp};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Opts {
    /// STL file to edit; a 2-unit cube when omitted
    model: Option<PathBuf>,
    /// JSON editor config
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write logs here; the terminal itself is taken by the editor
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    if let Some(path) = &opts.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let config = match &opts.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let mesh = match &opts.model {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("Failed to read STL file {}", path.display()))?;
            let mesh = stl::parse_stl(&data)
                .with_context(|| format!("Failed to parse STL file {}", path.display()))?;
            tracing::info!(triangles = mesh.triangles.len(), path = %path.display(), "loaded model");
            mesh
        }
        None => Mesh::cube(2.0),
    };

    let mut app = TerminalApp::new(MeshModel::new(mesh), config)?;
    app.run()?;
    Ok(())
}
