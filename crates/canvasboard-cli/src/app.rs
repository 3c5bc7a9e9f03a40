//! Application shell: one board, one working drawing file, one command at a time.

use crate::cli::Command;
use anyhow::Context;
use canvasboard_core::kurbo::Point;
use canvasboard_core::persistence::{self, RemoteClient, RemoteConfig};
use canvasboard_core::{Board, BoardEvent, Drawing, Notice, ShapeKind};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Working drawing, in the export format.
    pub drawing_path: PathBuf,
    pub remote: RemoteConfig,
}

/// Application state.
pub struct App {
    config: AppConfig,
    board: Board,
    client: RemoteClient,
}

impl App {
    /// Open the working drawing. A missing file starts an empty drawing.
    pub fn open(config: AppConfig) -> anyhow::Result<Self> {
        let drawing = if config.drawing_path.exists() {
            let state = persistence::import_from_file(&config.drawing_path).with_context(|| {
                format!("Failed to open {}", config.drawing_path.display())
            })?;
            Drawing::from_shapes(state.shapes)
        } else {
            log::info!("{} not found, starting empty", config.drawing_path.display());
            Drawing::new()
        };

        Ok(Self {
            client: RemoteClient::new(config.remote.clone()),
            board: Board::with_drawing(drawing),
            config,
        })
    }

    pub fn drawing(&self) -> &Drawing {
        self.board.drawing()
    }

    /// Run one command against the board and collect what the user should see.
    pub async fn execute(&mut self, command: Command) -> Vec<Notice> {
        let sender = self.board.sender();
        let mut notices = Vec::new();

        match command {
            Command::Templates => {
                for template in self.board.selector().templates() {
                    notices.push(Notice::Info(format!(
                        "{:<9} {}x{} {}",
                        template.kind, template.width, template.height, template.color
                    )));
                }
            }
            Command::List => {
                for shape in self.drawing().shapes() {
                    notices.push(Notice::Info(format!(
                        "{} {:<9} ({}, {}) {}",
                        shape.id(),
                        shape.kind,
                        shape.x,
                        shape.y,
                        shape.color
                    )));
                }
            }
            Command::Add { kind, x, y } => {
                let before = self.drawing().len();
                self.board.selector().drop_at(&kind, Point::new(x, y));
                notices.extend(self.board.pump());
                if self.drawing().len() > before {
                    if let Some(shape) = self.drawing().shapes().last() {
                        notices.push(Notice::Info(format!("Added {} {}", shape.kind, shape.id())));
                    }
                }
            }
            Command::Move { id, x, y } => {
                if self.shape_exists(&id, &mut notices) {
                    sender.send(BoardEvent::DragStart(id.clone()));
                    sender.send(BoardEvent::DragTo { id, pointer: Point::new(x, y) });
                    sender.send(BoardEvent::DragEnd);
                }
            }
            Command::Recolor { id } => {
                if self.shape_exists(&id, &mut notices) {
                    sender.send(BoardEvent::Click(id));
                }
            }
            Command::Delete { id } => {
                if self.shape_exists(&id, &mut notices) {
                    sender.send(BoardEvent::DoubleClick(id));
                }
            }
            Command::Counts => {
                let counts = self.drawing().counts_by_type();
                for kind in ShapeKind::ALL {
                    notices.push(Notice::Info(format!("{:<9} {}", kind, counts.get(&kind))));
                }
                notices.push(Notice::Info(format!("{:<9} {}", "total", counts.total())));
            }
            Command::Export { dir } => {
                match persistence::export_to_file(&dir, self.drawing().shapes()) {
                    Ok(path) => notices.push(Notice::Info(format!("Exported to {}", path.display()))),
                    Err(e) => notices.push(e.into()),
                }
            }
            Command::Import { file } => {
                sender.send(BoardEvent::Imported(persistence::import_from_file(&file)));
            }
            Command::Save { name } => {
                let client = self.client.clone();
                let shapes = self.drawing().shapes().to_vec();
                let task = tokio::spawn(async move {
                    let result = client.save(&name, &shapes).await;
                    sender.send(BoardEvent::RemoteSaved(result));
                });
                if let Err(e) = task.await {
                    log::error!("Save task failed: {}", e);
                }
            }
            Command::Load { names } => {
                let tasks: Vec<_> = names
                    .into_iter()
                    .map(|name| {
                        let client = self.client.clone();
                        let sender = sender.clone();
                        tokio::spawn(async move {
                            let result = client.load(&name).await;
                            sender.send(BoardEvent::RemoteLoaded(result));
                        })
                    })
                    .collect();
                for task in tasks {
                    if let Err(e) = task.await {
                        log::error!("Load task failed: {}", e);
                    }
                }
            }
        }

        notices.extend(self.board.pump());
        notices
    }

    fn shape_exists(&self, id: &str, notices: &mut Vec<Notice>) -> bool {
        let exists = self.drawing().get(id).is_some();
        if !exists {
            log::warn!("No shape with id {}", id);
            notices.push(Notice::Info(format!("No shape with id {}", id)));
        }
        exists
    }

    /// Write the drawing back if anything changed. Returns whether it wrote.
    ///
    /// Safe to call after error notices: failed events leave the drawing as it
    /// was, so only successful changes are written.
    pub fn persist(&self) -> anyhow::Result<bool> {
        if self.drawing().revision() == 0 {
            return Ok(false);
        }
        persistence::write_drawing(&self.config.drawing_path, self.drawing().shapes())
            .with_context(|| format!("Failed to write {}", self.config.drawing_path.display()))?;
        Ok(true)
    }
}
