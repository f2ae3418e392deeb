//! File management for the node editor
//!
//! Saves and loads graphs, macro hubs included, as JSON documents. Loading a
//! file replaces every hub, so callers rebuild hotkey bindings afterwards.

use crate::editor::viewport::Viewport;
use crate::nodes::NodeGraph;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current save format version
pub const SAVE_VERSION: &str = "1.0";

/// Save file data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: String,
    pub metadata: SaveMetadata,
    pub viewport: ViewportData,
    pub root_graph: NodeGraph,
}

/// Metadata for save files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub creator: String,
}

/// Viewport state for save files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportData {
    pub pan_offset: [f32; 2],
    pub zoom: f32,
}

/// Tracks the current file and its modification state
#[derive(Debug, Default)]
pub struct FileManager {
    /// Current file path (None if unsaved/new file)
    current_file_path: Option<PathBuf>,
    /// Creation time of the current file, kept across saves
    created: Option<DateTime<Utc>>,
    is_modified: bool,
}

impl FileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.is_modified
    }

    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Get display name for the current file
    pub fn get_file_display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");
        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Save the graph to a file
    pub fn save_to_file(
        &mut self,
        file_path: &Path,
        graph: &NodeGraph,
        viewport: &Viewport,
    ) -> Result<(), String> {
        let now = Utc::now();
        let save_data = SaveData {
            version: SAVE_VERSION.to_string(),
            metadata: SaveMetadata {
                created: self.created.unwrap_or(now),
                modified: now,
                creator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            },
            viewport: ViewportData {
                pan_offset: [viewport.pan_offset.x, viewport.pan_offset.y],
                zoom: viewport.zoom,
            },
            root_graph: graph.clone(),
        };

        let json_content = serde_json::to_string_pretty(&save_data)
            .map_err(|e| format!("Failed to serialize save data: {}", e))?;

        std::fs::write(file_path, json_content)
            .map_err(|e| format!("Failed to write file: {}", e))?;

        info!("Saved {} nodes to {}", graph.nodes.len(), file_path.display());
        self.current_file_path = Some(file_path.to_path_buf());
        self.created = Some(save_data.metadata.created);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the current path
    pub fn save_file(&mut self, graph: &NodeGraph, viewport: &Viewport) -> Result<(), String> {
        match self.current_file_path.clone() {
            Some(path) => self.save_to_file(&path, graph, viewport),
            None => Err("No file path set".to_string()),
        }
    }

    /// Load a graph from a file
    pub fn load_from_file(&mut self, file_path: &Path) -> Result<(NodeGraph, Viewport), String> {
        let file_content =
            std::fs::read_to_string(file_path).map_err(|e| format!("Failed to read file: {}", e))?;

        let save_data: SaveData = serde_json::from_str(&file_content)
            .map_err(|e| format!("Failed to parse save file: {}", e))?;

        let mut viewport = Viewport::new();
        let [pan_x, pan_y] = save_data.viewport.pan_offset;
        viewport.pan_offset = egui::Vec2::new(pan_x, pan_y);
        viewport.zoom = save_data.viewport.zoom;

        info!(
            "Loaded {} nodes from {} (format {})",
            save_data.root_graph.nodes.len(),
            file_path.display(),
            save_data.version
        );
        self.current_file_path = Some(file_path.to_path_buf());
        self.created = Some(save_data.metadata.created);
        self.is_modified = false;

        Ok((save_data.root_graph, viewport))
    }
}
