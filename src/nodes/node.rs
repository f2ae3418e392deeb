//! Node types and core node functionality

use super::widget::Widget;
use crate::constants;
use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = usize;

/// Core node structure representing a visual node in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Node type name the node was created from (e.g. "MacroHub")
    pub node_type: String,
    pub title: String,
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
    #[serde(with = "vec2_serde")]
    pub size: Vec2,
    #[serde(with = "color32_serde")]
    pub color: Color32,
    /// Parameters in declaration order
    pub widgets: Vec<Widget>,
}

impl Node {
    /// Creates a new node with the specified properties
    pub fn new(id: NodeId, node_type: impl Into<String>, position: Pos2) -> Self {
        let node_type = node_type.into();
        let [width, height] = constants::node::DEFAULT_SIZE;
        let [r, g, b] = constants::node::DEFAULT_COLOR;
        Self {
            id,
            title: node_type.clone(),
            node_type,
            position,
            size: Vec2::new(width, height),
            color: Color32::from_rgb(r, g, b),
            widgets: vec![],
        }
    }

    /// Adds a widget, replacing any existing widget with the same name
    pub fn add_widget(&mut self, widget: Widget) -> &mut Self {
        match self.widgets.iter_mut().find(|w| w.name == widget.name) {
            Some(existing) => *existing = widget,
            None => self.widgets.push(widget),
        }
        self
    }

    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.add_widget(widget);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the color of the node
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Sets the size of the node
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Find a widget by name
    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.name == name)
    }

    /// Returns the bounding rectangle of the node
    pub fn get_rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// World-space center of the node
    pub fn center(&self) -> Pos2 {
        self.get_rect().center()
    }

    pub fn is_macro_hub(&self) -> bool {
        self.node_type == constants::macro_hub::CLASS_NAME
    }
}

// Serde helper modules for egui types
mod pos2_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(pos: &Pos2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [pos.x, pos.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pos2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Pos2::new(x, y))
    }
}

mod vec2_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vec: &Vec2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [vec.x, vec.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

mod color32_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [color.r(), color.g(), color.b(), color.a()].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b, a] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}
