//! Nodle macros - node editor demo with keyboard macros
//!
//! Usage: `nodle-macros [graph.json]`. The file is loaded on start if it
//! exists and is the target of Save. `RUST_LOG=debug` shows macro activity.

use eframe::egui;
use egui::Pos2;
use log::{error, info};
use nodle_macros::constants::{macro_hub, panel};
use nodle_macros::editor::{EditorCanvas, FileManager};
use nodle_macros::macros::{
    parameter_candidates, DispatchResult, Dispatcher, Macro, MacroMode, MacroOutcome, MacroStore,
};
use nodle_macros::nodes::data::constant::ConstantNodeFactory;
use nodle_macros::nodes::macro_hub::{
    MacroEditorForm, MacroHubLogic, MacroHubNodeFactory, MacroHubPanel, PanelEffect,
};
use nodle_macros::nodes::{
    ExecutionReport, NodeFactory, NodeGraph, NodeGraphEngine, NodeId, NodeRegistry,
};
use std::collections::HashMap;
use std::path::PathBuf;

const DEFAULT_FILE: &str = "macros_graph.json";

/// Demo graph: three constants and a hub with one macro per mode
fn build_sample_graph() -> NodeGraph {
    let mut graph = NodeGraph::new();
    let a = ConstantNodeFactory::add_to_graph(&mut graph, Pos2::new(80.0, 80.0));
    let b = ConstantNodeFactory::add_to_graph(&mut graph, Pos2::new(320.0, 80.0));
    let c = ConstantNodeFactory::add_to_graph(&mut graph, Pos2::new(560.0, 260.0));
    let hub = MacroHubNodeFactory::add_to_graph(&mut graph, Pos2::new(320.0, 400.0));

    if let Some(hub) = graph.node_mut(hub) {
        let mut store = MacroStore::new(hub);
        store.add(Macro::new(MacroMode::Jump, c, "").with_label("Go to C").with_hotkey("alt+1"));
        store.add(
            Macro::new(MacroMode::SetStatic, a, "value")
                .with_label("A = 42")
                .with_value("42")
                .with_hotkey("alt+2"),
        );
        store.add(
            Macro::new(MacroMode::Toggle, b, "output_type")
                .with_label("Cycle B type")
                .with_hotkey("alt+3"),
        );
        store.add(
            Macro::new(MacroMode::PresetCycle, b, "value")
                .with_label("B presets")
                .with_value("[1, 2.5, 10]")
                .with_hotkey("alt+4"),
        );
        store.add(
            Macro::new(MacroMode::Toggle, a, "enabled")
                .with_label("Bypass A")
                .with_hotkey("alt+5"),
        );
    }
    graph
}

fn describe_outcome(source: &str, outcome: &MacroOutcome) -> String {
    match outcome {
        MacroOutcome::Focused(id) => format!("{}: focused node {}", source, id),
        MacroOutcome::Assigned { node_id, param, value } => {
            format!("{}: node {} {} = {}", source, node_id, param, value)
        }
        MacroOutcome::Unresolved(target) => format!("{}: target missing ({:?})", source, target),
        MacroOutcome::Skipped(reason) => format!("{}: skipped ({:?})", source, reason),
    }
}

struct MacroDemoApp {
    canvas: EditorCanvas,
    dispatcher: Dispatcher,
    registry: NodeRegistry,
    engine: NodeGraphEngine,
    files: FileManager,
    file_path: PathBuf,
    /// Editor form per hub node
    forms: HashMap<NodeId, MacroEditorForm>,
    last_report: Option<ExecutionReport>,
    status: String,
}

impl MacroDemoApp {
    fn new(file_path: PathBuf) -> Self {
        let mut files = FileManager::new();
        let mut canvas = EditorCanvas::with_graph(build_sample_graph());
        if file_path.exists() {
            match files.load_from_file(&file_path) {
                Ok((graph, viewport)) => {
                    canvas = EditorCanvas::with_graph(graph);
                    canvas.viewport = viewport;
                }
                Err(e) => error!("{}", e),
            }
        }

        let mut app = Self {
            canvas,
            dispatcher: Dispatcher::global(),
            registry: NodeRegistry::with_builtin_nodes(),
            engine: NodeGraphEngine::new(),
            files,
            file_path,
            forms: HashMap::new(),
            last_report: None,
            status: String::new(),
        };
        app.rebuild_hotkeys();
        app
    }

    fn rebuild_hotkeys(&mut self) {
        let count = self.dispatcher.rebuild(&self.canvas.graph);
        self.status = format!("{} hotkeys bound", count);
    }

    fn report_dispatch(&mut self, result: &DispatchResult) {
        if let DispatchResult::Fired { combo, outcome, .. } = result {
            self.status = describe_outcome(combo, outcome);
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.menu_button("Add", |ui| {
                let types: Vec<String> =
                    self.registry.node_types().iter().map(|s| s.to_string()).collect();
                for node_type in types {
                    let Some(meta) = self.registry.get_metadata(&node_type) else {
                        continue;
                    };
                    let label =
                        format!("{} ({})", meta.display_name, meta.category.display_string());
                    if ui.button(label).on_hover_text(meta.summary()).clicked() {
                        let center = (self.canvas.view_size * 0.5).to_pos2();
                        let position = self.canvas.viewport.screen_to_world(center);
                        if let Some(node) = self.registry.create_node(&node_type, position) {
                            let is_hub = node.is_macro_hub();
                            let id = self.canvas.graph.add_node(node);
                            self.files.mark_modified();
                            info!("Added {} node {}", node_type, id);
                            if is_hub {
                                self.rebuild_hotkeys();
                            }
                        }
                        ui.close_menu();
                    }
                }
            });

            if ui.button("Evaluate").clicked() {
                let report = self.engine.execute(&mut self.canvas);
                self.status = format!("Evaluated {} nodes", report.outputs.len());
                self.last_report = Some(report);
            }
            if ui.button("Save").clicked() {
                let path = self.file_path.clone();
                match self.files.save_to_file(&path, &self.canvas.graph, &self.canvas.viewport) {
                    Ok(()) => self.status = format!("Saved {}", path.display()),
                    Err(e) => self.status = e,
                }
            }
            if ui.button("Reload").clicked() {
                let path = self.file_path.clone();
                match self.files.load_from_file(&path) {
                    Ok((graph, viewport)) => {
                        self.canvas = EditorCanvas::with_graph(graph);
                        self.canvas.viewport = viewport;
                        self.forms.clear();
                        self.rebuild_hotkeys();
                    }
                    Err(e) => self.status = e,
                }
            }

            ui.separator();
            ui.label(self.files.get_file_display_name());
            ui.separator();
            ui.label(&self.status);
        });
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        let Some(node_id) = self.canvas.interaction.single_selection() else {
            ui.label("Select a node to edit its parameters.");
            return;
        };

        let candidates = parameter_candidates(&self.canvas.graph);
        let mut actions = Vec::new();
        let mut hub_text_changed = false;

        if let Some(node) = self.canvas.graph.node_mut(node_id) {
            ui.heading(format!("{} [{}]", node.title, node.id));
            ui.separator();
            for widget in node.widgets.iter_mut() {
                if widget.render(ui) {
                    hub_text_changed |= widget.name == macro_hub::MACROS_FIELD;
                    self.files.mark_modified();
                }
            }

            if let Some(Some(output)) = self.last_report.as_ref().map(|r| r.outputs.get(&node_id)) {
                ui.label(format!("Last output: {}", output));
            }

            if node.is_macro_hub() {
                ui.add_space(8.0);
                let form = self.forms.entry(node_id).or_default();
                actions = MacroHubPanel::build_interface(node, &candidates, form, ui);
            }
        }

        let mut edited = hub_text_changed;
        for action in actions {
            match MacroHubLogic::apply_action(&mut self.canvas, node_id, action) {
                PanelEffect::Edited => edited = true,
                PanelEffect::Ran(outcome) => self.status = describe_outcome("run", &outcome),
                PanelEffect::Unchanged => {}
            }
        }
        if edited {
            self.files.mark_modified();
            self.rebuild_hotkeys();
        }
    }
}

impl eframe::App for MacroDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Macros see key presses before any widget does
        let results = self.dispatcher.dispatch_egui(ctx, &mut self.canvas);
        for result in &results {
            self.report_dispatch(result);
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.menu_bar(ui));

        egui::SidePanel::right("parameters")
            .default_width(panel::SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.side_panel(ui));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = self.canvas.show(ui);
                if response.structure_changed {
                    self.files.mark_modified();
                    self.rebuild_hotkeys();
                }
            });

        if self.canvas.take_redraw() {
            ctx.request_repaint();
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nodle Macros",
        options,
        Box::new(move |_cc| Ok(Box::new(MacroDemoApp::new(file_path)))),
    )
}
