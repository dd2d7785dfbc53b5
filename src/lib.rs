//! # Building Viewer
//!
//! Projects declarative building descriptors into oriented faces and
//! decides which of them the current camera shows.
//!
//! ## Features
//!
//! - Read lenient JSON building descriptors
//! - Expand boxes into placed faces, fitted to the viewport
//! - Switch between the stacked 3D view and single floor plans
//! - Filter by layer and rotate in 45° steps
//! - Poll live sensor readings for visible sensor walls
//! - Export the projected scene to JSON and CSV
//!
//! ## Example
//!
//! ```no_run
//! use building_viewer::config::ViewerConfig;
//! use building_viewer::editor::Editor;
//! use building_viewer::parser::parse_descriptor_file;
//!
//! let descriptor = parse_descriptor_file("house.json").expect("Failed to parse");
//! let mut editor = Editor::new(descriptor, &ViewerConfig::default());
//! editor.select_floor("Ground");
//! println!("Visible walls: {}", editor.scene().visible_walls().count());
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod sensor;
pub mod ui;
pub mod view;
