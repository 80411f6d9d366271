//! Palmer Penguins dashboard: a scatter plot with selectable axes and a
//! paginated data table.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod table;
pub mod ui;
pub mod view;
