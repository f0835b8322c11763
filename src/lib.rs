//! wardroom: an executive command center for an S/4HANA migration program.
//!
//! The crate loads a read-only program dataset and derives three views from
//! it: the executive summary (KPI cards), the module health matrix (a
//! budget-weighted treemap), and the legacy systems inventory. Each view is a
//! pure function of the dataset plus its own view state, shared by the
//! terminal commands in [`cli`] and the JSON API in [`web`].

pub mod cli;
pub mod config;
pub mod data;
pub mod heatmap;
pub mod inventory;
pub mod logging;
pub mod metrics;
pub mod shell;
pub mod style;
pub mod summary;
pub mod utils;
pub mod web;
