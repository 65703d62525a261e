//! Headless data table library
//!
//! Search, per-column filters, single-column sort and pagination over a
//! generic record set, with a table/card layout switch and outbound events
//! for server-driven consumers. No UI toolkit involved: [`Presenter`] turns
//! state into a [`View`](view::View) that any front-end can draw.

pub mod column;
pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod layout;
pub mod model;
pub mod query;
pub mod render;
pub mod source;
pub mod text;
pub mod view;

mod presenter;

pub use presenter::*;
