//! UI components for mdtabs

pub mod drop_zone;
pub mod editor_modal;
pub mod gallery;
pub mod tab_bar;
pub mod viewer;
