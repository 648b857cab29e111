pub mod app;
mod modals;
mod playfield;
mod sidebar;
