// didifit-tui/src/ui/mod.rs
mod dashboard_tab;
mod form_line;
mod history_tab;
mod layout;
mod log_form;
mod measurements_tab;
mod modals;
mod palette;
mod status_bar;

pub use layout::render_ui;
