/// User interface module
///
/// Thin glue between the iced window and the state/imaging modules:
/// - Settings form parsing and validation (settings.rs)
/// - File list, grid preview and settings widgets (views.rs)

pub mod settings;
pub mod views;
