use iced::widget::{button, column, container, row, text, vertical_rule};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod color;
mod error;
mod imaging;
mod state;
mod ui;

use color::Background;
use imaging::loader::{self, SUPPORTED_EXTENSIONS};
use imaging::{export, ComposeOptions, ExportReport};
use state::{AssetId, AssetLibrary, DecodedImage, GridCells, GridConfig};
use ui::settings::{Field, SettingsForm};
use ui::views::{self, Thumbnails};

/// Right pane tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Preview,
    Settings,
}

/// Main application state
struct GridCreator {
    /// Settings the preview and export use
    config: GridConfig,
    cells: GridCells,
    /// Imported images (the file list)
    library: AssetLibrary,
    thumbnails: Thumbnails,
    /// Image picked in the file list, waiting to be placed in a cell
    selected: Option<AssetId>,
    tab: Tab,
    /// Unapplied edits of the settings tab
    form: SettingsForm,
    form_error: Option<String>,
    exporting: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose Images"
    ChooseImages,
    /// User clicked "Import Folder"
    ImportFolder,
    FolderScanned(Result<Vec<PathBuf>, String>),
    /// Files dropped onto the window
    FilesDropped(Vec<PathBuf>),
    /// Background decode finished for a batch of imports
    ImagesDecoded(Vec<(AssetId, Result<DecodedImage, String>)>),
    SelectImage(AssetId),
    RemoveImage(AssetId),
    /// Place the selected image into a cell
    CellClicked(usize),
    ClearCell(usize),
    TabSelected(Tab),
    SettingChanged(Field, String),
    BackgroundSelected(Background),
    ApplySettings,
    ResetGrid,
    GenerateImage,
    ExportComplete(Result<ExportReport, String>),
}

impl GridCreator {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = startup_config();

        log::info!(
            "🎨 Image Grid Creator ready ({}x{} grid, {}x{}px)",
            config.rows,
            config.columns,
            config.total_width,
            config.total_height
        );

        (
            GridCreator {
                cells: GridCells::new(config.rows, config.columns),
                form: SettingsForm::from_config(&config),
                config,
                library: AssetLibrary::new(),
                thumbnails: Thumbnails::default(),
                selected: None,
                tab: Tab::Preview,
                form_error: None,
                exporting: false,
                status: "Ready. Choose some images to get started.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseImages => {
                // Show the native file picker dialog
                let files = FileDialog::new()
                    .set_title("Choose Images")
                    .add_filter("Images", &SUPPORTED_EXTENSIONS)
                    .pick_files();

                match files {
                    Some(paths) => self.import(paths),
                    None => Task::none(),
                }
            }
            Message::ImportFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Images")
                    .pick_folder();

                if let Some(folder_path) = folder {
                    self.status = format!("Scanning {}...", folder_path.display());

                    return Task::perform(scan_folder_async(folder_path), Message::FolderScanned);
                }

                Task::none()
            }
            Message::FolderScanned(Err(e)) => {
                self.status = format!("❌ Could not scan folder: {}", e);
                Task::none()
            }
            Message::FolderScanned(Ok(paths)) => {
                if paths.is_empty() {
                    self.status = "No images found in that folder.".to_string();
                    return Task::none();
                }
                self.import(paths)
            }
            Message::FilesDropped(paths) => self.import(paths),
            Message::ImagesDecoded(results) => {
                let mut loaded = 0;
                let mut failed = 0;

                for (id, result) in results {
                    match result {
                        Ok(decoded) => {
                            self.thumbnails.insert(id, &decoded.thumbnail);
                            if self.library.mark_ready(id, decoded) {
                                loaded += 1;
                            } else {
                                // Removed while decoding
                                self.thumbnails.remove(id);
                            }
                        }
                        Err(reason) => {
                            log::warn!("⚠️  Could not load image {}: {}", id, reason);
                            if self.library.mark_failed(id, reason) {
                                failed += 1;
                            }
                        }
                    }
                }

                self.status = if failed == 0 {
                    format!("✅ Loaded {} images.", loaded)
                } else {
                    format!("Loaded {} images, {} could not be decoded.", loaded, failed)
                };

                Task::none()
            }
            Message::SelectImage(id) => {
                self.selected = if self.selected == Some(id) { None } else { Some(id) };
                if let Some(asset) = self.selected.and_then(|id| self.library.get(id)) {
                    self.status = format!("Click a cell to place {}.", asset.name);
                }
                Task::none()
            }
            Message::RemoveImage(id) => {
                // Drop it everywhere so the pixels are released
                self.cells.forget(id);
                self.thumbnails.remove(id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                if let Some(asset) = self.library.remove(id) {
                    self.status = format!("Removed {}.", asset.name);
                }
                Task::none()
            }
            Message::CellClicked(index) => {
                if let Some(id) = self.selected.take() {
                    self.cells.assign(index, id);
                    self.status = format!("Placed image in cell {}.", index + 1);
                }
                Task::none()
            }
            Message::ClearCell(index) => {
                if self.cells.clear(index).is_some() {
                    self.status = format!("Cleared cell {}.", index + 1);
                }
                Task::none()
            }
            Message::TabSelected(tab) => {
                if tab == Tab::Settings && self.tab != Tab::Settings {
                    self.form = SettingsForm::from_config(&self.config);
                    self.form_error = None;
                }
                self.tab = tab;
                Task::none()
            }
            Message::SettingChanged(field, value) => {
                self.form.set(field, value);
                Task::none()
            }
            Message::BackgroundSelected(background) => {
                self.form.background = background;
                Task::none()
            }
            Message::ApplySettings => {
                match self.form.to_config() {
                    Ok(config) => {
                        // A new shape means a fresh, empty grid
                        if self.config.shape_differs(&config) {
                            self.cells.resize(config.rows, config.columns);
                        }
                        self.config = config;
                        if let Ok(json) = self.config.to_json() {
                            log::debug!("Applied settings: {}", json);
                        }
                        self.form_error = None;
                        self.tab = Tab::Preview;
                        self.status = "Settings applied.".to_string();
                    }
                    Err(e) => {
                        self.form_error = Some(e.to_string());
                    }
                }
                Task::none()
            }
            Message::ResetGrid => {
                self.cells.reset();
                self.status = "Grid cleared.".to_string();
                Task::none()
            }
            Message::GenerateImage => {
                if let Err(e) = self.config.validate() {
                    self.status = format!("❌ {}", e);
                    return Task::none();
                }

                let target = FileDialog::new()
                    .set_title("Save Grid Image")
                    .set_directory(export::default_export_dir())
                    .set_file_name(export::DEFAULT_EXPORT_FILENAME)
                    .add_filter("PNG image", &["png"])
                    .save_file();

                let Some(path) = target else {
                    return Task::none();
                };
                let path = export::with_png_extension(&path);

                let pending = self.library.pending_count();
                if pending > 0 {
                    log::warn!("⚠️  {} images are still loading and will be left out", pending);
                }

                self.exporting = true;
                self.status = format!(
                    "Generating {} ({} of {} cells filled)...",
                    path.display(),
                    self.cells.filled_count(),
                    self.cells.len()
                );

                Task::perform(
                    export_async(self.config, self.cells.clone(), self.library.clone(), path),
                    Message::ExportComplete,
                )
            }
            Message::ExportComplete(result) => {
                self.exporting = false;
                self.status = match result {
                    Ok(report) if report.skipped.is_empty() => {
                        format!("✅ Saved {}", report.path.display())
                    }
                    Ok(report) => format!(
                        "✅ Saved {} ({} cells left empty, see log)",
                        report.path.display(),
                        report.skipped.len()
                    ),
                    Err(e) => {
                        log::error!("❌ Export failed: {}", e);
                        format!("❌ Export failed: {}", e)
                    }
                };
                Task::none()
            }
        }
    }

    /// Register files and start decoding them in the background
    fn import(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        let (images, rejected) = loader::partition_supported(paths);
        if !rejected.is_empty() {
            log::warn!("⚠️  Skipped {} files that are not images", rejected.len());
        }

        let mut jobs: Vec<(AssetId, PathBuf)> = Vec::new();
        for path in images {
            // Already in the list
            if self.library.contains_path(&path) {
                continue;
            }
            jobs.push((self.library.add_pending(&path), path));
        }

        if jobs.is_empty() {
            self.status = "Nothing new to import.".to_string();
            return Task::none();
        }

        self.status = format!("Loading {} images...", jobs.len());
        log::info!("📥 Importing {} images", jobs.len());

        Task::perform(decode_async(jobs), Message::ImagesDecoded)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let explorer = column![
            text(format!("Image Files ({})", self.library.len())).size(22),
            row![
                button("Choose Images").on_press(Message::ChooseImages),
                button("Import Folder").on_press(Message::ImportFolder).style(button::secondary),
            ]
            .spacing(8),
            views::file_list(&self.library, &self.cells, &self.thumbnails, self.selected),
        ]
        .spacing(12)
        .padding(16)
        .width(Length::Fixed(320.0));

        let tab_button = |label: &'static str, tab: Tab| {
            let style = if self.tab == tab { button::primary } else { button::secondary };
            button(label).on_press(Message::TabSelected(tab)).style(style)
        };

        let tabs = row![
            tab_button("Grid Preview", Tab::Preview),
            tab_button("Settings", Tab::Settings),
        ]
        .spacing(6);

        let content: Element<Message> = match self.tab {
            Tab::Preview => {
                let generate = button("Generate Image").padding(10);
                let generate = if self.exporting {
                    generate
                } else {
                    generate.on_press(Message::GenerateImage)
                };

                column![
                    views::grid_preview(&self.config, &self.cells, &self.library, &self.thumbnails),
                    text("Select an image on the left, then click a cell. Right-click a cell to clear it.")
                        .size(13),
                    generate,
                ]
                .spacing(16)
                .align_x(Alignment::Center)
                .into()
            }
            Tab::Settings => views::settings_tab(&self.form, self.form_error.as_deref()),
        };

        let editor = column![tabs, content, text(&self.status).size(14)]
            .spacing(16)
            .padding(16)
            .width(Length::Fill);

        container(row![explorer, vertical_rule(1), editor])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Files dropped onto the window are imported like picked files
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FilesDropped(vec![path])),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Environment variable holding JSON settings that replace the defaults
const SETTINGS_ENV: &str = "IMAGE_GRID_SETTINGS";

/// Default settings, overridden by `IMAGE_GRID_SETTINGS` when it is set
fn startup_config() -> GridConfig {
    let Ok(json) = std::env::var(SETTINGS_ENV) else {
        return GridConfig::default();
    };

    match GridConfig::from_settings_json(&json) {
        Ok(config) => {
            log::info!("⚙️  Using settings from {}", SETTINGS_ENV);
            config
        }
        Err(e) => {
            log::warn!("⚠️  Ignoring {}: {}", SETTINGS_ENV, e);
            GridConfig::default()
        }
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Image Grid Creator", GridCreator::update, GridCreator::view)
        .subscription(GridCreator::subscription)
        .theme(GridCreator::theme)
        .window_size((1200.0, 800.0))
        .centered()
        .run_with(GridCreator::new)
}

/// Decode imported files, one background task per file
async fn decode_async(jobs: Vec<(AssetId, PathBuf)>) -> Vec<(AssetId, Result<DecodedImage, String>)> {
    loader::load_images(jobs)
        .await
        .into_iter()
        .map(|(id, result)| (id, result.map_err(|e| e.to_string())))
        .collect()
}

/// Walk a folder off the UI thread
async fn scan_folder_async(folder: PathBuf) -> Result<Vec<PathBuf>, String> {
    run_blocking("Folder scan", move || loader::scan_folder(&folder)).await
}

/// Run blocking work on tokio's pool; a panicked task is logged and reported
async fn run_blocking<T, F>(what: &'static str, work: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        log::error!("❌ {} failed: {}", what, e);
        error::GridError::from(e).to_string()
    })
}

/// Compose and save the grid from a snapshot of the current state
async fn export_async(
    config: GridConfig,
    cells: GridCells,
    library: AssetLibrary,
    path: PathBuf,
) -> Result<ExportReport, String> {
    export::export_to_file(config, cells, library, ComposeOptions::default(), path)
        .await
        .map_err(|e| e.to_string())
}
