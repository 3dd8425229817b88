/// Widgets for the file list, the grid preview and the settings tab
use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, image as picture, mouse_area, radio, row,
    scrollable, text, text_input, Column, Row,
};
use iced::{Alignment, ContentFit, Element, Length};

use super::settings::{Field, SettingsForm};
use crate::color::Background;
use crate::state::{AssetId, AssetLibrary, AssetState, GridCells, GridConfig};
use crate::Message;

/// Largest on-screen size of the grid preview
const PREVIEW_MAX_WIDTH: f32 = 640.0;
const PREVIEW_MAX_HEIGHT: f32 = 420.0;

/// GPU image handles for decoded thumbnails.
///
/// A handle must be created once per image: building a new one on every
/// `view` would re-upload the pixels each frame.
#[derive(Debug, Default)]
pub struct Thumbnails {
    handles: HashMap<AssetId, Handle>,
}

impl Thumbnails {
    pub fn insert(&mut self, id: AssetId, thumbnail: &::image::RgbaImage) {
        let handle = Handle::from_rgba(thumbnail.width(), thumbnail.height(), thumbnail.as_raw().clone());
        self.handles.insert(id, handle);
    }

    pub fn remove(&mut self, id: AssetId) {
        self.handles.remove(&id);
    }

    pub fn get(&self, id: AssetId) -> Option<&Handle> {
        self.handles.get(&id)
    }
}

/// Left pane: imported images, click to select, × to remove
pub fn file_list<'a>(
    library: &'a AssetLibrary,
    cells: &GridCells,
    thumbnails: &'a Thumbnails,
    selected: Option<AssetId>,
) -> Element<'a, Message> {
    if library.is_empty() {
        return container(text("No images yet. Choose files, import a folder or drop images here.").size(14))
            .padding(10)
            .into();
    }

    let entries = library.iter().map(|asset| {
        let preview: Element<'a, Message> = match (&asset.state, thumbnails.get(asset.id)) {
            (AssetState::Ready(_), Some(handle)) => picture(handle.clone())
                .width(Length::Fixed(64.0))
                .height(Length::Fixed(64.0))
                .content_fit(ContentFit::Cover)
                .into(),
            (AssetState::Failed(_), _) => text("⚠️").size(24).into(),
            _ => text("⏳").size(24).into(),
        };

        let detail = match (&asset.state, asset.dimensions()) {
            (AssetState::Failed(reason), _) => reason.clone(),
            (_, Some((w, h))) => match cells.position_of(asset.id) {
                Some(index) => format!("{}x{} · cell {}", w, h, index + 1),
                None => format!("{}x{}", w, h),
            },
            _ => "Loading…".to_string(),
        };
        let caption = format!("{}\n{}", asset.name, detail);

        let style = if selected == Some(asset.id) {
            button::primary
        } else {
            button::secondary
        };

        let entry = button(
            row![preview, text(caption).size(13)]
                .spacing(8)
                .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .style(style);

        // Failed images can only be removed, not placed
        let entry = match asset.state {
            AssetState::Ready(_) => entry.on_press(Message::SelectImage(asset.id)),
            _ => entry,
        };

        Element::from(
            row![
                entry,
                button(text("×")).on_press(Message::RemoveImage(asset.id)).style(button::danger),
            ]
            .spacing(4)
            .align_y(Alignment::Center),
        )
    });

    scrollable(Column::with_children(entries).spacing(6).padding(4))
        .height(Length::Fill)
        .into()
}

/// On-screen size of the preview for a canvas, keeping its aspect ratio
pub fn preview_size(config: &GridConfig) -> (f32, f32) {
    let width = config.total_width.max(1) as f32;
    let height = config.total_height.max(1) as f32;
    let scale = (PREVIEW_MAX_WIDTH / width).min(PREVIEW_MAX_HEIGHT / height);
    (width * scale, height * scale)
}

/// Grid preview: click a cell to place the selected image, right-click to clear it
pub fn grid_preview<'a>(
    config: &GridConfig,
    cells: &GridCells,
    library: &'a AssetLibrary,
    thumbnails: &'a Thumbnails,
) -> Element<'a, Message> {
    let (width, height) = preview_size(config);
    let scale = width / config.total_width.max(1) as f32;

    let rows = (0..cells.rows()).map(|r| {
        let cells_in_row = (0..cells.columns()).map(|c| {
            let index = cells.index_of(r, c).unwrap_or_default();

            let content: Element<'a, Message> = match cells
                .get(index)
                .and_then(|id| library.get(id).map(|asset| (id, asset)))
            {
                Some((id, asset)) => match (&asset.state, thumbnails.get(id)) {
                    (AssetState::Ready(_), Some(handle)) => picture(handle.clone())
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .content_fit(ContentFit::Cover)
                        .into(),
                    (AssetState::Failed(_), _) => text(format!("⚠️ {}", asset.name)).size(12).into(),
                    _ => text("Loading…").size(12).into(),
                },
                None => text("Drop image here").size(12).into(),
            };

            let cell = container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(container::bordered_box);

            Element::from(
                mouse_area(cell)
                    .on_press(Message::CellClicked(index))
                    .on_right_press(Message::ClearCell(index)),
            )
        });

        Element::from(
            Row::with_children(cells_in_row)
                .spacing(config.horizontal_padding as f32 * scale)
                .height(Length::Fill),
        )
    });

    let grid = Column::with_children(rows)
        .spacing(config.vertical_padding as f32 * scale)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));

    let background = config.background_color;
    let canvas = container(grid).style(move |_theme| {
        let mut style = container::Style::default();
        if let Some(color) = preview_color(&background) {
            style.background = Some(color.into());
        }
        style
    });

    container(canvas)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

/// Preview color for the canvas background; transparent shows the theme
fn preview_color(background: &Background) -> Option<iced::Color> {
    background
        .fill()
        .map(|p| iced::Color::from_rgba8(p.0[0], p.0[1], p.0[2], p.0[3] as f32 / 255.0))
}

/// Settings tab: numeric inputs, background choice, reset and apply
pub fn settings_tab<'a>(form: &'a SettingsForm, error: Option<&'a str>) -> Element<'a, Message> {
    let inputs = Field::ALL.into_iter().map(|field| {
        let range = field.range();
        Element::from(
            row![
                text(format!("{}:", field.label())).width(Length::Fixed(200.0)),
                text_input(&format!("{}-{}", range.start(), range.end()), form.value(field))
                    .on_input(move |value| Message::SettingChanged(field, value))
                    .width(Length::Fixed(120.0)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        )
    });

    let selected = Some(form.background);
    let backgrounds = row![
        text("Background Color:").width(Length::Fixed(200.0)),
        radio("Transparent", Background::Transparent, selected, Message::BackgroundSelected),
        radio("White", Background::WHITE, selected, Message::BackgroundSelected),
        radio("Black", Background::BLACK, selected, Message::BackgroundSelected),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let actions = row![
        button("Reset Grid").on_press(Message::ResetGrid).style(button::secondary),
        horizontal_space(),
        button("Apply & Preview").on_press(Message::ApplySettings),
    ]
    .spacing(10);

    let mut content = Column::with_children(inputs).spacing(12).push(backgrounds);
    if let Some(error) = error {
        content = content.push(text(format!("❌ {}", error)).size(14));
    }

    column![content, actions].spacing(24).padding(20).into()
}
