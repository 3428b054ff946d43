//! Placeholder screens drawn from the layout rectangles.
//!
//! Images are not decoded; every image region shows its file name.

use core::fmt::Write;

use embedded_graphics::{
    Pixel,
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use flipcard_core::{
    filter::GRID_PAGE_SIZE,
    layout::{self, Rect},
    render::{CardFaceView, CategoryRowView, GridSlotView, LanguageRowView, Screen},
};
use heapless::String;

use super::FrameRenderer;
use crate::platform::FrameBuffer;

const LABEL_CAPACITY: usize = 24;
const TEXT_PAD: u16 = 6;

/// Title area between the previous and home buttons.
const TITLE_AREA: Rect = Rect::new(
    layout::NAV_PREV.x + layout::NAV_PREV.width + 8,
    layout::NAV_HOME.y,
    layout::NAV_HOME.x - (layout::NAV_PREV.x + layout::NAV_PREV.width + 8) - 4,
    layout::NAV_HOME.height,
);
/// Counter area between the home and next buttons.
const INFO_AREA: Rect = Rect::new(
    layout::NAV_HOME.x + layout::NAV_HOME.width + 4,
    layout::NAV_HOME.y,
    layout::NAV_NEXT.x - (layout::NAV_HOME.x + layout::NAV_HOME.width + 4) - 8,
    layout::NAV_HOME.height,
);

#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenRenderer;

impl ScreenRenderer {
    pub const fn new() -> Self {
        Self
    }
}

impl FrameRenderer for ScreenRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer) {
        frame.fill(false);

        match screen {
            Screen::Menu { title } => draw_menu(frame, title),
            Screen::Category {
                rows,
                random,
                page,
                total_pages,
            } => draw_categories(frame, rows, random, page, total_pages),
            Screen::Grid {
                category,
                page,
                total_pages,
                slots,
            } => draw_grid(frame, category, page, total_pages, slots),
            Screen::Flipcard {
                title,
                folder,
                main_image,
                face,
                position,
                count,
                random,
            } => {
                draw_nav(frame, true);
                text_in(frame, title, TITLE_AREA, &FONT_6X10, Alignment::Left);

                let mut info: String<LABEL_CAPACITY> = String::new();
                if random {
                    let _ = write!(info, "Random {}", position);
                } else {
                    let _ = write!(info, "{}/{}", position, count);
                }
                text_in(frame, &info, INFO_AREA, &FONT_6X10, Alignment::Right);

                draw_flipcard(frame, folder, main_image, face);
            }
            Screen::Option => {
                draw_home(frame, layout::NAV_HOME);
                text_in(frame, "Options", TITLE_AREA, &FONT_10X20, Alignment::Left);
                outline(frame, layout::OPTION_LANGUAGE);
                text_in(
                    frame,
                    "Language Settings",
                    layout::OPTION_LANGUAGE,
                    &FONT_10X20,
                    Alignment::Center,
                );
            }
            Screen::LanguageSelection {
                rows,
                notice,
                page,
                total_pages,
            } => draw_languages(frame, rows, notice, page, total_pages),
            Screen::Lock => {
                centered_line(frame, "FLIPCARD", 80, &FONT_10X20);
                centered_line(frame, "Sleep Mode", 120, &FONT_10X20);
                centered_line(frame, "Touch to wake up", 160, &FONT_6X10);
            }
            Screen::Status { line1, line2 } => {
                centered_line(frame, line1, 100, &FONT_10X20);
                centered_line(frame, line2, 140, &FONT_6X10);
            }
        }
    }
}

fn draw_menu(frame: &mut FrameBuffer, title: &str) {
    centered_line(frame, title, 60, &FONT_10X20);

    for (rect, label) in [
        (layout::MENU_CATEGORIES, "Categories"),
        (layout::MENU_RANDOM, "Random"),
        (layout::MENU_OPTIONS, "Options"),
    ] {
        outline(frame, rect);
        text_in(frame, label, rect, &FONT_10X20, Alignment::Center);
    }
}

fn draw_categories(
    frame: &mut FrameBuffer,
    rows: &[CategoryRowView<'_>],
    random: bool,
    page: usize,
    total_pages: usize,
) {
    draw_list_nav(frame, page, total_pages);
    let header = if random {
        "Categories (Random)"
    } else {
        "Categories"
    };
    text_in(frame, header, TITLE_AREA, &FONT_6X10, Alignment::Left);

    for (slot, row) in rows.iter().take(layout::CATEGORY_SLOTS).enumerate() {
        let rect = layout::category_slot(slot);
        outline(frame, rect);

        let mut count: String<LABEL_CAPACITY> = String::new();
        let _ = write!(count, "{}", row.count);
        let name_area = Rect::new(rect.x, rect.y, rect.width - 40, rect.height);
        text_in(frame, row.name, name_area, &FONT_6X10, Alignment::Left);
        text_in(frame, &count, rect, &FONT_6X10, Alignment::Right);
    }
}

fn draw_grid(
    frame: &mut FrameBuffer,
    category: &str,
    page: usize,
    total_pages: usize,
    slots: &[GridSlotView<'_>],
) {
    draw_nav(frame, total_pages > 1);
    text_in(frame, category, TITLE_AREA, &FONT_6X10, Alignment::Left);

    let mut indicator: String<LABEL_CAPACITY> = String::new();
    let _ = write!(indicator, "{}/{}", page + 1, total_pages);
    text_in(frame, &indicator, INFO_AREA, &FONT_6X10, Alignment::Right);

    for (index, slot) in slots.iter().take(GRID_PAGE_SIZE).enumerate() {
        let rect = layout::grid_slot(index);
        outline(frame, rect);

        let half = rect.height / 2;
        let top = Rect::new(rect.x, rect.y, rect.width, half);
        let bottom = Rect::new(rect.x, rect.y + half, rect.width, rect.height - half);
        text_in(frame, slot.title, top, &FONT_6X10, Alignment::Center);
        text_in(frame, slot.thumbnail, bottom, &FONT_6X10, Alignment::Center);
    }
}

fn draw_flipcard(frame: &mut FrameBuffer, folder: &str, main_image: &str, face: CardFaceView<'_>) {
    outline(frame, layout::FLIP_MAIN_IMAGE);
    text_in(
        frame,
        main_image,
        layout::FLIP_MAIN_IMAGE,
        &FONT_6X10,
        Alignment::Center,
    );
    let folder_line = Rect::new(
        layout::FLIP_MAIN_IMAGE.x,
        layout::FLIP_MAIN_IMAGE.bottom() - 20,
        layout::FLIP_MAIN_IMAGE.width,
        20,
    );
    text_in(frame, folder, folder_line, &FONT_6X10, Alignment::Center);

    outline(frame, layout::FLIP_BIG_FACE);
    outline(frame, layout::FLIP_SMALL_FACE);

    if face.language.is_empty() {
        text_in(
            frame,
            "no image",
            layout::FLIP_BIG_FACE,
            &FONT_6X10,
            Alignment::Center,
        );
        return;
    }

    let label_line = Rect::new(
        layout::FLIP_BIG_FACE.x,
        layout::FLIP_BIG_FACE.y,
        layout::FLIP_BIG_FACE.width,
        20,
    );
    text_in(frame, face.language, label_line, &FONT_6X10, Alignment::Left);
    text_in(
        frame,
        face.big_file,
        layout::FLIP_BIG_FACE,
        &FONT_10X20,
        Alignment::Center,
    );
    text_in(
        frame,
        face.small_file,
        layout::FLIP_SMALL_FACE,
        &FONT_6X10,
        Alignment::Center,
    );
}

fn draw_languages(
    frame: &mut FrameBuffer,
    rows: &[LanguageRowView<'_>],
    notice: Option<&str>,
    page: usize,
    total_pages: usize,
) {
    draw_list_nav(frame, page, total_pages);
    text_in(frame, "Language", TITLE_AREA, &FONT_10X20, Alignment::Left);

    for (index, row) in rows.iter().take(layout::LANGUAGE_ROWS).enumerate() {
        let rect = layout::language_row(index);
        outline(frame, rect);

        let mut label: String<LABEL_CAPACITY> = String::new();
        let marker = if row.is_default { '*' } else { ' ' };
        let _ = write!(label, "{} ", marker);
        for ch in row.name.chars() {
            if label.push(ch).is_err() {
                break;
            }
        }
        text_in(frame, &label, rect, &FONT_10X20, Alignment::Left);
        text_in(frame, row.key, rect, &FONT_6X10, Alignment::Right);
    }

    if let Some(notice) = notice {
        text_in(
            frame,
            notice,
            layout::LANGUAGE_NOTICE,
            &FONT_6X10,
            Alignment::Center,
        );
    }
}

fn draw_nav(frame: &mut FrameBuffer, arrows_active: bool) {
    draw_arrow(frame, layout::NAV_PREV, false, arrows_active);
    draw_home(frame, layout::NAV_HOME);
    draw_arrow(frame, layout::NAV_NEXT, true, arrows_active);
}

/// Lists that fit one page show only the home button.
fn draw_list_nav(frame: &mut FrameBuffer, page: usize, total_pages: usize) {
    if total_pages <= 1 {
        draw_home(frame, layout::NAV_HOME);
        return;
    }
    draw_nav(frame, true);

    let mut indicator: String<LABEL_CAPACITY> = String::new();
    let _ = write!(indicator, "{}/{}", page + 1, total_pages);
    text_in(frame, &indicator, INFO_AREA, &FONT_6X10, Alignment::Right);
}

/// Active arrows are filled; inactive ones are a dotted outline.
fn draw_arrow(frame: &mut FrameBuffer, rect: Rect, pointing_right: bool, active: bool) {
    let left = i32::from(rect.x) + 10;
    let right = i32::from(rect.x + rect.width) - 10;
    let top = i32::from(rect.y) + 8;
    let bottom = i32::from(rect.y + rect.height) - 8;
    let middle = i32::from(rect.y + rect.height / 2);

    let (base, tip) = if pointing_right {
        (left, right)
    } else {
        (right, left)
    };
    let triangle = Triangle::new(
        Point::new(base, top),
        Point::new(base, bottom),
        Point::new(tip, middle),
    );

    if active {
        outline(frame, rect);
        let _ = triangle
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(frame);
    } else {
        dotted_outline(frame, rect);
        let _ = triangle
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(frame);
    }
}

fn draw_home(frame: &mut FrameBuffer, rect: Rect) {
    outline(frame, rect);

    let x = i32::from(rect.x);
    let y = i32::from(rect.y);
    let _ = Triangle::new(
        Point::new(x + 8, y + 18),
        Point::new(x + 18, y + 8),
        Point::new(x + 28, y + 18),
    )
    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
    .draw(frame);
    let _ = Rectangle::new(Point::new(x + 11, y + 18), Size::new(14, 11))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(frame);
}

fn bounds(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(i32::from(rect.x), i32::from(rect.y)),
        Size::new(u32::from(rect.width), u32::from(rect.height)),
    )
}

fn outline(frame: &mut FrameBuffer, rect: Rect) {
    let _ = bounds(rect)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(frame);
}

fn dotted_outline(frame: &mut FrameBuffer, rect: Rect) {
    let x0 = i32::from(rect.x);
    let y0 = i32::from(rect.y);
    let x1 = x0 + i32::from(rect.width) - 1;
    let y1 = y0 + i32::from(rect.height) - 1;

    let horizontal = (x0..=x1)
        .step_by(2)
        .flat_map(|x| [Point::new(x, y0), Point::new(x, y1)]);
    let vertical = (y0..=y1)
        .step_by(2)
        .flat_map(|y| [Point::new(x0, y), Point::new(x1, y)]);
    let _ = frame.draw_iter(
        horizontal
            .chain(vertical)
            .map(|point| Pixel(point, BinaryColor::On)),
    );
}

/// Longest prefix of `text` that fits in `width` pixels of `font`.
fn fit<'a>(text: &'a str, width: u32, font: &MonoFont<'_>) -> &'a str {
    let advance = font.character_size.width + font.character_spacing;
    let max_chars = (width / advance) as usize;
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Single line of text vertically centred in `rect`, clipped to its width.
fn text_in(frame: &mut FrameBuffer, text: &str, rect: Rect, font: &MonoFont<'_>, align: Alignment) {
    let inner_width = u32::from(rect.width.saturating_sub(TEXT_PAD * 2));
    let text = fit(text, inner_width, font);

    let x = match align {
        Alignment::Left => rect.x + TEXT_PAD,
        Alignment::Center => rect.x + rect.width / 2,
        Alignment::Right => rect.x + rect.width - TEXT_PAD,
    };
    let y = rect.y + rect.height / 2;

    let style = TextStyleBuilder::new()
        .alignment(align)
        .baseline(Baseline::Middle)
        .build();
    let _ = Text::with_text_style(
        text,
        Point::new(i32::from(x), i32::from(y)),
        MonoTextStyle::new(font, BinaryColor::On),
        style,
    )
    .draw(frame);
}

fn centered_line(frame: &mut FrameBuffer, text: &str, y: u16, font: &MonoFont<'_>) {
    let line = Rect::new(0, y.saturating_sub(12), layout::PANEL_WIDTH, 24);
    text_in(frame, text, line, font, Alignment::Center);
}
