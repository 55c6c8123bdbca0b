//! Demo scene: what a layout pass would emit for a small dashboard.

use kiai_render::coords::{CornerRadii, Rect};
use kiai_render::paint::Color;
use kiai_render::scene::{ImageSize, TextAlign, TextPayload, WrapMode};
use kiai_render::text::FontId;
use kiai_render::{CommandList, TextureId};

const BACKGROUND: Color = Color::rgb(0x16, 0x18, 0x1d);
const PANEL: Color = Color::rgb(0x22, 0x26, 0x2e);
const ROW: Color = Color::rgb(0x2d, 0x33, 0x3d);
const ACCENT: Color = Color::rgb(0xe0, 0x6c, 0x4c);
const INK: Color = Color::rgb(0xec, 0xe8, 0xe1);
const MUTED: Color = INK.with_alpha(0x99);

const MARGIN: f32 = 16.0;
const ROW_HEIGHT: f32 = 36.0;
const ROWS: usize = 24;

/// Inputs the scene needs besides the viewport.
pub struct SceneAssets {
    pub font: FontId,
    pub image: Option<(TextureId, ImageSize)>,
}

/// Refills `list` with one frame of the demo for a `width` × `height`
/// viewport. The list in the clipped column scrolls with `frame`.
pub fn build(list: &mut CommandList, assets: &SceneAssets, width: f32, height: f32, frame: u64) {
    list.clear();

    list.push_solid_rect(Rect::new(0.0, 0.0, width, height), BACKGROUND);

    let panel = Rect::new(MARGIN, MARGIN, width - 2.0 * MARGIN, height - 2.0 * MARGIN);
    list.push_rounded_rect(panel, PANEL, 12.0);
    list.push_border(panel, ACCENT, 1.0, CornerRadii::all(12.0));

    let header = Rect::new(panel.x + MARGIN, panel.y + MARGIN, panel.width - 2.0 * MARGIN, 28.0);
    list.push_text(
        header,
        TextPayload::new("kiai render studio", assets.font, INK).with_letter_spacing(1.0),
    );
    list.push_text(
        header,
        TextPayload::new(format!("frame {frame}"), assets.font, MUTED)
            .with_align(TextAlign::Right),
    );

    let body_y = header.bottom() + MARGIN;
    let body_h = (panel.bottom() - MARGIN - body_y).max(0.0);
    let column = Rect::new(header.x, body_y, (header.width * 0.55).max(0.0), body_h);
    push_scrolling_rows(list, assets.font, column, frame);

    let side = Rect::new(
        column.right() + MARGIN,
        body_y,
        (header.right() - column.right() - MARGIN).max(0.0),
        body_h,
    );
    push_side_card(list, assets, side);

    // Host-specific marker; the interpreter ignores it.
    list.push_custom(Rect::new(0.0, 0.0, 0.0, 0.0), frame);
}

fn push_scrolling_rows(list: &mut CommandList, font: FontId, column: Rect, frame: u64) {
    list.push_clip(column);

    let content = ROW_HEIGHT * ROWS as f32;
    let offset = (frame as f32 * 0.5) % content;
    for i in 0..ROWS * 2 {
        let y = column.y + i as f32 * ROW_HEIGHT - offset;
        if y + ROW_HEIGHT < column.y || y > column.bottom() {
            continue;
        }
        let row = Rect::new(column.x, y + 2.0, column.width, ROW_HEIGHT - 4.0);
        list.push_rounded_rect(row, ROW, 6.0);

        let marker = Rect::new(row.x + 8.0, row.y + 10.0, 12.0, 12.0);
        list.push_rounded_rect(marker, ACCENT, 6.0);

        let label = Rect::new(row.x + 28.0, row.y + 6.0, row.width - 36.0, row.height);
        list.push_text(
            label,
            TextPayload::new(format!("command #{:02}", i % ROWS), font, INK),
        );
    }

    list.pop_clip();
}

fn push_side_card(list: &mut CommandList, assets: &SceneAssets, card: Rect) {
    list.push_rounded_rect(card, ROW, 10.0);

    let caption = Rect::new(card.x + 12.0, card.y + 12.0, card.width - 24.0, 60.0);
    list.push_text(
        caption,
        TextPayload::new("glyphs are cached\nlines are measured once", assets.font, MUTED)
            .with_line_height(22.0)
            .with_wrap(WrapMode::Newlines),
    );

    if let Some((texture, size)) = assets.image {
        list.push_image(Rect::new(card.x + 12.0, caption.bottom() + 8.0, 0.0, 0.0), texture, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiai_render::CommandKind;

    fn assets() -> SceneAssets {
        SceneAssets {
            font: FontId(0),
            image: Some((TextureId::from_raw(1), ImageSize::new(32.0, 32.0))),
        }
    }

    #[test]
    fn clips_are_balanced() {
        let mut list = CommandList::new();
        build(&mut list, &assets(), 960.0, 600.0, 7);

        let opens = list.commands().iter().filter(|c| c.kind == CommandKind::ClipStart).count();
        let closes = list.commands().iter().filter(|c| c.kind == CommandKind::ClipEnd).count();
        assert_eq!(opens, 1);
        assert_eq!(opens, closes);
        assert_eq!(list.open_clips(), 0);
    }

    #[test]
    fn background_comes_first() {
        let mut list = CommandList::new();
        build(&mut list, &assets(), 320.0, 200.0, 0);
        let first = &list.commands()[0];
        assert_eq!(first.bounds, Rect::new(0.0, 0.0, 320.0, 200.0));
        assert!(matches!(first.kind, CommandKind::Rectangle(_)));
    }

    #[test]
    fn image_slot_follows_assets() {
        let mut list = CommandList::new();
        build(&mut list, &assets(), 960.0, 600.0, 0);
        assert!(list.commands().iter().any(|c| matches!(c.kind, CommandKind::Image(_))));

        let no_image = SceneAssets { font: FontId(0), image: None };
        build(&mut list, &no_image, 960.0, 600.0, 0);
        assert!(!list.commands().iter().any(|c| matches!(c.kind, CommandKind::Image(_))));
    }

    #[test]
    fn caption_breaks_only_on_newlines() {
        let mut list = CommandList::new();
        build(&mut list, &assets(), 960.0, 600.0, 0);
        let caption = list
            .commands()
            .iter()
            .find_map(|c| match &c.kind {
                CommandKind::Text(t) if t.content.contains('\n') => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(caption.wrap, WrapMode::Newlines);
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let mut list = CommandList::new();
        build(&mut list, &assets(), 960.0, 600.0, 0);
        let first = list.len();
        build(&mut list, &assets(), 960.0, 600.0, 0);
        assert_eq!(list.len(), first);
    }
}
