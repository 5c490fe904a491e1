use crate::components::banner_frames::{
    BALL_WIDTH, BannerColor, BannerTheme, BannerTitle, ball_row, football_frame, resolve,
    title_rows,
};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

pub use crate::components::banner_frames::FRAME_COUNT;

/// Big-letter banner with a bouncing ball on each side. Used for the intro
/// splash and for goal and trophy celebrations.
pub struct AnimatedBanner<'a> {
    pub frame: usize,
    pub tick: u64,
    pub theme: BannerTheme,
    pub title: BannerTitle,
    /// One line under the title: fixture, scorer or winner.
    pub caption: &'a str,
}

impl Default for AnimatedBanner<'_> {
    fn default() -> Self {
        Self {
            frame: 0,
            tick: 0,
            theme: BannerTheme::Dark,
            title: BannerTitle::Matchday,
            caption: "",
        }
    }
}

impl Widget for AnimatedBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(
                Line::from(format!(" {} ", self.title.plain())),
                area.x,
                area.y,
                area.width,
                buf,
            );
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(resolve(self.title.color(), self.theme));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if inner.width < full_width(self.title) || inner.height < 5 {
            render_compact(&self, inner, buf);
            return;
        }
        render_full(&self, inner, buf);
    }
}

/// Columns needed for the big title plus a ball on both sides.
fn full_width(title: BannerTitle) -> u16 {
    let title_width = title_rows(title)[0].chars().count() as u16;
    title_width + 2 * (BALL_WIDTH + 1)
}

fn render_compact(banner: &AnimatedBanner, inner: Rect, buf: &mut Buffer) {
    render_centered(
        Line::from(Span::styled(
            banner.title.plain(),
            resolve(banner.title.color(), banner.theme),
        )),
        inner,
        inner.y,
        buf,
    );
    if inner.height > 1 {
        render_centered(
            Line::from(Span::styled(
                banner.caption,
                resolve(BannerColor::Secondary, banner.theme),
            )),
            inner,
            inner.y + 1,
            buf,
        );
    }
}

fn render_full(banner: &AnimatedBanner, inner: Rect, buf: &mut Buffer) {
    let title = title_rows(banner.title);
    let left_ball = football_frame(banner.frame);
    let right_ball = football_frame((banner.frame + 2) % FRAME_COUNT);
    let ball_y = ball_row(banner.tick, 5);

    for row in 0..5u16 {
        if row >= inner.height {
            break;
        }
        let y = inner.y + row;
        let ball_style = if row == ball_y {
            resolve(BannerColor::Secondary, banner.theme)
        } else {
            resolve(BannerColor::Shadow, banner.theme)
        };
        let text = title.get(row as usize).copied().unwrap_or("");
        let padded = format!("{text:<width$}", width = title[0].chars().count());

        let spans = vec![
            Span::styled(left_ball[row as usize], ball_style),
            Span::raw(" "),
            Span::styled(padded, resolve(banner.title.color(), banner.theme)),
            Span::raw(" "),
            Span::styled(right_ball[row as usize], ball_style),
        ];
        render_centered(Line::from(spans), inner, y, buf);
    }

    if inner.height > 5 && !banner.caption.is_empty() {
        render_centered(
            Line::from(Span::styled(
                format!(" {} ", banner.caption),
                resolve(BannerColor::Accent, banner.theme),
            )),
            inner,
            inner.y + 5,
            buf,
        );
    }
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let style: Style = span.style;
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_narrow_banner_uses_plain_title() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        AnimatedBanner {
            title: BannerTitle::Goal,
            caption: "Hale 17'",
            ..AnimatedBanner::default()
        }
        .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("GOAL!"));
        assert!(row_text(&buf, 2).contains("Hale 17'"));
    }

    #[test]
    fn test_wide_banner_draws_art_and_caption() {
        let area = Rect::new(0, 0, 100, 9);
        let mut buf = Buffer::empty(area);
        AnimatedBanner {
            title: BannerTitle::Champions,
            caption: "Northbridge FC",
            ..AnimatedBanner::default()
        }
        .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains(".--."));
        assert!(row_text(&buf, 6).contains("Northbridge FC"));
    }
}
