use matchday_api::{Team, TeamIndex};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::components::banner_frames::{BannerColor, BannerTheme, resolve};

/// A regulation shootout is five kicks each; the grid grows for sudden death.
pub const REGULATION_ROUNDS: usize = 5;

/// Columns per kick marker, including the gap.
const MARK_WIDTH: u16 = 3;
const NAME_WIDTH: u16 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickMark {
    Scored,
    Missed,
    Pending,
}

impl KickMark {
    fn symbol(self) -> &'static str {
        match self {
            KickMark::Scored => "●",
            KickMark::Missed => "✗",
            KickMark::Pending => "○",
        }
    }

    fn style(self) -> Style {
        match self {
            KickMark::Scored => Style::default().fg(Color::Green),
            KickMark::Missed => Style::default().fg(Color::Red),
            KickMark::Pending => Style::default().fg(Color::DarkGray),
        }
    }
}

/// Number of kick columns to show for the given kick counts.
pub fn visible_rounds(team1_kicks: usize, team2_kicks: usize) -> usize {
    REGULATION_ROUNDS.max(team1_kicks).max(team2_kicks)
}

pub fn kick_marks(kicks: &[bool], rounds: usize) -> Vec<KickMark> {
    (0..rounds)
        .map(|i| match kicks.get(i) {
            Some(true) => KickMark::Scored,
            Some(false) => KickMark::Missed,
            None => KickMark::Pending,
        })
        .collect()
}

/// Two rows of kick markers, one per team, with a running total and an
/// arrow on the side due to kick next.
pub struct ShootoutView<'a> {
    pub team1: &'a Team,
    pub team2: &'a Team,
    pub next: Option<TeamIndex>,
    pub theme: BannerTheme,
}

impl Widget for ShootoutView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < NAME_WIDTH + 8 || area.height < 3 {
            return;
        }
        let rounds = visible_rounds(self.team1.penalties.len(), self.team2.penalties.len());
        let max_marks = ((area.width - NAME_WIDTH - 8) / MARK_WIDTH) as usize;
        // Keep the most recent kicks in view when sudden death runs long.
        let skip = rounds.saturating_sub(max_marks);

        for (row, (team, index)) in [(self.team1, TeamIndex::One), (self.team2, TeamIndex::Two)]
            .into_iter()
            .enumerate()
        {
            let y = area.y + (row as u16) * 2;
            let is_next = self.next == Some(index);
            let name_style = if is_next {
                resolve(BannerColor::Accent, self.theme)
            } else {
                Style::default().fg(Color::White)
            };

            let arrow = if is_next { "▶ " } else { "  " };
            buf.set_string(area.x, y, arrow, name_style);
            let name: String = team.name.chars().take(NAME_WIDTH as usize - 3).collect();
            buf.set_string(area.x + 2, y, name, name_style);

            let mut x = area.x + NAME_WIDTH;
            for mark in kick_marks(&team.penalties, rounds).into_iter().skip(skip) {
                buf.set_string(x, y, mark.symbol(), mark.style());
                x += MARK_WIDTH;
            }
            buf.set_string(
                x + 1,
                y,
                team.penalty_score().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            );
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
    fn test_visible_rounds_grow_past_five() {
        assert_eq!(visible_rounds(0, 0), 5);
        assert_eq!(visible_rounds(5, 4), 5);
        assert_eq!(visible_rounds(7, 6), 7);
    }

    #[test]
    fn test_kick_marks_pad_with_pending() {
        assert_eq!(
            kick_marks(&[true, false], 4),
            vec![KickMark::Scored, KickMark::Missed, KickMark::Pending, KickMark::Pending]
        );
    }

    #[test]
    fn test_render_marks_next_kicker() {
        let mut team1 = Team::new("Reds", "");
        team1.penalties = vec![true, false];
        let mut team2 = Team::new("Blues", "");
        team2.penalties = vec![true];

        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        ShootoutView {
            team1: &team1,
            team2: &team2,
            next: Some(TeamIndex::Two),
            theme: BannerTheme::Dark,
        }
        .render(area, &mut buf);

        let top = row_text(&buf, 0);
        let bottom = row_text(&buf, 2);
        assert!(top.starts_with("  Reds"));
        assert!(top.contains("●  ✗  ○"));
        assert!(bottom.starts_with("▶ Blues"));
        assert!(bottom.trim_end().ends_with('1'));
    }
}
