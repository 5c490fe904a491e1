use tui::style::{Color, Modifier, Style};

pub const FRAME_COUNT: usize = 4;
pub const BALL_WIDTH: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    Primary,
    Secondary,
    Accent,
    Shadow,
    Dim,
    Winner,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BannerTheme {
    #[default]
    Dark,
}

/// Which big-letter title a banner shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTitle {
    Matchday,
    Goal,
    Champions,
}

impl BannerTitle {
    /// Fallback when the terminal is too narrow for the big letters.
    pub fn plain(self) -> &'static str {
        match self {
            BannerTitle::Matchday => "MATCHDAY",
            BannerTitle::Goal => "GOAL!",
            BannerTitle::Champions => "CHAMPIONS",
        }
    }

    pub fn color(self) -> BannerColor {
        match self {
            BannerTitle::Matchday => BannerColor::Primary,
            BannerTitle::Goal => BannerColor::Accent,
            BannerTitle::Champions => BannerColor::Winner,
        }
    }
}

pub fn resolve(color: BannerColor, _theme: BannerTheme) -> Style {
    match color {
        BannerColor::Primary => Style::default().fg(Color::Rgb(46, 160, 67)),
        BannerColor::Secondary => Style::default().fg(Color::White),
        BannerColor::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        BannerColor::Shadow | BannerColor::Dim => Style::default().fg(Color::Indexed(240)),
        BannerColor::Winner => Style::default().fg(Color::Rgb(212, 175, 55)).add_modifier(Modifier::BOLD),
    }
}

/// Triangle wave over `0..height`, one step per tick.
pub fn ball_row(tick: u64, height: u16) -> u16 {
    if height == 0 {
        return 0;
    }
    let h = u64::from(height.saturating_sub(1));
    if h == 0 {
        return 0;
    }
    let period = 2 * h;
    let t = tick % period;
    (h.abs_diff(t)) as u16
}

pub fn football_frame(frame: usize) -> [&'static str; 5] {
    const FRAMES: [[&str; 5]; FRAME_COUNT] = [
        [r"  .--.  ", r" / \/ \ ", r"|--()--|", r" \ /\ / ", r"  '--'  "],
        [r"  .--.  ", r" /()  \ ", r"| \__/ |", r" \  ()/ ", r"  '--'  "],
        [r"  .--.  ", r" / /\ \ ", r"|()--()|", r" \ \/ / ", r"  '--'  "],
        [r"  .--.  ", r" /  ()\ ", r"| /--\ |", r" \()  / ", r"  '--'  "],
    ];
    FRAMES[frame % FRAME_COUNT]
}

pub fn title_rows(title: BannerTitle) -> [&'static str; 4] {
    match title {
        BannerTitle::Matchday => [
            r" __  __   _ _____ ___ _  _ ___   _ __   __",
            r"|  \/  | /_\_   _/ __| || |   \ /_\\ \ / /",
            r"| |\/| |/ _ \| || (__| __ | |) / _ \\ V / ",
            r"|_|  |_/_/ \_\_| \___|_||_|___/_/ \_\|_|  ",
        ],
        BannerTitle::Goal => [
            r"  ___  ___   _   _    _ ",
            r" / __|/ _ \ /_\ | |  | |",
            r"| (_ | (_) / _ \| |__|_|",
            r" \___|\___/_/ \_\____(_)",
        ],
        BannerTitle::Champions => [
            r"  ___ _  _   _   __  __ ___ ___ ___  _  _ ___  ",
            r" / __| || | /_\ |  \/  | _ \_ _/ _ \| \| / __| ",
            r"| (__| __ |/ _ \| |\/| |  _/| | (_) | .` \__ \ ",
            r" \___|_||_/_/ \_\_|  |_|_| |___\___/|_|\_|___/ ",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_row_bounces() {
        let rows: Vec<u16> = (0..8).map(|t| ball_row(t, 4)).collect();
        assert_eq!(rows, vec![3, 2, 1, 0, 1, 2, 3, 2]);
        assert_eq!(ball_row(7, 1), 0);
    }

    #[test]
    fn test_art_rows_are_even() {
        for title in [BannerTitle::Matchday, BannerTitle::Goal, BannerTitle::Champions] {
            let rows = title_rows(title);
            let width = rows[0].chars().count();
            assert!(rows.iter().all(|r| r.chars().count() == width), "{title:?}");
        }
        for frame in 0..FRAME_COUNT {
            assert!(football_frame(frame)
                .iter()
                .all(|r| r.chars().count() == BALL_WIDTH as usize));
        }
    }
}
