use matchday_api::TeamIndex;

/// What the line editor is currently filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Competition,
    Stadium,
    TeamName(TeamIndex),
    TeamLogo(TeamIndex),
    Minute,
    /// Scorer or booked player attached to the next recorded event.
    NextPlayer,
    /// `"10 Name"` entry appended to a lineup.
    LineupEntry(TeamIndex),
    GroupName,
    RowName,
}

impl EditTarget {
    pub fn prompt(&self) -> String {
        match self {
            EditTarget::Competition => "Competition".to_string(),
            EditTarget::Stadium => "Stadium".to_string(),
            EditTarget::TeamName(team) => format!("Name ({team})"),
            EditTarget::TeamLogo(team) => format!("Logo ({team})"),
            EditTarget::Minute => "Minute (0-120)".to_string(),
            EditTarget::NextPlayer => "Player for next event".to_string(),
            EditTarget::LineupEntry(team) => format!("Add player to {team} as \"<number> <name>\""),
            EditTarget::GroupName => "Group name".to_string(),
            EditTarget::RowName => "Team name".to_string(),
        }
    }
}

/// Single-line text input shared by every tab that edits text.
#[derive(Debug, Default)]
pub struct LineEditor {
    pub input: String,
    target: Option<EditTarget>,
}

impl LineEditor {
    pub fn begin(&mut self, target: EditTarget, initial: impl Into<String>) {
        self.target = Some(target);
        self.input = initial.into();
    }

    pub fn composing(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<EditTarget> {
        self.target
    }

    pub fn push(&mut self, ch: char) {
        if self.composing() {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel(&mut self) {
        self.target = None;
        self.input.clear();
    }

    /// Finish editing. The text is trimmed; blank input is still returned so
    /// callers can treat it as "clear".
    pub fn submit(&mut self) -> Option<(EditTarget, String)> {
        let target = self.target.take()?;
        let text = self.input.trim().to_string();
        self.input.clear();
        Some((target, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_trims_and_resets() {
        let mut editor = LineEditor::default();
        editor.begin(EditTarget::Stadium, "Old");
        editor.backspace();
        editor.backspace();
        editor.backspace();
        for ch in "  Wembley ".chars() {
            editor.push(ch);
        }
        assert_eq!(editor.submit(), Some((EditTarget::Stadium, "Wembley".to_string())));
        assert!(!editor.composing());
        assert!(editor.input.is_empty());
        assert_eq!(editor.submit(), None);
    }

    #[test]
    fn test_typing_is_ignored_when_idle() {
        let mut editor = LineEditor::default();
        editor.push('x');
        assert!(editor.input.is_empty());
        editor.begin(EditTarget::Minute, "");
        editor.push('4');
        editor.cancel();
        assert!(!editor.composing());
        assert!(editor.input.is_empty());
    }
}
