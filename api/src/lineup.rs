use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub number: u8,
    pub name: String,
}

impl Player {
    /// Parse an operator entry such as `"10 Lionel Messi"` or `"#7 Cole"`.
    pub fn parse_entry(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        let (number, name) = entry.split_once(char::is_whitespace)?;
        let number = number.trim_start_matches('#').parse::<u8>().ok()?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            number,
            name: name.to_string(),
        })
    }
}

/// Starting XI as listed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineup {
    pub players: Vec<Player>,
}

impl Lineup {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Shirt numbers are unique: adding a number already listed renames that player.
    pub fn add(&mut self, player: Player) {
        match self.players.iter_mut().find(|p| p.number == player.number) {
            Some(existing) => existing.name = player.name,
            None => self.players.push(player),
        }
    }

    pub fn remove(&mut self, number: u8) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.number == number)?;
        Some(self.players.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_and_name() {
        assert_eq!(
            Player::parse_entry(" 10 Lionel Messi "),
            Some(Player { number: 10, name: "Lionel Messi".into() })
        );
        assert_eq!(Player::parse_entry("#7 Cole").map(|p| p.number), Some(7));
        assert_eq!(Player::parse_entry("Messi"), None);
        assert_eq!(Player::parse_entry("300 Giant"), None);
        assert_eq!(Player::parse_entry("9   "), None);
    }

    #[test]
    fn duplicate_numbers_replace_the_name() {
        let mut lineup = Lineup::default();
        lineup.add(Player { number: 1, name: "Keeper".into() });
        lineup.add(Player { number: 9, name: "Striker".into() });
        lineup.add(Player { number: 1, name: "New Keeper".into() });
        assert_eq!(lineup.len(), 2);
        assert_eq!(lineup.players[0].name, "New Keeper");
        assert_eq!(lineup.remove(9).map(|p| p.name), Some("Striker".into()));
        assert_eq!(lineup.remove(9), None);
    }
}
