use crate::grid::Pos;

const PATIENCE: u32 = 10;
const DISMISSAL: &str = "...just leave idiot";

/// Talking range: the eight surrounding cells.
pub fn is_adjacent(player: Pos, npc: Pos) -> bool {
    player.chebyshev(npc) <= 1
}

#[derive(Clone, Debug, Default)]
pub struct Conversation {
    exchanges: u32,
}

impl Conversation {
    pub fn exchanges(&self) -> u32 {
        self.exchanges
    }

    /// Parrots the player back until it runs out of patience.
    pub fn reply(&mut self, input: &str) -> String {
        let reply = if self.exchanges >= PATIENCE {
            DISMISSAL.to_string()
        } else if input.trim().is_empty() {
            "(silence)".to_string()
        } else {
            input.trim().to_string()
        };
        self.exchanges = self.exchanges.saturating_add(1);
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_includes_diagonals() {
        let npc = Pos::new(5, 5);
        assert!(is_adjacent(Pos::new(4, 4), npc));
        assert!(is_adjacent(Pos::new(5, 5), npc));
        assert!(!is_adjacent(Pos::new(7, 5), npc));
    }

    #[test]
    fn echoes_until_patience_runs_out() {
        let mut talk = Conversation::default();
        assert_eq!(talk.reply("  hi "), "hi");
        assert_eq!(talk.reply(""), "(silence)");
        for _ in 2..PATIENCE {
            talk.reply("again");
        }
        assert_eq!(talk.exchanges(), PATIENCE);
        assert_eq!(talk.reply("hello?"), DISMISSAL);
    }
}
