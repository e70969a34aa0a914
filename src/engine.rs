use crate::agent::{Agent, SearchResult};
use crate::board::{Action, Board, Player, BOARD_SIZE};
use crate::config::AgentConfig;
use crate::error::Result;
use crate::movegen::legal_actions;

/// Board as exchanged with a host: `codes[x][y]` cell codes.
pub type BoardCodes = [[i32; BOARD_SIZE]; BOARD_SIZE];
/// Action as exchanged with a host: `[[from_x, from_y], [to_x, to_y]]`.
pub type ActionCodes = [[i32; 2]; 2];

/// Request/response surface for a host driving a match: one agent per
/// player id, integer boards in, integer actions out.
pub struct Engine {
    agents: [Agent; 2],
}

impl Default for Engine {
    fn default() -> Self {
        Self { agents: Player::BOTH.map(|p| Agent::new(p, AgentConfig::default())) }
    }
}

impl Engine {
    pub fn new() -> Self { Self::default() }

    pub fn agent(&self, player: Player) -> &Agent { &self.agents[player.slot()] }

    pub fn configure(&mut self, player_id: i32, config: AgentConfig) -> Result<()> {
        let player = Player::from_id(player_id)?;
        self.agents[player.slot()].configure(config);
        Ok(())
    }

    /// Sets the classic search knobs, keeping the rest of the player's config.
    /// `max_actions <= 0` examines every action.
    pub fn init_agent(
        &mut self,
        player_id: i32,
        max_depth: u32,
        max_depth_without_opponent: u32,
        max_actions: i32,
        sort_actions: bool,
        without_opponent: bool,
    ) -> Result<()> {
        let player = Player::from_id(player_id)?;
        let mut config = self.agents[player.slot()].config().clone();
        config.max_depth = max_depth;
        config.max_depth_without_opponent = max_depth_without_opponent;
        config.max_actions = usize::try_from(max_actions).ok().filter(|&n| n > 0);
        config.sort_actions = sort_actions;
        config.without_opponent = without_opponent;
        self.agents[player.slot()].configure(config);
        Ok(())
    }

    /// Full search result for `player_id` on a validated board.
    pub fn search(&mut self, player_id: i32, codes: &BoardCodes) -> Result<SearchResult> {
        let player = Player::from_id(player_id)?;
        let mut board = Board::from_codes(codes)?;
        board.validate()?;
        Ok(self.agents[player.slot()].run(&mut board))
    }

    pub fn best_move(&mut self, player_id: i32, codes: &BoardCodes) -> Result<Option<ActionCodes>> {
        Ok(self.search(player_id, codes)?.action.map(Action::to_codes))
    }

    pub fn best_move_with_score(&mut self, player_id: i32, codes: &BoardCodes) -> Result<(i32, Option<ActionCodes>)> {
        let r = self.search(player_id, codes)?;
        Ok((r.score, r.action.map(Action::to_codes)))
    }

    /// Every legal action for `player_id`, under that player's jump rule.
    pub fn legal_actions(&self, player_id: i32, codes: &BoardCodes) -> Result<Vec<ActionCodes>> {
        let player = Player::from_id(player_id)?;
        let board = Board::from_codes(codes)?;
        let rule = self.agent(player).config().jump_rule;
        Ok(legal_actions(player, &board, rule).into_iter().map(Action::to_codes).collect())
    }
}
