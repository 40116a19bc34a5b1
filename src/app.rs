use crate::ui::{parse_command, BoardView, Command, Highlights};
use anyhow::Result;
use checkers_core::engine::config::{EngineConfig, MoveOrdering};
use checkers_core::engine::search::AlphaBetaEngine;
use checkers_core::engine::SearchStats;
use checkers_core::logic::board::{BoardCoordinate, Color};
use checkers_core::logic::game::{Game, GameStatus};
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// A human plays light against the engine
    Human,
    /// The engine plays both sides
    Computer,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub mode: Mode,
    pub max_moves: usize,
    pub color: bool,
}

/// Totals over every top-level search of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub searches: u64,
    pub nodes: u64,
    pub cutoffs: u64,
    pub time_ms: u64,
}

impl SessionStats {
    pub fn add(&mut self, stats: &SearchStats) {
        self.searches += 1;
        self.nodes = self.nodes.saturating_add(stats.nodes);
        self.cutoffs = self.cutoffs.saturating_add(stats.cutoffs);
        self.time_ms = self.time_ms.saturating_add(stats.time_ms);
    }
}

enum Flow {
    Continue,
    Quit,
}

const fn ordering_name(ordering: MoveOrdering) -> &'static str {
    match ordering {
        MoveOrdering::None => "none",
        MoveOrdering::History => "history",
    }
}

pub struct Session {
    game: Game,
    engine: AlphaBetaEngine,
    config: Arc<EngineConfig>,
    options: SessionOptions,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: EngineConfig, options: SessionOptions) -> Self {
        let config = Arc::new(config);
        Self {
            game: Game::new(),
            engine: AlphaBetaEngine::new(config.clone()),
            config,
            options,
            stats: SessionStats::default(),
        }
    }

    /// Plays until the game ends, the player quits or the move cap is hit,
    /// then prints the search summary.
    pub fn run<R: BufRead, W: Write>(mut self, input: &mut R, out: &mut W) -> Result<SessionStats> {
        tracing::info!(
            mode = ?self.options.mode,
            depth = self.config.search_depth,
            ordering = ordering_name(self.config.move_ordering),
            "session started"
        );

        loop {
            if let GameStatus::Won(winner) = self.game.status() {
                let highlights = Highlights {
                    last_move: self.game.last_move(),
                    ..Default::default()
                };
                self.print_board(out, &highlights)?;
                writeln!(
                    out,
                    "Game over: {winner} wins after {} moves.",
                    self.game.history().len()
                )?;
                break;
            }
            if self.options.mode == Mode::Computer
                && self.game.history().len() >= self.options.max_moves
            {
                writeln!(out, "Move limit of {} reached.", self.options.max_moves)?;
                break;
            }

            let flow = if self.is_human_turn() {
                self.human_turn(input, out)?
            } else {
                self.engine_turn(out)?
            };
            if matches!(flow, Flow::Quit) {
                break;
            }
        }

        self.print_summary(out)?;
        Ok(self.stats)
    }

    fn is_human_turn(&self) -> bool {
        self.options.mode == Mode::Human && self.game.turn() == Color::Light
    }

    fn print_board<W: Write>(&self, out: &mut W, highlights: &Highlights) -> Result<()> {
        write!(
            out,
            "{}",
            BoardView::new(self.game.board(), highlights, self.options.color)
        )?;
        Ok(())
    }

    fn human_turn<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Flow> {
        loop {
            let overview = Highlights {
                forced: self.game.forced_pieces(),
                last_move: self.game.last_move(),
                ..Default::default()
            };
            self.print_board(out, &overview)?;

            let Some(from) = read_square(input, out, "Select a piece (e.g. 5A) or 'quit': ")? else {
                return Ok(Flow::Quit);
            };
            let destinations = match self.game.select(from) {
                Ok(destinations) => destinations,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            };

            let selection = Highlights {
                selected: Some(from),
                destinations,
                ..overview
            };
            self.print_board(out, &selection)?;

            let Some(to) = read_square(input, out, "Move to: ")? else {
                return Ok(Flow::Quit);
            };
            match self.game.make_move(from, to) {
                Ok(()) => {
                    tracing::debug!(%from, %to, "player move");
                    return Ok(Flow::Continue);
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }

    fn engine_turn<W: Write>(&mut self, out: &mut W) -> Result<Flow> {
        let side = self.game.turn();
        let Some((mv, stats)) = self
            .game
            .play_engine_move(&mut self.engine, self.config.search_depth)
        else {
            return Ok(Flow::Quit);
        };
        self.stats.add(&stats);

        tracing::info!(
            %mv,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            time_ms = stats.time_ms,
            "engine move"
        );
        writeln!(
            out,
            "{side} plays {mv} ({} nodes, {} cutoffs, {} ms)",
            stats.nodes, stats.cutoffs, stats.time_ms
        )?;
        if self.options.mode == Mode::Computer {
            let highlights = Highlights {
                last_move: Some(mv),
                ..Default::default()
            };
            self.print_board(out, &highlights)?;
        }
        Ok(Flow::Continue)
    }

    fn print_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Search summary")?;
        writeln!(out, "  ordering: {}", ordering_name(self.config.move_ordering))?;
        writeln!(out, "  depth:    {}", self.config.search_depth)?;
        writeln!(out, "  searches: {}", self.stats.searches)?;
        writeln!(out, "  nodes:    {}", self.stats.nodes)?;
        writeln!(out, "  cutoffs:  {}", self.stats.cutoffs)?;
        writeln!(out, "  time:     {} ms", self.stats.time_ms)?;
        Ok(())
    }
}

/// Prompts until the player enters a square. `None` on `quit` or end of input.
fn read_square<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<BoardCoordinate>> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_command(&line) {
            Ok(Command::Quit) => return Ok(None),
            Ok(Command::Square(coord)) => return Ok(Some(coord)),
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}
