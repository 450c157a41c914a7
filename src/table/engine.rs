//! The hand state machine and its public façade.

use super::config::TableConfig;
use super::player::{PlayerId, PlayerState, PlayerStatus};
use super::state::{TablePhase, TableState};
use crate::betting::{self, Action, ActionKind, RoundState};
use crate::cards::Deck;
use crate::error::Error;
use crate::events::{HandEvent, HandEventKind, HandHistory};
use crate::eval;
use crate::money::Chips;
use crate::pot::{self, PotState};
use crate::rng::RandomSource;
use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct RebuyOptions {
    pub min_rebuy: Chips,
    pub max_rebuy: Option<Chips>,
    pub allow_during_hand: bool,
}

impl RebuyOptions {
    pub fn defaults(big_blind: Chips) -> Self {
        Self {
            min_rebuy: big_blind,
            max_rebuy: None,
            allow_during_hand: false,
        }
    }
}

/// The public façade over a single table. Owns players, the live deck,
/// the event log, and the random source driving shuffles.
pub struct Table {
    config: TableConfig,
    rebuy_options: RebuyOptions,
    rng: Box<dyn RandomSource>,
    seats: Vec<Option<PlayerState>>,
    phase: TablePhase,
    hand_id: u64,
    dealer_seat: Option<usize>,
    community_cards: Vec<crate::cards::Card>,
    pots: Vec<PotState>,
    current_player_id: Option<PlayerId>,
    deck: Option<Deck>,
    round: Option<RoundState>,
    contributed: HashMap<PlayerId, Chips>,
    current_events: Vec<HandEvent>,
    event_seq: u64,
    hand_start_marker: u64,
    last_history: Option<HandHistory>,
}

impl Table {
    pub fn new(config: TableConfig, rng: Box<dyn RandomSource>) -> Self {
        let rebuy_options = RebuyOptions::defaults(config.big_blind);
        let max_players = config.max_players;
        Self {
            config,
            rebuy_options,
            rng,
            seats: vec![None; max_players],
            phase: TablePhase::Idle,
            hand_id: 0,
            dealer_seat: None,
            community_cards: Vec::new(),
            pots: Vec::new(),
            current_player_id: None,
            deck: None,
            round: None,
            contributed: HashMap::new(),
            current_events: Vec::new(),
            event_seq: 0,
            hand_start_marker: 0,
            last_history: None,
        }
    }

    pub fn with_rebuy_options(mut self, options: RebuyOptions) -> Self {
        self.rebuy_options = options;
        self
    }

    // --- façade -----------------------------------------------------

    pub fn get_state(&self) -> TableState {
        TableState {
            phase: self.phase,
            hand_id: self.hand_id,
            dealer_seat: self.dealer_seat,
            players: self.seats.iter().flatten().cloned().collect(),
            community_cards: self.community_cards.clone(),
            pots: self.pots.clone(),
            current_player_id: self.current_player_id.clone(),
        }
    }

    pub fn get_config(&self) -> &TableConfig {
        &self.config
    }

    pub fn get_current_hand_history(&self) -> Option<HandHistory> {
        if self.phase == TablePhase::Idle {
            return None;
        }
        Some(HandHistory {
            hand_id: self.hand_id,
            table_config: self.config.clone(),
            events: self.current_events.clone(),
            start_time: self.hand_start_marker,
            end_time: None,
        })
    }

    pub fn get_last_hand_history(&self) -> Option<HandHistory> {
        self.last_history.clone()
    }

    pub fn legal_actions(&self, id: &PlayerId) -> Vec<ActionKind> {
        let Some(round) = &self.round else { return Vec::new() };
        betting::legal_actions(&self.seats, round, self.current_player_id.as_ref(), id)
    }

    pub fn seat_player(&mut self, id: PlayerId, buy_in: Chips) -> Result<TableState, Error> {
        if self.seats.iter().flatten().any(|p| p.id == id) {
            return Err(Error::SeatOccupied(id.to_string()));
        }
        if buy_in < self.config.big_blind {
            return Err(Error::InsufficientStack(format!(
                "buy-in {buy_in} below big blind {}",
                self.config.big_blind
            )));
        }
        let seat = self
            .seats
            .iter()
            .position(|s| s.is_none())
            .ok_or(Error::TableFull)?;
        self.seats[seat] = Some(PlayerState::new(id, seat, buy_in));
        Ok(self.get_state())
    }

    pub fn remove_player(&mut self, id: &PlayerId) -> Result<TableState, Error> {
        let seat = self
            .seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|p| &p.id == id))
            .ok_or_else(|| Error::PlayerNotFound(id.to_string()))?;
        if self.phase == TablePhase::Idle {
            self.seats[seat] = None;
            return Ok(self.get_state());
        }
        let player = self.seats[seat].as_mut().unwrap();
        if !player.committed.is_zero() {
            return Err(Error::InvalidState(format!(
                "cannot remove {id} with chips committed"
            )));
        }
        player.status = PlayerStatus::SittingOut;
        Ok(self.get_state())
    }

    pub fn rebuy_player(&mut self, id: &PlayerId, amount: Chips) -> Result<TableState, Error> {
        if self.phase != TablePhase::Idle && !self.rebuy_options.allow_during_hand {
            return Err(Error::InvalidState("rebuy not allowed mid-hand".into()));
        }
        if amount < self.rebuy_options.min_rebuy {
            return Err(Error::InsufficientStack(format!(
                "rebuy {amount} below minimum {}",
                self.rebuy_options.min_rebuy
            )));
        }
        if let Some(max) = self.rebuy_options.max_rebuy {
            if amount > max {
                return Err(Error::InsufficientStack(format!(
                    "rebuy {amount} exceeds maximum {max}"
                )));
            }
        }
        let player = self
            .seats
            .iter_mut()
            .flatten()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::PlayerNotFound(id.to_string()))?;
        player.stack = player.stack.add(amount);
        Ok(self.get_state())
    }

    // --- hand lifecycle -------------------------------------------------

    pub fn start_hand(&mut self) -> Result<TableState, Error> {
        if self.phase != TablePhase::Idle {
            return Err(Error::GameAlreadyStarted);
        }
        let eligible_count = self
            .seats
            .iter()
            .flatten()
            .filter(|p| matches!(p.status, PlayerStatus::Active | PlayerStatus::AllIn))
            .count();
        if eligible_count < self.config.min_players {
            return Err(Error::NotEnoughPlayers {
                have: eligible_count,
                need: self.config.min_players,
            });
        }

        self.current_events.clear();
        self.event_seq = 0;
        self.hand_start_marker = self.hand_id + 1;

        self.advance_dealer();
        self.reset_for_new_hand();

        let dealer_seat = self
            .dealer_seat
            .ok_or_else(|| Error::InternalError("dealer seat not assigned".into()))?;

        self.phase = TablePhase::Preflop;
        self.hand_id += 1;

        let starting_seats: Vec<(PlayerId, usize, Chips)> = self
            .eligible_seats_ascending()
            .into_iter()
            .map(|seat| {
                let player = self.seats[seat].as_ref().unwrap();
                (player.id.clone(), seat, player.stack)
            })
            .collect();
        self.record(HandEventKind::HandStarted {
            hand_id: self.hand_id,
            dealer_seat: self.dealer_seat,
            seats: starting_seats,
        });
        info!("hand {} started, dealer seat {:?}", self.hand_id, self.dealer_seat);

        let mut contributions: Vec<(PlayerId, Chips)> = Vec::new();

        if let Some(ante) = self.config.ante {
            for seat in self.eligible_seats_ascending() {
                let moved = self.post_forced_bet(seat, ante);
                if let Some(moved) = moved {
                    contributions.push((self.seats[seat].as_ref().unwrap().id.clone(), moved));
                }
            }
        }

        let heads_up = eligible_count == 2;

        let (sb_seat, bb_seat) = if heads_up {
            let other = self
                .first_active_from(dealer_seat + 1)
                .and_then(|id| self.seat_of(&id))
                .ok_or_else(|| Error::InternalError("heads-up opponent seat not found".into()))?;
            (dealer_seat, other)
        } else {
            let sb = self
                .first_active_from(dealer_seat + 1)
                .and_then(|id| self.seat_of(&id))
                .ok_or_else(|| Error::InternalError("no small blind seat found".into()))?;
            let bb = self
                .first_active_from(sb + 1)
                .and_then(|id| self.seat_of(&id))
                .ok_or_else(|| Error::InternalError("no big blind seat found".into()))?;
            (sb, bb)
        };

        if let Some(moved) = self.post_forced_bet(sb_seat, self.config.small_blind) {
            contributions.push((self.seats[sb_seat].as_ref().unwrap().id.clone(), moved));
        }
        if let Some(moved) = self.post_forced_bet(bb_seat, self.config.big_blind) {
            contributions.push((self.seats[bb_seat].as_ref().unwrap().id.clone(), moved));
        }

        let mut straddle_seat = None;
        if let Some(straddle) = self.config.straddle {
            if eligible_count >= 3 {
                if let Some(seat) = self.first_active_from(bb_seat + 1).and_then(|id| self.seat_of(&id)) {
                    if let Some(moved) = self.post_forced_bet(seat, straddle) {
                        contributions.push((self.seats[seat].as_ref().unwrap().id.clone(), moved));
                        straddle_seat = Some(seat);
                    }
                }
            }
        }

        self.record(HandEventKind::BlindsPosted { contributions });

        self.pots = self.layer_from_contributed();

        let mut deck = Deck::new();
        deck.shuffle(self.rng.as_mut())?;
        let dealt_seats = self.eligible_seats_ascending();
        let pairs = deck.deal_hole_cards(dealt_seats.len())?;
        let mut dealt_hole_cards = Vec::with_capacity(dealt_seats.len());
        for (seat, pair) in dealt_seats.iter().zip(pairs) {
            self.seats[*seat].as_mut().unwrap().hole_cards = Some(pair);
            let id = self.seats[*seat].as_ref().unwrap().id.clone();
            dealt_hole_cards.push((id, pair.0, pair.1));
        }
        self.deck = Some(deck);
        self.record(HandEventKind::CardsDealt { hole_cards: dealt_hole_cards });

        let first_to_act = if heads_up {
            self.first_active_from(dealer_seat)
        } else if let Some(straddle_seat) = straddle_seat {
            self.first_active_from(straddle_seat + 1)
        } else {
            self.first_active_from(bb_seat + 1)
        };
        self.current_player_id = first_to_act;
        self.round = Some(RoundState::new(self.config.big_blind));

        self.settle_after_action()?;
        Ok(self.get_state())
    }

    pub fn apply_action(&mut self, id: &PlayerId, action: Action) -> Result<TableState, Error> {
        if !matches!(
            self.phase,
            TablePhase::Preflop | TablePhase::Flop | TablePhase::Turn | TablePhase::River
        ) {
            return Err(Error::GameNotStarted);
        }
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| Error::InternalError("betting round missing mid-hand".into()))?;

        let moved = betting::apply(&mut self.seats, round, &mut self.current_player_id, id, action.clone())?;
        *self.contributed.entry(id.clone()).or_insert(Chips::ZERO) = self
            .contributed
            .get(id)
            .copied()
            .unwrap_or(Chips::ZERO)
            .add(moved);

        self.record(HandEventKind::ActionTaken {
            player: id.clone(),
            action,
            moved,
        });

        self.settle_after_action()?;
        Ok(self.get_state())
    }

    /// Consults round-completion after every action/hand-start and drives
    /// street advancement, uncontested wins, and showdown.
    fn settle_after_action(&mut self) -> Result<(), Error> {
        loop {
            let remaining_in_hand = self
                .seats
                .iter()
                .flatten()
                .filter(|p| matches!(p.status, PlayerStatus::Active | PlayerStatus::AllIn))
                .count();
            if remaining_in_hand <= 1 {
                self.finish_uncontested()?;
                return Ok(());
            }

            if let Some(round) = &self.round {
                if !betting::is_round_complete(&self.seats, round) {
                    return Ok(());
                }
            }

            if self.phase == TablePhase::River {
                self.consolidate_street();
                self.phase = TablePhase::Showdown;
                self.current_player_id = None;
                self.round = None;
                self.showdown()?;
                return Ok(());
            }

            self.consolidate_street();
            let n = match self.phase {
                TablePhase::Preflop => 3,
                TablePhase::Flop | TablePhase::Turn => 1,
                _ => return Err(Error::InternalError("unexpected phase advancing street".into())),
            };
            let cards = self
                .deck
                .as_mut()
                .ok_or_else(|| Error::InternalError("no live deck mid-hand".into()))?
                .deal(n)?;
            self.community_cards.extend(cards);
            self.phase = match self.phase {
                TablePhase::Preflop => TablePhase::Flop,
                TablePhase::Flop => TablePhase::Turn,
                TablePhase::Turn => TablePhase::River,
                other => other,
            };
            self.record(HandEventKind::StreetEnded {
                phase: self.phase,
                community_cards: self.community_cards.clone(),
            });
            debug!("hand {} advanced to {:?}", self.hand_id, self.phase);

            let can_act = self
                .seats
                .iter()
                .flatten()
                .filter(|p| p.status == PlayerStatus::Active && !p.stack.is_zero())
                .count();
            if can_act <= 1 {
                continue;
            }
            let dealer = self.dealer_seat.unwrap_or(0);
            self.current_player_id = self.first_active_from(dealer + 1);
            self.round = Some(RoundState::new(self.config.big_blind));
            return Ok(());
        }
    }

    fn consolidate_street(&mut self) {
        for player in self.seats.iter_mut().flatten() {
            let entry = self.contributed.entry(player.id.clone()).or_insert(Chips::ZERO);
            *entry = entry.add(player.committed);
            player.committed = Chips::ZERO;
        }
        self.pots = self.layer_from_contributed();
    }

    /// Builds a pot snapshot from chips already swept (`self.contributed`)
    /// plus whatever is still `committed` in the live betting round — so
    /// this doubles as both the street-end consolidation (called after
    /// `committed` has been folded in and zeroed) and the initial
    /// post-blinds pot preview (called while blinds are still `committed`
    /// and nothing has been swept yet).
    fn layer_from_contributed(&self) -> Vec<PotState> {
        let rows: Vec<(PlayerId, Chips, bool)> = self
            .seats
            .iter()
            .flatten()
            .filter_map(|p| {
                let swept = self.contributed.get(&p.id).copied().unwrap_or(Chips::ZERO);
                let amount = swept.add(p.committed);
                if amount.is_zero() {
                    return None;
                }
                let eligible = p.status != PlayerStatus::Folded;
                Some((p.id.clone(), amount, eligible))
            })
            .collect();
        pot::layer_pots(&rows)
    }

    fn finish_uncontested(&mut self) -> Result<(), Error> {
        self.consolidate_street();
        let winner = self
            .seats
            .iter()
            .flatten()
            .find(|p| matches!(p.status, PlayerStatus::Active | PlayerStatus::AllIn))
            .map(|p| p.id.clone())
            .ok_or_else(|| Error::InternalError("no remaining player at hand end".into()))?;

        let mut payouts = Vec::new();
        for pot in &self.pots {
            let winner_state = self.seats.iter_mut().flatten().find(|p| p.id == winner);
            if let Some(player) = winner_state {
                player.stack = player.stack.add(pot.total);
                payouts.push((winner.clone(), pot.total));
            }
        }
        self.record(HandEventKind::PotDistributed { payouts, rake: Chips::ZERO });
        self.end_hand();
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), Error> {
        let contenders: Vec<(PlayerId, [crate::cards::Card; 2])> = self
            .seats
            .iter()
            .flatten()
            .filter(|p| matches!(p.status, PlayerStatus::Active | PlayerStatus::AllIn))
            .filter_map(|p| p.hole_cards.map(|(a, b)| (p.id.clone(), [a, b])))
            .collect();

        let result = eval::determine_winners(&contenders, &self.community_cards)?;
        let mut ranked = result.ranked.clone();
        let seat_of: HashMap<PlayerId, usize> = self
            .seats
            .iter()
            .flatten()
            .map(|p| (p.id.clone(), p.seat))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| seat_of.get(&a.0).cmp(&seat_of.get(&b.0)))
        });

        self.record(HandEventKind::Showdown { ranked: ranked.clone() });

        let rake_config = self.config.rake.map(|r| r.to_rake_config());
        let distribution = pot::distribute_all_pots(&self.pots, rake_config.as_ref(), &ranked);
        if !distribution.forfeited.is_zero() {
            warn!(
                "hand {} forfeited {} chips with no eligible winner",
                self.hand_id, distribution.forfeited
            );
        }

        for (id, amount) in &distribution.payouts {
            if let Some(player) = self.seats.iter_mut().flatten().find(|p| &p.id == id) {
                player.stack = player.stack.add(*amount);
            }
        }
        self.record(HandEventKind::PotDistributed {
            payouts: distribution.payouts,
            rake: distribution.rake,
        });
        self.end_hand();
        Ok(())
    }

    fn end_hand(&mut self) {
        self.record(HandEventKind::HandEnded { hand_id: self.hand_id });
        self.last_history = Some(HandHistory {
            hand_id: self.hand_id,
            table_config: self.config.clone(),
            events: std::mem::take(&mut self.current_events),
            start_time: self.hand_start_marker,
            end_time: Some(self.event_seq),
        });
        self.phase = TablePhase::Idle;
        self.community_cards.clear();
        self.pots.clear();
        self.current_player_id = None;
        self.deck = None;
        self.round = None;
        self.contributed.clear();
        for player in self.seats.iter_mut().flatten() {
            player.hole_cards = None;
        }
        info!("hand {} ended", self.hand_id);
    }

    // --- seat-order helpers -------------------------------------------

    fn advance_dealer(&mut self) {
        let next = match self.dealer_seat {
            None => self.eligible_seats_ascending().into_iter().next(),
            Some(current) => self
                .first_active_or_allin_from(current + 1)
                .and_then(|id| self.seat_of(&id)),
        };
        self.dealer_seat = next;
    }

    fn reset_for_new_hand(&mut self) {
        for player in self.seats.iter_mut().flatten() {
            if matches!(player.status, PlayerStatus::Active | PlayerStatus::AllIn) {
                player.status = PlayerStatus::Active;
            }
            player.committed = Chips::ZERO;
            player.hole_cards = None;
        }
        self.pots.clear();
        self.community_cards.clear();
        self.contributed.clear();
    }

    fn eligible_seats_ascending(&self) -> Vec<usize> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                s.as_ref()
                    .filter(|p| matches!(p.status, PlayerStatus::Active | PlayerStatus::AllIn))
                    .map(|_| i)
            })
            .collect()
    }

    fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.seats.iter().flatten().find(|p| &p.id == id).map(|p| p.seat)
    }

    fn first_active_from(&self, start: usize) -> Option<PlayerId> {
        let len = self.seats.len();
        for step in 0..len {
            let seat = (start + step) % len;
            if let Some(Some(p)) = self.seats.get(seat) {
                if p.status == PlayerStatus::Active && !p.stack.is_zero() {
                    return Some(p.id.clone());
                }
            }
        }
        None
    }

    fn first_active_or_allin_from(&self, start: usize) -> Option<PlayerId> {
        let len = self.seats.len();
        for step in 0..len {
            let seat = (start + step) % len;
            if let Some(Some(p)) = self.seats.get(seat) {
                if matches!(p.status, PlayerStatus::Active | PlayerStatus::AllIn) {
                    return Some(p.id.clone());
                }
            }
        }
        None
    }

    /// Deducts `amount` from the seat, clamping to the stack (short ->
    /// AllIn). Returns the amount actually moved, or `None` if the seat
    /// has no chips to post.
    fn post_forced_bet(&mut self, seat: usize, amount: Chips) -> Option<Chips> {
        let player = self.seats[seat].as_mut()?;
        if player.stack.is_zero() {
            return None;
        }
        let moved = amount.min(player.stack);
        player.stack = player.stack.saturating_sub(moved);
        player.committed = player.committed.add(moved);
        if player.stack.is_zero() {
            player.status = PlayerStatus::AllIn;
        }
        Some(moved)
    }

    fn record(&mut self, kind: HandEventKind) {
        self.event_seq += 1;
        self.current_events.push(HandEvent {
            timestamp: self.event_seq,
            kind,
        });
    }
}
