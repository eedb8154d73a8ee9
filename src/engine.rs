//! The rules engine.
//!
//! `Game` owns the board, the players and the turn state, and is the only
//! place state changes. Every public operation validates first and mutates
//! second, so a rejected call leaves the game untouched.
//!
//! Notifications are queued while an operation runs and delivered before it
//! returns. AI players react to the same notifications from inside the
//! delivery loop, which drains the queue until it is empty. A chain of AI
//! moves therefore runs iteratively rather than by recursion.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::ai::{choose_attack, choose_deploy, choose_fortify, draft_candidates, next_draft_target};
use crate::board::{Continent, ContinentId, Country, CountryId, WorldMap};
use crate::cards::{RiskCard, RiskCardDeck};
use crate::combat::{AttackOutcome, Battle, CombatResolver};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{GameEvent, Listeners};
use crate::player::{Player, PlayerId};
use crate::rules::{
    armies_to_allocate, draft_allotment, is_valid_trade_in, trade_in_value, Phase,
    TurnPhaseMachine, MIN_DRAFT,
};

/// Seats below this reject `start_game` quietly.
pub const MIN_SEATS: usize = 2;

/// Seats above this reject `start_game` quietly.
pub const MAX_SEATS: usize = 6;

pub struct Game {
    map: WorldMap,
    players: Vec<Player>,
    /// Front is the current player.
    rotation: VecDeque<PlayerId>,
    phases: TurnPhaseMachine,
    /// Deploy: armies left to place across all players. Draft onward: the
    /// current player's remaining draft.
    available_to_draft: u32,
    unoccupied: BTreeSet<CountryId>,
    deck: RiskCardDeck,
    sets_traded_in: u32,
    captured_this_turn: bool,
    turns_completed: u32,
    config: GameConfig,
    rng: SmallRng,
    listeners: Listeners,
    combat: Option<Box<dyn CombatResolver>>,
    pending: VecDeque<GameEvent>,
    dispatching: bool,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.players.len())
            .field("current", &self.current_player())
            .field("phase", &self.phases.phase())
            .field("started", &self.phases.is_started())
            .field("available_to_draft", &self.available_to_draft)
            .field("turns_completed", &self.turns_completed)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(map: WorldMap, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Game {
            map,
            players: Vec::new(),
            rotation: VecDeque::new(),
            phases: TurnPhaseMachine::new(),
            available_to_draft: 0,
            unoccupied: BTreeSet::new(),
            deck: RiskCardDeck::from_cards(Vec::new()),
            sets_traded_in: 0,
            captured_this_turn: false,
            turns_completed: 0,
            config,
            rng,
            listeners: Listeners::new(),
            combat: None,
            pending: VecDeque::new(),
            dispatching: false,
        }
    }

    /// Registers a listener for every later notification.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.subscribe(listener);
    }

    pub fn set_combat_resolver(&mut self, resolver: impl CombatResolver + 'static) {
        self.combat = Some(Box::new(resolver));
    }

    // --- Setup ---

    pub fn create_player(&mut self, name: &str) -> PlayerId {
        self.add_player(name, false)
    }

    /// Seats a player whose moves are chosen by the engine.
    pub fn create_ai_player(&mut self, name: &str) -> PlayerId {
        self.add_player(name, true)
    }

    fn add_player(&mut self, name: &str, is_ai: bool) -> PlayerId {
        let id = PlayerId(self.players.len());
        self.players.push(Player::new(id, name, is_ai));
        self.rotation.push_back(id);
        info!(player = %id, name, is_ai, "player added");
        self.emit(GameEvent::PlayerAdded(id));
        self.dispatch();
        id
    }

    /// Starts initial deployment.
    ///
    /// Returns `Ok(false)` when the seat count is outside `MIN_SEATS..=MAX_SEATS`
    /// or the map has fewer countries than seats. Two seats pass the seat
    /// check but have no allocation and fail with `TooFewPlayers`. All of
    /// these leave the game unstarted.
    pub fn start_game(&mut self) -> Result<bool, GameError> {
        if self.phases.is_started() {
            return Err(GameError::AlreadyStarted);
        }
        let seats = self.players.len();
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            warn!(seats, "can't start game with this many players");
            return Ok(false);
        }
        let pool = armies_to_allocate(seats)?;
        let countries = self.map.country_count();
        if countries < seats {
            warn!(seats, countries, "map too small for every player to claim a country");
            return Ok(false);
        }

        self.available_to_draft = pool;
        self.unoccupied = self.map.country_ids().collect();
        self.sets_traded_in = 0;
        self.captured_this_turn = false;
        self.turns_completed = 0;
        self.deck = RiskCardDeck::build(&self.map, self.config.wild_cards, &mut self.rng);
        self.enter_next_phase();
        info!(seats, pool, cards = self.deck.len(), "game started");

        if let Some(current) = self.current_player() {
            self.emit(GameEvent::CurrentPlayerChanged(current));
        }
        self.dispatch();
        Ok(true)
    }

    /// Makes the player at creation index `index` (modulo the seat count)
    /// current, keeping the cyclic order.
    pub fn first_player(&mut self, index: usize) -> Result<PlayerId, GameError> {
        if self.rotation.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let target = PlayerId(index % self.players.len());
        while self.rotation.front() != Some(&target) {
            self.rotation.rotate_left(1);
        }
        info!(player = %target, "first player chosen");
        self.emit(GameEvent::CurrentPlayerChanged(target));
        self.dispatch();
        Ok(target)
    }

    // --- Turn flow ---

    /// Moves to the next phase. Leaving Fortify ends the turn: the player
    /// draws a card if they captured a country, and play passes on.
    pub fn next_phase(&mut self) -> Result<Phase, GameError> {
        if !self.phases.is_started() {
            return Err(GameError::NotStarted);
        }
        if self.phases.phase() == Phase::Deploy {
            return Err(GameError::DeployInProgress);
        }
        let phase = self.enter_next_phase();
        self.dispatch();
        Ok(phase)
    }

    fn enter_next_phase(&mut self) -> Phase {
        let transition = self.phases.advance();
        if transition.turn_ended {
            self.end_turn();
        }
        if transition.phase == Phase::Draft {
            self.available_to_draft = self.calculate_available_to_draft();
        }
        debug!(phase = %transition.phase, available = self.available_to_draft, "phase changed");
        self.emit(GameEvent::PhaseChanged(transition.phase));
        transition.phase
    }

    fn end_turn(&mut self) {
        if let Some(current) = self.current_player() {
            if self.captured_this_turn {
                match self.deck.draw() {
                    Ok(card) => {
                        debug!(player = %current, ?card, "card drawn");
                        self.players[current.0].add_card(card);
                    }
                    Err(e) => warn!(player = %current, error = %e, "no card awarded"),
                }
            }
        }
        self.captured_this_turn = false;
        self.turns_completed += 1;
        self.advance_player();
    }

    fn advance_player(&mut self) {
        if self.rotation.is_empty() {
            return;
        }
        self.rotation.rotate_left(1);
        if let Some(next) = self.current_player() {
            self.emit(GameEvent::CurrentPlayerChanged(next));
        }
    }

    // --- Player actions ---

    /// Places one army during initial deployment, then passes to the next
    /// player. Unoccupied countries must all be claimed before anyone
    /// reinforces their own. Placing the last army starts the first Draft.
    pub fn deploy(&mut self, player: PlayerId, country: CountryId) -> Result<(), GameError> {
        self.require_phase(Phase::Deploy)?;
        self.require_current(player)?;
        let target = self.country(country)?;
        let claiming = !self.unoccupied.is_empty();
        if claiming {
            if target.owner().is_some() {
                return Err(GameError::CountryOccupied(country));
            }
        } else if target.owner() != Some(player) {
            return Err(GameError::NotOwner { player, country });
        }
        if self.available_to_draft == 0 {
            return Err(GameError::ExceedsDraftPool {
                requested: 1,
                available: 0,
            });
        }

        if let Some(c) = self.map.country_mut(country) {
            c.set_owner(player);
            c.add_armies(1);
        }
        if claiming {
            self.unoccupied.remove(&country);
        }
        self.available_to_draft -= 1;
        debug!(%player, %country, left = self.available_to_draft, "deployed");

        self.advance_player();
        if self.available_to_draft == 0 {
            info!("initial deployment complete");
            self.enter_next_phase();
        }
        self.dispatch();
        Ok(())
    }

    /// Adds `amount` armies from the draft pool to a country the player holds.
    pub fn draft(&mut self, player: PlayerId, country: CountryId, amount: u32) -> Result<(), GameError> {
        self.require_phase(Phase::Draft)?;
        self.require_current(player)?;
        if self.country(country)?.owner() != Some(player) {
            return Err(GameError::NotOwner { player, country });
        }
        if amount > self.available_to_draft {
            return Err(GameError::ExceedsDraftPool {
                requested: amount,
                available: self.available_to_draft,
            });
        }

        if let Some(c) = self.map.country_mut(country) {
            c.add_armies(amount);
        }
        self.available_to_draft -= amount;
        debug!(%player, %country, amount, left = self.available_to_draft, "drafted");
        Ok(())
    }

    /// Trades a set of three cards from the current player's hand for
    /// extra armies in the Draft pool. Returns the armies gained.
    pub fn trade_in_cards(&mut self, cards: &[RiskCard]) -> Result<u32, GameError> {
        self.require_phase(Phase::Draft)?;
        if !is_valid_trade_in(cards) {
            return Err(GameError::InvalidTradeIn);
        }
        let current = self.current_player().ok_or(GameError::NoPlayers)?;
        if !self.players[current.0].holds(cards) {
            return Err(GameError::CardsNotInHand);
        }

        let bonus = trade_in_value(cards, self.sets_traded_in, &self.map, current);
        self.players[current.0].remove_cards(cards);
        self.available_to_draft += bonus;
        self.sets_traded_in += 1;
        info!(player = %current, bonus, sets = self.sets_traded_in, "cards traded in");
        Ok(bonus)
    }

    /// Moves `count` armies between two adjacent countries the player holds.
    ///
    /// Returns `Ok(false)` and changes nothing when the move is illegal:
    /// either end not the player's, not adjacent, or `count` not leaving at
    /// least one army behind.
    pub fn fortify(
        &mut self,
        player: PlayerId,
        origin: CountryId,
        destination: CountryId,
        count: u32,
    ) -> Result<bool, GameError> {
        self.require_phase(Phase::Fortify)?;
        self.require_current(player)?;
        let from = self.country(origin)?;
        let to = self.country(destination)?;

        if from.owner() != Some(player) || to.owner() != Some(player) {
            debug!(%player, %origin, %destination, "fortify rejected: not owned");
            return Ok(false);
        }
        if origin == destination || !from.is_neighbour(destination) {
            debug!(%player, %origin, %destination, "fortify rejected: not adjacent");
            return Ok(false);
        }
        if count == 0 || count >= from.armies() {
            debug!(%player, %origin, count, armies = from.armies(), "fortify rejected: army count");
            return Ok(false);
        }

        if let Some(c) = self.map.country_mut(origin) {
            c.remove_armies(count);
        }
        if let Some(c) = self.map.country_mut(destination) {
            c.add_armies(count);
        }
        debug!(%player, %origin, %destination, count, "fortified");
        Ok(true)
    }

    /// Fights one battle from `origin` into an adjacent enemy `target`.
    ///
    /// The installed `CombatResolver` reports the losses. If the target is
    /// emptied it changes hands and every surviving attacker moves in.
    pub fn attack(
        &mut self,
        player: PlayerId,
        origin: CountryId,
        target: CountryId,
    ) -> Result<AttackOutcome, GameError> {
        self.require_phase(Phase::Attack)?;
        self.require_current(player)?;
        let (origin_armies, target_armies) = {
            let from = self.country(origin)?;
            let to = self.country(target)?;
            if from.owner() != Some(player) {
                return Err(GameError::NotOwner { player, country: origin });
            }
            if to.owner() == Some(player) {
                return Err(GameError::FriendlyTarget(target));
            }
            if !from.is_neighbour(target) {
                return Err(GameError::NotAdjacent { origin, target });
            }
            if from.armies() < 2 {
                return Err(GameError::TooFewArmies {
                    country: origin,
                    armies: from.armies(),
                });
            }
            (from.armies(), to.armies())
        };

        let resolver = self.combat.as_mut().ok_or(GameError::NoCombatResolver)?;
        let battle = Battle::between(origin_armies, target_armies);
        let mut losses = battle.clamp(resolver.resolve(battle));

        let captured = target_armies <= losses.defender_losses;
        if captured && losses.attacker_losses == battle.attackers {
            // An emptied country needs at least one army to move in.
            losses.attacker_losses = battle.attackers - 1;
        }
        let survivors = battle.attackers - losses.attacker_losses;

        if let Some(c) = self.map.country_mut(origin) {
            c.remove_armies(losses.attacker_losses);
            if captured {
                c.remove_armies(survivors);
            }
        }
        if let Some(c) = self.map.country_mut(target) {
            if captured {
                c.set_owner(player);
                c.set_armies(survivors);
            } else {
                c.remove_armies(losses.defender_losses);
            }
        }
        if captured {
            self.captured_this_turn = true;
            info!(%player, %origin, %target, survivors, "country captured");
        } else {
            debug!(
                %player,
                %origin,
                %target,
                attacker_losses = losses.attacker_losses,
                defender_losses = losses.defender_losses,
                "battle fought"
            );
        }

        Ok(AttackOutcome {
            battle,
            losses,
            captured,
        })
    }

    /// Puts a card straight into a player's hand, bypassing the deck.
    ///
    /// A host hook for scenario setup and tests. No phase or turn checks
    /// apply; normal play only earns cards at the end of a capturing turn.
    #[doc(hidden)]
    pub fn give_card(&mut self, player: PlayerId, card: RiskCard) -> Result<(), GameError> {
        let p = self
            .players
            .get_mut(player.0)
            .ok_or(GameError::UnknownPlayer(player))?;
        p.add_card(card);
        Ok(())
    }

    // --- Derived values ---

    /// Armies the current player would receive for a fresh Draft.
    pub fn calculate_available_to_draft(&self) -> u32 {
        match self.current_player() {
            Some(player) => draft_allotment(&self.map, player),
            None => MIN_DRAFT,
        }
    }

    /// Total armies handed out during initial deployment for the current
    /// seat count.
    pub fn calculate_armies_to_allocate(&self) -> Result<u32, GameError> {
        armies_to_allocate(self.players.len())
    }

    // --- Accessors ---

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn country(&self, id: CountryId) -> Result<&Country, GameError> {
        self.map.country(id).ok_or(GameError::UnknownCountry(id))
    }

    pub fn countries(&self) -> impl Iterator<Item = &Country> + '_ {
        self.map.countries()
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.map.continent(id)
    }

    pub fn continents(&self) -> impl Iterator<Item = &Continent> + '_ {
        self.map.continents()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id.0).ok_or(GameError::UnknownPlayer(id))
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.rotation.front().copied()
    }

    /// Seats in turn order, starting with the current player.
    pub fn turn_order(&self) -> Vec<PlayerId> {
        self.rotation.iter().copied().collect()
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase()
    }

    pub fn is_started(&self) -> bool {
        self.phases.is_started()
    }

    pub fn available_to_draft(&self) -> u32 {
        self.available_to_draft
    }

    pub fn unoccupied(&self) -> &BTreeSet<CountryId> {
        &self.unoccupied
    }

    pub fn sets_traded_in(&self) -> u32 {
        self.sets_traded_in
    }

    pub fn captured_this_turn(&self) -> bool {
        self.captured_this_turn
    }

    pub fn turns_completed(&self) -> u32 {
        self.turns_completed
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // --- Checks ---

    fn require_phase(&self, expected: Phase) -> Result<(), GameError> {
        if !self.phases.is_started() {
            return Err(GameError::NotStarted);
        }
        let actual = self.phases.phase();
        if actual != expected {
            return Err(GameError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    fn require_current(&self, player: PlayerId) -> Result<(), GameError> {
        if player.0 >= self.players.len() {
            return Err(GameError::UnknownPlayer(player));
        }
        if self.current_player() != Some(player) {
            return Err(GameError::NotCurrentPlayer(player));
        }
        Ok(())
    }

    // --- Notification delivery ---

    fn emit(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Drains the event queue. Re-entrant calls return at once and leave
    /// their events to the outer loop.
    fn dispatch(&mut self) {
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        while let Some(event) = self.pending.pop_front() {
            self.listeners.notify(&event);
            self.react(event);
        }
        self.dispatching = false;
    }

    fn react(&mut self, event: GameEvent) {
        let Some(current) = self.current_player() else {
            return;
        };
        if !self.players[current.0].is_ai() || !self.phases.is_started() {
            return;
        }
        match event {
            GameEvent::CurrentPlayerChanged(player)
                if player == current && self.phases.phase() == Phase::Deploy =>
            {
                self.ai_deploy(current)
            }
            // Stale announcements (the phase moved on since) are skipped.
            GameEvent::PhaseChanged(phase) if phase == self.phases.phase() => {
                self.ai_phase(current, phase)
            }
            _ => {}
        }
    }

    // --- AI turns ---

    fn ai_deploy(&mut self, player: PlayerId) {
        let Some(target) = choose_deploy(&self.map, &self.unoccupied, player, &mut self.rng) else {
            warn!(%player, "AI has nowhere to deploy");
            return;
        };
        if let Err(e) = self.deploy(player, target) {
            warn!(%player, country = %target, error = %e, "AI deploy rejected");
        }
    }

    fn ai_phase(&mut self, player: PlayerId, phase: Phase) {
        match phase {
            Phase::Deploy => return,
            Phase::Draft => self.ai_draft(player),
            Phase::Attack => self.ai_attack(player),
            Phase::Fortify => self.ai_fortify(player),
        }
        if !self.config.ai_auto_advance {
            return;
        }
        if let Some(max) = self.config.max_turns {
            if self.turns_completed >= max {
                debug!(turns = self.turns_completed, "turn limit reached");
                return;
            }
        }
        if let Err(e) = self.next_phase() {
            warn!(%player, error = %e, "AI could not advance phase");
        }
    }

    fn ai_draft(&mut self, player: PlayerId) {
        let candidates = draft_candidates(&self.map, player, self.config.ai_draft_candidates);
        while self.available_to_draft > 0 {
            let Some(target) = next_draft_target(&self.map, &candidates) else {
                debug!(%player, "AI has no draft candidates");
                break;
            };
            if let Err(e) = self.draft(player, target, 1) {
                warn!(%player, country = %target, error = %e, "AI draft rejected");
                break;
            }
        }
    }

    fn ai_attack(&mut self, player: PlayerId) {
        if self.combat.is_none() {
            debug!(%player, "no combat resolver, AI skips attacking");
            return;
        }
        for _ in 0..self.config.max_ai_attacks {
            let Some(plan) = choose_attack(&self.map, player) else {
                break;
            };
            if let Err(e) = self.attack(player, plan.origin, plan.target) {
                warn!(%player, origin = %plan.origin, target = %plan.target, error = %e, "AI attack rejected");
                break;
            }
        }
    }

    fn ai_fortify(&mut self, player: PlayerId) {
        let Some(plan) = choose_fortify(&self.map, player, &mut self.rng) else {
            debug!(%player, "AI has nothing to fortify");
            return;
        };
        match self.fortify(player, plan.origin, plan.destination, plan.count) {
            Ok(true) => {}
            Ok(false) => debug!(%player, ?plan, "AI fortify not allowed"),
            Err(e) => warn!(%player, error = %e, "AI fortify rejected"),
        }
    }
}
