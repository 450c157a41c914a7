pub mod action;
pub mod applier;
pub mod round;
pub mod validator;

pub use action::{Action, ActionKind};
pub use applier::apply;
pub use round::{current_bet, is_round_complete, RoundState};
pub use validator::{call_amount, legal_actions, validate};
