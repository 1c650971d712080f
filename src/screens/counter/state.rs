use crate::state::mvi::State;

/// Plain counter value.
pub type Count = i64;

impl State for Count {}
