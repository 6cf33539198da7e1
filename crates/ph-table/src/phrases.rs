//! Things a philosopher might say.

use ph_core::{AgentId, AgentRng};

pub const PHRASES: &[&str] = &[
    "Eh, it's not easy to be a philosopher: eat, think, talk, eat...",
    "You know, true is false and false is true if you think of it",
    "2 + 2 = 5 for extremely large values of 2...",
    "If thee cannot speak, thee must be silent",
];

/// Pick something to say.  One extra slot beyond [`PHRASES`] is the
/// speaker's own seat number.
pub fn say_something(agent: AgentId, rng: &mut AgentRng) -> String {
    let pick = rng.gen_range(0..=PHRASES.len());
    match PHRASES.get(pick) {
        Some(phrase) => (*phrase).to_owned(),
        None         => format!("My number is {}", agent.0 + 1),
    }
}
