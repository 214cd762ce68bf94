//! Evolutionary search over tournament schedules
//!
//! Builds on `ballstars-core` with the search machinery: mutation
//! operators that keep team statistics synchronized, single-point
//! crossover over round prefixes, survivor selection, a generational
//! driver and a simulated-annealing refiner.

pub mod annealing;
pub mod crossover;
pub mod mutation;
pub mod planner;
pub mod selection;

pub use annealing::{anneal, AnnealingConfig};
pub use crossover::{crossover, crossover_at};
pub use mutation::{
    add_match_from_pool, granular_mutate, mutate, EventPos, MatchPos, MutationKind, MUTATION_RATES,
};
pub use planner::{OffspringStrategy, Planner, PlannerConfig, PlannerResult};
pub use selection::{naive_selection, select, tournament_selection, SelectionStrategy};
