mod common;

mod adapter;
mod arena;
mod hidden;
mod invariants;
mod scenarios;
