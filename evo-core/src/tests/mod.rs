mod support;

mod determinism;
mod selection_and_reproduction;
