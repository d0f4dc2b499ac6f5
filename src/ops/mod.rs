pub mod display;
pub mod transitions;
