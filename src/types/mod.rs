pub mod session;
pub mod track;
