pub mod icons;
pub mod terminal;

pub use terminal::TerminalView;
