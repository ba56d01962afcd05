mod experiment;
pub use experiment::Experiment;

mod palette;
pub use palette::Palette;
