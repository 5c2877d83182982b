//! Text shaping module

mod shaper;
mod run;

pub use shaper::{Direction, TextShaper};
pub use run::{PositionedGlyph, ShapedGlyph, ShapedRun};
