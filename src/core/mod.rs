pub mod arc_geometry;
pub mod bar_geometry;
pub mod bezier;
pub mod curve;
pub mod morph;
pub mod path;
pub mod path_measure;
pub mod primitives;
pub mod scale;
pub mod scrub;
pub mod ticks;
pub mod types;

pub use arc_geometry::{ArcSlice, pie_slices, slice_centroid, slice_path};
pub use bar_geometry::{BarRect, project_bars};
pub use bezier::CubicBezier;
pub use curve::{CurveBuilder, CurveGeometry};
pub use morph::PathMorpher;
pub use path::{CubicContour, Path, PathBuilder, PathSegment};
pub use path_measure::PathMeasure;
pub use scale::{Band, BandScale, LinearScale, Scale, extent};
pub use scrub::{ScrubMode, ScrubResolver, ScrubSelection, resolve_band};
pub use ticks::{AxisTickPlanner, Tick, TickSet};
pub use types::{DataPoint, PieDatum, PlotArea, Point, Viewport};
