//! Chart math shared by the SVG components: scales, series reshaping, the
//! zoom lock and nearest-point search.

pub mod crosshair;
pub mod scale;
pub mod series;
pub mod zoom;

pub use crosshair::nearest_index;
pub use scale::{nice_ticks, time_ticks, LinearScale};
pub use series::{CategorySeries, Segment, Series};
pub use zoom::{AxisRange, ZoomSync, ZoomTarget};
