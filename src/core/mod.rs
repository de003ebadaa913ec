pub mod animated_scalar;
pub mod fading_group;
pub mod format;
pub mod search;
pub mod series;
pub mod ticks;
pub mod types;
pub mod window;

pub use animated_scalar::AnimatedScalar;
pub use fading_group::{FadeKey, Fading, FadingGroup};
pub use search::nearest_index;
pub use series::{ChartData, LineSeries, PrimaryAxis, RawDataset, SeriesId};
pub use ticks::{
    TIME_TICK_SPACING_PX, Tick, TickSet, TimeTickPlan, TimeUnit, ValueTicks, plan_time_ticks,
    time_ticks, time_ticks_with_spacing, value_ticks,
};
pub use types::{PixelRatio, Viewport};
pub use window::{MIN_WINDOW_SPAN, VisibleWindow};
