pub mod duration;
pub mod granularity;
pub mod scale;
pub mod stage;
pub mod ticks;
pub mod time_range;
pub mod time_scale;

pub use duration::{Duration, DurationUnit, Timezone};
pub use granularity::select_granularity;
pub use scale::{LinearScale, Scale, ScaleDomain, ScaleKind, build_scale};
pub use stage::{Margin, Stage};
pub use ticks::{linear_ticks, time_ticks};
pub use time_range::TimeRange;
pub use time_scale::TimeScale;
