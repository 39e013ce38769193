mod audio_format;
mod cache_key;
mod coordinate;
pub mod geo_math;
mod place;
mod session;
mod user_id;

pub use audio_format::{AudioCodec, AudioFormat};
pub use cache_key::CacheKey;
pub use coordinate::{Coordinate, CoordinateError};
pub use place::{Place, RankedPlace};
pub use session::{
    DEFAULT_RELOCATION_THRESHOLD_KM, RETAINED_ANSWERS, Session, VisitOutcome, VisitStage,
};
pub use user_id::UserId;
