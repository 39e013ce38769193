mod health;
mod narration;
mod narration_types;

pub use health::health_handler;
pub use narration::{
    CACHE_STATUS_HEADER, narrate_json_handler, narrate_query_handler, stream_json_handler,
    stream_query_handler,
};
pub use narration_types::{
    DegreesInput, ErrorResponse, NarrationBody, NarrationQuery, NarrationResponse,
};
