//! Dashboard stream client: one long-lived server-sent event subscription
//! decoded into status snapshots.
mod payload;
mod sse;
mod subscribe;
mod subscription;
mod types;

pub use payload::{decode_payload, PayloadError};
pub use sse::{Decoded, EventStreamDecoder, ServerEvent, Utf8StreamDecoder};
pub use subscribe::{
    pump, ByteStream, ChannelEventSink, EventSink, ReqwestSubscriber, SubscribeSettings,
    Subscriber,
};
pub use subscription::{Snapshots, Subscription};
pub use types::{FailureKind, SkipReason, StreamError, StreamEvent};
