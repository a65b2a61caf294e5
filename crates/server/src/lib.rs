//! 服务端作业定位
//!
//! 收到定位请求后依次查询实时作业表与跟踪表，返回作业当前所在的服务器。
//! 定位过程只读，不修改任何作业或跟踪记录。

pub mod metrics;
pub mod registry;
pub mod reply;
pub mod service;
pub mod snapshot;
pub mod tracking_table;

pub use metrics::LocateMetrics;
pub use registry::InMemoryJobRegistry;
pub use reply::{BatchReply, LocateRequest, ReplyChannel, ReplyChoice};
pub use service::LocationService;
pub use snapshot::ServerSnapshot;
pub use tracking_table::TrackingTable;
