//! The analysis-daemon boundary: request/response types for each request
//! category, the `AnalysisDaemon` trait implementations program against,
//! daemon notifications, connection-state tracking, and a cooperative
//! cancellation primitive shared by every suspending operation.

mod cancellation;
mod connection_state;
mod error;
mod notification;
mod requests;
mod trait_def;

pub use cancellation::CancellationToken;
pub use connection_state::ConnectionState;
pub use error::DaemonError;
pub use notification::{notification_channel, DaemonNotification, NotificationReceiver, NotificationSender};
pub use requests::*;
pub use trait_def::AnalysisDaemon;
