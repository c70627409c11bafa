pub mod errors;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{ConfigError, LazypaneError, PtyError, SessionError};
pub use id::{new_id, SurfaceId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{Rect, RestorationRecord};
