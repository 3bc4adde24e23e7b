pub mod bulk;
pub mod config;
pub mod constants;
pub mod correlation;
pub mod errors;
pub mod event_queue;
pub mod events;
pub mod http;
pub mod loading;
pub mod notify;
pub mod services;
pub mod web;

// Re-export commonly used types
pub use bulk::{BulkCollector, BulkItem, BulkReport, SettledCounts, SettledResult};
pub use config::{Config, ConfigManager};
pub use correlation::CorrelationService;
pub use errors::{ConsoleError, ConsoleResult};
pub use event_queue::{EventCallbacks, EventQueue};
pub use events::{EventDispatcher, OperationEvent, OperationPoller, OperationStatus};
pub use http::LxdClient;
pub use loading::{InstanceLoading, InstanceLoadingType, MemberLoading, MemberLoadingType};
pub use notify::{Notification, NotificationKind, Notifier};
pub use services::{InstanceService, MemberService, WarningService};
