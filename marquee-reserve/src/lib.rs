pub mod coordinator;
pub mod gateway;
pub mod notify;
pub mod scheduler;

pub use coordinator::{ReservationCoordinator, ReservationPolicy};
pub use gateway::MockPaymentGateway;
pub use notify::LogNotifier;
pub use scheduler::TokioScheduler;
