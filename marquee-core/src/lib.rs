pub mod metadata;
pub mod notifier;
pub mod payment;
pub mod repository;
pub mod scheduler;
pub mod signature;

pub use metadata::{MetadataProvider, MovieDetails};
pub use notifier::Notifier;
pub use payment::{CheckoutSession, CreateSessionRequest, PaymentGateway};
pub use repository::{BookingRepository, MovieRepository, ShowRepository};
pub use scheduler::DelayedScheduler;
pub use signature::{sign_payload, verify_signature, SignatureError, SIGNATURE_HEADER};
