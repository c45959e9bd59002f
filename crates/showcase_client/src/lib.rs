//! Showcase client: session-gated synchronization against the portfolio API.
//!
//! The pieces compose left to right: a [`PortfolioApi`] transport carries
//! the wire calls, [`SessionManager`] owns the credential session,
//! [`ResourceFetcher`] pulls the three admin collections,
//! [`MutationGateway`] serializes exclusion-set changes, and
//! [`AdminConsole`] ties them together around the cached collections.
mod api;
mod cancel;
mod console;
mod error;
mod mutate;
mod session;
mod sync;

pub use api::{ApiSettings, PortfolioApi, ReqwestApi};
pub use console::AdminConsole;
pub use error::ApiError;
pub use mutate::MutationGateway;
pub use session::SessionManager;
pub use sync::{ResourceFetcher, SyncBundle};
