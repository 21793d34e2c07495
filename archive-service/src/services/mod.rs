pub mod content;
pub mod email;
pub mod identity;
pub mod policy;
pub mod session;

pub use content::ContentRepository;
pub use email::{CapturingEmailService, EmailProvider, LogEmailService, SentEmail};
pub use identity::IdentityService;
pub use policy::PolicyService;
pub use session::{SessionManager, SessionState};
