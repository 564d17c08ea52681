pub mod credentials;
pub mod redirect;
pub mod roles;
pub mod session;

pub use credentials::{
    CredentialError, CredentialResolver, CredentialSource, MemoryTokenStore, SessionProvider,
    StaticSession, TokenStore,
};
pub use redirect::{NavigationLog, Navigator, SignInRedirect, UnauthorizedHandler};
pub use session::Session;
