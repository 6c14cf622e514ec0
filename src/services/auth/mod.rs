pub mod error;
pub mod introspection;
pub mod request_token;
pub mod token_resolver;

pub use error::UserInfoError;
pub use request_token::RequestTokenExtractor;
pub use token_resolver::{
    AuthorizationContextToken, TokenResolver, TokenValidationService, ValidationResponse,
};
