pub mod token;

pub use token::{AuthToken, CacheKey, TokenCache, TokenGrant, TokenIssuer};
