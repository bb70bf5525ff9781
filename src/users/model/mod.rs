pub mod session_token_claims;
pub mod user;
