pub mod user_response_rto;
pub mod user_rto;
