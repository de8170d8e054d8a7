pub mod cors_mw;
pub mod request_mw;
