pub mod tcp;
pub mod tls;
