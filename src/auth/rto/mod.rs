pub mod auth_rto;
