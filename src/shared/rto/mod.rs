pub mod message_rto;
