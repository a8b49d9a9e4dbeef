pub mod recovery;
pub mod request_id;
