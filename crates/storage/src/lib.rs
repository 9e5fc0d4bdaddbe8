pub mod db;

pub use db::{
    create_db, find_upload, insert_upload, list_uploads, DbPool, InsertError, StoredUpload,
};
