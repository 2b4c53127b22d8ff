//! Release record synchronization and attachment handling

mod attachments;
mod synchronizer;

pub use attachments::{ATTACHMENT_CONTENT_TYPE, AttachmentUploader, UploadOutcome};
pub use synchronizer::{ReleaseSynchronizer, SyncResult};
