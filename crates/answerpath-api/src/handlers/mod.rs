pub mod document_delete;
pub mod document_download;
pub mod document_upload;
pub mod documents_list;
