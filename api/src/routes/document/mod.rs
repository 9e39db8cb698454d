pub mod document_response;
pub mod document_route;
